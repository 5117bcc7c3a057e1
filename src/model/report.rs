use serde::Serialize;
use utoipa::ToSchema;

use crate::model::department::Department;
use crate::model::employee::EmploymentStatus;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub employee_id: String,
    pub name: String,
    pub department: Department,
    pub status: EmploymentStatus,
    pub total_hours: f64,
    pub total_days: u32,
    pub present_days: u32,
    pub leave_days: u32,
    pub absent_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub name: Department,
    pub total_hours: f64,
    /// Distinct employees with at least one record in the month.
    pub total_employees: usize,
    pub present_count: u32,
    pub leave_count: u32,
    pub absent_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "month": "2024-01",
    "department": "ALL",
    "employees": [{
        "employeeId": "6f1c0d1e-4a7b-4c52-9a0e-1b2f3c4d5e6f",
        "name": "Manish Agarwal",
        "department": "OFFICE STAFF",
        "status": "PAYROLL",
        "totalHours": 8.0,
        "totalDays": 1,
        "presentDays": 1,
        "leaveDays": 1,
        "absentDays": 1
    }],
    "departments": [{
        "name": "OFFICE STAFF",
        "totalHours": 8.0,
        "totalEmployees": 1,
        "presentCount": 1,
        "leaveCount": 1,
        "absentCount": 1
    }],
    "totalHours": 8.0,
    "employeeCount": 1,
    "averageHours": 8.0
}))]
pub struct MonthlyReport {
    pub month: String,
    /// The department filter applied to `employees`, or `ALL`.
    pub department: String,
    pub employees: Vec<EmployeeStats>,
    /// Always covers every department, whatever the filter.
    pub departments: Vec<DepartmentSummary>,
    pub total_hours: f64,
    pub employee_count: usize,
    pub average_hours: f64,
}
