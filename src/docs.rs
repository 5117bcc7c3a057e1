use crate::api::attendance::{
    BulkAttendance, BulkAttendanceResponse, RecordAttendance, RecordAttendanceResponse,
};
use crate::api::employee::{EmployeeListResponse, EmployeeQuery, OptionsResponse, RegisterEmployee};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, EntryInput};
use crate::model::department::Department;
use crate::model::employee::{Employee, EmploymentStatus};
use crate::model::report::{DepartmentSummary, EmployeeStats, MonthlyReport};
use crate::service::directory::{DepartmentHeadcount, DirectoryStats, Headcount};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pen Factory Attendance API",
        version = "0.1.0",
        description = r#"
## Pen Factory Attendance System

Employee registration, daily attendance and monthly reports for a small
pen manufacturing facility.

### 🔹 Key Features
- **Employee Directory**
  - Register employees, list and filter them by department or payroll status
- **Attendance Entry**
  - Office staff are marked present (`1`), on leave (`L`) or absent (`A`)
  - Factory workers record in and out times; overnight shifts wrap past midnight
  - One record per employee per day, later entries update it in place
- **Bulk Entry**
  - Mark a whole department or payroll group for a day in one request
- **Monthly Reports**
  - Hours and present/leave/absent days per employee and per department

### 📦 Response Format
- JSON with camelCase keys, errors as `{"message": "..."}`

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::register_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::seed_sample_employees,
        crate::api::employee::list_options,

        crate::api::attendance::record_attendance,
        crate::api::attendance::record_bulk_attendance,
        crate::api::attendance::list_attendance,

        crate::api::report::monthly_report
    ),
    components(
        schemas(
            Department,
            EmploymentStatus,
            AttendanceStatus,
            Employee,
            RegisterEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            Headcount,
            DepartmentHeadcount,
            DirectoryStats,
            OptionsResponse,
            EntryInput,
            AttendanceRecord,
            RecordAttendance,
            RecordAttendanceResponse,
            BulkAttendance,
            BulkAttendanceResponse,
            EmployeeStats,
            DepartmentSummary,
            MonthlyReport
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Attendance", description = "Attendance entry APIs"),
        (name = "Report", description = "Monthly reporting APIs"),
    )
)]
pub struct ApiDoc;
