use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::model::department::Department;
use crate::model::employee::{Employee, EmploymentStatus};
use crate::store::{self, Collection, RecordStore};

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub employee_id: String,
    pub name: String,
    pub department: Department,
    pub status: EmploymentStatus,
}

/// `None` on either field means "no constraint".
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeFilter {
    pub department: Option<Department>,
    pub status: Option<EmploymentStatus>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        self.department.is_none_or(|d| d == employee.department)
            && self.status.is_none_or(|s| s == employee.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Headcount {
    pub total: usize,
    pub payroll: usize,
    pub non_payroll: usize,
}

impl Headcount {
    fn count(&mut self, employee: &Employee) {
        self.total += 1;
        match employee.status {
            EmploymentStatus::Payroll => self.payroll += 1,
            EmploymentStatus::NonPayroll => self.non_payroll += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentHeadcount {
    pub department: Department,
    #[serde(flatten)]
    pub headcount: Headcount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    #[serde(flatten)]
    pub overall: Headcount,
    pub by_department: Vec<DepartmentHeadcount>,
}

/// Sample roster for trying the system out.
const SAMPLE_ROSTER: [(&str, &str, Department, EmploymentStatus); 15] = [
    ("Rajesh Kumar", "MP001", Department::Moulding, EmploymentStatus::Payroll),
    ("Priya Sharma", "MN001", Department::Moulding, EmploymentStatus::NonPayroll),
    ("Amit Singh", "FP001", Department::FoilingHotStamping, EmploymentStatus::Payroll),
    ("Sunita Devi", "FN001", Department::FoilingHotStamping, EmploymentStatus::NonPayroll),
    ("Vikash Yadav", "RP001", Department::DayShiftRefilling, EmploymentStatus::Payroll),
    ("Kavita Gupta", "RN001", Department::DayShiftRefilling, EmploymentStatus::NonPayroll),
    ("Ravi Verma", "EP001", Department::Extrusion, EmploymentStatus::Payroll),
    ("Meera Joshi", "EN001", Department::Extrusion, EmploymentStatus::NonPayroll),
    ("Suresh Patel", "PP001", Department::PenAssembling, EmploymentStatus::Payroll),
    ("Anita Roy", "PN001", Department::PenAssembling, EmploymentStatus::NonPayroll),
    ("Deepak Mishra", "DP001", Department::DespatchDayShift, EmploymentStatus::Payroll),
    ("Rekha Singh", "DN001", Department::DespatchDayShift, EmploymentStatus::NonPayroll),
    ("Manish Agarwal", "OP001", Department::OfficeStaff, EmploymentStatus::Payroll),
    ("Seema Khanna", "OP002", Department::OfficeStaff, EmploymentStatus::Payroll),
    ("Rohit Saxena", "ON001", Department::OfficeStaff, EmploymentStatus::NonPayroll),
];

pub fn all(store: &dyn RecordStore) -> Result<Vec<Employee>, AppError> {
    Ok(store::load(store, Collection::Employees)?)
}

pub fn list(store: &dyn RecordStore, filter: EmployeeFilter) -> Result<Vec<Employee>, AppError> {
    let employees = all(store)?;
    let filtered: Vec<Employee> = employees.into_iter().filter(|e| filter.matches(e)).collect();
    debug!(?filter, count = filtered.len(), "Listed employees");
    Ok(filtered)
}

pub fn find(store: &dyn RecordStore, id: &str) -> Result<Employee, AppError> {
    all(store)?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))
}

/// Registers one employee. The code must be unique; on any error the
/// stored directory is left as it was.
pub fn register(
    store: &dyn RecordStore,
    new: NewEmployee,
    now: DateTime<Utc>,
) -> Result<Employee, AppError> {
    if new.name.trim().is_empty() || new.employee_id.trim().is_empty() {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }

    let mut employees = all(store)?;
    if employees.iter().any(|e| e.employee_id == new.employee_id) {
        return Err(AppError::DuplicateKey("Employee ID already exists".to_string()));
    }

    let employee = Employee {
        id: Uuid::new_v4().to_string(),
        employee_id: new.employee_id,
        name: new.name,
        department: new.department,
        status: new.status,
        registered_at: now,
    };
    employees.push(employee.clone());
    store::save(store, Collection::Employees, &employees)?;

    info!(
        id = %employee.id,
        employee_id = %employee.employee_id,
        department = %employee.department,
        "Employee registered"
    );
    Ok(employee)
}

/// Adds the sample roster, skipping codes already in use. Returns how
/// many were added.
pub fn seed_sample(store: &dyn RecordStore, now: DateTime<Utc>) -> Result<usize, AppError> {
    let mut employees = all(store)?;

    let fresh: Vec<Employee> = SAMPLE_ROSTER
        .iter()
        .filter(|(_, code, _, _)| !employees.iter().any(|e| e.employee_id == *code))
        .map(|(name, code, department, status)| Employee {
            id: Uuid::new_v4().to_string(),
            employee_id: code.to_string(),
            name: name.to_string(),
            department: *department,
            status: *status,
            registered_at: now,
        })
        .collect();

    let added = fresh.len();
    if added > 0 {
        employees.extend(fresh);
        store::save(store, Collection::Employees, &employees)?;
    }

    info!(added, "Sample employees seeded");
    Ok(added)
}

/// Headcount of `employees` overall and per department, departments in
/// order of first appearance.
pub fn stats(employees: &[Employee]) -> DirectoryStats {
    let mut stats = DirectoryStats::default();
    for employee in employees {
        stats.overall.count(employee);
        match stats
            .by_department
            .iter_mut()
            .find(|d| d.department == employee.department)
        {
            Some(entry) => entry.headcount.count(employee),
            None => {
                let mut headcount = Headcount::default();
                headcount.count(employee);
                stats.by_department.push(DepartmentHeadcount {
                    department: employee.department,
                    headcount,
                });
            }
        }
    }
    stats
}
