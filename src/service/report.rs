use std::collections::{HashMap, HashSet};

use crate::model::attendance::{AttendanceRecord, AttendanceStatus, Month, OFFICE_DAY_HOURS};
use crate::model::department::Department;
use crate::model::report::{DepartmentSummary, EmployeeStats, MonthlyReport};

struct DepartmentTally<'a> {
    summary: DepartmentSummary,
    employees: HashSet<&'a str>,
}

fn new_stats(record: &AttendanceRecord) -> EmployeeStats {
    EmployeeStats {
        employee_id: record.employee_id.clone(),
        name: record.employee_name.clone(),
        department: record.department,
        status: record.status,
        total_hours: 0.0,
        total_days: 0,
        present_days: 0,
        leave_days: 0,
        absent_days: 0,
    }
}

fn credit_employee(stats: &mut EmployeeStats, record: &AttendanceRecord) {
    if record.is_office_staff {
        match record.attendance_status {
            AttendanceStatus::Present => {
                stats.total_hours += OFFICE_DAY_HOURS;
                stats.total_days += 1;
                stats.present_days += 1;
            }
            AttendanceStatus::Leave => stats.leave_days += 1,
            AttendanceStatus::Absent => stats.absent_days += 1,
        }
    } else {
        stats.total_hours += record.working_hours;
        stats.total_days += 1;
        stats.present_days += 1;
    }
}

fn credit_department<'a>(tally: &mut DepartmentTally<'a>, record: &'a AttendanceRecord) {
    tally.employees.insert(record.employee_id.as_str());
    tally.summary.total_hours += record.working_hours;
    match record.attendance_status {
        AttendanceStatus::Present => tally.summary.present_count += 1,
        AttendanceStatus::Leave => tally.summary.leave_count += 1,
        AttendanceStatus::Absent => tally.summary.absent_count += 1,
    }
}

/// Per-employee stats (honouring `department`) and per-department
/// summaries (ignoring it) for one month. Both lists keep the order in
/// which employees and departments first appear in `records`.
pub fn aggregate(
    records: &[AttendanceRecord],
    month: Month,
    department: Option<Department>,
) -> MonthlyReport {
    let mut employees: Vec<EmployeeStats> = Vec::new();
    let mut employee_slots: HashMap<&str, usize> = HashMap::new();
    let mut departments: Vec<DepartmentTally<'_>> = Vec::new();
    let mut department_slots: HashMap<Department, usize> = HashMap::new();

    for record in records.iter().filter(|r| month.contains(r.date)) {
        let slot = *department_slots.entry(record.department).or_insert_with(|| {
            departments.push(DepartmentTally {
                summary: DepartmentSummary {
                    name: record.department,
                    total_hours: 0.0,
                    total_employees: 0,
                    present_count: 0,
                    leave_count: 0,
                    absent_count: 0,
                },
                employees: HashSet::new(),
            });
            departments.len() - 1
        });
        credit_department(&mut departments[slot], record);

        if department.is_some_and(|d| d != record.department) {
            continue;
        }

        let slot = *employee_slots
            .entry(record.employee_id.as_str())
            .or_insert_with(|| {
                employees.push(new_stats(record));
                employees.len() - 1
            });
        credit_employee(&mut employees[slot], record);
    }

    let departments: Vec<DepartmentSummary> = departments
        .into_iter()
        .map(|tally| DepartmentSummary {
            total_employees: tally.employees.len(),
            ..tally.summary
        })
        .collect();

    let total_hours: f64 = employees.iter().map(|e| e.total_hours).sum();
    let employee_count = employees.len();
    let average_hours = if employee_count == 0 {
        0.0
    } else {
        total_hours / employee_count as f64
    };

    tracing::debug!(
        %month,
        employees = employee_count,
        departments = departments.len(),
        "Monthly report aggregated"
    );

    MonthlyReport {
        month: month.to_string(),
        department: department.map_or_else(|| "ALL".to_string(), |d| d.to_string()),
        employees,
        departments,
        total_hours,
        employee_count,
        average_hours,
    }
}
