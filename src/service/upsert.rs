use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, EntryInput, NaturalKey, OFFICE_DAY_HOURS, working_hours,
};
use crate::model::department::Department;
use crate::model::employee::{Employee, EmploymentStatus};
use crate::store::{self, Collection, RecordStore};

pub const DEFAULT_IN_TIME: &str = "09:00";
pub const DEFAULT_OUT_TIME: &str = "18:00";

#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub record: AttendanceRecord,
    pub created: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    pub created: usize,
    pub updated: usize,
    pub records: Vec<AttendanceRecord>,
}

/// Which employees a bulk entry applies to. At least one criterion must
/// be set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkSelection {
    pub department: Option<Department>,
    pub status: Option<EmploymentStatus>,
}

impl BulkSelection {
    fn matches(&self, employee: &Employee) -> bool {
        if self.department.is_none() && self.status.is_none() {
            return false;
        }
        self.department.is_none_or(|d| d == employee.department)
            && self.status.is_none_or(|s| s == employee.status)
    }
}

#[derive(Debug, Clone)]
pub enum BulkEntries {
    /// One entry for everyone in the selection.
    Shared(EntryInput),
    /// Entries keyed by employee `id`; every selected employee needs one.
    Individual(HashMap<String, EntryInput>),
}

impl EntryInput {
    /// Fills blanks with the bulk form defaults: present, 09:00 to 18:00.
    pub fn with_bulk_defaults(self) -> Self {
        Self {
            status: self.status.or_else(|| Some(AttendanceStatus::Present.to_string())),
            in_time: self.in_time.or_else(|| Some(DEFAULT_IN_TIME.to_string())),
            out_time: self.out_time.or_else(|| Some(DEFAULT_OUT_TIME.to_string())),
        }
    }
}

struct Derived {
    in_time: String,
    out_time: String,
    working_hours: f64,
    attendance_status: AttendanceStatus,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn derive(employee: &Employee, entry: &EntryInput) -> Result<Derived, AppError> {
    if employee.is_office_staff() {
        let raw = non_blank(&entry.status).ok_or_else(|| {
            AppError::Validation(format!(
                "Please enter status for office staff {} (1 for present, L for leave, A for absent)",
                employee.employee_id
            ))
        })?;
        let attendance_status: AttendanceStatus = raw.parse().map_err(|_| {
            AppError::Validation(format!(
                "Invalid attendance status '{raw}' (1 for present, L for leave, A for absent)"
            ))
        })?;
        let working_hours = if attendance_status == AttendanceStatus::Present {
            OFFICE_DAY_HOURS
        } else {
            0.0
        };

        Ok(Derived {
            in_time: String::new(),
            out_time: String::new(),
            working_hours,
            attendance_status,
        })
    } else {
        let (in_time, out_time) = match (non_blank(&entry.in_time), non_blank(&entry.out_time)) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                return Err(AppError::Validation(format!(
                    "Please enter both in-time and out-time for {}",
                    employee.employee_id
                )));
            }
        };

        Ok(Derived {
            working_hours: working_hours(in_time, out_time)?,
            in_time: in_time.to_string(),
            out_time: out_time.to_string(),
            attendance_status: AttendanceStatus::Present,
        })
    }
}

/// Computes the record for (employee, date) and merges it into `records`
/// in place, keeping `id` and `createdAt` of an existing entry.
fn merge(
    records: &mut Vec<AttendanceRecord>,
    employee: &Employee,
    date: NaiveDate,
    entry: &EntryInput,
    now: DateTime<Utc>,
) -> Result<UpsertOutcome, AppError> {
    let derived = derive(employee, entry)?;
    let key = NaturalKey {
        employee_id: &employee.id,
        date,
    };
    let existing = records.iter().position(|r| r.natural_key() == key);

    let (id, created_at) = match existing {
        Some(i) => (records[i].id.clone(), records[i].created_at),
        None => (Uuid::new_v4().to_string(), now),
    };

    let record = AttendanceRecord {
        id,
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        department: employee.department,
        status: employee.status,
        date,
        in_time: derived.in_time,
        out_time: derived.out_time,
        working_hours: derived.working_hours,
        attendance_status: derived.attendance_status,
        is_office_staff: employee.is_office_staff(),
        created_at,
    };

    match existing {
        Some(i) => records[i] = record.clone(),
        None => records.push(record.clone()),
    }

    Ok(UpsertOutcome {
        record,
        created: existing.is_none(),
    })
}

/// Records one employee's attendance for `date`, replacing any entry that
/// already exists for the same day.
pub fn upsert(
    store: &dyn RecordStore,
    employee: &Employee,
    date: NaiveDate,
    entry: &EntryInput,
    now: DateTime<Utc>,
) -> Result<UpsertOutcome, AppError> {
    let mut records: Vec<AttendanceRecord> = store::load(store, Collection::Attendance)?;
    let outcome = merge(&mut records, employee, date, entry, now)?;
    store::save(store, Collection::Attendance, &records)?;

    info!(
        record_id = %outcome.record.id,
        employee_id = %employee.employee_id,
        %date,
        created = outcome.created,
        working_hours = outcome.record.working_hours,
        "Attendance recorded"
    );
    Ok(outcome)
}

/// Applies one day's attendance to every employee matched by `selection`.
/// All records are validated before the single write; an error leaves the
/// stored collection untouched.
pub fn bulk_upsert(
    store: &dyn RecordStore,
    employees: &[Employee],
    selection: BulkSelection,
    date: NaiveDate,
    entries: &BulkEntries,
    now: DateTime<Utc>,
) -> Result<BulkOutcome, AppError> {
    let selected: Vec<&Employee> = employees.iter().filter(|e| selection.matches(e)).collect();
    if selected.is_empty() {
        return Err(AppError::EmptySelection(
            "No employees selected for bulk attendance".to_string(),
        ));
    }

    let mut records: Vec<AttendanceRecord> = store::load(store, Collection::Attendance)?;
    let mut outcome = BulkOutcome::default();

    for employee in selected {
        let entry = match entries {
            BulkEntries::Shared(entry) => entry,
            BulkEntries::Individual(map) => map.get(&employee.id).ok_or_else(|| {
                AppError::Validation(format!(
                    "Missing attendance entry for employee {}",
                    employee.employee_id
                ))
            })?,
        };

        let merged = merge(&mut records, employee, date, entry, now)?;
        if merged.created {
            outcome.created += 1;
        } else {
            outcome.updated += 1;
        }
        outcome.records.push(merged.record);
    }

    store::save(store, Collection::Attendance, &records)?;

    info!(
        %date,
        ?selection,
        created = outcome.created,
        updated = outcome.updated,
        "Bulk attendance recorded"
    );
    Ok(outcome)
}

#[derive(Debug, Clone, Default)]
pub struct AttendanceQuery {
    pub date: Option<NaiveDate>,
    pub employee_id: Option<String>,
}

pub fn list(store: &dyn RecordStore, query: &AttendanceQuery) -> Result<Vec<AttendanceRecord>, AppError> {
    let records: Vec<AttendanceRecord> = store::load(store, Collection::Attendance)?;
    let filtered: Vec<AttendanceRecord> = records
        .into_iter()
        .filter(|r| query.date.is_none_or(|d| d == r.date))
        .filter(|r| query.employee_id.as_deref().is_none_or(|id| id == r.employee_id))
        .collect();
    debug!(?query, count = filtered.len(), "Listed attendance");
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, hour, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn employee(id: &str, department: Department, status: EmploymentStatus) -> Employee {
        Employee {
            id: id.to_string(),
            employee_id: format!("CODE-{id}"),
            name: format!("Name {id}"),
            department,
            status,
            registered_at: at(0),
        }
    }

    fn status(code: &str) -> EntryInput {
        EntryInput {
            status: Some(code.to_string()),
            ..Default::default()
        }
    }

    fn times(in_time: &str, out_time: &str) -> EntryInput {
        EntryInput {
            status: None,
            in_time: Some(in_time.to_string()),
            out_time: Some(out_time.to_string()),
        }
    }

    fn stored(store: &MemoryStore) -> Vec<AttendanceRecord> {
        store::load(store, Collection::Attendance).unwrap()
    }

    #[test]
    fn office_staff_hours_follow_status() {
        let store = MemoryStore::default();
        let clerk = employee("o1", Department::OfficeStaff, EmploymentStatus::Payroll);

        let present = upsert(&store, &clerk, day(1), &status("1"), at(9)).unwrap();
        assert_eq!(present.record.working_hours, 8.0);
        assert!(present.record.is_office_staff);
        assert_eq!(present.record.in_time, "");

        let leave = upsert(&store, &clerk, day(2), &status("L"), at(9)).unwrap();
        assert_eq!(leave.record.working_hours, 0.0);
        assert_eq!(leave.record.attendance_status, AttendanceStatus::Leave);

        let absent = upsert(&store, &clerk, day(3), &status("A"), at(9)).unwrap();
        assert_eq!(absent.record.working_hours, 0.0);
    }

    #[test]
    fn overnight_shift_is_eight_hours() {
        let store = MemoryStore::default();
        let worker = employee("w1", Department::Extrusion, EmploymentStatus::NonPayroll);

        let outcome = upsert(&store, &worker, day(1), &times("22:00", "06:00"), at(22)).unwrap();
        assert_eq!(outcome.record.working_hours, 8.0);
        assert_eq!(outcome.record.attendance_status, AttendanceStatus::Present);
        assert!(!outcome.record.is_office_staff);
    }

    #[test]
    fn second_entry_for_same_day_updates_in_place() {
        let store = MemoryStore::default();
        let worker = employee("w1", Department::Moulding, EmploymentStatus::Payroll);

        let first = upsert(&store, &worker, day(5), &times("09:00", "17:00"), at(9)).unwrap();
        let second = upsert(&store, &worker, day(5), &times("08:00", "18:30"), at(19)).unwrap();

        assert!(first.created);
        assert!(!second.created);

        let records = stored(&store);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, first.record.id);
        assert_eq!(records[0].created_at, at(9));
        assert_eq!(records[0].working_hours, 10.5);
        assert_eq!(records[0].out_time, "18:30");
    }

    #[test]
    fn missing_fields_are_rejected_without_writing() {
        let store = MemoryStore::default();
        let clerk = employee("o1", Department::OfficeStaff, EmploymentStatus::Payroll);
        let worker = employee("w1", Department::Moulding, EmploymentStatus::Payroll);

        let err = upsert(&store, &clerk, day(1), &times("09:00", "17:00"), at(9)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = upsert(&store, &worker, day(1), &status("1"), at(9)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let half = EntryInput {
            in_time: Some("09:00".into()),
            out_time: Some("  ".into()),
            ..Default::default()
        };
        let err = upsert(&store, &worker, day(1), &half, at(9)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = upsert(&store, &clerk, day(1), &status("X"), at(9)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(store.read(Collection::Attendance).unwrap().is_none());
    }

    #[test]
    fn snapshot_survives_employee_changes() {
        let store = MemoryStore::default();
        let mut worker = employee("w1", Department::Moulding, EmploymentStatus::Payroll);
        upsert(&store, &worker, day(1), &times("09:00", "17:00"), at(9)).unwrap();

        worker.department = Department::Extrusion;
        worker.name = "Renamed".to_string();
        upsert(&store, &worker, day(2), &times("09:00", "17:00"), at(9)).unwrap();

        let records = stored(&store);
        assert_eq!(records[0].department, Department::Moulding);
        assert_eq!(records[0].employee_name, "Name w1");
        assert_eq!(records[1].department, Department::Extrusion);
    }

    fn roster() -> Vec<Employee> {
        vec![
            employee("m1", Department::Moulding, EmploymentStatus::Payroll),
            employee("m2", Department::Moulding, EmploymentStatus::NonPayroll),
            employee("o1", Department::OfficeStaff, EmploymentStatus::Payroll),
            employee("p1", Department::PenAssembling, EmploymentStatus::Payroll),
        ]
    }

    #[test]
    fn bulk_creates_then_updates() {
        let store = MemoryStore::default();
        let selection = BulkSelection {
            department: Some(Department::Moulding),
            status: None,
        };
        let entries = BulkEntries::Shared(EntryInput::default().with_bulk_defaults());

        let first = bulk_upsert(&store, &roster(), selection, day(8), &entries, at(9)).unwrap();
        assert_eq!((first.created, first.updated), (2, 0));
        assert!(first.records.iter().all(|r| r.working_hours == 9.0));

        let again = bulk_upsert(&store, &roster(), selection, day(8), &entries, at(18)).unwrap();
        assert_eq!((again.created, again.updated), (0, 2));

        let records = stored(&store);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.created_at == at(9)));
    }

    #[test]
    fn bulk_by_status_mixes_office_and_factory() {
        let store = MemoryStore::default();
        let selection = BulkSelection {
            department: None,
            status: Some(EmploymentStatus::Payroll),
        };
        let entries = BulkEntries::Shared(EntryInput {
            status: Some("L".into()),
            in_time: Some("07:00".into()),
            out_time: Some("15:00".into()),
        });

        let outcome = bulk_upsert(&store, &roster(), selection, day(8), &entries, at(9)).unwrap();
        assert_eq!(outcome.created, 3);

        let clerk = outcome.records.iter().find(|r| r.employee_id == "o1").unwrap();
        assert_eq!(clerk.attendance_status, AttendanceStatus::Leave);
        assert_eq!(clerk.working_hours, 0.0);

        let moulder = outcome.records.iter().find(|r| r.employee_id == "m1").unwrap();
        assert_eq!(moulder.working_hours, 8.0);
        assert_eq!(moulder.attendance_status, AttendanceStatus::Present);
    }

    #[test]
    fn bulk_with_empty_selection_is_an_error() {
        let store = MemoryStore::default();
        let entries = BulkEntries::Shared(EntryInput::default().with_bulk_defaults());

        let none = BulkSelection {
            department: Some(Department::DespatchDayShift),
            status: None,
        };
        let err = bulk_upsert(&store, &roster(), none, day(8), &entries, at(9)).unwrap_err();
        assert!(matches!(err, AppError::EmptySelection(_)));

        let err = bulk_upsert(&store, &roster(), BulkSelection::default(), day(8), &entries, at(9))
            .unwrap_err();
        assert!(matches!(err, AppError::EmptySelection(_)));

        assert!(store.read(Collection::Attendance).unwrap().is_none());
    }

    #[test]
    fn bulk_individual_entries_are_all_or_nothing() {
        let store = MemoryStore::default();
        let selection = BulkSelection {
            department: Some(Department::Moulding),
            status: None,
        };

        let mut map = HashMap::new();
        map.insert("m1".to_string(), times("09:00", "17:00"));
        let err = bulk_upsert(
            &store,
            &roster(),
            selection,
            day(8),
            &BulkEntries::Individual(map.clone()),
            at(9),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.read(Collection::Attendance).unwrap().is_none());

        map.insert("m2".to_string(), times("20:00", "04:30"));
        let outcome = bulk_upsert(
            &store,
            &roster(),
            selection,
            day(8),
            &BulkEntries::Individual(map),
            at(9),
        )
        .unwrap();
        assert_eq!(outcome.created, 2);
        let night = outcome.records.iter().find(|r| r.employee_id == "m2").unwrap();
        assert_eq!(night.working_hours, 8.5);
    }

    #[test]
    fn list_filters_by_date_and_employee() {
        let store = MemoryStore::default();
        let worker = employee("w1", Department::Moulding, EmploymentStatus::Payroll);
        let other = employee("w2", Department::Moulding, EmploymentStatus::Payroll);
        upsert(&store, &worker, day(1), &times("09:00", "17:00"), at(9)).unwrap();
        upsert(&store, &worker, day(2), &times("09:00", "17:00"), at(9)).unwrap();
        upsert(&store, &other, day(2), &times("09:00", "17:00"), at(9)).unwrap();

        let by_day = list(&store, &AttendanceQuery { date: Some(day(2)), employee_id: None }).unwrap();
        assert_eq!(by_day.len(), 2);

        let by_employee = list(
            &store,
            &AttendanceQuery {
                date: None,
                employee_id: Some("w1".into()),
            },
        )
        .unwrap();
        assert_eq!(by_employee.len(), 2);

        assert_eq!(list(&store, &AttendanceQuery::default()).unwrap().len(), 3);
    }
}
