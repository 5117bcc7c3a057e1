use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::department::Department;
use crate::model::employee::EmploymentStatus;

/// Hours credited for a present office-staff day.
pub const OFFICE_DAY_HOURS: f64 = 8.0;

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: i64 = 86_400;

/// Daily status code. Office staff pick one of these; everyone else is
/// always recorded as present.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum AttendanceStatus {
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    Present,

    #[serde(rename = "L")]
    #[strum(serialize = "L")]
    Leave,

    #[serde(rename = "A")]
    #[strum(serialize = "A")]
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "0b8e2c2a-7d8f-4d0e-8f4c-5b1e6a7c9d10",
        "employeeId": "6f1c0d1e-4a7b-4c52-9a0e-1b2f3c4d5e6f",
        "employeeName": "Rajesh Kumar",
        "department": "MOULDING DEPT. (A & B SHIFT)",
        "status": "PAYROLL",
        "date": "2024-01-05",
        "inTime": "22:00",
        "outTime": "06:00",
        "workingHours": 8.0,
        "attendanceStatus": "1",
        "isOfficeStaff": false,
        "createdAt": "2024-01-05T22:10:00Z"
    })
)]
pub struct AttendanceRecord {
    /// Stable across updates of the same (employee, date) entry.
    pub id: String,

    /// The employee's opaque `id`, not the human-chosen code.
    pub employee_id: String,

    // Snapshot of the employee at entry time. Never re-synced.
    pub employee_name: String,
    pub department: Department,
    pub status: EmploymentStatus,

    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[serde(default)]
    pub in_time: String,
    #[serde(default)]
    pub out_time: String,

    #[serde(default)]
    pub working_hours: f64,

    pub attendance_status: AttendanceStatus,

    pub is_office_staff: bool,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey {
            employee_id: &self.employee_id,
            date: self.date,
        }
    }
}

/// The (employee, date) pair that identifies one attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaturalKey<'a> {
    pub employee_id: &'a str,
    pub date: NaiveDate,
}

/// Entered data for one employee on one day. Office staff need `status`,
/// everyone else needs both clock times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    #[schema(example = "1")]
    pub status: Option<String>,
    #[schema(example = "09:00")]
    pub in_time: Option<String>,
    #[schema(example = "18:00")]
    pub out_time: Option<String>,
}

fn parse_clock(raw: &str) -> Result<NaiveTime, AppError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("Invalid time '{raw}', expected HH:MM")))
}

/// Hours between two times of day. An out-time earlier than the in-time
/// falls on the next calendar day.
pub fn working_hours(in_time: &str, out_time: &str) -> Result<f64, AppError> {
    let start = parse_clock(in_time)?;
    let end = parse_clock(out_time)?;

    let mut seconds = (end - start).num_seconds();
    if end < start {
        seconds += SECONDS_PER_DAY;
    }

    Ok(seconds as f64 / SECONDS_PER_HOUR)
}

/// A calendar year-month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for Month {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        // Exactly YYYY-MM; the stored form is always zero padded.
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit);
        if !well_formed {
            return Err(AppError::Validation(format!(
                "Invalid month '{raw}', expected YYYY-MM"
            )));
        }
        NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
            .map(Month::of)
            .map_err(|_| AppError::Validation(format!("Invalid month '{raw}', expected YYYY-MM")))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
