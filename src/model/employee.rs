use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::model::department::Department;

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
pub enum EmploymentStatus {
    #[serde(rename = "PAYROLL")]
    #[strum(serialize = "PAYROLL")]
    Payroll,

    #[serde(rename = "NON PAYROLL")]
    #[strum(serialize = "NON PAYROLL")]
    NonPayroll,
}

/// Parses a status filter value; `ALL` or blank means "no constraint".
pub fn parse_status_filter(
    raw: Option<&str>,
) -> Result<Option<EmploymentStatus>, strum::ParseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "6f1c0d1e-4a7b-4c52-9a0e-1b2f3c4d5e6f",
        "employeeId": "MP001",
        "name": "Rajesh Kumar",
        "department": "MOULDING DEPT. (A & B SHIFT)",
        "status": "PAYROLL",
        "registeredAt": "2024-01-01T09:00:00Z"
    })
)]
pub struct Employee {
    /// Opaque identifier assigned at registration. Attendance records point here.
    pub id: String,

    /// Human-chosen code, unique across the directory.
    #[schema(example = "MP001")]
    pub employee_id: String,

    #[schema(example = "Rajesh Kumar")]
    pub name: String,

    pub department: Department,

    pub status: EmploymentStatus,

    #[schema(value_type = String, format = "date-time")]
    pub registered_at: DateTime<Utc>,
}

impl Employee {
    pub fn is_office_staff(&self) -> bool {
        self.department.is_office_staff()
    }
}
