use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Fixed set of factory departments. The string forms are stored verbatim
/// in both collections and must not change.
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
pub enum Department {
    #[serde(rename = "MOULDING DEPT. (A & B SHIFT)")]
    #[strum(serialize = "MOULDING DEPT. (A & B SHIFT)")]
    Moulding,

    #[serde(rename = "FOILING & HOT STAMPING DEPT.")]
    #[strum(serialize = "FOILING & HOT STAMPING DEPT.")]
    FoilingHotStamping,

    #[serde(rename = "DAY SHIFT REFILLING DEPT.")]
    #[strum(serialize = "DAY SHIFT REFILLING DEPT.")]
    DayShiftRefilling,

    #[serde(rename = "EXTRUSION DEPT. (A & B SHIFT)")]
    #[strum(serialize = "EXTRUSION DEPT. (A & B SHIFT)")]
    Extrusion,

    #[serde(rename = "PEN ASSEMBLING DEPT.")]
    #[strum(serialize = "PEN ASSEMBLING DEPT.")]
    PenAssembling,

    #[serde(rename = "DESPATCH DEPT. DAY SHIFT")]
    #[strum(serialize = "DESPATCH DEPT. DAY SHIFT")]
    DespatchDayShift,

    #[serde(rename = "OFFICE STAFF")]
    #[strum(serialize = "OFFICE STAFF")]
    OfficeStaff,
}

impl Department {
    /// Office staff are tracked by a daily status code instead of clock times.
    pub fn is_office_staff(self) -> bool {
        self == Department::OfficeStaff
    }
}

/// Parses a department filter value. `ALL` (any case) or a blank value
/// means "no constraint".
pub fn parse_filter(raw: Option<&str>) -> Result<Option<Department>, strum::ParseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}
