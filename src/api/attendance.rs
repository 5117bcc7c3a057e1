use std::collections::HashMap;

use crate::{
    api::employee::employee_filter,
    db::RecordDb,
    model::attendance::{AttendanceRecord, EntryInput},
    service::{
        directory,
        upsert::{self, AttendanceQuery, BulkEntries, BulkSelection},
    },
};
use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendance {
    /// Opaque `id` of the employee, not the employee code.
    pub employee_id: String,
    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
    /// Office staff only: `1`, `L` or `A`.
    #[schema(example = "1")]
    pub status: Option<String>,
    #[schema(example = "09:00")]
    pub in_time: Option<String>,
    #[schema(example = "18:00")]
    pub out_time: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RecordAttendanceResponse {
    #[schema(example = "Attendance recorded successfully")]
    pub message: String,
    pub created: bool,
    pub record: AttendanceRecord,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendance {
    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
    /// Select by department (or `ALL`).
    #[schema(example = "PEN ASSEMBLING DEPT.")]
    pub department: Option<String>,
    /// Select by employment status (or `ALL`).
    #[schema(example = "PAYROLL")]
    pub employment_status: Option<String>,
    /// Shared entry; blanks default to present, 09:00 to 18:00.
    pub defaults: Option<EntryInput>,
    /// Per-employee entries keyed by employee `id`. Overrides `defaults`.
    pub entries: Option<HashMap<String, EntryInput>>,
}

#[derive(Serialize, ToSchema)]
pub struct BulkAttendanceResponse {
    #[schema(example = "Bulk attendance recorded: 3 new records, 0 updated records")]
    pub message: String,
    pub created: usize,
    pub updated: usize,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceListQuery {
    /// `YYYY-MM-DD`
    #[param(value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
    /// Opaque employee id
    pub employee_id: Option<String>,
}

/// Record one employee's attendance for a day
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = RecordAttendance,
    responses(
        (status = 201, description = "New record created", body = RecordAttendanceResponse),
        (status = 200, description = "Existing record for that day updated", body = RecordAttendanceResponse),
        (status = 400, description = "Missing status or times", body = Object, example = json!({
            "message": "Please enter both in-time and out-time for MP001"
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn record_attendance(
    db: web::Data<RecordDb>,
    payload: web::Json<RecordAttendance>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let entry = EntryInput {
        status: payload.status,
        in_time: payload.in_time,
        out_time: payload.out_time,
    };

    let _guard = db.write_guard();
    let employee = directory::find(db.store(), &payload.employee_id)?;
    let outcome = upsert::upsert(db.store(), &employee, payload.date, &entry, Utc::now())?;

    let body = RecordAttendanceResponse {
        message: "Attendance recorded successfully".to_string(),
        created: outcome.created,
        record: outcome.record,
    };
    if body.created {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::Ok().json(body))
    }
}

/// Record attendance for every employee in a department or status group
#[utoipa::path(
    post,
    path = "/api/attendance/bulk",
    request_body = BulkAttendance,
    responses(
        (status = 200, description = "Bulk attendance recorded", body = BulkAttendanceResponse),
        (status = 400, description = "Invalid entry for a selected employee"),
        (status = 422, description = "Selection matched no employees", body = Object, example = json!({
            "message": "No employees selected for bulk attendance"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn record_bulk_attendance(
    db: web::Data<RecordDb>,
    payload: web::Json<BulkAttendance>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let filter = employee_filter(
        payload.department.as_deref(),
        payload.employment_status.as_deref(),
    )?;
    let selection = BulkSelection {
        department: filter.department,
        status: filter.status,
    };
    let entries = match payload.entries {
        Some(map) => BulkEntries::Individual(map),
        None => BulkEntries::Shared(payload.defaults.unwrap_or_default().with_bulk_defaults()),
    };

    let _guard = db.write_guard();
    let employees = directory::all(db.store())?;
    let outcome = upsert::bulk_upsert(
        db.store(),
        &employees,
        selection,
        payload.date,
        &entries,
        Utc::now(),
    )?;

    Ok(HttpResponse::Ok().json(BulkAttendanceResponse {
        message: format!(
            "Bulk attendance recorded: {} new records, {} updated records",
            outcome.created, outcome.updated
        ),
        created: outcome.created,
        updated: outcome.updated,
        records: outcome.records,
    }))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceListQuery),
    responses(
        (status = 200, description = "Attendance records", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    db: web::Data<RecordDb>,
    query: web::Query<AttendanceListQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();
    let records = upsert::list(
        db.store(),
        &AttendanceQuery {
            date: query.date,
            employee_id: query.employee_id,
        },
    )?;
    Ok(HttpResponse::Ok().json(records))
}
