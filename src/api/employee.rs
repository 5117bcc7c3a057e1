use crate::{
    db::RecordDb,
    error::AppError,
    model::{
        attendance::AttendanceStatus,
        department::{self, Department},
        employee::{self as employee_model, Employee, EmploymentStatus},
    },
    service::directory::{self, DirectoryStats, EmployeeFilter, NewEmployee},
};
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::IntoEnumIterator;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEmployee {
    #[schema(example = "MP001")]
    pub employee_id: String,
    #[schema(example = "Rajesh Kumar")]
    pub name: String,
    pub department: Department,
    pub status: EmploymentStatus,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Department name or `ALL`
    pub department: Option<String>,
    /// `PAYROLL`, `NON PAYROLL` or `ALL`
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    /// Headcount of `data`.
    pub filtered: DirectoryStats,
    /// Headcount of the whole directory.
    pub overall: DirectoryStats,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    #[schema(example = json!(["OFFICE STAFF"]))]
    pub departments: Vec<String>,
    #[schema(example = json!(["PAYROLL", "NON PAYROLL"]))]
    pub statuses: Vec<String>,
    #[schema(example = json!(["1", "L", "A"]))]
    pub attendance_statuses: Vec<String>,
}

pub(crate) fn employee_filter(
    department: Option<&str>,
    status: Option<&str>,
) -> Result<EmployeeFilter, AppError> {
    let department = department::parse_filter(department)
        .map_err(|_| AppError::Validation("Unknown department".to_string()))?;
    let status = employee_model::parse_status_filter(status)
        .map_err(|_| AppError::Validation("Unknown employment status".to_string()))?;
    Ok(EmployeeFilter { department, status })
}

/// Register Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = RegisterEmployee,
    responses(
        (status = 201, description = "Employee registered", body = Employee),
        (status = 400, description = "Missing fields", body = Object, example = json!({
            "message": "Please fill in all fields"
        })),
        (status = 409, description = "Employee ID already exists", body = Object, example = json!({
            "message": "Employee ID already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn register_employee(
    db: web::Data<RecordDb>,
    payload: web::Json<RegisterEmployee>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let new = NewEmployee {
        employee_id: payload.employee_id,
        name: payload.name,
        department: payload.department,
        status: payload.status,
    };

    let _guard = db.write_guard();
    let employee = directory::register(db.store(), new, Utc::now())?;

    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Filtered employee list", body = EmployeeListResponse),
        (status = 400, description = "Unknown filter value")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    db: web::Data<RecordDb>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let filter = employee_filter(query.department.as_deref(), query.status.as_deref())?;

    let overall = directory::stats(&directory::all(db.store())?);
    let data = directory::list(db.store(), filter)?;
    let filtered = directory::stats(&data);

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data,
        filtered,
        overall,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Opaque employee id")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    db: web::Data<RecordDb>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee = directory::find(db.store(), &path.into_inner())?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Add the sample roster
#[utoipa::path(
    post,
    path = "/api/employees/sample",
    responses(
        (status = 200, description = "Sample employees added", body = Object, example = json!({
            "message": "Added 15 sample employees",
            "added": 15
        }))
    ),
    tag = "Employee"
)]
pub async fn seed_sample_employees(db: web::Data<RecordDb>) -> actix_web::Result<impl Responder> {
    let _guard = db.write_guard();
    let added = directory::seed_sample(db.store(), Utc::now())?;

    let message = if added == 0 {
        "All sample employees already exist in the system".to_string()
    } else {
        format!("Added {added} sample employees")
    };

    Ok(HttpResponse::Ok().json(json!({ "message": message, "added": added })))
}

/// Fixed option lists for entry forms
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "Departments and status codes", body = OptionsResponse)
    ),
    tag = "Employee"
)]
pub async fn list_options() -> impl Responder {
    HttpResponse::Ok().json(OptionsResponse {
        departments: Department::iter().map(|d| d.to_string()).collect(),
        statuses: EmploymentStatus::iter().map(|s| s.to_string()).collect(),
        attendance_statuses: AttendanceStatus::iter().map(|s| s.to_string()).collect(),
    })
}
