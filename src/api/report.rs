use crate::{
    db::RecordDb,
    error::AppError,
    model::{
        attendance::{AttendanceRecord, Month},
        department,
    },
    service::report,
    store::{self, Collection},
};
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// `YYYY-MM`; defaults to the current month
    #[param(example = "2024-01")]
    pub month: Option<String>,
    /// Department name or `ALL`
    pub department: Option<String>,
}

/// Monthly attendance report
#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    params(ReportQuery),
    responses(
        (status = 200, description = "Per-employee and per-department totals", body = MonthlyReport),
        (status = 400, description = "Bad month or department", body = Object, example = json!({
            "message": "Invalid month '2024-13', expected YYYY-MM"
        }))
    ),
    tag = "Report"
)]
pub async fn monthly_report(
    db: web::Data<RecordDb>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let month = match query.month.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.parse::<Month>()?,
        _ => Month::of(Utc::now().date_naive()),
    };
    let department = department::parse_filter(query.department.as_deref())
        .map_err(|_| AppError::Validation("Unknown department".to_string()))?;

    let records: Vec<AttendanceRecord> =
        store::load(db.store(), Collection::Attendance).map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(report::aggregate(&records, month, department)))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{api, memory_db};
    use crate::model::attendance::EntryInput;
    use crate::service::{directory, upsert};
    use actix_web::{App, http::StatusCode, test};
    use chrono::{NaiveDate, Utc};
    use serde_json::Value;

    #[actix_web::test]
    async fn report_over_recorded_month() {
        let db = memory_db();
        directory::seed_sample(db.store(), Utc::now()).unwrap();
        let employees = directory::all(db.store()).unwrap();
        let clerk = employees.iter().find(|e| e.employee_id == "OP001").unwrap();
        let worker = employees.iter().find(|e| e.employee_id == "PP001").unwrap();

        for (day, code) in [(5, "1"), (6, "L"), (7, "A")] {
            let entry = EntryInput {
                status: Some(code.to_string()),
                ..Default::default()
            };
            let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            upsert::upsert(db.store(), clerk, date, &entry, Utc::now()).unwrap();
        }
        let shift = EntryInput {
            status: None,
            in_time: Some("09:00".into()),
            out_time: Some("17:30".into()),
        };
        for date in [
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ] {
            upsert::upsert(db.store(), worker, date, &shift, Utc::now()).unwrap();
        }

        let app = test::init_service(App::new().app_data(db).configure(api)).await;

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly?month=2024-01")
            .to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["month"], "2024-01");
        assert_eq!(report["department"], "ALL");
        assert_eq!(report["employees"].as_array().unwrap().len(), 2);
        assert_eq!(report["totalHours"], 16.5);

        let office = report["employees"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["department"] == "OFFICE STAFF")
            .unwrap();
        assert_eq!(office["totalHours"], 8.0);
        assert_eq!(office["presentDays"], 1);
        assert_eq!(office["leaveDays"], 1);
        assert_eq!(office["absentDays"], 1);

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly?month=2024-01&department=OFFICE%20STAFF")
            .to_request();
        let filtered: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(filtered["employees"].as_array().unwrap().len(), 1);
        assert_eq!(filtered["departments"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn empty_month_is_an_empty_report() {
        let app = test::init_service(App::new().app_data(memory_db()).configure(api)).await;

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly?month=2030-06")
            .to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["employees"], Value::Array(vec![]));
        assert_eq!(report["departments"], Value::Array(vec![]));
        assert_eq!(report["averageHours"], 0.0);
    }

    #[actix_web::test]
    async fn malformed_month_is_bad_request() {
        let app = test::init_service(App::new().app_data(memory_db()).configure(api)).await;

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly?month=2024-13")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
