use crate::{
    api::{attendance, employee, report},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

/// Per-IP limiter allowing `requests_per_min` with an equal burst.
fn build_limiter(requests_per_min: u32) -> Option<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    let burst = requests_per_min.max(1);
    let per_ms = 60_000 / burst as u64;
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms.max(1))
        .burst_size(burst)
        .key_extractor(PeerIpKeyExtractor)
        .finish()?;
    Some(Governor::new(&cfg))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let write_limiter = build_limiter(config.rate_write_per_min);
    let read_limiter = build_limiter(config.rate_read_per_min);

    match (write_limiter, read_limiter) {
        (Some(write_limiter), Some(read_limiter)) => {
            cfg.service(
                web::scope(&config.api_prefix)
                    .service(
                        web::scope("")
                            .guard(actix_web::guard::Post())
                            .wrap(write_limiter)
                            .configure(services),
                    )
                    .service(web::scope("").wrap(read_limiter).configure(services)),
            );
        }
        _ => {
            tracing::warn!("Rate limiter configuration rejected, serving without limits");
            cfg.service(web::scope(&config.api_prefix).configure(services));
        }
    }
}

/// All API resources, relative to the API prefix.
pub fn services(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/departments").route(web::get().to(employee::list_options)))
        .service(
            web::scope("/employees")
                // /employees
                .service(
                    web::resource("")
                        .route(web::post().to(employee::register_employee))
                        .route(web::get().to(employee::list_employees)),
                )
                // /employees/sample
                .service(
                    web::resource("/sample").route(web::post().to(employee::seed_sample_employees)),
                )
                // /employees/{id}
                .service(web::resource("/{id}").route(web::get().to(employee::get_employee))),
        )
        .service(
            web::scope("/attendance")
                // /attendance
                .service(
                    web::resource("")
                        .route(web::post().to(attendance::record_attendance))
                        .route(web::get().to(attendance::list_attendance)),
                )
                // /attendance/bulk
                .service(
                    web::resource("/bulk").route(web::post().to(attendance::record_bulk_attendance)),
                ),
        )
        .service(
            web::scope("/reports")
                // /reports/monthly
                .service(web::resource("/monthly").route(web::get().to(report::monthly_report))),
        );
}
