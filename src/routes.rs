use crate::api::{attendance, employee, error, health};
use actix_cors::Cors;
use actix_governor::{
    GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Result, anyhow};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler));
    cfg.app_data(web::QueryConfig::default().error_handler(error::query_error_handler));

    cfg.service(
        web::scope("/api")
            .service(web::resource("/health").route(web::get().to(health::health)))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}").route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::create_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    // /attendance/summary/by-employee
                    .service(
                        web::resource("/summary/by-employee")
                            .route(web::get().to(attendance::summary_by_employee)),
                    )
                    // /attendance/dashboard-summary
                    .service(
                        web::resource("/dashboard-summary")
                            .route(web::get().to(attendance::dashboard_summary)),
                    ),
            ),
    );

    cfg.default_service(web::to(error::not_found));
}

/// `*` allows any origin; otherwise a comma-separated list of exact origins.
pub fn build_cors(allowed: &str) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if allowed.trim() == "*" {
        return cors.allow_any_origin();
    }

    allowed
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

/// Per-peer-IP limiter config. Callers skip the middleware when the budget is 0.
pub fn build_limiter(
    requests_per_min: u32,
) -> Result<GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = 60_000 / requests_per_min as u64;

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid rate limit of {requests_per_min} requests per minute"))
}
