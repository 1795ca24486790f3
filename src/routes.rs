use crate::api::attendance;
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter allowing `requests_per_min` requests, replenished evenly.
pub fn rate_limit(requests_per_min: u32) -> Result<RateLimit> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("rate limit needs a non-zero burst size")
}

/// Attendance resources, relative to the enclosing scope.
///
/// Summary routes come before `/{employee_id}` so `summary` is never taken
/// for an employee id.
pub fn attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            // /attendance
            .service(
                web::resource("")
                    .route(web::post().to(attendance::mark_attendance))
                    .route(web::get().to(attendance::filter_by_date)),
            )
            // /attendance/summary
            .service(web::resource("/summary").route(web::get().to(attendance::summary)))
            // /attendance/summary/{employee_id}
            .service(
                web::resource("/summary/{employee_id}")
                    .route(web::get().to(attendance::employee_summary)),
            )
            // /attendance/{employee_id}
            .service(
                web::resource("/{employee_id}").route(web::get().to(attendance::get_by_employee)),
            ),
    );
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, rate_limit: &RateLimit) {
    cfg.service(
        web::scope(api_prefix)
            .wrap(Governor::new(rate_limit)) // rate limiting
            .configure(attendance_routes),
    );
}
