use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, Responder, get};
use serde_json::json;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hrms_attendance::config::Config;
use hrms_attendance::db::{ensure_attendance_schema, init_db};
use hrms_attendance::docs::ApiDoc;
use hrms_attendance::{AttendanceService, MySqlAttendanceStore, MySqlEmployeeDirectory, routes, telemetry};

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log; flushed when the guard drops at shutdown
    let _guard = telemetry::init_tracing(&config.log_dir, config.log_level)?;

    info!(addr = %config.server_addr, "Server starting...");

    let pool = init_db(&config.database_url, config.db_max_connections).await?;
    ensure_attendance_schema(&pool).await?;

    let service = Data::new(AttendanceService::new(
        Arc::new(MySqlAttendanceStore::new(pool.clone())),
        Arc::new(MySqlEmployeeDirectory::new(pool)),
    ));
    let rate_limit = routes::rate_limit(config.rate_per_min)?;
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // tail segment serves the UI assets
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(service.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &api_prefix, &rate_limit))
    })
    .bind(config.server_addr.as_str())?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
