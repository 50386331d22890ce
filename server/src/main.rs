//! Student report server: reads configuration from the environment (and `.env`), prepares the store, serves the API.
//!
//! Run from repo root: `cargo run -p student-report-server`

use std::sync::Arc;
use student_report::{
    app_router, ensure_database_exists, ensure_student_table, telemetry, AppConfig, AppState, HeaderAlerts,
    InMemoryStudentRepository, PgStudentRepository, StudentRepository,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    telemetry::init_tracing();

    let repository: Arc<dyn StudentRepository> = match &config.database.url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(database_url)
                .await?;
            ensure_student_table(&pool, &config.database.schema).await?;
            Arc::new(PgStudentRepository::new(pool, &config.database.schema))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; students are kept in memory");
            Arc::new(InMemoryStudentRepository::new())
        }
    };

    let alerts = HeaderAlerts::new(&config.alert_prefix)?;
    tracing::info!(
        template = %config.report.template_path.display(),
        output_dir = %config.report.output_dir.display(),
        "report export configured"
    );
    let state = AppState::new(repository, config.report.clone(), alerts);
    let app = app_router(state);

    let listener = TcpListener::bind(config.server.socket_addr()?).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
