use daybook::{create_pool, create_router, logging, run_migrations, AppState, Config};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let _log_guard = logging::init();

    let config = Config::from_env().expect("DATABASE_URL and SESSION_SECRET must be set");

    let db = create_pool(&config.database_url)
        .await
        .expect("Failed to connect to the database");
    run_migrations(&db)
        .await
        .expect("Failed to run database migrations");
    info!("database migrations applied");

    let address = config.server_address.clone();
    let state = Arc::new(AppState { db, config });
    let app = create_router(state);

    info!("starting server on {address}");
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
