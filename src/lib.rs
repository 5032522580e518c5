pub mod auth;
pub mod calendar;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod health;
pub mod journal;
pub mod logging;
pub mod medication;
pub mod mood;
pub mod todo;
pub mod views;

pub use config::Config;
pub use database::{create_pool, run_migrations};
use axum::{Router, middleware, routing::{delete, get, post, put}};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use crate::auth::auth_middleware;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // public routes (no session required)
    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/api/health", get(health::health))
        .route("/api/users", post(auth::session::signup))
        .route("/api/login", post(auth::session::login))
        .route("/api/logout", delete(auth::session::logout))
        .route("/api/get-session", get(auth::session::get_session));

    // per-user data (session required)
    let protected_routes = Router::new()
        .route(
            "/api/mood-ratings",
            get(mood::handlers::list_moods).post(mood::handlers::create_mood),
        )
        .route("/api/journals", get(journal::handlers::list_journals))
        .route("/api/journal-entries", post(journal::handlers::create_journal))
        .route(
            "/api/journals/{id}",
            put(journal::handlers::update_journal).delete(journal::handlers::delete_journal),
        )
        .route(
            "/api/medications",
            get(medication::handlers::list_medications)
                .post(medication::handlers::create_medication),
        )
        .route(
            "/api/medications/{id}",
            put(medication::handlers::update_medication)
                .delete(medication::handlers::delete_medication),
        )
        .route(
            "/api/todos",
            get(todo::handlers::list_todos).post(todo::handlers::create_todo),
        )
        .route(
            "/api/todos/{id}",
            put(todo::handlers::update_todo).delete(todo::handlers::delete_todo),
        )
        // aggregated views
        .route("/api/calendar", get(views::handlers::get_calendar))
        .route("/api/diary", get(views::handlers::get_diary))
        .route("/api/days/{date}", get(views::handlers::get_day))
        .route("/api/todo-list", get(views::handlers::get_todo_list))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
