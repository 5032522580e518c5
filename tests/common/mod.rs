use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use daybook::{create_router, AppState, Config};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt; // for oneshot

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub db: PgPool,
    pub state: Arc<AppState>,
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://...".to_string(), // pool is built by the caller
        session_secret: "test_secret".to_string(),
        session_expiry_hours: 24,
        server_address: "127.0.0.1:0".to_string(),
        cookie_secure: false,
        default_utc_offset_minutes: 0,
        bcrypt_cost: 4,
    }
}

pub async fn spawn_app(pool: PgPool) -> Result<TestApp, String> {
    let state = Arc::new(AppState {
        db: pool.clone(),
        config: test_config(),
    });

    let router = create_router(state.clone());

    Ok(TestApp {
        router,
        db: pool,
        state,
    })
}

pub async fn setup_test_app() -> Result<TestApp, String> {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| "TEST_DATABASE_URL or DATABASE_URL must be set for integration tests".to_string())?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .map_err(|e| format!("Failed to connect to database: {e}"))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| format!("Failed to run migrations: {e}"))?;

    spawn_app(pool).await
}

/// Username that does not collide with earlier runs against the same database.
#[allow(dead_code)]
pub fn unique_username(prefix: &str) -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!(
        "{prefix}_{nanos}_{}",
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// `name=value` part of a Set-Cookie header, ready for a Cookie header.
#[allow(dead_code)]
pub fn session_cookie(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

#[allow(dead_code)]
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Sign up a fresh user and hand back their session cookie.
#[allow(dead_code)]
pub async fn signed_in_user(app: &TestApp, prefix: &str) -> (String, String) {
    let username = unique_username(prefix);
    let payload = serde_json::json!({
        "username": username,
        "first_name": "Test",
        "last_name": "User",
        "password": "password123",
    });

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response).expect("signup sets the session cookie");
    (username, cookie)
}
