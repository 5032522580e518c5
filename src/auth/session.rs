use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{
    models::{LoginRequest, SignupRequest, User, UserResponse},
    security::{
        create_session_token, decode_session_token, hash_password, removal_cookie,
        session_cookie, session_token, verify_password,
    },
};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

const UNIQUE_VIOLATION: &str = "23505";

fn start_session(state: &AppState, jar: CookieJar, user: &User) -> ApiResult<CookieJar> {
    let token = create_session_token(
        user.id,
        &user.username,
        &state.config.session_secret,
        state.config.session_expiry_hours,
    )
    .map_err(|e| ApiError::Internal(format!("session token generation failed: {e}")))?;

    Ok(jar.add(session_cookie(token, state.config.cookie_secure)))
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<UserResponse>)> {
    let username = payload.username.trim();
    if username.is_empty()
        || payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.password.is_empty()
    {
        tracing::warn!("Signup validation failed - missing fields");
        return Err(ApiError::Validation(
            "Username, first name, last name and password are required".into(),
        ));
    }

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        tracing::warn!(username = %username, "Signup failed - username already taken");
        return Err(ApiError::Conflict("Username is already taken".into()));
    }

    let password_hash = hash_password(&payload.password, state.config.bcrypt_cost).await?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, first_name, last_name, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(payload.first_name.trim())
    .bind(payload.last_name.trim())
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            ApiError::Conflict("Username is already taken".into())
        }
        _ => {
            tracing::error!(
                query    = "INSERT INTO users ... RETURNING *",
                error    = %e,
                username = %username,
                "DB error while creating user"
            );
            ApiError::Database(e)
        }
    })?;

    let jar = start_session(&state, jar, &user)?;

    tracing::info!(user_id = %user.id, username = %user.username, "New user signed up");

    Ok((StatusCode::CREATED, jar, Json(user.into())))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<UserResponse>)> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(payload.user.trim())
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| {
            tracing::warn!(username = %payload.user, "Failed login attempt - user not found");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&payload.password, &user.password_hash).await? {
        tracing::warn!(
            user_id  = %user.id,
            username = %user.username,
            "Failed login attempt - wrong password"
        );
        return Err(ApiError::InvalidCredentials);
    }

    let jar = start_session(&state, jar, &user)?;

    tracing::info!(user_id = %user.id, username = %user.username, "Successful login");

    Ok((StatusCode::CREATED, jar, Json(user.into())))
}

pub async fn logout(jar: CookieJar) -> (StatusCode, CookieJar) {
    (StatusCode::NO_CONTENT, jar.remove(removal_cookie()))
}

/// Current user for a valid session, otherwise `204 No Content`.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let claims = match session_token(&headers)
        .and_then(|token| decode_session_token(&token, &state.config.session_secret).ok())
    {
        Some(claims) => claims,
        None => return Ok(StatusCode::NO_CONTENT.into_response()),
    };

    let Ok(user_id) = claims.user_id() else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?;

    Ok(match user {
        Some(user) => Json(UserResponse::from(user)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
