use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    auth::AuthenticatedUser,
    error::{ApiError, ApiResult},
    mood::models::{CreateMoodRequest, MoodRating, MOOD_RANGE},
    views::{created_at_for, resolve_offset},
    AppState,
};

pub async fn list_moods(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<MoodRating>>> {
    let user_id = user.user_id()?;

    let moods = sqlx::query_as::<_, MoodRating>(
        "SELECT * FROM mood_ratings WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(moods))
}

pub async fn create_mood(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateMoodRequest>,
) -> ApiResult<(StatusCode, Json<MoodRating>)> {
    let user_id = user.user_id()?;

    if !MOOD_RANGE.contains(&payload.mood) {
        tracing::warn!(user_id = %user_id, mood = payload.mood, "Rejected mood outside 1..=5");
        return Err(ApiError::Validation("Mood must be between 1 and 5".into()));
    }

    let offset = resolve_offset(payload.tz_offset, &state.config)?;
    let created_at = created_at_for(payload.date, &offset);

    if let Some(journal_id) = payload.journal_id {
        let owned = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM journal_entries WHERE id = $1 AND user_id = $2",
        )
        .bind(journal_id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?;
        if owned.is_none() {
            return Err(ApiError::NotFound("Journal entry not found".into()));
        }
    }

    let mood = sqlx::query_as::<_, MoodRating>(
        r#"
        INSERT INTO mood_ratings (user_id, mood, journal_id, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(payload.mood)
    .bind(payload.journal_id)
    .bind(created_at)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        tracing::error!(
            query   = "INSERT INTO mood_ratings ... RETURNING *",
            error   = %e,
            user_id = %user_id,
            "DB error creating mood rating"
        );
        ApiError::Database(e)
    })?;

    Ok((StatusCode::CREATED, Json(mood)))
}
