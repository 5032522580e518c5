use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    auth::AuthenticatedUser,
    error::{ApiError, ApiResult},
    journal::models::{CreateJournalRequest, JournalEntry, UpdateJournalRequest},
    views::{created_at_for, resolve_offset},
    AppState,
};

pub async fn list_journals(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<JournalEntry>>> {
    let user_id = user.user_id()?;

    let entries = sqlx::query_as::<_, JournalEntry>(
        "SELECT * FROM journal_entries WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}

pub async fn create_journal(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateJournalRequest>,
) -> ApiResult<(StatusCode, Json<JournalEntry>)> {
    let user_id = user.user_id()?;

    if payload.journal_header.trim().is_empty() && payload.journal_text.trim().is_empty() {
        return Err(ApiError::Validation(
            "A journal entry needs a header or some text".into(),
        ));
    }

    let offset = resolve_offset(payload.tz_offset, &state.config)?;

    let entry = sqlx::query_as::<_, JournalEntry>(
        r#"
        INSERT INTO journal_entries (user_id, journal_header, journal_text, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&payload.journal_header)
    .bind(&payload.journal_text)
    .bind(created_at_for(payload.date, &offset))
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        tracing::error!(
            query   = "INSERT INTO journal_entries ... RETURNING *",
            error   = %e,
            user_id = %user_id,
            "DB error creating journal entry"
        );
        ApiError::Database(e)
    })?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_journal(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateJournalRequest>,
) -> ApiResult<Json<JournalEntry>> {
    let user_id = user.user_id()?;

    let entry = sqlx::query_as::<_, JournalEntry>(
        r#"
        UPDATE journal_entries
        SET journal_header = COALESCE($1, journal_header),
            journal_text = COALESCE($2, journal_text)
        WHERE id = $3 AND user_id = $4
        RETURNING *
        "#,
    )
    .bind(&payload.journal_header)
    .bind(&payload.journal_text)
    .bind(id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| {
        tracing::error!(
            query    = "UPDATE journal_entries SET ... WHERE id = ? AND user_id = ?",
            error    = %e,
            user_id  = %user_id,
            entry_id = %id,
            "DB error updating journal entry"
        );
        ApiError::Database(e)
    })?
    .ok_or_else(|| ApiError::NotFound("Journal entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn delete_journal(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let user_id = user.user_id()?;

    let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Journal entry not found".into()));
    }

    tracing::info!(user_id = %user_id, entry_id = %id, "Journal entry deleted");

    Ok(StatusCode::NO_CONTENT)
}
