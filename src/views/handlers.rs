use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    auth::AuthenticatedUser,
    error::{ApiError, ApiResult},
    journal::models::JournalEntry,
    medication::models::Medication,
    mood::models::MoodRating,
    todo::models::Todo,
    views::{
        assemble::{self, UserRecords},
        models::{CalendarResponse, DayDetailResponse, DiaryResponse, TodoListResponse},
        resolve_offset, today_in, ViewQuery,
    },
    AppState,
};

async fn moods(db: &PgPool, user_id: i32) -> Result<Vec<MoodRating>, sqlx::Error> {
    sqlx::query_as::<_, MoodRating>(
        "SELECT * FROM mood_ratings WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

async fn journals(db: &PgPool, user_id: i32) -> Result<Vec<JournalEntry>, sqlx::Error> {
    sqlx::query_as::<_, JournalEntry>(
        "SELECT * FROM journal_entries WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

async fn todos(db: &PgPool, user_id: i32) -> Result<Vec<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE user_id = $1 ORDER BY created_at, id")
        .bind(user_id)
        .fetch_all(db)
        .await
}

async fn medications(db: &PgPool, user_id: i32) -> Result<Vec<Medication>, sqlx::Error> {
    sqlx::query_as::<_, Medication>("SELECT * FROM medications WHERE user_id = $1 ORDER BY id")
        .bind(user_id)
        .fetch_all(db)
        .await
}

async fn load_all(db: &PgPool, user_id: i32) -> Result<UserRecords, sqlx::Error> {
    let (moods, journals, todos, medications) = futures::try_join!(
        moods(db, user_id),
        journals(db, user_id),
        todos(db, user_id),
        medications(db, user_id),
    )?;
    Ok(UserRecords {
        moods,
        journals,
        todos,
        medications,
    })
}

pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<CalendarResponse>> {
    let user_id = user.user_id()?;
    let offset = resolve_offset(query.tz_offset, &state.config)?;
    let month = query.navigator(today_in(&offset))?.month();

    let records = load_all(&state.db, user_id).await?;

    tracing::debug!(
        user_id  = %user_id,
        username = %user.username(),
        month    = %month.name(),
        "Calendar view"
    );

    Ok(Json(assemble::calendar(month, &records, &offset)))
}

pub async fn get_diary(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<DiaryResponse>> {
    let user_id = user.user_id()?;
    let offset = resolve_offset(query.tz_offset, &state.config)?;
    let nav = query.navigator(today_in(&offset))?;

    let (moods, journals) =
        futures::try_join!(moods(&state.db, user_id), journals(&state.db, user_id))?;

    Ok(Json(assemble::diary(&nav, &moods, &journals, &offset)))
}

pub async fn get_day(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(date): Path<NaiveDate>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<DayDetailResponse>> {
    let user_id = user.user_id()?;
    let offset = resolve_offset(query.tz_offset, &state.config)?;

    if date.pred_opt().is_none() || date.succ_opt().is_none() {
        return Err(ApiError::Validation("Date is out of range".into()));
    }

    let records = load_all(&state.db, user_id).await?;

    Ok(Json(assemble::day_detail(date, &records, &offset)))
}

pub async fn get_todo_list(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<TodoListResponse>> {
    let user_id = user.user_id()?;
    let offset = resolve_offset(query.tz_offset, &state.config)?;
    let nav = query.navigator(today_in(&offset))?;

    let todos = todos(&state.db, user_id).await?;

    Ok(Json(assemble::todo_list(&nav, &todos, &offset)))
}
