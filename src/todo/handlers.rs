use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    auth::AuthenticatedUser,
    error::{ApiError, ApiResult},
    todo::models::{CreateTodoRequest, Todo, UpdateTodoRequest},
    views::{created_at_for, resolve_offset},
    AppState,
};

pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Todo>>> {
    let user_id = user.user_id()?;

    let todos = sqlx::query_as::<_, Todo>(
        "SELECT * FROM todos WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let user_id = user.user_id()?;

    let task_text = payload.task_text.trim();
    if task_text.is_empty() {
        return Err(ApiError::Validation("Task text is required".into()));
    }

    let offset = resolve_offset(payload.tz_offset, &state.config)?;

    let todo = sqlx::query_as::<_, Todo>(
        r#"
        INSERT INTO todos (user_id, task_text, created_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(task_text)
    .bind(created_at_for(payload.date, &offset))
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        tracing::error!(
            query   = "INSERT INTO todos ... RETURNING *",
            error   = %e,
            user_id = %user_id,
            "DB error creating todo"
        );
        ApiError::Database(e)
    })?;

    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    let user_id = user.user_id()?;

    let task_text = payload.task_text.as_deref().map(str::trim);
    if task_text == Some("") {
        return Err(ApiError::Validation("Task text cannot be blank".into()));
    }

    let todo = sqlx::query_as::<_, Todo>(
        r#"
        UPDATE todos
        SET task_text = COALESCE($1, task_text),
            completed = COALESCE($2, completed)
        WHERE id = $3 AND user_id = $4
        RETURNING *
        "#,
    )
    .bind(task_text)
    .bind(payload.completed)
    .bind(id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| {
        tracing::error!(
            query   = "UPDATE todos SET ... WHERE id = ? AND user_id = ?",
            error   = %e,
            user_id = %user_id,
            todo_id = %id,
            "DB error updating todo"
        );
        ApiError::Database(e)
    })?
    .ok_or_else(|| ApiError::NotFound("Todo not found".into()))?;

    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let user_id = user.user_id()?;

    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Todo not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
