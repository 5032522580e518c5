use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    auth::AuthenticatedUser,
    error::{ApiError, ApiResult},
    medication::models::{CreateMedicationRequest, Medication, UpdateMedicationRequest},
    AppState,
};

fn validate_dosage(dosage: i32) -> ApiResult<()> {
    if dosage < 0 {
        return Err(ApiError::Validation("Dosage cannot be negative".into()));
    }
    Ok(())
}

pub async fn list_medications(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Medication>>> {
    let user_id = user.user_id()?;

    let medications = sqlx::query_as::<_, Medication>(
        "SELECT * FROM medications WHERE user_id = $1 ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(medications))
}

pub async fn create_medication(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateMedicationRequest>,
) -> ApiResult<(StatusCode, Json<Medication>)> {
    let user_id = user.user_id()?;

    if payload.drug_name.trim().is_empty() || payload.prescriber.trim().is_empty() {
        return Err(ApiError::Validation(
            "Drug name and prescriber are required".into(),
        ));
    }
    validate_dosage(payload.dosage)?;

    let medication = sqlx::query_as::<_, Medication>(
        r#"
        INSERT INTO medications (user_id, drug_name, dosage, prescriber, renew_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(payload.drug_name.trim())
    .bind(payload.dosage)
    .bind(payload.prescriber.trim())
    .bind(payload.renew_date)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        tracing::error!(
            query   = "INSERT INTO medications ... RETURNING *",
            error   = %e,
            user_id = %user_id,
            "DB error creating medication"
        );
        ApiError::Database(e)
    })?;

    Ok((StatusCode::CREATED, Json(medication)))
}

pub async fn update_medication(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMedicationRequest>,
) -> ApiResult<Json<Medication>> {
    let user_id = user.user_id()?;

    if let Some(dosage) = payload.dosage {
        validate_dosage(dosage)?;
    }
    if matches!(&payload.drug_name, Some(name) if name.trim().is_empty())
        || matches!(&payload.prescriber, Some(p) if p.trim().is_empty())
    {
        return Err(ApiError::Validation(
            "Drug name and prescriber cannot be blank".into(),
        ));
    }

    let medication = sqlx::query_as::<_, Medication>(
        r#"
        UPDATE medications
        SET drug_name = COALESCE($1, drug_name),
            dosage = COALESCE($2, dosage),
            prescriber = COALESCE($3, prescriber),
            renew_date = CASE WHEN $4 THEN $5 ELSE renew_date END
        WHERE id = $6 AND user_id = $7
        RETURNING *
        "#,
    )
    .bind(&payload.drug_name)
    .bind(payload.dosage)
    .bind(&payload.prescriber)
    .bind(payload.renew_date.is_some())
    .bind(payload.renew_date.flatten())
    .bind(id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| {
        tracing::error!(
            query         = "UPDATE medications SET ... WHERE id = ? AND user_id = ?",
            error         = %e,
            user_id       = %user_id,
            medication_id = %id,
            "DB error updating medication"
        );
        ApiError::Database(e)
    })?
    .ok_or_else(|| ApiError::NotFound("Medication not found".into()))?;

    Ok(Json(medication))
}

pub async fn delete_medication(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let user_id = user.user_id()?;

    let result = sqlx::query("DELETE FROM medications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Medication not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
