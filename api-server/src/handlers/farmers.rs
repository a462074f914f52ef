//! Farmer lookup handler

use axum::{extract::{State, Path}, Json};

use agririsk_core::FarmerRecord;

use crate::{AppError, AppResult, AppState};

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FarmerRecord>> {
    let farmer = state
        .farmers
        .find_by_id(&id)
        .ok_or_else(|| AppError::NotFound("Farmer not found".to_string()))?;

    Ok(Json(farmer))
}
