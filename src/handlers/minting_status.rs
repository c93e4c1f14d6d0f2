//! Minting statistics endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::models::error::{ApiError, ErrorResponse};
use crate::models::minting_status::{UpdateMaxSupplyRequest, UserMintCountResponse};
use crate::models::response::ApiResponse;
use crate::services::address::normalize;
use crate::services::minting_stats::MintingStats;
use crate::AppState;

type Rejection = (StatusCode, Json<ErrorResponse>);

pub async fn get_minting_stats(
    State(state): State<AppState>,
) -> Json<ApiResponse<MintingStats>> {
    Json(ApiResponse::success(state.minting_stats.get_stats()))
}

pub async fn get_user_mint_count(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<UserMintCountResponse>>, Rejection> {
    let normalized = normalize(&address).map_err(ApiError::into_rejection)?;
    let mint_count = state.minting_stats.get_user_mint_count(&normalized);
    Ok(Json(ApiResponse::success(UserMintCountResponse {
        address: normalized.into_inner(),
        mint_count,
    })))
}

// Admin operation; authentication is out of scope for this deployment
pub async fn update_max_supply(
    State(state): State<AppState>,
    Json(payload): Json<UpdateMaxSupplyRequest>,
) -> Result<Json<ApiResponse<MintingStats>>, Rejection> {
    let stats = state
        .minting_stats
        .set_max_supply(payload.max_supply)
        .map_err(ApiError::into_rejection)?;
    Ok(Json(ApiResponse::success(stats)))
}

pub async fn reset_stats(State(state): State<AppState>) -> Json<ApiResponse<MintingStats>> {
    Json(ApiResponse::success(state.minting_stats.reset_stats()))
}
