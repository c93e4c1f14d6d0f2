//! Transaction ledger endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::models::error::{ApiError, ErrorResponse};
use crate::models::response::ApiResponse;
use crate::models::transaction::{
    CreateTransactionRequest, PaginationMeta, TransactionListQuery, TransactionListResponse,
    TransactionResponse,
};
use crate::services::ledger;
use crate::AppState;

type Rejection = (StatusCode, Json<ErrorResponse>);

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), Rejection> {
    let entry = payload.validate().map_err(ApiError::into_rejection)?;
    let stored = ledger::append(&state.db, entry)
        .await
        .map_err(ApiError::into_rejection)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(stored.into())),
    ))
}

pub async fn get_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<TransactionListResponse>, Rejection> {
    let (page, limit) = ledger::page_params(&query);
    let (entries, total) = ledger::query(&state.db, &query)
        .await
        .map_err(ApiError::into_rejection)?;

    Ok(Json(TransactionListResponse {
        status: "success".to_string(),
        data: entries.into_iter().map(TransactionResponse::from).collect(),
        pagination: PaginationMeta {
            total,
            page,
            pages: ledger::page_count(total, limit),
            limit,
        },
    }))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<ApiResponse<TransactionResponse>>, Rejection> {
    let entry = ledger::get_by_hash(&state.db, &hash)
        .await
        .map_err(ApiError::into_rejection)?;
    Ok(Json(ApiResponse::success(entry.into())))
}
