//! Metadata endpoints
//!
//! POST is multipart (metadata fields + image bytes). The image is handed
//! to the blob store, which returns its reference before the write is
//! durable; the stored record points at the download URL built from that
//! reference. A successful create feeds exactly one mint into the
//! statistics aggregator.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::error::{ApiError, ErrorResponse};
use crate::models::metadata::{NewTokenRecord, TokenAttribute, TokenRecordResponse, UpdateTokenRecord};
use crate::models::response::{ApiResponse, ListResponse};
use crate::services::address::normalize;
use crate::services::blob_store;
use crate::AppState;

type Rejection = (StatusCode, Json<ErrorResponse>);

pub async fn get_metadata(
    State(state): State<AppState>,
    Path(token_id): Path<i64>,
) -> Result<Json<TokenRecordResponse>, Rejection> {
    if token_id <= 0 {
        return Err(ApiError::Validation("Invalid token ID".to_string()).into_rejection());
    }
    let record = state
        .metadata
        .get(&state.db, token_id)
        .await
        .map_err(ApiError::into_rejection)?;
    Ok(Json(record.into()))
}

#[derive(Debug, Deserialize)]
pub struct ListMetadataQuery {
    pub owner: Option<String>,
}

pub async fn list_metadata(
    State(state): State<AppState>,
    Query(query): Query<ListMetadataQuery>,
) -> Result<Json<ListResponse<TokenRecordResponse>>, Rejection> {
    let records = match query.owner {
        Some(owner) => {
            let owner = normalize(&owner).map_err(ApiError::into_rejection)?;
            state
                .metadata
                .list_by_owner(&state.db, &owner)
                .await
                .map_err(ApiError::into_rejection)?
        }
        None => state
            .metadata
            .list(&state.db)
            .await
            .map_err(ApiError::into_rejection)?,
    };
    Ok(Json(ListResponse::success(
        records.into_iter().map(TokenRecordResponse::from).collect(),
    )))
}

pub async fn create_metadata(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<TokenRecordResponse>>), Rejection> {
    let mut token_id: Option<i64> = None;
    let mut owner_raw: Option<String> = None;
    let mut name = String::new();
    let mut description = String::new();
    let mut attributes_raw: Option<String> = None;
    let mut image: Option<(Vec<u8>, String, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::Validation(format!("Malformed multipart request: {}", e)).into_rejection()
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "tokenId" => {
                let text = field_text(field).await?;
                token_id = Some(text.trim().parse::<i64>().map_err(|_| {
                    ApiError::Validation("Invalid token ID".to_string()).into_rejection()
                })?);
            }
            "owner" => owner_raw = Some(field_text(field).await?),
            "name" => name = field_text(field).await?,
            "description" => description = field_text(field).await?,
            "attributes" => attributes_raw = Some(field_text(field).await?),
            "image" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::Validation(format!("Failed to read image: {}", e)).into_rejection()
                })?;
                image = Some((bytes.to_vec(), content_type, filename));
            }
            _ => {}
        }
    }

    let token_id = match token_id {
        Some(id) if id > 0 => id,
        _ => return Err(ApiError::Validation("Invalid token ID".to_string()).into_rejection()),
    };
    let owner = normalize(owner_raw.as_deref().unwrap_or(""))
        .map_err(ApiError::into_rejection)?;
    let attributes = match attributes_raw {
        Some(raw) if !raw.trim().is_empty() => Some(
            serde_json::from_str::<Vec<TokenAttribute>>(&raw).map_err(|_| {
                ApiError::Validation("Attributes must be an array of traits".to_string())
                    .into_rejection()
            })?,
        ),
        _ => None,
    };

    let (image_bytes, content_type, original_name) = image.ok_or_else(|| {
        ApiError::Validation("No file uploaded".to_string()).into_rejection()
    })?;

    let filename = format!("{}-{}", Utc::now().timestamp_millis(), original_name);
    let (blob_id, _persist) = blob_store::put(state.db.clone(), image_bytes, content_type, filename);
    let image_url = format!("{}/api/metadata/file/{}", state.public_base_url, blob_id);

    let record = NewTokenRecord {
        token_id,
        owner: owner.clone(),
        name,
        description,
        image: image_url,
        attributes,
    };

    let stored = state
        .metadata
        .create(&state.db, record)
        .await
        .map_err(ApiError::into_rejection)?;

    // Exactly one mint per successful create
    state.minting_stats.record_mint(token_id, &owner);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(stored.into())),
    ))
}

pub async fn update_metadata(
    State(state): State<AppState>,
    Path(token_id): Path<i64>,
    Json(changes): Json<UpdateTokenRecord>,
) -> Result<Json<ApiResponse<TokenRecordResponse>>, Rejection> {
    if token_id <= 0 {
        return Err(ApiError::Validation("Invalid token ID".to_string()).into_rejection());
    }
    let updated = state
        .metadata
        .update(&state.db, token_id, changes)
        .await
        .map_err(ApiError::into_rejection)?;
    Ok(Json(ApiResponse::success(updated.into())))
}

pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, Rejection> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::Validation("Invalid file ID".to_string()).into_rejection())?;
    let blob = blob_store::get(&state.db, id)
        .await
        .map_err(ApiError::into_rejection)?;
    Ok(([(header::CONTENT_TYPE, blob.content_type)], blob.data).into_response())
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, Rejection> {
    field.text().await.map_err(|e| {
        ApiError::Validation(format!("Malformed multipart field: {}", e)).into_rejection()
    })
}
