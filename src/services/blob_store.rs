//! Blob store for uploaded image bytes
//!
//! Issues a stable reference (uuid) immediately and persists the bytes in
//! the background; metadata may point at a blob that is not durable yet.
//! Callers that need durability (tests) await the returned handle.

use chrono::{FixedOffset, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::entities::{blobs, prelude::*};
use crate::models::error::ApiError;

/// Store a blob fire-and-forget style, returning its reference right away.
pub fn put(
    db: DatabaseConnection,
    data: Vec<u8>,
    content_type: String,
    filename: String,
) -> (Uuid, JoinHandle<Result<(), ApiError>>) {
    let id = Uuid::new_v4();
    let handle = tokio::spawn(async move {
        let model = blobs::ActiveModel {
            id: Set(id),
            filename: Set(filename),
            content_type: Set(content_type),
            data: Set(data),
            created_at: Set(Utc::now().with_timezone(&FixedOffset::east_opt(0).unwrap())),
        };
        match model.insert(&db).await {
            Ok(_) => {
                tracing::debug!("blob {} persisted", id);
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to persist blob {}: {}", id, e);
                Err(e.into())
            }
        }
    });
    (id, handle)
}

pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<blobs::Model, ApiError> {
    Blobs::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ApiError::NotFound("File"))
}
