//! Request/response types and validation rules for token metadata

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::nft_tokens;
use crate::models::error::ApiError;
use crate::services::address::NormalizedAddress;

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 3;
pub const DESCRIPTION_MAX: usize = 1000;

/// One trait entry, OpenSea-style: `{"trait_type": "...", "value": ...}`
/// where the value may be a string or a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenAttribute {
    pub trait_type: String,
    pub value: Value,
}

impl TokenAttribute {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.trait_type.trim().is_empty() {
            return Err(ApiError::Validation(
                "Each attribute requires a trait_type".to_string(),
            ));
        }
        if !(self.value.is_string() || self.value.is_number()) {
            return Err(ApiError::Validation(
                "Attribute value must be a string or a number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validated input for creating a token record. The owner has already been
/// through the address normalizer by the time this is constructed.
#[derive(Debug, Clone)]
pub struct NewTokenRecord {
    pub token_id: i64,
    pub owner: NormalizedAddress,
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Option<Vec<TokenAttribute>>,
}

impl NewTokenRecord {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.token_id <= 0 {
            return Err(ApiError::Validation("Invalid token ID".to_string()));
        }
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        validate_image(&self.image)?;
        if let Some(attributes) = &self.attributes {
            for attribute in attributes {
                attribute.validate()?;
            }
        }
        Ok(())
    }
}

/// Partial update; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTokenRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub attributes: Option<Vec<TokenAttribute>>,
}

impl UpdateTokenRecord {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(image) = &self.image {
            validate_image(image)?;
        }
        if let Some(attributes) = &self.attributes {
            for attribute in attributes {
                attribute.validate()?;
            }
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    let len = name.trim().chars().count();
    if len < NAME_MIN {
        return Err(ApiError::Validation(format!(
            "Name must be at least {} characters long",
            NAME_MIN
        )));
    }
    if len > NAME_MAX {
        return Err(ApiError::Validation(format!(
            "Name cannot exceed {} characters",
            NAME_MAX
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ApiError> {
    let len = description.trim().chars().count();
    if len < DESCRIPTION_MIN {
        return Err(ApiError::Validation(format!(
            "Description must be at least {} characters long",
            DESCRIPTION_MIN
        )));
    }
    if len > DESCRIPTION_MAX {
        return Err(ApiError::Validation(format!(
            "Description cannot exceed {} characters",
            DESCRIPTION_MAX
        )));
    }
    Ok(())
}

// Any scheme is allowed (http, https, ipfs, ...), only the shape is checked.
fn validate_image(image: &str) -> Result<(), ApiError> {
    let well_formed = match image.split_once(':') {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && scheme
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    };
    if well_formed {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "Image must be a valid URI".to_string(),
        ))
    }
}

/// API view of a token record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecordResponse {
    pub token_id: i64,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<nft_tokens::Model> for TokenRecordResponse {
    fn from(model: nft_tokens::Model) -> Self {
        Self {
            token_id: model.token_id,
            owner: model.owner,
            name: model.name,
            description: model.description,
            image: model.image,
            attributes: model.attributes,
            created_at: model.created_at.naive_utc(),
            updated_at: model.updated_at.naive_utc(),
        }
    }
}
