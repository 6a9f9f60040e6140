use super::not_blank;
use database::{entities::properties, services::property::PropertyInput};
use models::{MAX_PRICE, PropertyStatus, fits_price_column};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    /// House, apartment, studio...
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"))]
    pub property_type: String,

    #[validate(custom(function = "not_blank"))]
    pub location: String,

    #[validate(custom(function = "valid_price"))]
    pub nightly_price: Decimal,

    #[validate(range(min = 1, message = "at least one guest must fit"))]
    pub max_guests: i32,

    pub description: Option<String>,
}

fn valid_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("not_positive")
            .with_message(Cow::Borrowed("must be greater than zero")));
    }
    if !fits_price_column(*value) {
        return Err(ValidationError::new("out_of_range").with_message(Cow::Owned(format!(
            "must have at most two decimal places and not exceed {MAX_PRICE}"
        ))));
    }
    Ok(())
}

impl From<PropertyRequest> for PropertyInput {
    fn from(request: PropertyRequest) -> Self {
        Self {
            title: request.title,
            property_type: request.property_type,
            location: request.location,
            nightly_price: request.nightly_price,
            max_guests: request.max_guests,
            description: request.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub location: String,
    #[schema(value_type = String, example = "AVAILABLE")]
    pub status: PropertyStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub nightly_price: Decimal,
    pub max_guests: i32,
    pub description: Option<String>,
}

impl From<properties::Model> for PropertyResponse {
    fn from(property: properties::Model) -> Self {
        Self {
            id: property.id,
            title: property.title,
            property_type: property.r#type,
            location: property.location,
            status: property.status,
            nightly_price: property.nightly_price,
            max_guests: property.max_guests,
            description: property.description,
        }
    }
}

/// One page of properties, in the `Page` layout the web client reads
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPage {
    pub content: Vec<PropertyResponse>,
    /// 0-based page number
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl PropertyPage {
    pub fn new(content: Vec<PropertyResponse>, number: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(size);
        Self {
            content,
            number,
            size,
            total_elements,
            total_pages,
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct PropertyQueryParams {
    /// 0-based page number
    #[serde(default)]
    #[validate(range(max = 1000000))]
    pub page: u64,

    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: u64,

    /// Case-insensitive part of the location
    pub location: Option<String>,
}

fn default_size() -> u64 {
    10
}
