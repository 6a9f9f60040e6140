use crate::{
    dtos::property::{PropertyPage, PropertyQueryParams, PropertyRequest, PropertyResponse},
    error::ApiError,
    extract::{Json, Path, Query},
    routes::AppState,
};
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use database::services::property::PropertyService;
use validator::Validate;

/// Get paginated list of properties
#[utoipa::path(
    get,
    path = "/properties",
    params(PropertyQueryParams),
    responses(
        (status = 200, description = "List of properties retrieved successfully", body = PropertyPage),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
pub async fn get_properties(
    State(state): State<AppState>,
    Query(params): Query<PropertyQueryParams>,
) -> Result<Json<PropertyPage>, ApiError> {
    params.validate()?;

    let (properties, total_items) = PropertyService::list_paginated(
        &state.db,
        params.location.as_deref(),
        params.page,
        params.size,
    )
    .await?;

    Ok(Json(PropertyPage::new(
        properties.into_iter().map(PropertyResponse::from).collect(),
        params.page,
        params.size,
        total_items,
    )))
}

/// Get a specific property by ID
#[utoipa::path(
    get,
    path = "/properties/{id}",
    params(
        ("id" = i64, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Property found", body = PropertyResponse),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
pub async fn get_property_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PropertyResponse>, ApiError> {
    let property = PropertyService::get(&state.db, id).await?;
    Ok(Json(property.into()))
}

/// Create a property, always starting as `AVAILABLE`
#[utoipa::path(
    post,
    path = "/properties",
    request_body = PropertyRequest,
    responses(
        (status = 201, description = "Property created", body = PropertyResponse,
            headers(("Location" = String, description = "URL of the new property"))),
        (status = 400, description = "Invalid property data"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    Json(request): Json<PropertyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let property = PropertyService::create(&state.db, request.into()).await?;
    let location = format!("/properties/{}", property.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PropertyResponse::from(property)),
    ))
}

/// Replace the details of a property; its status is left untouched
#[utoipa::path(
    put,
    path = "/properties/{id}",
    params(
        ("id" = i64, Path, description = "Property ID")
    ),
    request_body = PropertyRequest,
    responses(
        (status = 200, description = "Property updated", body = PropertyResponse),
        (status = 400, description = "Invalid property data"),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<PropertyRequest>,
) -> Result<Json<PropertyResponse>, ApiError> {
    request.validate()?;

    let property = PropertyService::update(&state.db, id, request.into()).await?;
    Ok(Json(property.into()))
}

/// Delete a property without reservations
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    params(
        ("id" = i64, Path, description = "Property ID")
    ),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 404, description = "Property not found"),
        (status = 409, description = "Property still has reservations"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    PropertyService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
