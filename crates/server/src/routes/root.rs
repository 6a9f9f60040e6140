use axum::Json;
use serde_json::{Value, json};

/// Name and version of the running service
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", content_type = "application/json")
    ),
    tag = "Health"
)]
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "rental-properties-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
