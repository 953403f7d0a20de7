use crate::AppState;
use crate::error::AppError;
use crate::order::find_route;
use axum::extract::{Extension, Path as AxumPath};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Json};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub device_id: String,
}

/// Inbound order body: `{"url": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub struct OrderBody {
    #[serde(default)]
    pub url: Option<String>,
}

impl OrderBody {
    /// Parse leniently regardless of content type. Anything unparseable,
    /// including a non-string `url`, is treated as an empty body.
    pub fn from_bytes(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }
}

pub async fn health(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            device_id: state.device_id().to_string(),
        }),
    )
}

pub async fn place_order(
    Extension(state): Extension<AppState>,
    AxumPath((platform, action)): AxumPath<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let Some(route) = find_route(&platform, &action) else {
        return Err(AppError::NotFound(format!(
            "Unknown endpoint /api/{platform}/{action}"
        )));
    };

    let body = OrderBody::from_bytes(&body);
    let url = body.url();
    let extra = route.extra_fields(url)?;
    debug!(path = %route.path(), url, ?extra, "Order request accepted");

    info!(%platform, %action, service = route.service, "Relaying order");
    let result = state
        .order_client
        .place_order(route.service, url, extra)
        .await;

    Ok(Json(result))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_body_is_lenient() {
        assert_eq!(OrderBody::from_bytes(br#"{"url":"https://a/1"}"#).url(), "https://a/1");
        assert_eq!(OrderBody::from_bytes(b"").url(), "");
        assert_eq!(OrderBody::from_bytes(b"not json").url(), "");
        assert_eq!(OrderBody::from_bytes(br#"{"url":12}"#).url(), "");
        assert_eq!(OrderBody::from_bytes(br#"{"link":"x"}"#).url(), "");
        assert_eq!(OrderBody::from_bytes(br#"{"url":null}"#).url(), "");
    }
}
