//! HTTP request handlers for the gateway

use crate::types::{
    ChatRequest, ChatResult, InsightRequest, InsightResult, ReadinessRequest, ReadinessResult,
    SearchRequest, SearchResult, SummaryRequest, SummaryResult,
};
use crate::{Error, ResearchService};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Gateway state shared across handlers
#[derive(Clone)]
pub struct GatewayState {
    pub service: Arc<ResearchService>,
}

impl GatewayState {
    pub fn new(service: ResearchService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Handler result: JSON body or a flat `{"error": ...}` body
pub type ApiResult<T> = Result<Json<T>, Error>;

impl Error {
    /// HTTP status used when this error crosses the HTTP boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Unwrap a JSON body, turning decoder rejections into a 400
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> crate::Result<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(Error::InvalidInput(rejection.body_text()))
        }
    }
}

/// `POST /summarize/`
pub async fn summarize(
    State(state): State<GatewayState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> ApiResult<SummaryResult> {
    let request = body(payload)?;
    Ok(Json(state.service.summarize(&request).await?))
}

/// `POST /insights/`
pub async fn insights(
    State(state): State<GatewayState>,
    payload: Result<Json<InsightRequest>, JsonRejection>,
) -> ApiResult<InsightResult> {
    let request = body(payload)?;
    Ok(Json(state.service.insights(&request).await?))
}

/// `POST /search/`
pub async fn search(
    State(state): State<GatewayState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<SearchResult> {
    let request = body(payload)?;
    Ok(Json(state.service.search(&request).await?))
}

/// `POST /chat/`
pub async fn chat(
    State(state): State<GatewayState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<ChatResult> {
    let request = body(payload)?;
    Ok(Json(state.service.chat(&request).await?))
}

/// `POST /research-readiness/`
pub async fn research_readiness(
    State(state): State<GatewayState>,
    payload: Result<Json<ReadinessRequest>, JsonRejection>,
) -> ApiResult<ReadinessResult> {
    let request = body(payload)?;
    Ok(Json(state.service.readiness(&request).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::InvalidInput("No text provided".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Upstream("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            Error::UpstreamParse(parse).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_body_is_flat() {
        let response = Error::Upstream("raw provider body".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), 10_000).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"error": "raw provider body"}));
    }
}
