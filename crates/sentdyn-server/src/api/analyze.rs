use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use sentdyn_analytics::AnalysisError;
use sentdyn_core::{AnalysisRequest, AnalysisResult, Engine};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeBody {
    pub text: String,
    /// Falls back to the configured default engine when absent.
    #[serde(default)]
    pub engine: Option<String>,
}

/// Run one analysis on the blocking pool, bounded by the request timeout.
///
/// A timed-out analysis is abandoned, not cancelled: the blocking task runs
/// to completion and its result is dropped.
pub(super) async fn analyze_text(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisResult>>, ApiError> {
    let Json(body) = payload.map_err(|rejection| map_rejection(req_id.0.clone(), &rejection))?;

    let engine = match body.engine.as_deref() {
        Some(name) => name
            .parse::<Engine>()
            .map_err(|e| map_analysis_error(req_id.0.clone(), &AnalysisError::from(e)))?,
        None => state.default_engine,
    };

    let request = AnalysisRequest::new(body.text, engine);
    let analyzer = Arc::clone(&state.analyzer);
    let task = tokio::task::spawn_blocking(move || analyzer.analyze(&request));

    let result = match tokio::time::timeout(state.request_timeout, task).await {
        Ok(Ok(Ok(result))) => result,
        Ok(Ok(Err(e))) => return Err(map_analysis_error(req_id.0, &e)),
        Ok(Err(join_error)) => {
            tracing::error!(error = %join_error, "analysis task failed");
            return Err(ApiError::new(
                req_id.0,
                "internal_error",
                "analysis task failed",
            ));
        }
        Err(_) => {
            tracing::warn!(
                timeout_secs = state.request_timeout.as_secs(),
                "analysis timed out"
            );
            return Err(ApiError::new(req_id.0, "timeout", "analysis timed out"));
        }
    };

    tracing::debug!(
        request_id = %req_id.0,
        %engine,
        label = %result.sentiment.label(),
        keywords = result.keywords.len(),
        "analysis complete"
    );

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    let code = match error {
        AnalysisError::EmptyInput => "empty_input",
        AnalysisError::UnsupportedEngine(_) => "unsupported_engine",
        AnalysisError::ModelUnavailable { .. } => {
            tracing::warn!(error = %error, "analysis rejected");
            "model_unavailable"
        }
    };
    ApiError::new(request_id, code, error.to_string())
}

fn map_rejection(request_id: String, rejection: &JsonRejection) -> ApiError {
    let code = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        "payload_too_large"
    } else {
        "bad_request"
    };
    ApiError::new(request_id, code, rejection.body_text())
}
