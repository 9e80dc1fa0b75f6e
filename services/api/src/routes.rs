use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use recruiter::workflows::shortlist::{
    format_cv_content, redact_pii, shortlist_router, CandidateDirectory, CartStore, CvBlinder,
    Notifier, ShortlistService,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RedactRequest {
    pub(crate) content: String,
    #[serde(default)]
    pub(crate) candidate_name: Option<String>,
    #[serde(default)]
    pub(crate) format: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RedactResponse {
    pub(crate) content: String,
}

pub(crate) fn with_shortlist_routes<D, B, N, S>(
    service: Arc<ShortlistService<D, B, N, S>>,
) -> axum::Router
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    shortlist_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/redact", axum::routing::post(redact_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Runs the local pattern redactor over an arbitrary document. Useful for
/// vetting CV text before it ever reaches the external blinding service.
pub(crate) async fn redact_endpoint(Json(payload): Json<RedactRequest>) -> Json<RedactResponse> {
    let RedactRequest {
        content,
        candidate_name,
        format,
    } = payload;

    let redacted = redact_pii(&content, candidate_name.as_deref());
    let content = if format {
        format_cv_content(&redacted)
    } else {
        redacted
    };

    Json(RedactResponse { content })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn redact_endpoint_masks_contact_details() {
        let request = RedactRequest {
            content: "Reach me at sam.recruit@example.com or +1 415-555-0188.".to_string(),
            candidate_name: None,
            format: false,
        };

        let Json(body) = redact_endpoint(Json(request)).await;

        assert!(body.content.contains("[EMAIL REDACTED]"));
        assert!(body.content.contains("[PHONE REDACTED]"));
        assert!(!body.content.contains("example.com"));
    }

    #[tokio::test]
    async fn redact_endpoint_can_mask_the_candidate_name_and_format() {
        let request = RedactRequest {
            content: "EXPERIENCE\n\n\nMorgan shipped the billing system.".to_string(),
            candidate_name: Some("Morgan Reyes".to_string()),
            format: true,
        };

        let Json(body) = redact_endpoint(Json(request)).await;

        assert!(body.content.starts_with("## EXPERIENCE"));
        assert!(body.content.contains("[NAME REDACTED]"));
        assert!(!body.content.contains("Morgan"));
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body.get("status"), Some(&json!("ok")));
    }
}
