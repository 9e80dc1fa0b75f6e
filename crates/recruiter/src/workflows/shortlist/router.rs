use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::cart::{CartEvent, CartStore};
use super::domain::{CandidateId, CandidateMatch, MatchStatus};
use super::preview::PreviewError;
use super::remote::CvBlinder;
use super::repository::{CandidateDirectory, DirectoryError, Notifier};
use super::service::{ShortlistService, ShortlistServiceError};
use super::share::ShareOutcome;

/// Router builder exposing the shortlist workflow endpoints.
pub fn shortlist_router<D, B, N, S>(service: Arc<ShortlistService<D, B, N, S>>) -> Router
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/shortlist/cart",
            post(add_to_cart_handler::<D, B, N, S>)
                .get(list_cart_handler::<D, B, N, S>)
                .delete(clear_cart_handler::<D, B, N, S>),
        )
        .route(
            "/api/v1/shortlist/cart/:candidate_id",
            delete(remove_from_cart_handler::<D, B, N, S>),
        )
        .route(
            "/api/v1/shortlist/blind-all",
            post(blind_all_handler::<D, B, N, S>),
        )
        .route("/api/v1/shortlist/share", post(share_handler::<D, B, N, S>))
        .route(
            "/api/v1/candidates/:candidate_id/preview",
            get(preview_handler::<D, B, N, S>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/status",
            post(update_status_handler::<D, B, N, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreviewQuery {
    #[serde(default)]
    pub(crate) reveal: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    pub(crate) status: MatchStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShareRequest {
    #[serde(default)]
    pub(crate) recipient: String,
}

pub(crate) async fn add_to_cart_handler<D, B, N, S>(
    State(service): State<Arc<ShortlistService<D, B, N, S>>>,
    axum::Json(candidate): axum::Json<CandidateMatch>,
) -> Response
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    let event = service.add_to_cart(candidate).await;
    let count = service.cart_count().await;
    let event_name = match event {
        CartEvent::Added { .. } => "added",
        CartEvent::AlreadyInCart { .. } => "already_in_cart",
        _ => unreachable!("add never yields removal events"),
    };
    let payload = json!({ "event": event_name, "count": count });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn list_cart_handler<D, B, N, S>(
    State(service): State<Arc<ShortlistService<D, B, N, S>>>,
) -> Response
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    let summaries = service.cart_summaries().await;
    (StatusCode::OK, axum::Json(summaries)).into_response()
}

pub(crate) async fn remove_from_cart_handler<D, B, N, S>(
    State(service): State<Arc<ShortlistService<D, B, N, S>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    let id = CandidateId(candidate_id);
    let payload = match service.remove_from_cart(&id).await {
        CartEvent::Removed { name } => json!({ "event": "removed", "name": name }),
        _ => json!({ "event": "not_in_cart" }),
    };
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn clear_cart_handler<D, B, N, S>(
    State(service): State<Arc<ShortlistService<D, B, N, S>>>,
) -> Response
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    let payload = match service.clear_cart().await {
        CartEvent::Cleared { removed } => json!({ "event": "cleared", "removed": removed }),
        _ => json!({ "event": "cleared", "removed": 0 }),
    };
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn preview_handler<D, B, N, S>(
    State(service): State<Arc<ShortlistService<D, B, N, S>>>,
    Path(candidate_id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Response
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    let id = CandidateId(candidate_id);
    match service.preview(&id, query.reveal).await {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(PreviewError::NotFound(id)) => {
            let payload = json!({ "error": format!("candidate {id} not found") });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn update_status_handler<D, B, N, S>(
    State(service): State<Arc<ShortlistService<D, B, N, S>>>,
    Path(candidate_id): Path<String>,
    axum::Json(request): axum::Json<StatusUpdateRequest>,
) -> Response
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    let id = CandidateId(candidate_id);
    match service.update_status(&id, request.status).await {
        Ok(status) => {
            let payload = json!({
                "candidate_id": id.0,
                "status": status.label(),
                "color": status.color(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ShortlistServiceError::TransitionDenied { from, to }) => {
            let payload = json!({
                "error": format!(
                    "transition from {} to {} denied by policy",
                    from.label(),
                    to.label()
                ),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ShortlistServiceError::Directory(DirectoryError::NotFound)) => {
            let payload = json!({ "error": "candidate record not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn blind_all_handler<D, B, N, S>(
    State(service): State<Arc<ShortlistService<D, B, N, S>>>,
) -> Response
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    let report = service.blind_all().await;
    let payload = json!({
        "succeeded": report.succeeded,
        "failed": report.failed,
        "skipped": report.skipped,
        "message": report.summary().message(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn share_handler<D, B, N, S>(
    State(service): State<Arc<ShortlistService<D, B, N, S>>>,
    axum::Json(request): axum::Json<ShareRequest>,
) -> Response
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    match service.share(&request.recipient).await {
        ShareOutcome::MissingRecipient => {
            let payload = json!({ "error": "a recipient address is required" });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        ShareOutcome::Shared {
            shared,
            status_synced,
        } => {
            let payload = json!({ "shared": shared, "status_synced": status_synced });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
    }
}
