use super::common::*;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::workflows::shortlist::domain::MatchStatus;
use crate::workflows::shortlist::router::{
    self, shortlist_router, PreviewQuery, ShareRequest, StatusUpdateRequest,
};

#[tokio::test]
async fn add_route_accepts_candidate_payloads() {
    let (service, _, _, _) = build_service(Vec::new());
    let router = shortlist_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/shortlist/cart")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&candidate("one", 82.0)).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("event"), Some(&json!("added")));
    assert_eq!(payload.get("count"), Some(&json!(1)));
}

#[tokio::test]
async fn cart_listing_returns_summaries_with_rounded_scores() {
    let (service, _, _, _) = build_service(Vec::new());
    service.add_to_cart(candidate("one", 86.6)).await;
    let router = shortlist_router(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/shortlist/cart")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].get("match_score"), Some(&json!(87)));
    assert_eq!(entries[0].get("status"), Some(&json!("Matched")));
}

#[tokio::test]
async fn preview_handler_returns_not_found_for_unknown_candidates() {
    let (service, _, _, _) = build_service(Vec::new());

    let response = router::preview_handler::<
        MemoryDirectory,
        MemoryBlinder,
        MemoryNotifier,
        MemoryCartStore,
    >(
        State(service),
        Path("cand-ghost".to_string()),
        Query(PreviewQuery { reveal: false }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preview_route_defaults_to_the_redacted_branch() {
    let (service, _, _, _) = build_service(vec![candidate("one", 82.0)]);
    let router = shortlist_router(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/candidates/cand-one/preview")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("mode"), Some(&json!("redacted")));
    let contact = payload.get("contact").expect("contact view");
    assert_eq!(contact.get("email"), Some(&json!("Hidden until revealed")));
}

#[tokio::test]
async fn status_route_persists_updates() {
    let (service, directory, _, _) = build_service(vec![candidate("one", 82.0)]);

    let response = router::update_status_handler::<
        MemoryDirectory,
        MemoryBlinder,
        MemoryNotifier,
        MemoryCartStore,
    >(
        State(service),
        Path("cand-one".to_string()),
        axum::Json(StatusUpdateRequest {
            status: MatchStatus::OfferMade,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("Offer Made")));
    assert_eq!(
        directory.status_of(&crate::workflows::shortlist::domain::CandidateId(
            "cand-one".to_string()
        )),
        Some(MatchStatus::OfferMade)
    );
}

#[tokio::test]
async fn status_route_maps_missing_records_to_not_found() {
    let (service, _, _, _) = build_service(Vec::new());

    let response = router::update_status_handler::<
        MemoryDirectory,
        MemoryBlinder,
        MemoryNotifier,
        MemoryCartStore,
    >(
        State(service),
        Path("cand-ghost".to_string()),
        axum::Json(StatusUpdateRequest {
            status: MatchStatus::Shortlisted,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn share_handler_rejects_missing_recipients() {
    let (service, _, _, _) = build_service(Vec::new());

    let response = router::share_handler::<
        MemoryDirectory,
        MemoryBlinder,
        MemoryNotifier,
        MemoryCartStore,
    >(
        State(service),
        axum::Json(ShareRequest {
            recipient: String::new(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn blind_all_route_reports_the_batch_outcome() {
    let (service, _, _, _) = build_service(vec![candidate("one", 82.0)]);
    service.add_to_cart(candidate("one", 82.0)).await;
    let router = shortlist_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/shortlist/blind-all")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("succeeded"),
        Some(&json!(["cand-one"])),
        "succeeded ids are serialized as plain strings"
    );
    assert_eq!(
        payload.get("message"),
        Some(&json!("All 1 CVs blinded and ready to share."))
    );
}

#[tokio::test]
async fn remove_route_distinguishes_absent_candidates() {
    let (service, _, _, _) = build_service(Vec::new());
    let router = shortlist_router(service);

    let response = router
        .oneshot(
            axum::http::Request::delete("/api/v1/shortlist/cart/cand-ghost")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("event"), Some(&json!("not_in_cart")));
}
