use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::shortlist::cart::{CartStore, CartStoreError};
use crate::workflows::shortlist::domain::{CandidateId, CandidateMatch, MatchStatus};
use crate::workflows::shortlist::remote::{BlindError, CvBlinder};
use crate::workflows::shortlist::repository::{
    CandidateDirectory, DirectoryError, Notification, Notifier,
};
use crate::workflows::shortlist::service::ShortlistService;

pub(super) fn candidate(suffix: &str, score: f32) -> CandidateMatch {
    CandidateMatch {
        id: CandidateId(format!("cand-{suffix}")),
        name: format!("Jane {suffix}"),
        role: "Backend Engineer".to_string(),
        location: "Des Moines".to_string(),
        experience: "6 years".to_string(),
        skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        email: format!("jane.{suffix}@example.com"),
        phone: "+1 (515) 234-5678".to_string(),
        cv_content: concat!(
            "PROFILE\n",
            "Seasoned backend engineer with a focus on payment systems.\n",
            "\n",
            "Contact:\n",
            "jane@example.com, 555-123-4567, 12 Maple Street\n",
        )
        .to_string(),
        match_score: score,
        job_id: "job-42".to_string(),
        job_description: "Own the payments platform.".to_string(),
        job_role: "Backend Engineer".to_string(),
        matched_at: Utc
            .with_ymd_and_hms(2025, 9, 24, 10, 0, 0)
            .single()
            .expect("valid timestamp"),
        status: MatchStatus::Matched,
    }
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    records: Mutex<HashMap<CandidateId, CandidateMatch>>,
    bulk_calls: Mutex<Vec<(Vec<CandidateId>, MatchStatus)>>,
    fail_bulk: AtomicBool,
}

impl MemoryDirectory {
    pub(super) fn with_candidates(candidates: Vec<CandidateMatch>) -> Self {
        let directory = Self::default();
        for candidate in candidates {
            directory.insert(candidate);
        }
        directory
    }

    pub(super) fn insert(&self, candidate: CandidateMatch) {
        self.records
            .lock()
            .expect("directory mutex poisoned")
            .insert(candidate.id.clone(), candidate);
    }

    pub(super) fn status_of(&self, id: &CandidateId) -> Option<MatchStatus> {
        self.records
            .lock()
            .expect("directory mutex poisoned")
            .get(id)
            .map(|candidate| candidate.status)
    }

    pub(super) fn bulk_calls(&self) -> Vec<(Vec<CandidateId>, MatchStatus)> {
        self.bulk_calls
            .lock()
            .expect("directory mutex poisoned")
            .clone()
    }

    pub(super) fn fail_bulk_updates(&self) {
        self.fail_bulk.store(true, Ordering::Relaxed);
    }
}

impl CandidateDirectory for MemoryDirectory {
    fn fetch_match(&self, id: &CandidateId) -> Result<Option<CandidateMatch>, DirectoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_status(&self, id: &CandidateId, status: MatchStatus) -> Result<(), DirectoryError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        match guard.get_mut(id) {
            Some(candidate) => {
                candidate.status = status;
                Ok(())
            }
            None => Err(DirectoryError::NotFound),
        }
    }

    fn update_status_bulk(
        &self,
        ids: &[CandidateId],
        status: MatchStatus,
    ) -> Result<(), DirectoryError> {
        if self.fail_bulk.load(Ordering::Relaxed) {
            return Err(DirectoryError::Unavailable("store offline".to_string()));
        }

        let mut guard = self.records.lock().expect("directory mutex poisoned");
        for id in ids {
            if let Some(candidate) = guard.get_mut(id) {
                candidate.status = status;
            }
        }
        drop(guard);

        self.bulk_calls
            .lock()
            .expect("directory mutex poisoned")
            .push((ids.to_vec(), status));
        Ok(())
    }
}

pub(super) struct UnavailableDirectory;

impl CandidateDirectory for UnavailableDirectory {
    fn fetch_match(&self, _id: &CandidateId) -> Result<Option<CandidateMatch>, DirectoryError> {
        Err(DirectoryError::Unavailable("store offline".to_string()))
    }

    fn update_status(&self, _id: &CandidateId, _status: MatchStatus) -> Result<(), DirectoryError> {
        Err(DirectoryError::Unavailable("store offline".to_string()))
    }

    fn update_status_bulk(
        &self,
        _ids: &[CandidateId],
        _status: MatchStatus,
    ) -> Result<(), DirectoryError> {
        Err(DirectoryError::Unavailable("store offline".to_string()))
    }
}

/// Blinder double prefixing content so blinded output is distinguishable.
/// `fail_when_contains` turns any matching content into a 502.
#[derive(Default)]
pub(super) struct MemoryBlinder {
    calls: Mutex<Vec<String>>,
    fail_marker: Option<String>,
}

impl MemoryBlinder {
    pub(super) fn fail_when_contains(marker: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_marker: Some(marker.to_string()),
        }
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.lock().expect("blinder mutex poisoned").len()
    }
}

#[async_trait]
impl CvBlinder for MemoryBlinder {
    async fn blind(&self, cv_content: &str) -> Result<String, BlindError> {
        if let Some(marker) = &self.fail_marker {
            if cv_content.contains(marker) {
                return Err(BlindError::Status { status: 502 });
            }
        }
        self.calls
            .lock()
            .expect("blinder mutex poisoned")
            .push(cv_content.to_string());
        Ok(format!("BLINDED RENDITION\n{cv_content}"))
    }
}

pub(super) struct FailingBlinder;

#[async_trait]
impl CvBlinder for FailingBlinder {
    async fn blind(&self, _cv_content: &str) -> Result<String, BlindError> {
        Err(BlindError::Transport("connection refused".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    events: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
    }
}

#[derive(Default)]
pub(super) struct MemoryCartStore {
    entries: Mutex<Vec<CandidateMatch>>,
}

impl MemoryCartStore {
    pub(super) fn snapshot(&self) -> Vec<CandidateMatch> {
        self.entries.lock().expect("store mutex poisoned").clone()
    }
}

impl CartStore for MemoryCartStore {
    fn save(&self, entries: &[CandidateMatch]) -> Result<(), CartStoreError> {
        *self.entries.lock().expect("store mutex poisoned") = entries.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<CandidateMatch>, CartStoreError> {
        Ok(self.snapshot())
    }
}

pub(super) struct CorruptCartStore;

impl CartStore for CorruptCartStore {
    fn save(&self, _entries: &[CandidateMatch]) -> Result<(), CartStoreError> {
        Ok(())
    }

    fn load(&self) -> Result<Vec<CandidateMatch>, CartStoreError> {
        Err(CartStoreError::Corrupt("expected JSON array".to_string()))
    }
}

pub(super) type MemoryService =
    ShortlistService<MemoryDirectory, MemoryBlinder, MemoryNotifier, MemoryCartStore>;

pub(super) fn build_service(
    candidates: Vec<CandidateMatch>,
) -> (
    Arc<MemoryService>,
    Arc<MemoryDirectory>,
    Arc<MemoryBlinder>,
    Arc<MemoryNotifier>,
) {
    build_service_with_blinder(candidates, MemoryBlinder::default())
}

pub(super) fn build_service_with_blinder(
    candidates: Vec<CandidateMatch>,
    blinder: MemoryBlinder,
) -> (
    Arc<MemoryService>,
    Arc<MemoryDirectory>,
    Arc<MemoryBlinder>,
    Arc<MemoryNotifier>,
) {
    let directory = Arc::new(MemoryDirectory::with_candidates(candidates));
    let blinder = Arc::new(blinder);
    let notifier = Arc::new(MemoryNotifier::default());
    let service = Arc::new(ShortlistService::open(
        directory.clone(),
        blinder.clone(),
        notifier.clone(),
        MemoryCartStore::default(),
    ));
    (service, directory, blinder, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
