use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use recruiter::workflows::shortlist::{
    CandidateDirectory, CandidateId, CandidateMatch, DirectoryError, MatchStatus, Notification,
    Notifier, Severity,
};
use tracing::{error, info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Candidate store backing the service until the matching platform's
/// database is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateDirectory {
    records: Arc<Mutex<HashMap<CandidateId, CandidateMatch>>>,
}

impl InMemoryCandidateDirectory {
    pub(crate) fn seed(&self, candidates: Vec<CandidateMatch>) {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        for candidate in candidates {
            guard.insert(candidate.id.clone(), candidate);
        }
    }
}

impl CandidateDirectory for InMemoryCandidateDirectory {
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
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        for id in ids {
            if let Some(candidate) = guard.get_mut(id) {
                candidate.status = status;
            }
        }
        Ok(())
    }
}

/// Routes workflow notifications into the service log, mapped by severity.
pub(crate) struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => {
                error!(title = %notification.title, "{}", notification.description)
            }
            Severity::Warning => {
                warn!(title = %notification.title, "{}", notification.description)
            }
            Severity::Info | Severity::Success => {
                info!(title = %notification.title, "{}", notification.description)
            }
        }
    }
}
