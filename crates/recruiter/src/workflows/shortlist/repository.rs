use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateMatch, MatchStatus};

/// Read/update abstraction over the external candidate/match store so the
/// workflow modules can be exercised in isolation.
pub trait CandidateDirectory: Send + Sync {
    /// Fetches a match by id with its current status joined in. Records with
    /// no stored status come back as [`MatchStatus::Matched`].
    fn fetch_match(&self, id: &CandidateId) -> Result<Option<CandidateMatch>, DirectoryError>;

    fn update_status(&self, id: &CandidateId, status: MatchStatus) -> Result<(), DirectoryError>;

    /// Sets `status` for every id in one request against the store.
    fn update_status_bulk(
        &self,
        ids: &[CandidateId],
        status: MatchStatus,
    ) -> Result<(), DirectoryError>;
}

/// Error enumeration for candidate store failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("candidate record not found")]
    NotFound,
    #[error("candidate store unavailable: {0}")]
    Unavailable(String),
}

/// Severity classification for user-facing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Fire-and-forget notification tuple handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }
}

/// Outbound notification sink. Implementations must not block workflow
/// logic; delivery failures are theirs to swallow.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
