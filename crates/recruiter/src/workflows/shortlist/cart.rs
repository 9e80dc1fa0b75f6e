use std::fs;
use std::path::PathBuf;

use tracing::warn;

use super::domain::{CandidateId, CandidateMatch, CandidateSummary};

/// Durable blob behind the recruiter's cart. The cart writes the full entry
/// list on every mutation and reads it back once at startup.
pub trait CartStore: Send + Sync {
    fn save(&self, entries: &[CandidateMatch]) -> Result<(), CartStoreError>;
    fn load(&self) -> Result<Vec<CandidateMatch>, CartStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CartStoreError {
    #[error("cart storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cart blob unreadable: {0}")]
    Corrupt(String),
}

/// Outcome of a cart mutation, translated into a user-facing notification by
/// the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    Added { name: String },
    AlreadyInCart { name: String },
    Removed { name: String },
    NotInCart,
    Cleared { removed: usize },
}

/// The recruiter's working selection of candidates staged for sharing.
///
/// Set semantics keyed by candidate id, insertion order preserved. Contents
/// survive a restart through the backing [`CartStore`]; a blob that fails to
/// load is discarded and the cart starts empty. Clearing the cart does not
/// touch the redaction cache; callers own that linkage.
pub struct ShortlistCart<S: CartStore> {
    entries: Vec<CandidateMatch>,
    store: S,
}

impl<S: CartStore> ShortlistCart<S> {
    /// Rehydrates the cart from the store. Corruption is recovered silently:
    /// the blob is dropped and the cart opens empty.
    pub fn open(store: S) -> Self {
        let entries = match store.load() {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%err, "discarding unreadable shortlist cart blob");
                Vec::new()
            }
        };
        Self { entries, store }
    }

    pub fn add(&mut self, candidate: CandidateMatch) -> CartEvent {
        if self.contains(&candidate.id) {
            return CartEvent::AlreadyInCart {
                name: candidate.name,
            };
        }

        let name = candidate.name.clone();
        self.entries.push(candidate);
        self.persist();
        CartEvent::Added { name }
    }

    pub fn remove(&mut self, id: &CandidateId) -> CartEvent {
        match self.entries.iter().position(|entry| &entry.id == id) {
            Some(index) => {
                let removed = self.entries.remove(index);
                self.persist();
                CartEvent::Removed { name: removed.name }
            }
            None => CartEvent::NotInCart,
        }
    }

    pub fn clear(&mut self) -> CartEvent {
        let removed = self.entries.len();
        self.entries.clear();
        self.persist();
        CartEvent::Cleared { removed }
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CandidateMatch] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<CandidateId> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    pub fn summaries(&self) -> Vec<CandidateSummary> {
        self.entries.iter().map(CandidateMatch::summary).collect()
    }

    // Durability is best effort: a failed write is logged and the in-memory
    // cart remains authoritative for the session.
    fn persist(&self) {
        if let Err(err) = self.store.save(&self.entries) {
            warn!(%err, "failed to persist shortlist cart");
        }
    }
}

/// JSON-on-disk cart blob under a fixed path.
pub struct JsonFileCartStore {
    path: PathBuf,
}

impl JsonFileCartStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CartStore for JsonFileCartStore {
    fn save(&self, entries: &[CandidateMatch]) -> Result<(), CartStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let blob = serde_json::to_vec_pretty(entries)
            .map_err(|err| CartStoreError::Corrupt(err.to_string()))?;
        fs::write(&self.path, blob)?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<CandidateMatch>, CartStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let blob = fs::read_to_string(&self.path)?;
        serde_json::from_str(&blob).map_err(|err| CartStoreError::Corrupt(err.to_string()))
    }
}
