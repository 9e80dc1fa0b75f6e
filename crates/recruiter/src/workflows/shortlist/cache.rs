use std::collections::HashMap;

use super::domain::CandidateId;

/// Cached display texts for one candidate. `original` is the formatted (not
/// raw) CV, computed once; `redacted` is the formatted blinded CV and is
/// never recomputed once present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    pub original: Option<String>,
    pub redacted: Option<String>,
}

/// Per-session store of `{original, redacted}` CV text pairs keyed by
/// candidate id. An explicit instance owned by the service facade rather than
/// a module-level singleton; read/write only, no eviction, no size bound.
#[derive(Debug, Default)]
pub struct RedactionCache {
    entries: HashMap<CandidateId, CacheEntry>,
}

impl RedactionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, id: &CandidateId) -> Option<&CacheEntry> {
        self.entries.get(id)
    }

    pub fn original(&self, id: &CandidateId) -> Option<&str> {
        self.entries.get(id).and_then(|e| e.original.as_deref())
    }

    pub fn redacted(&self, id: &CandidateId) -> Option<&str> {
        self.entries.get(id).and_then(|e| e.redacted.as_deref())
    }

    /// Stores the formatted original text, preserving any cached redaction.
    pub fn store_original(&mut self, id: &CandidateId, text: String) {
        self.entries.entry(id.clone()).or_default().original = Some(text);
    }

    /// Stores the formatted blinded text, preserving any cached original.
    pub fn store_redacted(&mut self, id: &CandidateId, text: String) {
        self.entries.entry(id.clone()).or_default().redacted = Some(text);
    }

    pub fn remove(&mut self, id: &CandidateId) {
        self.entries.remove(id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
