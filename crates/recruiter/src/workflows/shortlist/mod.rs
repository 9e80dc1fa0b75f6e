//! Shortlist lifecycle and CV blinding for the recruitment portal.
//!
//! Tracks candidate matches through the hiring pipeline, maintains the
//! recruiter's shortlist cart, and produces employer-safe redacted CV
//! renditions with an idempotent per-candidate cache. Batch blinding
//! tolerates per-candidate failures; sharing moves the whole cart to
//! `shortlisted` in one bulk update.

pub mod cache;
pub mod cart;
pub mod domain;
pub mod format;
pub mod pipeline;
pub mod preview;
pub mod redact;
pub mod remote;
pub mod repository;
pub mod router;
pub mod service;
pub mod share;

#[cfg(test)]
mod tests;

pub use cache::{CacheEntry, RedactionCache};
pub use cart::{CartEvent, CartStore, CartStoreError, JsonFileCartStore, ShortlistCart};
pub use domain::{
    CandidateId, CandidateMatch, CandidateSummary, MatchStatus, PermissivePolicy, TransitionPolicy,
};
pub use format::format_cv_content;
pub use pipeline::{blind_all, BatchReport, BatchSummary};
pub use preview::{
    open_preview, ContactView, CvPreview, PreviewError, PreviewMode, CONTACT_PLACEHOLDER,
    REDACTION_FALLBACK_MESSAGE,
};
pub use redact::redact_pii;
pub use remote::{BlindError, CvBlinder, HttpCvBlinder};
pub use repository::{CandidateDirectory, DirectoryError, Notification, Notifier, Severity};
pub use router::shortlist_router;
pub use service::{ShortlistService, ShortlistServiceError};
pub use share::{share_cart, ShareOutcome};
