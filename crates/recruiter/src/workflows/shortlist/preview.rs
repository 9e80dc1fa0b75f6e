use serde::Serialize;
use tracing::warn;

use super::cache::RedactionCache;
use super::domain::{CandidateId, CandidateMatch};
use super::format::format_cv_content;
use super::remote::CvBlinder;
use super::repository::{CandidateDirectory, DirectoryError};

/// Body shown when the blinding service fails for a preview. The flow does
/// not retry and does not cache the failure.
pub const REDACTION_FALLBACK_MESSAGE: &str =
    "Error processing CV content. Some personal information may be visible.";

/// Placeholder rendered for structured contact fields while a CV is blinded.
/// Contact masking is a local display rule, independent of what the remote
/// service returns for the CV body.
pub const CONTACT_PLACEHOLDER: &str = "Hidden until revealed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    Revealed,
    Redacted,
}

/// Structured contact fields as rendered for the active preview mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView {
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// One rendered preview of a candidate's CV. `redaction_degraded` is set when
/// the redacted branch had to fall back because the blinding call failed.
#[derive(Debug, Clone, Serialize)]
pub struct CvPreview {
    pub candidate: CandidateMatch,
    pub mode: PreviewMode,
    pub body: String,
    pub contact: ContactView,
    pub redaction_degraded: bool,
}

/// Fetch failure is terminal for the preview session; there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("candidate {0} not found")]
    NotFound(CandidateId),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Builds the preview for one candidate.
///
/// The formatted original is computed and cached on first load. The redacted
/// branch reuses a cached blinded rendition when present: repeat views and
/// reveal-toggle round trips never issue a second remote call for the same
/// candidate within a session. The candidate record itself is re-read from
/// the directory on every call, since each HTTP request arrives without
/// per-preview state; only the CV texts are cached.
pub async fn open_preview<D, B>(
    directory: &D,
    blinder: &B,
    cache: &mut RedactionCache,
    id: &CandidateId,
    reveal: bool,
) -> Result<CvPreview, PreviewError>
where
    D: CandidateDirectory + ?Sized,
    B: CvBlinder + ?Sized,
{
    let candidate = directory
        .fetch_match(id)?
        .ok_or_else(|| PreviewError::NotFound(id.clone()))?;

    if cache.original(id).is_none() {
        cache.store_original(id, format_cv_content(&candidate.cv_content));
    }

    if reveal {
        let body = cache
            .original(id)
            .unwrap_or_default()
            .to_string();
        let contact = ContactView {
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            location: candidate.location.clone(),
        };
        return Ok(CvPreview {
            candidate,
            mode: PreviewMode::Revealed,
            body,
            contact,
            redaction_degraded: false,
        });
    }

    let (body, degraded) = match cache.redacted(id) {
        Some(cached) => (cached.to_string(), false),
        None => match blinder.blind(&candidate.cv_content).await {
            Ok(blinded) => {
                let formatted = format_cv_content(&blinded);
                cache.store_redacted(id, formatted.clone());
                (formatted, false)
            }
            Err(err) => {
                warn!(candidate = %id, %err, "CV blinding failed for preview");
                (REDACTION_FALLBACK_MESSAGE.to_string(), true)
            }
        },
    };

    let contact = ContactView {
        email: CONTACT_PLACEHOLDER.to_string(),
        phone: CONTACT_PLACEHOLDER.to_string(),
        location: CONTACT_PLACEHOLDER.to_string(),
    };

    Ok(CvPreview {
        candidate,
        mode: PreviewMode::Redacted,
        body,
        contact,
        redaction_degraded: degraded,
    })
}
