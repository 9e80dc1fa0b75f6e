//! "Blind all" batch redaction over the cart's candidates.

use std::collections::HashMap;

use tracing::warn;

use super::cache::RedactionCache;
use super::domain::CandidateId;
use super::format::format_cv_content;
use super::remote::CvBlinder;

/// Per-candidate accounting for one batch run. Every input id lands in
/// exactly one of the three buckets, preserving input order within each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<CandidateId>,
    pub failed: Vec<CandidateId>,
    pub skipped: Vec<CandidateId>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len() + self.skipped.len()
    }

    pub fn summary(&self) -> BatchSummary {
        let blinded = self.succeeded.len();
        let total = self.total();
        if blinded == 0 {
            BatchSummary::NothingToBlind
        } else if blinded == total {
            BatchSummary::AllBlinded { total }
        } else {
            BatchSummary::Partial { blinded, total }
        }
    }
}

/// Quantified outcome the caller maps onto a user-facing summary message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSummary {
    NothingToBlind,
    AllBlinded { total: usize },
    Partial { blinded: usize, total: usize },
}

impl BatchSummary {
    pub fn message(&self) -> String {
        match self {
            BatchSummary::NothingToBlind => "No CVs could be blinded.".to_string(),
            BatchSummary::AllBlinded { total } => {
                format!("All {total} CVs blinded and ready to share.")
            }
            BatchSummary::Partial { blinded, total } => {
                format!("Blinded {blinded} of {total} CVs; the rest need attention.")
            }
        }
    }
}

/// Blinds every uncached candidate in `ids`, sequentially and in input order.
///
/// Ids without content are skipped; ids with a cached redaction count as
/// successes without a remote call; a failed remote call records the id and
/// moves on, so one candidate's failure never aborts the rest. The cache is
/// only written on success, merge-preserving any cached original.
pub async fn blind_all<B>(
    blinder: &B,
    cache: &mut RedactionCache,
    ids: &[CandidateId],
    content: &HashMap<CandidateId, String>,
) -> BatchReport
where
    B: CvBlinder + ?Sized,
{
    let mut report = BatchReport::default();

    for id in ids {
        let Some(raw) = content.get(id) else {
            report.skipped.push(id.clone());
            continue;
        };

        if cache.redacted(id).is_some() {
            report.succeeded.push(id.clone());
            continue;
        }

        match blinder.blind(raw).await {
            Ok(blinded) => {
                cache.store_redacted(id, format_cv_content(&blinded));
                report.succeeded.push(id.clone());
            }
            Err(err) => {
                warn!(candidate = %id, %err, "CV blinding failed during batch run");
                report.failed.push(id.clone());
            }
        }
    }

    report
}
