//! Sharing the cart's blinded CVs with an employer.

use tracing::{info, warn};

use super::cart::{CartStore, ShortlistCart};
use super::domain::MatchStatus;
use super::repository::CandidateDirectory;

/// Result of a share attempt.
///
/// `status_synced` records whether the bulk move to `shortlisted` reached the
/// store. Share success and status persistence are deliberately decoupled: a
/// failed bulk update is logged and reported here, never rolled back into a
/// share failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    MissingRecipient,
    Shared { shared: usize, status_synced: bool },
}

/// Shares every cart member with `recipient`, marks them all `shortlisted`
/// in one bulk update, and clears the cart.
///
/// An empty recipient fails locally with the cart untouched and no remote
/// call. The share side effect itself is an external concern simulated as
/// success at this boundary.
pub fn share_cart<D, S>(
    directory: &D,
    cart: &mut ShortlistCart<S>,
    recipient: &str,
) -> ShareOutcome
where
    D: CandidateDirectory + ?Sized,
    S: CartStore,
{
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return ShareOutcome::MissingRecipient;
    }

    let ids = cart.ids();
    info!(recipient, count = ids.len(), "sharing blinded CVs with employer");

    let status_synced = match directory.update_status_bulk(&ids, MatchStatus::Shortlisted) {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "bulk shortlist status update failed after share");
            false
        }
    };

    cart.clear();

    ShareOutcome::Shared {
        shared: ids.len(),
        status_synced,
    }
}
