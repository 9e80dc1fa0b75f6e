use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use super::cache::RedactionCache;
use super::cart::{CartEvent, CartStore, ShortlistCart};
use super::domain::{
    CandidateId, CandidateMatch, CandidateSummary, MatchStatus, PermissivePolicy, TransitionPolicy,
};
use super::pipeline::{self, BatchReport, BatchSummary};
use super::preview::{self, CvPreview, PreviewError};
use super::remote::CvBlinder;
use super::repository::{CandidateDirectory, DirectoryError, Notification, Notifier, Severity};
use super::share::{self, ShareOutcome};

/// Facade composing the cart, redaction cache, candidate store, and blinding
/// client behind one entry point per recruiter session.
///
/// Cart and cache live behind a single async mutex, so pipeline runs are
/// strictly sequential per service instance: no two blinding calls are ever
/// in flight for the same session. Orchestration methods return structured
/// outcomes; the facade translates them into notifications so the workflow
/// modules stay presentation-free.
pub struct ShortlistService<D, B, N, S: CartStore> {
    directory: Arc<D>,
    blinder: Arc<B>,
    notifier: Arc<N>,
    policy: Box<dyn TransitionPolicy>,
    state: Mutex<SessionState<S>>,
}

struct SessionState<S: CartStore> {
    cart: ShortlistCart<S>,
    cache: RedactionCache,
}

/// Error raised by the shortlist service.
#[derive(Debug, thiserror::Error)]
pub enum ShortlistServiceError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error("status change from {from:?} to {to:?} denied by policy")]
    TransitionDenied { from: MatchStatus, to: MatchStatus },
}

impl<D, B, N, S> ShortlistService<D, B, N, S>
where
    D: CandidateDirectory + 'static,
    B: CvBlinder + 'static,
    N: Notifier + 'static,
    S: CartStore + 'static,
{
    /// Opens a session with the permissive status policy, rehydrating the
    /// cart from `store`.
    pub fn open(directory: Arc<D>, blinder: Arc<B>, notifier: Arc<N>, store: S) -> Self {
        Self::with_policy(directory, blinder, notifier, store, Box::new(PermissivePolicy))
    }

    pub fn with_policy(
        directory: Arc<D>,
        blinder: Arc<B>,
        notifier: Arc<N>,
        store: S,
        policy: Box<dyn TransitionPolicy>,
    ) -> Self {
        let cart = ShortlistCart::open(store);
        Self {
            directory,
            blinder,
            notifier,
            policy,
            state: Mutex::new(SessionState {
                cart,
                cache: RedactionCache::new(),
            }),
        }
    }

    pub async fn add_to_cart(&self, candidate: CandidateMatch) -> CartEvent {
        let event = {
            let mut state = self.state.lock().await;
            state.cart.add(candidate)
        };
        self.notify_cart_event(&event);
        event
    }

    pub async fn remove_from_cart(&self, id: &CandidateId) -> CartEvent {
        let event = {
            let mut state = self.state.lock().await;
            state.cart.remove(id)
        };
        self.notify_cart_event(&event);
        event
    }

    /// Empties the cart and drops the cached redactions for its members.
    /// The cart itself never touches the cache; this facade owns the linkage.
    pub async fn clear_cart(&self) -> CartEvent {
        let event = {
            let mut state = self.state.lock().await;
            let ids = state.cart.ids();
            let event = state.cart.clear();
            for id in &ids {
                state.cache.remove(id);
            }
            event
        };
        self.notify_cart_event(&event);
        event
    }

    pub async fn cart_summaries(&self) -> Vec<CandidateSummary> {
        let state = self.state.lock().await;
        state.cart.summaries()
    }

    pub async fn cart_count(&self) -> usize {
        let state = self.state.lock().await;
        state.cart.count()
    }

    pub async fn cart_contains(&self, id: &CandidateId) -> bool {
        let state = self.state.lock().await;
        state.cart.contains(id)
    }

    /// Renders one candidate's CV preview, revealed or redacted. A fetch
    /// failure is terminal for the preview and surfaced as an error
    /// notification; a blinding failure degrades to the fallback body with a
    /// warning notification.
    pub async fn preview(
        &self,
        id: &CandidateId,
        reveal: bool,
    ) -> Result<CvPreview, PreviewError> {
        let mut state = self.state.lock().await;
        let result = preview::open_preview(
            self.directory.as_ref(),
            self.blinder.as_ref(),
            &mut state.cache,
            id,
            reveal,
        )
        .await;
        drop(state);

        match &result {
            Ok(view) if view.redaction_degraded => {
                self.notifier.notify(Notification::new(
                    "CV blinding unavailable",
                    "Showing a fallback message; some personal information may be visible.",
                    Severity::Warning,
                ));
            }
            Ok(_) => {}
            Err(err) => {
                self.notifier.notify(Notification::new(
                    "Unable to load candidate",
                    err.to_string(),
                    Severity::Error,
                ));
            }
        }

        result
    }

    /// Blinds every cart member that still needs it, reading each candidate's
    /// raw CV from the store first. Candidates whose record cannot be read
    /// are treated as not-yet-processable and skipped.
    pub async fn blind_all(&self) -> BatchReport {
        let mut state = self.state.lock().await;
        let ids = state.cart.ids();

        let mut content: HashMap<CandidateId, String> = HashMap::new();
        for id in &ids {
            match self.directory.fetch_match(id) {
                Ok(Some(candidate)) => {
                    content.insert(id.clone(), candidate.cv_content);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(candidate = %id, %err, "could not read candidate record for batch run");
                }
            }
        }

        let report =
            pipeline::blind_all(self.blinder.as_ref(), &mut state.cache, &ids, &content).await;
        drop(state);

        let summary = report.summary();
        let severity = match summary {
            BatchSummary::AllBlinded { .. } => Severity::Success,
            BatchSummary::NothingToBlind | BatchSummary::Partial { .. } => Severity::Warning,
        };
        self.notifier
            .notify(Notification::new("Blind all", summary.message(), severity));

        report
    }

    /// Shares the cart with an employer: every member moves to `shortlisted`
    /// in one bulk update and the cart clears. Share success is reported even
    /// when the status sync fails; the discrepancy is logged.
    pub async fn share(&self, recipient: &str) -> ShareOutcome {
        let outcome = {
            let mut state = self.state.lock().await;
            share::share_cart(self.directory.as_ref(), &mut state.cart, recipient)
        };

        match &outcome {
            ShareOutcome::MissingRecipient => {
                self.notifier.notify(Notification::new(
                    "Recipient required",
                    "Enter an employer address before sharing.",
                    Severity::Error,
                ));
            }
            ShareOutcome::Shared { shared, .. } => {
                self.notifier.notify(Notification::new(
                    "CVs shared",
                    format!("Shared {shared} blinded CVs with {}.", recipient.trim()),
                    Severity::Success,
                ));
            }
        }

        outcome
    }

    /// Persists a status change for one candidate, subject to the configured
    /// transition policy. Absent records count as `matched` for policy
    /// purposes.
    pub async fn update_status(
        &self,
        id: &CandidateId,
        status: MatchStatus,
    ) -> Result<MatchStatus, ShortlistServiceError> {
        let current = self
            .directory
            .fetch_match(id)?
            .map(|candidate| candidate.status)
            .unwrap_or_default();

        if !self.policy.permits(current, status) {
            return Err(ShortlistServiceError::TransitionDenied {
                from: current,
                to: status,
            });
        }

        self.directory.update_status(id, status)?;

        self.notifier.notify(Notification::new(
            "Status updated",
            format!("{id} is now {}.", status.label()),
            Severity::Info,
        ));

        Ok(status)
    }

    fn notify_cart_event(&self, event: &CartEvent) {
        let notification = match event {
            CartEvent::Added { name } => Notification::new(
                "Added to cart",
                format!("{name} is staged for sharing."),
                Severity::Success,
            ),
            CartEvent::AlreadyInCart { name } => Notification::new(
                "Already in cart",
                format!("{name} is already staged for sharing."),
                Severity::Info,
            ),
            CartEvent::Removed { name } => Notification::new(
                "Removed from cart",
                format!("{name} was removed from the selection."),
                Severity::Info,
            ),
            CartEvent::Cleared { removed } => Notification::new(
                "Cart cleared",
                format!("Removed {removed} candidates from the selection."),
                Severity::Info,
            ),
            // Removing an absent candidate stays silent.
            CartEvent::NotInCart => return,
        };
        self.notifier.notify(notification);
    }
}
