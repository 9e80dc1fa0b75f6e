use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for scored candidate matches. Doubles as the cart and
/// redaction-cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hiring pipeline stages a candidate match can occupy, ordered as typically
/// progressed. Progression is not enforced: a recruiter may move a match to
/// any stage from any other stage (see [`TransitionPolicy`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Matched,
    Shortlisted,
    InterviewAccepted,
    InterviewRejected,
    OfferMade,
    OfferAccepted,
    OfferRejected,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 7] = [
        MatchStatus::Matched,
        MatchStatus::Shortlisted,
        MatchStatus::InterviewAccepted,
        MatchStatus::InterviewRejected,
        MatchStatus::OfferMade,
        MatchStatus::OfferAccepted,
        MatchStatus::OfferRejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MatchStatus::Matched => "Matched",
            MatchStatus::Shortlisted => "Shortlisted",
            MatchStatus::InterviewAccepted => "Interview Accepted",
            MatchStatus::InterviewRejected => "Interview Rejected",
            MatchStatus::OfferMade => "Offer Made",
            MatchStatus::OfferAccepted => "Offer Accepted",
            MatchStatus::OfferRejected => "Offer Rejected",
        }
    }

    /// Color classification used by front ends when rendering status badges.
    /// Informational only.
    pub const fn color(self) -> &'static str {
        match self {
            MatchStatus::Matched => "blue",
            MatchStatus::Shortlisted => "purple",
            MatchStatus::InterviewAccepted => "teal",
            MatchStatus::InterviewRejected => "orange",
            MatchStatus::OfferMade => "amber",
            MatchStatus::OfferAccepted => "green",
            MatchStatus::OfferRejected => "red",
        }
    }
}

/// Guard consulted before a status change is persisted.
///
/// The shipped [`PermissivePolicy`] accepts every transition, matching the
/// current product behavior where the status selector offers the full stage
/// set unconditionally. A stricter machine can be injected later without
/// touching the service.
pub trait TransitionPolicy: Send + Sync {
    fn permits(&self, from: MatchStatus, to: MatchStatus) -> bool;
}

/// Accepts any stage-to-stage move, including regressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissivePolicy;

impl TransitionPolicy for PermissivePolicy {
    fn permits(&self, _from: MatchStatus, _to: MatchStatus) -> bool {
        true
    }
}

/// One scored pairing of a candidate profile to a job, as produced by the
/// external matching service. Only `status` is mutated by this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub id: CandidateId,
    pub name: String,
    pub role: String,
    pub location: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub email: String,
    pub phone: String,
    pub cv_content: String,
    pub match_score: f32,
    pub job_id: String,
    pub job_description: String,
    pub job_role: String,
    pub matched_at: DateTime<Utc>,
    #[serde(default)]
    pub status: MatchStatus,
}

impl CandidateMatch {
    /// Score as rendered everywhere in the product. Raw precision is not
    /// guaranteed to survive a re-fetch, so display code must go through here.
    pub fn display_score(&self) -> u8 {
        self.match_score.round().clamp(0.0, 100.0) as u8
    }

    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
            match_score: self.display_score(),
            status: self.status.label(),
            status_color: self.status.color(),
        }
    }
}

/// Compact cart/listing representation of a match.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateSummary {
    pub id: CandidateId,
    pub name: String,
    pub role: String,
    pub match_score: u8,
    pub status: &'static str,
    pub status_color: &'static str,
}
