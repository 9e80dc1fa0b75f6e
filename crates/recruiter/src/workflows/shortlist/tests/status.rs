use std::collections::HashSet;

use serde_json::json;

use crate::workflows::shortlist::domain::{
    CandidateId, MatchStatus, PermissivePolicy, TransitionPolicy,
};

use super::common::candidate;

#[test]
fn newly_scored_matches_default_to_matched() {
    assert_eq!(MatchStatus::default(), MatchStatus::Matched);
}

#[test]
fn wire_form_is_snake_case() {
    assert_eq!(
        serde_json::to_value(MatchStatus::InterviewAccepted).expect("serializes"),
        json!("interview_accepted")
    );
    let parsed: MatchStatus =
        serde_json::from_value(json!("offer_rejected")).expect("deserializes");
    assert_eq!(parsed, MatchStatus::OfferRejected);
}

#[test]
fn missing_status_deserializes_to_matched() {
    let mut value = serde_json::to_value(candidate("one", 82.0)).expect("serializes");
    value
        .as_object_mut()
        .expect("object")
        .remove("status")
        .expect("status present");

    let parsed: crate::workflows::shortlist::domain::CandidateMatch =
        serde_json::from_value(value).expect("deserializes without status");
    assert_eq!(parsed.status, MatchStatus::Matched);
}

#[test]
fn the_full_stage_set_is_exposed_in_progression_order() {
    assert_eq!(MatchStatus::ALL.len(), 7);
    assert_eq!(MatchStatus::ALL[0], MatchStatus::Matched);
    assert_eq!(MatchStatus::ALL[1], MatchStatus::Shortlisted);
    assert_eq!(MatchStatus::ALL[6], MatchStatus::OfferRejected);

    let labels: HashSet<&str> = MatchStatus::ALL.iter().map(|s| s.label()).collect();
    assert_eq!(labels.len(), 7, "labels must be distinct");
    assert!(MatchStatus::ALL.iter().all(|s| !s.color().is_empty()));
}

#[test]
fn permissive_policy_accepts_every_pairing() {
    let policy = PermissivePolicy;
    for from in MatchStatus::ALL {
        for to in MatchStatus::ALL {
            assert!(policy.permits(from, to), "{from:?} -> {to:?} must pass");
        }
    }
}

#[test]
fn display_score_rounds_to_integer() {
    let mut scored = candidate("one", 86.4);
    assert_eq!(scored.display_score(), 86);
    scored.match_score = 86.5;
    assert_eq!(scored.display_score(), 87);
    scored.match_score = 104.2;
    assert_eq!(scored.display_score(), 100, "scores clamp into 0..=100");
}

#[test]
fn candidate_ids_render_as_their_inner_value() {
    assert_eq!(CandidateId("cand-7".to_string()).to_string(), "cand-7");
}
