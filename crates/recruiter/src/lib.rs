//! Core library for the recruitment portal's shortlist lifecycle and CV
//! blinding workflows.
//!
//! The crate owns the domain model (candidate matches and their hiring
//! pipeline status), the recruiter's shortlist cart, the PII redaction
//! utilities, and the orchestration that shares blinded CVs with employers.
//! HTTP serving, metrics, and CLI concerns live in the `recruiter-api`
//! service crate.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
