//! Local pattern-based PII masking for CV text.
//!
//! This is deliberately independent from the remote blinding service: it
//! backs the offline `redact` CLI utility and the demo blinder, and its
//! output is not assumed equivalent to the remote service's.

use once_cell::sync::Lazy;
use regex::Regex;

pub const EMAIL_PLACEHOLDER: &str = "[EMAIL REDACTED]";
pub const PHONE_PLACEHOLDER: &str = "[PHONE REDACTED]";
pub const ADDRESS_PLACEHOLDER: &str = "[ADDRESS REDACTED]";
pub const NAME_PLACEHOLDER: &str = "[NAME REDACTED]";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email pattern")
});

// International and parenthesized forms like "+12 (345) 678-9012" or
// "555-123-4567". Bare digit runs are handled separately.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d{1,3}[\s.-]?\(?\d{2,4}\)?[\s.-]?\d{3,4}(?:[\s.-]\d{3,4})?")
        .expect("valid phone pattern")
});

static DIGIT_RUN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{5,}").expect("valid digit run pattern"));

static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+\s+(?:[A-Za-z]+\s+){1,3}(?:Avenue|Street|Road|Boulevard|Lane|Drive|Court|Plaza|Terrace|Way)\b",
    )
    .expect("valid address pattern")
});

/// Masks emails, phone numbers, street addresses, and (optionally) a
/// candidate's name inside `text`. Passes run in that order, each over the
/// output of the previous one. Empty input yields empty output.
pub fn redact_pii(text: &str, candidate_name: Option<&str>) -> String {
    if text.is_empty() {
        return String::new();
    }

    let pass = EMAIL_PATTERN.replace_all(text, EMAIL_PLACEHOLDER);
    let pass = PHONE_PATTERN.replace_all(&pass, PHONE_PLACEHOLDER);
    let pass = DIGIT_RUN_PATTERN.replace_all(&pass, PHONE_PLACEHOLDER);
    let mut redacted = ADDRESS_PATTERN
        .replace_all(&pass, ADDRESS_PLACEHOLDER)
        .into_owned();

    if let Some(name) = candidate_name {
        for token in name.split_whitespace().filter(|token| token.len() > 2) {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(token));
            // Escaped literal tokens always compile.
            let token_pattern = Regex::new(&pattern).expect("valid name token pattern");
            redacted = token_pattern
                .replace_all(&redacted, NAME_PLACEHOLDER)
                .into_owned();
        }
    }

    redacted
}
