//! Reshapes raw CV text into a lightly structured display form.
//!
//! The same transform is applied to original and blinded text so the two
//! render identically apart from the masked content.

/// Promotes section markers to `##` headings, trims stray whitespace, and
/// collapses blank-line runs. Empty input yields empty output.
pub fn format_cv_content(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !lines.is_empty() && lines.last().map(String::as_str) != Some("") {
                lines.push(String::new());
            }
            continue;
        }

        if is_section_heading(trimmed) {
            lines.push(format!("## {}", trimmed.trim_end_matches(':').trim_end()));
        } else {
            lines.push(trimmed.to_string());
        }
    }

    while lines.last().map(String::as_str) == Some("") {
        lines.pop();
    }

    lines.join("\n")
}

/// A heading is a short, letter-initial line that is either ALL CAPS or ends
/// with a colon, like "EXPERIENCE" or "Education:".
fn is_section_heading(line: &str) -> bool {
    if line.len() > 40 {
        return false;
    }
    if !line.chars().next().is_some_and(|c| c.is_alphabetic()) {
        return false;
    }
    if line.ends_with(':') {
        return true;
    }

    let mut saw_letter = false;
    for c in line.chars() {
        if c.is_alphabetic() {
            saw_letter = true;
            if c.is_lowercase() {
                return false;
            }
        }
    }
    saw_letter && line.split_whitespace().count() <= 4
}
