//! Shared content assembly.
//!
//! Every string a renderer displays that is derived (rather than copied
//! verbatim) from the resume model is built here, so the preview and the
//! export cannot disagree on a date range or a contact line.

use crate::models::{ResumeBasics, ResumeEducation, ResumeLanguage};

/// Joins a date pair for display: `"Jan 2022 — Present"`. One empty side
/// collapses to the other; both empty yields the empty string.
pub fn date_range(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (false, false) => format!("{start} — {end}"),
    }
}

/// Joins two fragments with a separator, skipping empty sides.
pub fn subtitle_join(a: &str, b: &str, sep: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => String::new(),
        (false, true) => a.to_string(),
        (true, false) => b.to_string(),
        (false, false) => format!("{a}{sep}{b}"),
    }
}

/// `"Bachelor of Science in Computer Science"`, degenerating gracefully
/// when either part is missing.
pub fn degree_line(edu: &ResumeEducation) -> String {
    subtitle_join(&edu.degree, &edu.field, " in ")
}

/// The contact items in canonical order, empties skipped.
pub fn contact_items(basics: &ResumeBasics) -> Vec<&str> {
    [
        basics.email.as_str(),
        basics.phone.as_str(),
        basics.location.as_str(),
        basics.linkedin.as_str(),
        basics.website.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect()
}

/// `"English — Native"`.
pub fn language_line(lang: &ResumeLanguage) -> String {
    subtitle_join(&lang.language, &lang.proficiency, " — ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_handles_partial_dates() {
        assert_eq!(date_range("Jan 2022", "Present"), "Jan 2022 — Present");
        assert_eq!(date_range("Jan 2022", ""), "Jan 2022");
        assert_eq!(date_range("", "2016"), "2016");
        assert_eq!(date_range("", ""), "");
    }

    #[test]
    fn test_degree_line_degenerates_without_panic() {
        let mut edu = ResumeEducation {
            degree: "Bachelor of Science".into(),
            field: "Computer Science".into(),
            ..ResumeEducation::default()
        };
        assert_eq!(degree_line(&edu), "Bachelor of Science in Computer Science");
        edu.field.clear();
        assert_eq!(degree_line(&edu), "Bachelor of Science");
        edu.degree.clear();
        assert_eq!(degree_line(&edu), "");
    }

    #[test]
    fn test_contact_items_skip_empty_fields_and_keep_order() {
        let basics = ResumeBasics {
            email: "a@b.c".into(),
            location: "Remote".into(),
            website: "a.dev".into(),
            ..ResumeBasics::default()
        };
        assert_eq!(contact_items(&basics), vec!["a@b.c", "Remote", "a.dev"]);
    }

    #[test]
    fn test_language_line() {
        let lang = ResumeLanguage {
            language: "Spanish".into(),
            proficiency: "Professional Working".into(),
        };
        assert_eq!(language_line(&lang), "Spanish — Professional Working");
    }
}
