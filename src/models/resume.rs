//! Canonical resume content model — the only object passed into a renderer.
//!
//! Every scalar field defaults to the empty string and every collection to
//! the empty sequence; renderers treat an empty collection (or an empty
//! `basics.summary`) as "section omitted". Date fields are opaque display
//! strings ("Jan 2022", "Present") — the core never parses or orders them.
//! Sequence order is author intent and is preserved end-to-end.
//!
//! Entry `id`s exist only for referential update/delete in the editing
//! layer; renderers ignore them entirely.

use serde::{Deserialize, Serialize};

/// The non-repeating identity/contact/summary block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeBasics {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeExperience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeEducation {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    /// The single genuinely omittable field in the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeSkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeCertification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeLanguage {
    pub language: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeProject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub highlights: Vec<String>,
}

/// Root aggregate. Renderers receive this read-only and never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub basics: ResumeBasics,
    pub experience: Vec<ResumeExperience>,
    pub education: Vec<ResumeEducation>,
    pub skills: Vec<ResumeSkillGroup>,
    pub certifications: Vec<ResumeCertification>,
    pub languages: Vec<ResumeLanguage>,
    pub projects: Vec<ResumeProject>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let data: ResumeData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.basics.name, "");
        assert!(data.experience.is_empty());
        assert!(data.languages.is_empty());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = r#"{"experience":[{"id":"e1","startDate":"Jan 2022","endDate":"Present"}]}"#;
        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.experience[0].start_date, "Jan 2022");
        assert_eq!(data.experience[0].end_date, "Present");
    }

    #[test]
    fn test_gpa_absent_serializes_without_key() {
        let edu = ResumeEducation::default();
        let value = serde_json::to_value(&edu).unwrap();
        assert!(value.get("gpa").is_none());
    }

    #[test]
    fn test_serde_round_trip_is_lossless() {
        let data = crate::sample::sample_resume();
        let json = serde_json::to_string(&data).unwrap();
        let back: ResumeData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
