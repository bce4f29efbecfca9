//! Schema validation for untrusted resume JSON (AI parse output).
//!
//! # Validation rules
//! - Missing scalar fields coerce to the empty string; missing sequence
//!   fields coerce to the empty sequence.
//! - A field that is *present* with the wrong fundamental type is a
//!   [`SchemaError`] — including `null`, which counts as a wrong type, not
//!   as absent.
//! - `gpa` is the only omittable field (absent → `None`).
//! - A missing entry `id` is backfilled with a fresh UUIDv4 so the
//!   referential-uniqueness invariant holds; an empty-string default would
//!   break it.
//!
//! No semantic validation happens here: emails, URLs, and dates are
//! free-text throughout.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::SchemaError;
use crate::models::{
    ResumeBasics, ResumeCertification, ResumeData, ResumeEducation, ResumeExperience,
    ResumeLanguage, ResumeProject, ResumeSkillGroup,
};

/// Validates and coerces an arbitrary decoded JSON value into a [`ResumeData`].
pub fn validate_resume(value: &Value) -> Result<ResumeData, SchemaError> {
    let root = match value {
        Value::Object(map) => map,
        other => {
            return Err(SchemaError::NotAnObject {
                found: json_type_name(other),
            })
        }
    };

    Ok(ResumeData {
        basics: parse_basics(root)?,
        experience: entry_seq(root, "experience", parse_experience)?,
        education: entry_seq(root, "education", parse_education)?,
        skills: entry_seq(root, "skills", parse_skill_group)?,
        certifications: entry_seq(root, "certifications", parse_certification)?,
        languages: entry_seq(root, "languages", parse_language)?,
        projects: entry_seq(root, "projects", parse_project)?,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Per-section parsers
// ────────────────────────────────────────────────────────────────────────────

fn parse_basics(root: &Map<String, Value>) -> Result<ResumeBasics, SchemaError> {
    let obj = match root.get("basics") {
        None => return Ok(ResumeBasics::default()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(SchemaError::WrongType {
                field: "basics".to_string(),
                expected: "object",
                found: json_type_name(other),
            })
        }
    };

    Ok(ResumeBasics {
        name: string_field(obj, "basics", "name")?,
        headline: string_field(obj, "basics", "headline")?,
        email: string_field(obj, "basics", "email")?,
        phone: string_field(obj, "basics", "phone")?,
        location: string_field(obj, "basics", "location")?,
        linkedin: string_field(obj, "basics", "linkedin")?,
        website: string_field(obj, "basics", "website")?,
        summary: string_field(obj, "basics", "summary")?,
    })
}

fn parse_experience(obj: &Map<String, Value>, ctx: &str) -> Result<ResumeExperience, SchemaError> {
    Ok(ResumeExperience {
        id: id_field(obj, ctx)?,
        company: string_field(obj, ctx, "company")?,
        position: string_field(obj, ctx, "position")?,
        start_date: string_field(obj, ctx, "startDate")?,
        end_date: string_field(obj, ctx, "endDate")?,
        location: string_field(obj, ctx, "location")?,
        highlights: string_seq_field(obj, ctx, "highlights")?,
    })
}

fn parse_education(obj: &Map<String, Value>, ctx: &str) -> Result<ResumeEducation, SchemaError> {
    Ok(ResumeEducation {
        id: id_field(obj, ctx)?,
        institution: string_field(obj, ctx, "institution")?,
        degree: string_field(obj, ctx, "degree")?,
        field: string_field(obj, ctx, "field")?,
        start_date: string_field(obj, ctx, "startDate")?,
        end_date: string_field(obj, ctx, "endDate")?,
        gpa: optional_string_field(obj, ctx, "gpa")?,
    })
}

fn parse_skill_group(obj: &Map<String, Value>, ctx: &str) -> Result<ResumeSkillGroup, SchemaError> {
    Ok(ResumeSkillGroup {
        category: string_field(obj, ctx, "category")?,
        items: string_seq_field(obj, ctx, "items")?,
    })
}

fn parse_certification(
    obj: &Map<String, Value>,
    ctx: &str,
) -> Result<ResumeCertification, SchemaError> {
    Ok(ResumeCertification {
        name: string_field(obj, ctx, "name")?,
        issuer: string_field(obj, ctx, "issuer")?,
        date: string_field(obj, ctx, "date")?,
    })
}

fn parse_language(obj: &Map<String, Value>, ctx: &str) -> Result<ResumeLanguage, SchemaError> {
    Ok(ResumeLanguage {
        language: string_field(obj, ctx, "language")?,
        proficiency: string_field(obj, ctx, "proficiency")?,
    })
}

fn parse_project(obj: &Map<String, Value>, ctx: &str) -> Result<ResumeProject, SchemaError> {
    Ok(ResumeProject {
        id: id_field(obj, ctx)?,
        name: string_field(obj, ctx, "name")?,
        description: string_field(obj, ctx, "description")?,
        highlights: string_seq_field(obj, ctx, "highlights")?,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn field_path(ctx: &str, key: &str) -> String {
    format!("{ctx}.{key}")
}

/// Missing → `""`; present string → cloned; anything else → `WrongType`.
fn string_field(obj: &Map<String, Value>, ctx: &str, key: &str) -> Result<String, SchemaError> {
    match obj.get(key) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaError::WrongType {
            field: field_path(ctx, key),
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

/// Missing → `None`; present string → `Some`; anything else → `WrongType`.
fn optional_string_field(
    obj: &Map<String, Value>,
    ctx: &str,
    key: &str,
) -> Result<Option<String>, SchemaError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaError::WrongType {
            field: field_path(ctx, key),
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

/// Missing → fresh UUIDv4 (entry identifiers must stay unique per entry).
fn id_field(obj: &Map<String, Value>, ctx: &str) -> Result<String, SchemaError> {
    match obj.get("id") {
        None => Ok(Uuid::new_v4().to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SchemaError::WrongType {
            field: field_path(ctx, "id"),
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

/// Missing → `[]`; present array of strings → cloned; anything else → `WrongType`.
fn string_seq_field(
    obj: &Map<String, Value>,
    ctx: &str,
    key: &str,
) -> Result<Vec<String>, SchemaError> {
    let arr = match obj.get(key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(arr)) => arr,
        Some(other) => {
            return Err(SchemaError::WrongType {
                field: field_path(ctx, key),
                expected: "array",
                found: json_type_name(other),
            })
        }
    };

    arr.iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(SchemaError::WrongType {
                field: format!("{ctx}.{key}[{i}]"),
                expected: "string",
                found: json_type_name(other),
            }),
        })
        .collect()
}

/// Parses a top-level sequence field whose elements are objects.
fn entry_seq<T>(
    root: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&Map<String, Value>, &str) -> Result<T, SchemaError>,
) -> Result<Vec<T>, SchemaError> {
    let arr = match root.get(key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(arr)) => arr,
        Some(other) => {
            return Err(SchemaError::WrongType {
                field: key.to_string(),
                expected: "array",
                found: json_type_name(other),
            })
        }
    };

    arr.iter()
        .enumerate()
        .map(|(i, item)| {
            let ctx = format!("{key}[{i}]");
            match item {
                Value::Object(obj) => parse(obj, &ctx),
                other => Err(SchemaError::WrongType {
                    field: ctx,
                    expected: "object",
                    found: json_type_name(other),
                }),
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_payload_defaults_everything_else() {
        let data = validate_resume(&json!({"basics": {"name": "X"}})).unwrap();
        assert_eq!(data.basics.name, "X");
        assert_eq!(data.basics.summary, "");
        assert!(data.experience.is_empty());
        assert!(data.education.is_empty());
        assert!(data.skills.is_empty());
        assert!(data.certifications.is_empty());
        assert!(data.languages.is_empty());
        assert!(data.projects.is_empty());
    }

    #[test]
    fn test_wrong_type_for_sequence_is_schema_error() {
        let err =
            validate_resume(&json!({"basics": {"name": "X"}, "experience": "not-an-array"}))
                .unwrap_err();
        match err {
            SchemaError::WrongType {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "experience");
                assert_eq!(expected, "array");
                assert_eq!(found, "string");
            }
            other => panic!("expected WrongType, got {other:?}"),
        }
    }

    #[test]
    fn test_null_counts_as_wrong_type_not_absent() {
        let err = validate_resume(&json!({"basics": {"name": null}})).unwrap_err();
        assert!(matches!(err, SchemaError::WrongType { found: "null", .. }));
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let err = validate_resume(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, SchemaError::NotAnObject { found: "array" }));
    }

    #[test]
    fn test_nested_wrong_type_reports_field_path() {
        let err = validate_resume(&json!({
            "experience": [{"id": "e1", "highlights": ["ok", 7]}]
        }))
        .unwrap_err();
        match err {
            SchemaError::WrongType { field, .. } => {
                assert_eq!(field, "experience[0].highlights[1]");
            }
            other => panic!("expected WrongType, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_entry_ids_are_backfilled_and_unique() {
        let data = validate_resume(&json!({
            "experience": [{"company": "A"}, {"company": "B"}]
        }))
        .unwrap();
        assert!(!data.experience[0].id.is_empty());
        assert!(!data.experience[1].id.is_empty());
        assert_ne!(data.experience[0].id, data.experience[1].id);
    }

    #[test]
    fn test_gpa_absent_is_none_present_is_some() {
        let data = validate_resume(&json!({
            "education": [{"id": "a"}, {"id": "b", "gpa": "3.8"}]
        }))
        .unwrap();
        assert_eq!(data.education[0].gpa, None);
        assert_eq!(data.education[1].gpa, Some("3.8".to_string()));
    }

    #[test]
    fn test_order_is_preserved() {
        let data = validate_resume(&json!({
            "experience": [
                {"id": "a", "company": "A"},
                {"id": "b", "company": "B"},
                {"id": "c", "company": "C"}
            ]
        }))
        .unwrap();
        let companies: Vec<&str> = data.experience.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, ["A", "B", "C"]);
    }

    #[test]
    fn test_round_trip_exact_input_is_deep_equal() {
        let sample = crate::sample::sample_resume();
        let value = serde_json::to_value(&sample).unwrap();
        let validated = validate_resume(&value).unwrap();
        assert_eq!(validated, sample);
    }
}
