//! Resume template rendering core.
//!
//! Takes structured resume content and renders it through a fixed set of
//! visual templates into two outputs that must agree with each other:
//!
//! - an interactive HTML preview ([`render::render_preview`]), and
//! - a paginated, selectable-text PDF export ([`render::render_export`]).
//!
//! Both backends consume the same per-template layout plan, the same
//! derived display strings and the same font metrics, so a template cannot
//! drift between what the user sees and what they download.
//!
//! Untrusted input (AI parse output, saved editor state) enters through
//! [`schema::validate_resume`], which produces a [`models::ResumeData`]
//! that every renderer accepts without further checks.

pub mod errors;
pub mod layout;
pub mod models;
pub mod render;
pub mod sample;
pub mod schema;
pub mod templates;

pub use errors::{ExportError, SchemaError, UnknownTemplateError};
pub use models::ResumeData;
pub use render::{render_export, render_export_task, render_preview};
pub use schema::validate_resume;
pub use templates::{TemplateId, TemplateConfig, TEMPLATES};
