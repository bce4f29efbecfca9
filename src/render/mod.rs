//! Renderer dispatch.
//!
//! One entry point per output kind. Dispatch resolves the template
//! identity leniently — an unrecognized name renders with the default
//! template rather than failing, since a stale identity in saved state
//! must never take the preview down. The typed `_id` variants skip that
//! resolution for callers that already hold a [`TemplateId`].

pub mod export;
pub mod preview;

use tokio::task;
use tracing::info;

use crate::errors::ExportError;
use crate::layout::color::resolve_accent;
use crate::layout::font_metrics::PageSetup;
use crate::layout::paginate::{paginate, PaginatedDoc};
use crate::models::ResumeData;
use crate::templates::TemplateId;

/// Renders the interactive HTML preview.
pub fn render_preview(template: &str, data: &ResumeData, accent: Option<&str>) -> String {
    render_preview_id(TemplateId::from_name_or_default(template), data, accent)
}

pub fn render_preview_id(id: TemplateId, data: &ResumeData, accent: Option<&str>) -> String {
    preview::render_html(id, data, resolve_accent(id, accent))
}

/// Lays out and serializes the paginated PDF export.
pub fn render_export(
    template: &str,
    data: &ResumeData,
    accent: Option<&str>,
    setup: PageSetup,
) -> Result<Vec<u8>, ExportError> {
    render_export_id(TemplateId::from_name_or_default(template), data, accent, setup)
}

pub fn render_export_id(
    id: TemplateId,
    data: &ResumeData,
    accent: Option<&str>,
    setup: PageSetup,
) -> Result<Vec<u8>, ExportError> {
    let layout = layout_pages(id, data, accent, setup);
    let bytes = export::render_pdf(&layout)?;
    info!(
        template = %id,
        pages = layout.pages.len(),
        bytes = bytes.len(),
        "rendered pdf export"
    );
    Ok(bytes)
}

/// The page model behind an export, exposed for pagination-aware callers
/// (page-count badges, print preview).
pub fn layout_pages(
    id: TemplateId,
    data: &ResumeData,
    accent: Option<&str>,
    setup: PageSetup,
) -> PaginatedDoc {
    paginate(id, data, resolve_accent(id, accent), setup)
}

/// Runs the export off the async runtime's worker threads. Layout and
/// serialization are CPU-bound; a large resume must not stall the
/// reactor.
pub async fn render_export_task(
    template: String,
    data: ResumeData,
    accent: Option<String>,
    setup: PageSetup,
) -> Result<Vec<u8>, ExportError> {
    task::spawn_blocking(move || render_export(&template, &data, accent.as_deref(), setup))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_resume;

    #[test]
    fn test_unknown_template_renders_like_the_default() {
        let data = sample_resume();
        let fallback = render_preview("does-not-exist", &data, None);
        let modern = render_preview("modern", &data, None);
        assert_eq!(fallback, modern);
    }

    #[test]
    fn test_preview_and_export_agree_on_content() {
        let data = sample_resume();
        let html = render_preview("compact", &data, None);
        let layout = layout_pages(TemplateId::Compact, &data, None, PageSetup::default());
        for exp in &data.experience {
            assert!(html.contains(&exp.company));
            assert!(layout.all_spans().any(|s| s.text.contains(&exp.company)));
        }
    }

    #[test]
    fn test_export_accepts_accent_override() {
        let data = sample_resume();
        let bytes = render_export("bold", &data, Some("#0f766e"), PageSetup::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_task_runs_off_the_reactor() {
        let bytes = render_export_task(
            "timeline".to_string(),
            sample_resume(),
            None,
            PageSetup::default(),
        )
        .await
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
