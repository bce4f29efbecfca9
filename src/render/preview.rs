//! Interactive preview backend.
//!
//! Emits a self-contained HTML fragment with inline styles only — no
//! stylesheet, no scripts — sized in points so the on-screen proportions
//! match the exported pages. The emitter walks the same template plan and
//! uses the same derived strings as the export backend; it contains no
//! per-template branching beyond the plan's own tokens.
//!
//! All resume-sourced text is HTML-escaped. Accent-derived tints use hex8
//! colors so that changing the accent rewrites every derived color too.

use crate::layout::color::Rgb;
use crate::layout::font_metrics::FontFamily;
use crate::layout::plan::{
    plan_for, section_title, BulletMarker, ColumnScheme, HeaderStyle, SectionKind, Side,
    TemplatePlan,
};
use crate::layout::text::{contact_items, date_range, degree_line, language_line, subtitle_join};
use crate::models::ResumeData;
use crate::templates::TemplateId;

const INK: &str = "#1f2937";
const MUTED: &str = "#6b7280";

/// Minimal HTML escape for text nodes and attribute values.
fn esc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn font_stack(family: FontFamily) -> &'static str {
    match family {
        FontFamily::Helvetica => "Helvetica, Arial, sans-serif",
        FontFamily::TimesRoman => "'Times New Roman', Times, serif",
    }
}

struct Emitter<'a> {
    plan: &'a TemplatePlan,
    accent: Rgb,
    data: &'a ResumeData,
    out: String,
}

impl<'a> Emitter<'a> {
    fn push(&mut self, html: &str) {
        self.out.push_str(html);
    }

    fn accent_css(&self) -> String {
        self.accent.css()
    }

    /// Text palette inside the current region: filled regions render on
    /// the accent, everything else on white.
    fn palette(&self, on_fill: bool) -> (String, String, String) {
        if on_fill {
            (
                "#ffffff".to_string(),
                self.accent.tint(0.35).css(),
                "#ffffff".to_string(),
            )
        } else {
            (INK.to_string(), MUTED.to_string(), self.accent_css())
        }
    }

    // ── header ──

    fn emit_header(&mut self) {
        let basics = &self.data.basics;
        let ty = &self.plan.typography;
        let accent = self.accent_css();
        match self.plan.header {
            HeaderStyle::Banner { rule_pt } | HeaderStyle::Centered { rule_pt } => {
                let centered = matches!(self.plan.header, HeaderStyle::Centered { .. });
                let align = if centered { "center" } else { "left" };
                let rule = if rule_pt > 0.0 {
                    format!("border-bottom:{rule_pt}pt solid {accent};")
                } else {
                    String::new()
                };
                self.push(&format!(
                    "<header style=\"text-align:{align};{rule}padding-bottom:8pt;margin-bottom:{}pt\">",
                    self.plan.spacing.section_gap_pt
                ));
                self.emit_name_block(ty.name_size_pt, INK, &accent, MUTED);
                self.push("</header>");
            }
            HeaderStyle::FilledBanner => {
                self.push(&format!(
                    "<header style=\"background:{accent};color:#ffffff;padding:{m}pt;margin:-{m}pt -{m}pt {gap}pt -{m}pt\">",
                    m = self.plan.spacing.margin_pt,
                    gap = self.plan.spacing.section_gap_pt
                ));
                self.emit_name_block(ty.name_size_pt, "#ffffff", "#ffffff", "#ffffff");
                self.push("</header>");
            }
            HeaderStyle::SplitContact => {
                self.push(&format!(
                    "<header style=\"display:flex;justify-content:space-between;align-items:flex-start;border-bottom:1pt solid {accent};padding-bottom:6pt;margin-bottom:{}pt\">",
                    self.plan.spacing.section_gap_pt
                ));
                self.push("<div>");
                if !basics.name.is_empty() {
                    self.push(&format!(
                        "<div style=\"font-size:{}pt;font-weight:bold;color:{INK}\">{}</div>",
                        ty.name_size_pt,
                        esc(&basics.name)
                    ));
                }
                if !basics.headline.is_empty() {
                    self.push(&format!(
                        "<div style=\"font-size:{}pt;color:{accent}\">{}</div>",
                        ty.base_size_pt + 1.0,
                        esc(&basics.headline)
                    ));
                }
                self.push("</div>");
                self.push(&format!(
                    "<div style=\"text-align:right;font-size:{}pt;color:{MUTED}\">",
                    ty.base_size_pt - 0.5
                ));
                for item in contact_items(basics) {
                    self.push(&format!("<div>{}</div>", esc(item)));
                }
                self.push("</div></header>");
            }
            // The name block opens the sidebar instead; emitted there.
            HeaderStyle::InSidebar => {}
        }
    }

    fn emit_name_block(&mut self, name_size: f32, name_color: &str, sub_color: &str, muted: &str) {
        let basics = &self.data.basics;
        let ty = &self.plan.typography;
        if !basics.name.is_empty() {
            self.push(&format!(
                "<div style=\"font-size:{name_size}pt;font-weight:bold;color:{name_color}\">{}</div>",
                esc(&basics.name)
            ));
        }
        if !basics.headline.is_empty() {
            self.push(&format!(
                "<div style=\"font-size:{}pt;color:{sub_color}\">{}</div>",
                ty.base_size_pt + 1.5,
                esc(&basics.headline)
            ));
        }
        let contact = contact_items(basics);
        if !contact.is_empty() {
            let joined = contact
                .iter()
                .map(|c| esc(c))
                .collect::<Vec<_>>()
                .join(" \u{b7} ");
            self.push(&format!(
                "<div style=\"font-size:{}pt;color:{muted};margin-top:3pt\">{joined}</div>",
                ty.base_size_pt - 0.5
            ));
        }
    }

    // ── sections ──

    fn section_is_populated(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Summary => !self.data.basics.summary.is_empty(),
            SectionKind::Experience => !self.data.experience.is_empty(),
            SectionKind::Projects => !self.data.projects.is_empty(),
            SectionKind::Education => !self.data.education.is_empty(),
            SectionKind::Skills => !self.data.skills.is_empty(),
            SectionKind::Certifications => !self.data.certifications.is_empty(),
            SectionKind::Languages => !self.data.languages.is_empty(),
        }
    }

    fn emit_heading(&mut self, kind: SectionKind, on_fill: bool, size: f32) {
        let (_, _, heading) = self.palette(on_fill);
        let underline = if self.plan.heading_underline {
            format!("border-bottom:0.8pt solid {};", self.accent_css())
        } else {
            String::new()
        };
        self.push(&format!(
            "<div style=\"font-size:{size}pt;font-weight:bold;letter-spacing:0.08em;text-transform:uppercase;color:{heading};{underline}padding-bottom:2pt;margin-bottom:{}pt\">{}</div>",
            self.plan.spacing.heading_gap_pt,
            esc(section_title(self.plan.id, kind))
        ));
    }

    fn bullet_html(&self, text: &str, text_color: &str) -> String {
        let accent = self.accent_css();
        let marker = match self.plan.marker {
            BulletMarker::Dot => format!(
                "<span style=\"display:inline-block;width:2.6pt;height:2.6pt;background:{accent};margin-right:6pt;vertical-align:middle\"></span>"
            ),
            BulletMarker::Dash => format!(
                "<span style=\"display:inline-block;width:5pt;height:1.4pt;background:{accent};margin-right:5pt;vertical-align:middle\"></span>"
            ),
            BulletMarker::Diamond => format!(
                "<span style=\"display:inline-block;width:3.2pt;height:3.2pt;background:{accent};transform:rotate(45deg);margin-right:6pt;vertical-align:middle\"></span>"
            ),
            BulletMarker::Disc => "<span style=\"margin-right:5pt\">\u{2022}</span>".to_string(),
        };
        format!(
            "<div style=\"padding-left:10pt;text-indent:-10pt;color:{text_color}\">{marker}{}</div>",
            esc(text)
        )
    }

    fn emit_title_date(&mut self, title: &str, date: &str, size: f32, title_color: &str, muted: &str) {
        self.push("<div style=\"display:flex;justify-content:space-between;align-items:baseline\">");
        self.push(&format!(
            "<span style=\"font-size:{size}pt;font-weight:bold;color:{title_color}\">{}</span>",
            esc(title)
        ));
        if !date.is_empty() {
            self.push(&format!(
                "<span style=\"font-size:{size}pt;color:{muted};white-space:nowrap;margin-left:8pt\">{}</span>",
                esc(date)
            ));
        }
        self.push("</div>");
    }

    fn emit_section(&mut self, kind: SectionKind, on_fill: bool, side: bool) {
        if !self.section_is_populated(kind) {
            return;
        }
        let (text, muted, _) = self.palette(on_fill);
        let delta = if side { -0.5 } else { 0.0 };
        let size = self.plan.typography.base_size_pt + delta;
        let heading_size = self.plan.typography.heading_size_pt + delta;
        let accent = self.accent_css();
        let title_color = if self.plan.accent_entry_titles && !on_fill {
            accent.clone()
        } else {
            text.clone()
        };
        let entry_gap = self.plan.spacing.entry_gap_pt;

        self.push(&format!(
            "<section style=\"margin-bottom:{}pt;font-size:{size}pt;color:{text}\">",
            self.plan.spacing.section_gap_pt
        ));
        let with_heading = kind != SectionKind::Summary || self.plan.summary_heading;
        if with_heading {
            self.emit_heading(kind, on_fill, heading_size);
        }
        match kind {
            SectionKind::Summary => {
                self.push(&format!(
                    "<div style=\"color:{text}\">{}</div>",
                    esc(&self.data.basics.summary)
                ));
            }
            SectionKind::Experience => {
                let rail = self.plan.timeline_rail;
                let entries = self.data.experience.clone();
                for exp in &entries {
                    if rail {
                        self.push(&format!(
                            "<div style=\"border-left:1.5pt solid {};padding-left:12pt;position:relative;margin-bottom:{entry_gap}pt\">",
                            self.accent.css_tint("40")
                        ));
                        self.push(&format!(
                            "<span style=\"position:absolute;left:-3.5pt;top:2pt;width:5pt;height:5pt;background:{accent};display:inline-block\"></span>"
                        ));
                    } else {
                        self.push(&format!("<div style=\"margin-bottom:{entry_gap}pt\">"));
                    }
                    self.emit_title_date(
                        &exp.position,
                        &date_range(&exp.start_date, &exp.end_date),
                        size,
                        &title_color,
                        &muted,
                    );
                    let company = subtitle_join(&exp.company, &exp.location, " \u{b7} ");
                    if !company.is_empty() {
                        self.push(&format!(
                            "<div style=\"color:{muted}\">{}</div>",
                            esc(&company)
                        ));
                    }
                    for h in &exp.highlights {
                        let html = self.bullet_html(h, &text);
                        self.push(&html);
                    }
                    self.push("</div>");
                }
            }
            SectionKind::Projects => {
                let entries = self.data.projects.clone();
                for proj in &entries {
                    self.push(&format!("<div style=\"margin-bottom:{entry_gap}pt\">"));
                    self.push(&format!(
                        "<div style=\"font-weight:bold;color:{title_color}\">{}</div>",
                        esc(&proj.name)
                    ));
                    if !proj.description.is_empty() {
                        self.push(&format!(
                            "<div style=\"color:{muted}\">{}</div>",
                            esc(&proj.description)
                        ));
                    }
                    for h in &proj.highlights {
                        let html = self.bullet_html(h, &text);
                        self.push(&html);
                    }
                    self.push("</div>");
                }
            }
            SectionKind::Education => {
                let entries = self.data.education.clone();
                for edu in &entries {
                    self.push(&format!("<div style=\"margin-bottom:{entry_gap}pt\">"));
                    self.emit_title_date(
                        &edu.institution,
                        &date_range(&edu.start_date, &edu.end_date),
                        size,
                        &text,
                        &muted,
                    );
                    let degree = degree_line(edu);
                    if !degree.is_empty() {
                        self.push(&format!("<div>{}</div>", esc(&degree)));
                    }
                    if let Some(gpa) = &edu.gpa {
                        self.push(&format!(
                            "<div style=\"color:{muted}\">GPA: {}</div>",
                            esc(gpa)
                        ));
                    }
                    self.push("</div>");
                }
            }
            SectionKind::Skills => {
                let groups = self.data.skills.clone();
                for group in &groups {
                    self.push("<div style=\"margin-bottom:3pt\">");
                    self.push(&format!(
                        "<span style=\"font-weight:bold\">{}</span>",
                        esc(&group.category)
                    ));
                    let joined = group.items.join(self.plan.skills_join);
                    if !joined.is_empty() {
                        self.push(&format!(
                            "<div style=\"color:{muted}\">{}</div>",
                            esc(&joined)
                        ));
                    }
                    self.push("</div>");
                }
            }
            SectionKind::Certifications => {
                let certs = self.data.certifications.clone();
                for cert in &certs {
                    self.push("<div style=\"margin-bottom:3pt\">");
                    self.push(&format!(
                        "<div style=\"font-weight:bold\">{}</div>",
                        esc(&cert.name)
                    ));
                    let sub = subtitle_join(&cert.issuer, &cert.date, " \u{b7} ");
                    if !sub.is_empty() {
                        self.push(&format!("<div style=\"color:{muted}\">{}</div>", esc(&sub)));
                    }
                    self.push("</div>");
                }
            }
            SectionKind::Languages => {
                let langs = self.data.languages.clone();
                for lang in &langs {
                    self.push(&format!("<div>{}</div>", esc(&language_line(lang))));
                }
            }
        }
        self.push("</section>");
    }

    // ── document ──

    fn emit(mut self) -> String {
        let ty = &self.plan.typography;
        let m = self.plan.spacing.margin_pt;
        self.push(&format!(
            "<div style=\"max-width:816px;margin:0 auto;background:#ffffff;padding:{m}pt;font-family:{};font-size:{}pt;line-height:{};color:{INK}\">",
            font_stack(ty.body),
            ty.base_size_pt,
            ty.leading
        ));
        self.emit_header();
        match self.plan.columns {
            ColumnScheme::Single => {
                let sections = self.plan.main_sections.clone();
                for kind in sections {
                    self.emit_section(kind, false, false);
                }
            }
            ColumnScheme::Sidebar {
                side,
                width_pt,
                filled,
            } => {
                self.push(&format!(
                    "<div style=\"display:flex;gap:{}pt\">",
                    self.plan.spacing.column_gap_pt
                ));
                let sidebar_first = side == Side::Left;
                if sidebar_first {
                    self.emit_sidebar(width_pt, filled);
                }
                self.push("<div style=\"flex:1;min-width:0\">");
                let sections = self.plan.main_sections.clone();
                for kind in sections {
                    self.emit_section(kind, false, false);
                }
                self.push("</div>");
                if !sidebar_first {
                    self.emit_sidebar(width_pt, filled);
                }
                self.push("</div>");
            }
        }
        self.push("</div>");
        self.out
    }

    fn emit_sidebar(&mut self, width_pt: f32, filled: bool) {
        let fill = if filled {
            format!(
                "background:{};padding:10pt;margin:-{m}pt 0 -{m}pt -{m}pt;",
                self.accent_css(),
                m = self.plan.spacing.margin_pt
            )
        } else {
            String::new()
        };
        self.push(&format!(
            "<div style=\"flex:0 0 {width_pt}pt;{fill}\">"
        ));
        if self.plan.header == HeaderStyle::InSidebar {
            self.emit_name_block(
                self.plan.typography.name_size_pt,
                "#ffffff",
                "#ffffff",
                "#ffffff",
            );
            self.push("<div style=\"height:10pt\"></div>");
        }
        let sections = self.plan.side_sections.clone();
        for kind in sections {
            self.emit_section(kind, filled, true);
        }
        self.push("</div>");
    }
}

/// Renders the continuous-flow HTML preview for one template.
pub fn render_html(id: TemplateId, data: &ResumeData, accent: Rgb) -> String {
    let plan = plan_for(id);
    Emitter {
        plan: &plan,
        accent,
        data,
        out: String::with_capacity(8 * 1024),
    }
    .emit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::color::resolve_accent;
    use crate::sample::sample_resume;

    fn render_default(id: TemplateId) -> String {
        render_html(id, &sample_resume(), resolve_accent(id, None))
    }

    #[test]
    fn test_every_template_renders_the_sample() {
        for id in TemplateId::ALL {
            let html = render_default(id);
            assert!(html.contains("Alex Johnson"), "{id}");
            assert!(html.contains("TechCorp Inc."), "{id}");
        }
    }

    #[test]
    fn test_output_is_deterministic() {
        for id in TemplateId::ALL {
            assert_eq!(render_default(id), render_default(id), "{id}");
        }
    }

    #[test]
    fn test_accent_change_is_a_pure_color_substitution() {
        let data = sample_resume();
        let base = render_html(
            TemplateId::Minimal,
            &data,
            Rgb::parse("#374151").unwrap(),
        );
        let red = render_html(TemplateId::Minimal, &data, Rgb::parse("#dc2626").unwrap());
        assert_eq!(base.replace("#374151", "#dc2626"), red);
    }

    #[test]
    fn test_empty_section_emits_no_heading() {
        let mut data = sample_resume();
        data.projects.clear();
        data.certifications.clear();
        let html = render_html(
            TemplateId::Classic,
            &data,
            resolve_accent(TemplateId::Classic, None),
        );
        assert!(!html.contains("Projects"));
        assert!(!html.contains("Certifications"));
        assert!(html.contains("Professional Experience"));
    }

    #[test]
    fn test_sequence_order_is_preserved() {
        let html = render_default(TemplateId::Classic);
        let first = html.find("TechCorp Inc.").unwrap();
        let second = html.find("StartupXYZ").unwrap();
        let third = html.find("Digital Agency Co.").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_resume_text_is_html_escaped() {
        let mut data = sample_resume();
        data.basics.name = "Eve <script>alert(1)</script> & Co".into();
        let html = render_html(
            TemplateId::Modern,
            &data,
            resolve_accent(TemplateId::Modern, None),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("Eve &lt;script&gt;alert(1)&lt;/script&gt; &amp; Co"));
    }

    #[test]
    fn test_no_external_references() {
        for id in TemplateId::ALL {
            let html = render_default(id);
            assert!(!html.contains("<link"), "{id}");
            assert!(!html.contains("<img"), "{id}");
            assert!(!html.contains("http://"), "{id}");
        }
    }

    #[test]
    fn test_gpa_renders_only_when_present() {
        let mut data = sample_resume();
        let with = render_html(
            TemplateId::Classic,
            &data,
            resolve_accent(TemplateId::Classic, None),
        );
        assert!(with.contains("GPA: 3.8"));
        data.education[0].gpa = None;
        let without = render_html(
            TemplateId::Classic,
            &data,
            resolve_accent(TemplateId::Classic, None),
        );
        assert!(!without.contains("GPA:"));
    }
}
