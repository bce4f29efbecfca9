//! Page flow.
//!
//! Turns a resume and a template plan into a fully-placed page model: every
//! span of text carries its absolute position, font, size and color, and
//! every accent fill is an explicit rectangle. The export backend only
//! draws what is placed here; it makes no layout decisions of its own.
//!
//! # Flow rules
//! - Columns flow independently. The main column and the sidebar each keep
//!   their own cursor; a page exists once either column reaches it.
//! - Section headings never sit alone at the bottom of a page: a heading
//!   moves to the next page unless at least two lines of what follows fit
//!   under it.
//! - An entry (one job, one degree, one project) is kept together. Only an
//!   entry taller than an entire page splits, and then at line granularity
//!   with no line dropped.
//! - Coordinates are top-down in points; the export backend converts to
//!   PDF's bottom-up space.

use tracing::debug;

use crate::layout::color::{Rgb, WHITE};
use crate::layout::font_metrics::{FontFamily, PageSetup};
use crate::layout::plan::{
    plan_for, section_title, BulletMarker, ColumnScheme, HeaderStyle, SectionKind, Side,
    TemplatePlan,
};
use crate::layout::text::{contact_items, date_range, degree_line, language_line, subtitle_join};
use crate::models::ResumeData;
use crate::templates::TemplateId;

const INK: Rgb = Rgb {
    r: 0x1f,
    g: 0x29,
    b: 0x37,
};
const MUTED: Rgb = Rgb {
    r: 0x6b,
    g: 0x72,
    b: 0x80,
};

/// A filled rectangle, used for bullets, rules, bands and sidebar fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Rgb,
}

/// One run of text with resolved position and style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub x: f32,
    pub font: FontFamily,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Rgb,
}

/// One placed line. `y` is the top edge; the baseline sits at
/// `y + height * 0.78`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub y: f32,
    pub height: f32,
    pub spans: Vec<Span>,
    pub marker: Option<Rect>,
    pub rule: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Header,
    Main,
    Side,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRegion {
    pub kind: RegionKind,
    pub x: f32,
    pub width: f32,
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Background fills, drawn before any region content.
    pub fills: Vec<Rect>,
    pub regions: Vec<PlacedRegion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedDoc {
    pub template: TemplateId,
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<Page>,
}

impl PaginatedDoc {
    /// Every span on every page, for structural assertions.
    pub fn all_spans(&self) -> impl Iterator<Item = &Span> {
        self.pages
            .iter()
            .flat_map(|p| &p.regions)
            .flat_map(|r| &r.lines)
            .flat_map(|l| &l.spans)
    }
}

// ──────────────────────────── build units ────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keep {
    /// Flows freely; may break anywhere between lines.
    Splittable,
    /// Moves to the next page as a block unless taller than a full page.
    Together,
    /// Heading: requires itself plus the head of the next unit to fit.
    WithNext,
}

struct ProtoLine {
    spans: Vec<Span>,
    height: f32,
    marker: Option<MarkerProto>,
    rule: Option<RuleProto>,
}

/// Marker rect with the vertical position left for the flow pass.
struct MarkerProto {
    x: f32,
    w: f32,
    h: f32,
    color: Rgb,
}

/// Rule drawn just under its line, full-width resolved at build time.
struct RuleProto {
    x: f32,
    w: f32,
    h: f32,
    color: Rgb,
}

struct Unit {
    lines: Vec<ProtoLine>,
    keep: Keep,
    space_after: f32,
    /// Timeline rail: draw a vertical accent rule spanning this unit.
    rail: bool,
}

impl Unit {
    fn height(&self) -> f32 {
        self.lines.iter().map(|l| l.height).sum()
    }
}

#[derive(Clone, Copy)]
struct Geom {
    x: f32,
    width: f32,
}

/// Per-region text palette and size adjustment.
#[derive(Clone, Copy)]
struct Style {
    text: Rgb,
    muted: Rgb,
    heading: Rgb,
    size_delta: f32,
}

struct Builder<'a> {
    plan: &'a TemplatePlan,
    accent: Rgb,
    data: &'a ResumeData,
}

impl<'a> Builder<'a> {
    fn body_size(&self, style: Style) -> f32 {
        self.plan.typography.base_size_pt + style.size_delta
    }

    fn line_height(&self, size: f32) -> f32 {
        size * self.plan.typography.leading
    }

    fn span(&self, text: impl Into<String>, x: f32, size: f32, bold: bool, color: Rgb) -> Span {
        Span {
            text: text.into(),
            x,
            font: self.plan.typography.body,
            size,
            bold,
            italic: false,
            color,
        }
    }

    fn measure(&self, text: &str, size: f32, bold: bool) -> f32 {
        self.plan.typography.body.metrics().measure_str(text, size, bold)
    }

    fn simple_line(&self, text: &str, geom: Geom, size: f32, bold: bool, color: Rgb) -> ProtoLine {
        ProtoLine {
            spans: vec![self.span(text, geom.x, size, bold, color)],
            height: self.line_height(size),
            marker: None,
            rule: None,
        }
    }

    fn wrapped_lines(
        &self,
        text: &str,
        geom: Geom,
        indent: f32,
        size: f32,
        bold: bool,
        color: Rgb,
    ) -> Vec<ProtoLine> {
        self.plan
            .typography
            .body
            .metrics()
            .wrap_text(text, size, bold, geom.width - indent)
            .into_iter()
            .map(|line| ProtoLine {
                spans: vec![self.span(line, geom.x + indent, size, bold, color)],
                height: self.line_height(size),
                marker: None,
                rule: None,
            })
            .collect()
    }

    /// Title on the left, date right-aligned against the region edge. On
    /// narrow regions where the two would collide, the date drops to its
    /// own line.
    fn title_date_lines(
        &self,
        title: &str,
        date: &str,
        geom: Geom,
        indent: f32,
        size: f32,
        title_color: Rgb,
        date_color: Rgb,
    ) -> Vec<ProtoLine> {
        let title_w = self.measure(title, size, true);
        let date_w = self.measure(date, size, false);
        let mut lines = Vec::new();
        if date.is_empty() {
            lines.extend(self.wrapped_lines(title, geom, indent, size, true, title_color));
            return lines;
        }
        if geom.x + indent + title_w + 8.0 + date_w <= geom.x + geom.width {
            lines.push(ProtoLine {
                spans: vec![
                    self.span(title, geom.x + indent, size, true, title_color),
                    self.span(date, geom.x + geom.width - date_w, size, false, date_color),
                ],
                height: self.line_height(size),
                marker: None,
                rule: None,
            });
        } else {
            lines.extend(self.wrapped_lines(title, geom, indent, size, true, title_color));
            lines.push(self.simple_line(date, Geom { x: geom.x + indent, width: geom.width - indent }, size, false, date_color));
        }
        lines
    }

    fn bullet_lines(&self, text: &str, geom: Geom, indent: f32, style: Style) -> Vec<ProtoLine> {
        let size = self.body_size(style);
        let text_indent = indent + 10.0;
        let mut lines = match self.plan.marker {
            BulletMarker::Disc => {
                let mut lines = self.wrapped_lines(text, geom, text_indent, size, false, style.text);
                if let Some(first) = lines.first_mut() {
                    first
                        .spans
                        .insert(0, self.span("\u{2022}", geom.x + indent, size, false, style.text));
                }
                lines
            }
            _ => self.wrapped_lines(text, geom, text_indent, size, false, style.text),
        };
        let marker = match self.plan.marker {
            BulletMarker::Dot => Some(MarkerProto {
                x: geom.x + indent + 1.0,
                w: 2.6,
                h: 2.6,
                color: self.accent,
            }),
            BulletMarker::Dash => Some(MarkerProto {
                x: geom.x + indent,
                w: 5.0,
                h: 1.4,
                color: self.accent,
            }),
            BulletMarker::Diamond => Some(MarkerProto {
                x: geom.x + indent + 0.5,
                w: 3.2,
                h: 3.2,
                color: self.accent,
            }),
            BulletMarker::Disc => None,
        };
        if let Some(first) = lines.first_mut() {
            first.marker = marker;
        }
        lines
    }

    fn heading_unit(&self, kind: SectionKind, geom: Geom, style: Style) -> Unit {
        let size = self.plan.typography.heading_size_pt + style.size_delta;
        let title = section_title(self.plan.id, kind).to_uppercase();
        let mut line = self.simple_line(&title, geom, size, true, style.heading);
        if self.plan.heading_underline {
            line.rule = Some(RuleProto {
                x: geom.x,
                w: geom.width,
                h: 0.8,
                color: self.accent,
            });
        }
        Unit {
            lines: vec![line],
            keep: Keep::WithNext,
            space_after: self.plan.spacing.heading_gap_pt,
            rail: false,
        }
    }

    fn entry_indent(&self) -> f32 {
        if self.plan.timeline_rail {
            14.0
        } else {
            0.0
        }
    }

    // ── sections ──

    fn section_units(&self, kind: SectionKind, geom: Geom, style: Style) -> Vec<Unit> {
        let populated = match kind {
            SectionKind::Summary => !self.data.basics.summary.is_empty(),
            SectionKind::Experience => !self.data.experience.is_empty(),
            SectionKind::Projects => !self.data.projects.is_empty(),
            SectionKind::Education => !self.data.education.is_empty(),
            SectionKind::Skills => !self.data.skills.is_empty(),
            SectionKind::Certifications => !self.data.certifications.is_empty(),
            SectionKind::Languages => !self.data.languages.is_empty(),
        };
        if !populated {
            return Vec::new();
        }
        let mut units = Vec::new();
        let with_heading = kind != SectionKind::Summary || self.plan.summary_heading;
        if with_heading {
            units.push(self.heading_unit(kind, geom, style));
        }
        match kind {
            SectionKind::Summary => units.push(Unit {
                lines: self.wrapped_lines(
                    &self.data.basics.summary,
                    geom,
                    0.0,
                    self.body_size(style),
                    false,
                    style.text,
                ),
                keep: Keep::Splittable,
                space_after: self.plan.spacing.section_gap_pt,
                rail: false,
            }),
            SectionKind::Experience => {
                let indent = self.entry_indent();
                let size = self.body_size(style);
                let title_color = if self.plan.accent_entry_titles {
                    self.accent
                } else {
                    style.text
                };
                let last = self.data.experience.len() - 1;
                for (i, exp) in self.data.experience.iter().enumerate() {
                    let mut lines = self.title_date_lines(
                        &exp.position,
                        &date_range(&exp.start_date, &exp.end_date),
                        geom,
                        indent,
                        size,
                        title_color,
                        style.muted,
                    );
                    let company = subtitle_join(&exp.company, &exp.location, " \u{b7} ");
                    if !company.is_empty() {
                        lines.extend(self.wrapped_lines(&company, geom, indent, size, false, style.muted));
                    }
                    for h in &exp.highlights {
                        lines.extend(self.bullet_lines(h, geom, indent, style));
                    }
                    if self.plan.timeline_rail {
                        if let Some(first) = lines.first_mut() {
                            first.marker = Some(MarkerProto {
                                x: geom.x + 1.5,
                                w: 5.0,
                                h: 5.0,
                                color: self.accent,
                            });
                        }
                    }
                    let gap = if i == last {
                        self.plan.spacing.section_gap_pt
                    } else {
                        self.plan.spacing.entry_gap_pt
                    };
                    units.push(Unit {
                        lines,
                        keep: Keep::Together,
                        space_after: gap,
                        rail: self.plan.timeline_rail,
                    });
                }
            }
            SectionKind::Projects => {
                let size = self.body_size(style);
                let title_color = if self.plan.accent_entry_titles {
                    self.accent
                } else {
                    style.text
                };
                let last = self.data.projects.len() - 1;
                for (i, proj) in self.data.projects.iter().enumerate() {
                    let mut lines =
                        self.wrapped_lines(&proj.name, geom, 0.0, size, true, title_color);
                    if !proj.description.is_empty() {
                        lines.extend(self.wrapped_lines(
                            &proj.description,
                            geom,
                            0.0,
                            size,
                            false,
                            style.muted,
                        ));
                    }
                    for h in &proj.highlights {
                        lines.extend(self.bullet_lines(h, geom, 0.0, style));
                    }
                    units.push(Unit {
                        lines,
                        keep: Keep::Together,
                        space_after: if i == last {
                            self.plan.spacing.section_gap_pt
                        } else {
                            self.plan.spacing.entry_gap_pt
                        },
                        rail: false,
                    });
                }
            }
            SectionKind::Education => {
                let size = self.body_size(style);
                let last = self.data.education.len() - 1;
                for (i, edu) in self.data.education.iter().enumerate() {
                    let mut lines = self.title_date_lines(
                        &edu.institution,
                        &date_range(&edu.start_date, &edu.end_date),
                        geom,
                        0.0,
                        size,
                        style.text,
                        style.muted,
                    );
                    let degree = degree_line(edu);
                    if !degree.is_empty() {
                        lines.extend(self.wrapped_lines(&degree, geom, 0.0, size, false, style.text));
                    }
                    if let Some(gpa) = &edu.gpa {
                        lines.push(self.simple_line(
                            &format!("GPA: {gpa}"),
                            geom,
                            size,
                            false,
                            style.muted,
                        ));
                    }
                    units.push(Unit {
                        lines,
                        keep: Keep::Together,
                        space_after: if i == last {
                            self.plan.spacing.section_gap_pt
                        } else {
                            self.plan.spacing.entry_gap_pt
                        },
                        rail: false,
                    });
                }
            }
            SectionKind::Skills => {
                let size = self.body_size(style);
                let last = self.data.skills.len() - 1;
                for (i, group) in self.data.skills.iter().enumerate() {
                    let mut lines =
                        self.wrapped_lines(&group.category, geom, 0.0, size, true, style.text);
                    let joined = group.items.join(self.plan.skills_join);
                    if !joined.is_empty() {
                        lines.extend(self.wrapped_lines(&joined, geom, 0.0, size, false, style.muted));
                    }
                    units.push(Unit {
                        lines,
                        keep: Keep::Together,
                        space_after: if i == last {
                            self.plan.spacing.section_gap_pt
                        } else {
                            self.plan.spacing.entry_gap_pt * 0.6
                        },
                        rail: false,
                    });
                }
            }
            SectionKind::Certifications => {
                let size = self.body_size(style);
                let last = self.data.certifications.len() - 1;
                for (i, cert) in self.data.certifications.iter().enumerate() {
                    let mut lines = self.wrapped_lines(&cert.name, geom, 0.0, size, true, style.text);
                    let sub = subtitle_join(&cert.issuer, &cert.date, " \u{b7} ");
                    if !sub.is_empty() {
                        lines.extend(self.wrapped_lines(&sub, geom, 0.0, size, false, style.muted));
                    }
                    units.push(Unit {
                        lines,
                        keep: Keep::Together,
                        space_after: if i == last {
                            self.plan.spacing.section_gap_pt
                        } else {
                            self.plan.spacing.entry_gap_pt * 0.6
                        },
                        rail: false,
                    });
                }
            }
            SectionKind::Languages => {
                let size = self.body_size(style);
                let lines: Vec<ProtoLine> = self
                    .data
                    .languages
                    .iter()
                    .flat_map(|l| {
                        self.wrapped_lines(&language_line(l), geom, 0.0, size, false, style.text)
                    })
                    .collect();
                units.push(Unit {
                    lines,
                    keep: Keep::Together,
                    space_after: self.plan.spacing.section_gap_pt,
                    rail: false,
                });
            }
        }
        units
    }

    // ── header ──

    fn header_units(&self, geom: Geom, on_fill: bool, centered: bool) -> Vec<Unit> {
        let basics = &self.data.basics;
        let ty = &self.plan.typography;
        let text = if on_fill { WHITE } else { INK };
        let sub = if on_fill { WHITE } else { self.accent };
        let muted = if on_fill { WHITE } else { MUTED };
        let mut lines = Vec::new();
        let place = |b: &Self, s: &str, size: f32, bold: bool, color: Rgb| -> ProtoLine {
            let x = if centered {
                let w = b.measure(s, size, bold);
                geom.x + (geom.width - w) / 2.0
            } else {
                geom.x
            };
            ProtoLine {
                spans: vec![b.span(s, x, size, bold, color)],
                height: b.line_height(size),
                marker: None,
                rule: None,
            }
        };
        if !basics.name.is_empty() {
            lines.push(place(self, &basics.name, ty.name_size_pt, true, text));
        }
        if !basics.headline.is_empty() {
            lines.push(place(self, &basics.headline, ty.base_size_pt + 1.5, false, sub));
        }
        let contact = contact_items(basics).join("  \u{b7}  ");
        if !contact.is_empty() {
            for wrapped in self
                .plan
                .typography
                .body
                .metrics()
                .wrap_text(&contact, ty.base_size_pt - 0.5, false, geom.width)
            {
                lines.push(place(self, &wrapped, ty.base_size_pt - 0.5, false, muted));
            }
        }
        if let HeaderStyle::Banner { rule_pt } | HeaderStyle::Centered { rule_pt } = self.plan.header
        {
            if rule_pt > 0.0 {
                if let Some(last) = lines.last_mut() {
                    last.rule = Some(RuleProto {
                        x: geom.x,
                        w: geom.width,
                        h: rule_pt,
                        color: self.accent,
                    });
                }
            }
        }
        if lines.is_empty() {
            return Vec::new();
        }
        vec![Unit {
            lines,
            keep: Keep::Together,
            space_after: self.plan.spacing.section_gap_pt,
            rail: false,
        }]
    }

    /// Split-contact header: name block left, contact stacked right.
    fn split_header_units(&self, geom: Geom) -> Vec<Unit> {
        let basics = &self.data.basics;
        let ty = &self.plan.typography;
        let contact_size = ty.base_size_pt - 0.5;
        let mut left: Vec<ProtoLine> = Vec::new();
        if !basics.name.is_empty() {
            left.push(self.simple_line(&basics.name, geom, ty.name_size_pt, true, INK));
        }
        if !basics.headline.is_empty() {
            left.push(self.simple_line(&basics.headline, geom, ty.base_size_pt + 1.0, false, self.accent));
        }
        let mut lines = left;
        for (i, item) in contact_items(basics).into_iter().enumerate() {
            let w = self.measure(item, contact_size, false);
            let span = self.span(item, geom.x + geom.width - w, contact_size, false, MUTED);
            if let Some(line) = lines.get_mut(i) {
                line.spans.push(span);
            } else {
                lines.push(ProtoLine {
                    spans: vec![span],
                    height: self.line_height(contact_size),
                    marker: None,
                    rule: None,
                });
            }
        }
        if let Some(last) = lines.last_mut() {
            last.rule = Some(RuleProto {
                x: geom.x,
                w: geom.width,
                h: 1.0,
                color: self.accent,
            });
        }
        if lines.is_empty() {
            return Vec::new();
        }
        vec![Unit {
            lines,
            keep: Keep::Together,
            space_after: self.plan.spacing.section_gap_pt,
            rail: false,
        }]
    }
}

// ──────────────────────────── flow ────────────────────────────

struct Flow<'a> {
    pages: &'a mut Vec<Vec<PlacedLine>>,
    page_height: f32,
    margin: f32,
    page: usize,
    y: f32,
}

impl<'a> Flow<'a> {
    fn new(pages: &'a mut Vec<Vec<PlacedLine>>, page_height: f32, margin: f32, start_y: f32) -> Self {
        Flow {
            pages,
            page_height,
            margin,
            page: 0,
            y: start_y,
        }
    }

    fn capacity(&self) -> f32 {
        self.page_height - self.margin - self.y
    }

    fn full_page_capacity(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    fn break_page(&mut self) {
        self.page += 1;
        self.y = self.margin;
    }

    fn lane(&mut self) -> &mut Vec<PlacedLine> {
        while self.pages.len() <= self.page {
            self.pages.push(Vec::new());
        }
        &mut self.pages[self.page]
    }

    fn place_line(&mut self, line: ProtoLine) {
        let y = self.y;
        let height = line.height;
        let marker = line.marker.map(|m| Rect {
            x: m.x,
            y: y + (height - m.h) / 2.0,
            w: m.w,
            h: m.h,
            color: m.color,
        });
        let rule = line.rule.map(|r| Rect {
            x: r.x,
            y: y + height + 1.0,
            w: r.w,
            h: r.h,
            color: r.color,
        });
        self.lane().push(PlacedLine {
            y,
            height,
            spans: line.spans,
            marker,
            rule,
        });
        self.y += height;
        if self.lane().last().map_or(false, |l| l.rule.is_some()) {
            self.y += 4.0;
        }
    }

    /// Places one unit; `rails` collects timeline rail extents per page.
    fn place_unit(&mut self, unit: Unit, next_head: f32, rails: &mut Vec<(usize, f32, f32, f32)>) {
        let h = unit.height();
        match unit.keep {
            Keep::WithNext => {
                if h + unit.space_after + 5.0 + next_head > self.capacity() {
                    self.break_page();
                }
            }
            Keep::Together => {
                if h > self.capacity() && h <= self.full_page_capacity() {
                    self.break_page();
                }
            }
            Keep::Splittable => {}
        }
        let rail_x = unit
            .lines
            .first()
            .and_then(|l| l.marker.as_ref())
            .map(|m| m.x + m.w / 2.0);
        let mut chunk_start: Option<(usize, f32)> = None;
        let rail = unit.rail;
        let rail_color = unit
            .lines
            .first()
            .and_then(|l| l.marker.as_ref())
            .map(|m| m.color);
        for line in unit.lines {
            if line.height > self.capacity() && self.y > self.margin {
                if rail {
                    if let (Some((page, start)), Some(x)) = (chunk_start.take(), rail_x) {
                        rails.push((page, x, start, self.y));
                    }
                }
                self.break_page();
            }
            if chunk_start.map_or(true, |(page, _)| page != self.page) {
                chunk_start = Some((self.page, self.y));
            }
            self.place_line(line);
        }
        if rail {
            if let (Some((page, start)), Some(x), Some(_)) = (chunk_start, rail_x, rail_color) {
                rails.push((page, x, start, self.y));
            }
        }
        self.y += unit.space_after;
    }
}

fn flow_units(
    units: Vec<Unit>,
    pages: &mut Vec<Vec<PlacedLine>>,
    page_height: f32,
    margin: f32,
    start_y: f32,
    rails: &mut Vec<(usize, f32, f32, f32)>,
) {
    let mut flow = Flow::new(pages, page_height, margin, start_y);
    let mut iter = units.into_iter().peekable();
    while let Some(unit) = iter.next() {
        // A heading must be followed on the same page by its first entry,
        // or by at least two of its lines when that entry is itself taller
        // than a page.
        let full_page = page_height - 2.0 * margin;
        let next_head = if unit.keep == Keep::WithNext {
            iter.peek()
                .map(|n| {
                    let h = n.height();
                    if h > full_page {
                        n.lines.iter().take(2).map(|l| l.height).sum()
                    } else {
                        h
                    }
                })
                .unwrap_or(0.0)
        } else {
            0.0
        };
        flow.place_unit(unit, next_head, rails);
    }
}

// ──────────────────────────── entry point ────────────────────────────

/// Lays out the resume under the given template and accent into pages.
pub fn paginate(
    id: TemplateId,
    data: &ResumeData,
    accent: Rgb,
    setup: PageSetup,
) -> PaginatedDoc {
    let plan = plan_for(id);
    let (page_w, page_h) = setup.paper.dimensions();
    let margin = plan.spacing.margin_pt;
    let content_w = page_w - 2.0 * margin;
    let builder = Builder {
        plan: &plan,
        accent,
        data,
    };

    let main_style = Style {
        text: INK,
        muted: MUTED,
        heading: accent,
        size_delta: 0.0,
    };

    // Region geometry.
    let (main_geom, side_geom, side_filled) = match plan.columns {
        ColumnScheme::Single => (
            Geom {
                x: margin,
                width: content_w,
            },
            None,
            false,
        ),
        ColumnScheme::Sidebar {
            side,
            width_pt,
            filled,
        } => {
            let main_w = content_w - width_pt - plan.spacing.column_gap_pt;
            let (main_x, side_x) = match side {
                Side::Left => (margin + width_pt + plan.spacing.column_gap_pt, margin),
                Side::Right => (margin, margin + main_w + plan.spacing.column_gap_pt),
            };
            (
                Geom {
                    x: main_x,
                    width: main_w,
                },
                Some(Geom {
                    x: side_x,
                    width: width_pt,
                }),
                filled,
            )
        }
    };

    let side_style = if side_filled {
        Style {
            text: WHITE,
            muted: accent.tint(0.35),
            heading: WHITE,
            size_delta: -0.5,
        }
    } else {
        Style {
            muted: MUTED,
            text: INK,
            heading: accent,
            size_delta: -0.5,
        }
    };

    // Header.
    let header_geom = Geom {
        x: margin,
        width: content_w,
    };
    let header_units = match plan.header {
        HeaderStyle::Banner { .. } => builder.header_units(header_geom, false, false),
        HeaderStyle::Centered { .. } => builder.header_units(header_geom, false, true),
        HeaderStyle::FilledBanner => builder.header_units(header_geom, true, false),
        HeaderStyle::SplitContact => builder.split_header_units(header_geom),
        HeaderStyle::InSidebar => Vec::new(),
    };
    let header_height: f32 = header_units
        .iter()
        .map(|u| u.height() + u.space_after)
        .sum();

    let mut header_lanes: Vec<Vec<PlacedLine>> = Vec::new();
    let mut main_lanes: Vec<Vec<PlacedLine>> = Vec::new();
    let mut side_lanes: Vec<Vec<PlacedLine>> = Vec::new();
    let mut rails: Vec<(usize, f32, f32, f32)> = Vec::new();

    if !header_units.is_empty() {
        flow_units(
            header_units,
            &mut header_lanes,
            page_h,
            margin,
            margin,
            &mut rails,
        );
    }

    // Body units.
    let mut main_units = Vec::new();
    for kind in &plan.main_sections {
        main_units.extend(builder.section_units(*kind, main_geom, main_style));
    }
    let body_start = margin + header_height;
    flow_units(main_units, &mut main_lanes, page_h, margin, body_start, &mut rails);

    if let Some(geom) = side_geom {
        let mut side_units = Vec::new();
        let side_start = if plan.header == HeaderStyle::InSidebar {
            // Name and contact open the sidebar itself.
            side_units.extend(builder.header_units(geom, true, false));
            margin
        } else {
            body_start
        };
        for kind in &plan.side_sections {
            side_units.extend(builder.section_units(*kind, geom, side_style));
        }
        flow_units(side_units, &mut side_lanes, page_h, margin, side_start, &mut rails);
    }

    // Assemble pages.
    let page_count = header_lanes
        .len()
        .max(main_lanes.len())
        .max(side_lanes.len())
        .max(1);
    let mut pages: Vec<Page> = (0..page_count).map(|_| Page::default()).collect();

    if side_filled {
        if let Some(geom) = side_geom {
            let fill_w = geom.x + geom.width + plan.spacing.column_gap_pt / 2.0;
            for page in &mut pages {
                page.fills.push(Rect {
                    x: 0.0,
                    y: 0.0,
                    w: fill_w,
                    h: page_h,
                    color: accent,
                });
            }
        }
    }
    if plan.header == HeaderStyle::FilledBanner {
        if let Some(first) = pages.first_mut() {
            first.fills.push(Rect {
                x: 0.0,
                y: 0.0,
                w: page_w,
                h: margin + header_height - plan.spacing.section_gap_pt / 2.0,
                color: accent,
            });
        }
    }
    for (page_idx, x, y0, y1) in rails {
        if let Some(page) = pages.get_mut(page_idx) {
            page.fills.push(Rect {
                x: x - 0.75,
                y: y0 + 6.0,
                w: 1.5,
                h: (y1 - y0 - 6.0).max(0.0),
                color: accent.tint(0.3),
            });
        }
    }

    let mut attach = |lanes: Vec<Vec<PlacedLine>>, kind: RegionKind, geom: Geom| {
        for (i, lines) in lanes.into_iter().enumerate() {
            if lines.is_empty() {
                continue;
            }
            pages[i].regions.push(PlacedRegion {
                kind,
                x: geom.x,
                width: geom.width,
                lines,
            });
        }
    };
    attach(header_lanes, RegionKind::Header, header_geom);
    attach(main_lanes, RegionKind::Main, main_geom);
    if let Some(geom) = side_geom {
        attach(side_lanes, RegionKind::Side, geom);
    }

    debug!(template = %id, pages = pages.len(), "paginated resume");
    PaginatedDoc {
        template: id,
        page_width: page_w,
        page_height: page_h,
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::color::resolve_accent;
    use crate::models::{ResumeBasics, ResumeExperience};
    use crate::sample::sample_resume;

    fn paginate_default(id: TemplateId, data: &ResumeData) -> PaginatedDoc {
        paginate(id, data, resolve_accent(id, None), PageSetup::default())
    }

    fn make_entry(highlights: usize) -> ResumeExperience {
        ResumeExperience {
            id: "e".into(),
            company: "Acme".into(),
            position: "Engineer".into(),
            start_date: "2020".into(),
            end_date: "2024".into(),
            location: "Remote".into(),
            highlights: (0..highlights)
                .map(|i| format!("Did a fairly substantial thing number {i} with measurable outcomes"))
                .collect(),
        }
    }

    #[test]
    fn test_sample_resume_produces_at_least_one_page() {
        for id in TemplateId::ALL {
            let doc = paginate_default(id, &sample_resume());
            assert!(!doc.pages.is_empty(), "{id}");
            assert!(doc.all_spans().any(|s| s.text == "Alex Johnson"), "{id}");
        }
    }

    #[test]
    fn test_all_lines_stay_inside_the_page_box() {
        let doc = paginate_default(TemplateId::Modern, &sample_resume());
        for page in &doc.pages {
            for region in &page.regions {
                for line in &region.lines {
                    assert!(line.y >= 0.0);
                    assert!(line.y + line.height <= doc.page_height);
                }
            }
        }
    }

    #[test]
    fn test_no_highlight_text_is_dropped_across_pages() {
        let mut data = sample_resume();
        data.experience = (0..12).map(|_| make_entry(6)).collect();
        let doc = paginate_default(TemplateId::Classic, &data);
        assert!(doc.pages.len() > 1);
        let text: String = doc
            .all_spans()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        for exp in &data.experience {
            for h in &exp.highlights {
                // Wrapped lines split the words but every word must survive.
                for word in h.split_whitespace() {
                    assert!(text.contains(word), "missing {word:?}");
                }
            }
        }
    }

    #[test]
    fn test_fitting_entry_is_never_split_across_pages() {
        let mut data = sample_resume();
        // Every line of entry i carries the token "entryNN" so its page
        // membership can be asserted exactly.
        data.experience = (0..10)
            .map(|i| ResumeExperience {
                id: format!("e{i}"),
                company: format!("Acme entry{i:02}"),
                position: format!("Engineer entry{i:02}"),
                start_date: "2020".into(),
                end_date: "2024".into(),
                location: "Remote".into(),
                highlights: (0..4)
                    .map(|j| format!("entry{i:02} delivered outcome {j} ahead of schedule"))
                    .collect(),
            })
            .collect();
        for id in TemplateId::ALL {
            let doc = paginate_default(id, &data);
            assert!(doc.pages.len() > 1, "{id}");
            for i in 0..10 {
                let token = format!("entry{i:02}");
                let pages_hit: Vec<usize> = doc
                    .pages
                    .iter()
                    .enumerate()
                    .filter(|(_, page)| {
                        page.regions
                            .iter()
                            .flat_map(|r| &r.lines)
                            .flat_map(|l| &l.spans)
                            .any(|s| s.text.contains(&token))
                    })
                    .map(|(n, _)| n)
                    .collect();
                assert_eq!(pages_hit.len(), 1, "{id}: {token} split across {pages_hit:?}");
            }
        }
    }

    #[test]
    fn test_accent_change_recolors_only_accent_elements() {
        let data = sample_resume();
        let a = Rgb::parse("#7c3aed").unwrap();
        let b = Rgb::parse("#0f766e").unwrap();
        let map = |c: Rgb| -> Rgb {
            if c == a {
                b
            } else if c == a.tint(0.35) {
                b.tint(0.35)
            } else if c == a.tint(0.3) {
                b.tint(0.3)
            } else {
                c
            }
        };
        for id in TemplateId::ALL {
            let mut doc_a = paginate(id, &data, a, PageSetup::default());
            let doc_b = paginate(id, &data, b, PageSetup::default());
            for page in &mut doc_a.pages {
                for fill in &mut page.fills {
                    fill.color = map(fill.color);
                }
                for region in &mut page.regions {
                    for line in &mut region.lines {
                        for span in &mut line.spans {
                            span.color = map(span.color);
                        }
                        if let Some(marker) = &mut line.marker {
                            marker.color = map(marker.color);
                        }
                        if let Some(rule) = &mut line.rule {
                            rule.color = map(rule.color);
                        }
                    }
                }
            }
            assert_eq!(doc_a, doc_b, "{id}");
        }
    }

    #[test]
    fn test_entry_taller_than_a_page_splits_without_loss() {
        let mut data = ResumeData::default();
        data.basics.name = "Overflow Case".into();
        data.experience = vec![make_entry(120)];
        let doc = paginate_default(TemplateId::Modern, &data);
        assert!(doc.pages.len() > 1);
        let text: String = doc
            .all_spans()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(text.contains("119"));
        let bullet_lines: usize = doc
            .pages
            .iter()
            .flat_map(|p| &p.regions)
            .flat_map(|r| &r.lines)
            .filter(|l| l.marker.is_some())
            .count();
        assert_eq!(bullet_lines, 120);
    }

    #[test]
    fn test_heading_never_strands_at_page_bottom() {
        let mut data = sample_resume();
        data.experience = (0..9).map(|_| make_entry(5)).collect();
        let doc = paginate_default(TemplateId::Classic, &data);
        for page in &doc.pages {
            for region in &page.regions {
                if let Some(last) = region.lines.last() {
                    let is_heading = last
                        .spans
                        .iter()
                        .any(|s| s.bold && s.text.chars().all(|c| !c.is_lowercase()) && s.text.len() > 3);
                    if is_heading {
                        // A heading as the very last line of a page means it
                        // was stranded from its section body.
                        assert!(
                            last.y + last.height < doc.page_height - 100.0,
                            "stranded heading {:?}",
                            last.spans[0].text
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_sections_place_no_heading() {
        let data = ResumeData {
            basics: ResumeBasics {
                name: "No Sections".into(),
                summary: String::new(),
                ..ResumeBasics::default()
            },
            ..ResumeData::default()
        };
        let doc = paginate_default(TemplateId::Classic, &data);
        let text: String = doc.all_spans().map(|s| s.text.clone()).collect();
        assert!(!text.contains("EXPERIENCE"));
        assert!(!text.contains("EDUCATION"));
        assert!(!text.contains("SKILLS"));
        assert!(text.contains("No Sections"));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let data = sample_resume();
        let a = paginate_default(TemplateId::Creative, &data);
        let b = paginate_default(TemplateId::Creative, &data);
        assert_eq!(a, b);
    }

    #[test]
    fn test_creative_sidebar_fill_covers_every_page() {
        let mut data = sample_resume();
        data.experience = (0..10).map(|_| make_entry(6)).collect();
        let doc = paginate_default(TemplateId::Creative, &data);
        assert!(doc.pages.len() > 1);
        for page in &doc.pages {
            assert!(page
                .fills
                .iter()
                .any(|f| f.y == 0.0 && (f.h - doc.page_height).abs() < 1e-3));
        }
    }

    #[test]
    fn test_section_order_follows_the_plan() {
        let doc = paginate_default(TemplateId::Executive, &sample_resume());
        let text: Vec<String> = doc.all_spans().map(|s| s.text.clone()).collect();
        let pos = |needle: &str| text.iter().position(|t| t == needle).unwrap();
        assert!(pos("EXECUTIVE SUMMARY") < pos("CORE COMPETENCIES"));
        assert!(pos("CORE COMPETENCIES") < pos("EXPERIENCE"));
        assert!(pos("EXPERIENCE") < pos("EDUCATION"));
    }

    #[test]
    fn test_a4_changes_the_page_box() {
        let doc = paginate(
            TemplateId::Modern,
            &sample_resume(),
            resolve_accent(TemplateId::Modern, None),
            PageSetup {
                paper: crate::layout::font_metrics::PaperSize::A4,
            },
        );
        assert!((doc.page_width - 595.276).abs() < 1e-3);
        assert!((doc.page_height - 841.89).abs() < 1e-3);
    }
}
