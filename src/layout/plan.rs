//! Declarative layout plans, one per template.
//!
//! A plan is pure data: section ordering, column scheme, typography and
//! spacing tokens. Both renderer backends walk the same plan, which is
//! what keeps the interactive preview and the exported pages structurally
//! equivalent — a template cannot behave differently between the two
//! because neither backend carries per-template logic of its own.

use crate::layout::font_metrics::FontFamily;
use crate::templates::TemplateId;

/// The seven content sections a plan can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Experience,
    Projects,
    Education,
    Skills,
    Certifications,
    Languages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Column arrangement of the body below the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnScheme {
    Single,
    Sidebar {
        side: Side,
        width_pt: f32,
        /// Whether the sidebar carries a filled accent background running
        /// the full height of every page.
        filled: bool,
    },
}

/// Header treatment on the first page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderStyle {
    /// Left-aligned name block with an accent rule underneath.
    Banner { rule_pt: f32 },
    /// Centered name block with an accent rule underneath.
    Centered { rule_pt: f32 },
    /// Name block on a full-width accent-filled band.
    FilledBanner,
    /// Name and contact live at the top of the filled sidebar.
    InSidebar,
    /// Name on the left, contact stacked on the right.
    SplitContact,
}

/// How highlight bullets are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletMarker {
    /// Small filled square in the accent color.
    Dot,
    /// Short accent dash.
    Dash,
    /// Rotated accent square.
    Diamond,
    /// Textual bullet glyph in the body color.
    Disc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub body: FontFamily,
    pub base_size_pt: f32,
    /// Line height as a multiple of the font size.
    pub leading: f32,
    pub heading_size_pt: f32,
    pub name_size_pt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub margin_pt: f32,
    pub section_gap_pt: f32,
    pub entry_gap_pt: f32,
    pub column_gap_pt: f32,
    pub heading_gap_pt: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePlan {
    pub id: TemplateId,
    pub header: HeaderStyle,
    pub columns: ColumnScheme,
    pub main_sections: Vec<SectionKind>,
    pub side_sections: Vec<SectionKind>,
    pub typography: Typography,
    pub spacing: Spacing,
    pub marker: BulletMarker,
    /// Accent rule under each section heading.
    pub heading_underline: bool,
    /// Entry titles (position, degree, project name) in the accent color.
    pub accent_entry_titles: bool,
    /// Whether the summary gets its own section heading or sits directly
    /// under the header.
    pub summary_heading: bool,
    /// Vertical accent rail alongside experience entries.
    pub timeline_rail: bool,
    /// Separator used when a skill group's items render as one line.
    pub skills_join: &'static str,
}

const SANS: Typography = Typography {
    body: FontFamily::Helvetica,
    base_size_pt: 9.0,
    leading: 1.45,
    heading_size_pt: 11.0,
    name_size_pt: 22.0,
};

const SERIF: Typography = Typography {
    body: FontFamily::TimesRoman,
    base_size_pt: 9.5,
    leading: 1.45,
    heading_size_pt: 11.5,
    name_size_pt: 24.0,
};

const STANDARD_SPACING: Spacing = Spacing {
    margin_pt: 36.0,
    section_gap_pt: 14.0,
    entry_gap_pt: 8.0,
    column_gap_pt: 18.0,
    heading_gap_pt: 6.0,
};

/// Builds the plan for a template. Exhaustive over [`TemplateId`], so a
/// new registry entry will not compile without a plan.
pub fn plan_for(id: TemplateId) -> TemplatePlan {
    match id {
        TemplateId::Modern => TemplatePlan {
            id,
            header: HeaderStyle::Banner { rule_pt: 2.0 },
            columns: ColumnScheme::Sidebar {
                side: Side::Right,
                width_pt: 150.0,
                filled: false,
            },
            main_sections: vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Projects,
            ],
            side_sections: vec![
                SectionKind::Education,
                SectionKind::Skills,
                SectionKind::Certifications,
                SectionKind::Languages,
            ],
            typography: SANS,
            spacing: STANDARD_SPACING,
            marker: BulletMarker::Dot,
            heading_underline: false,
            accent_entry_titles: false,
            summary_heading: false,
            timeline_rail: false,
            skills_join: " · ",
        },
        TemplateId::Classic => TemplatePlan {
            id,
            header: HeaderStyle::Centered { rule_pt: 2.0 },
            columns: ColumnScheme::Single,
            main_sections: vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Education,
                SectionKind::Skills,
                SectionKind::Certifications,
                SectionKind::Projects,
                SectionKind::Languages,
            ],
            side_sections: Vec::new(),
            typography: SERIF,
            spacing: Spacing {
                margin_pt: 40.0,
                ..STANDARD_SPACING
            },
            marker: BulletMarker::Disc,
            heading_underline: true,
            accent_entry_titles: true,
            summary_heading: true,
            timeline_rail: false,
            skills_join: ", ",
        },
        TemplateId::Minimal => TemplatePlan {
            id,
            header: HeaderStyle::Banner { rule_pt: 0.0 },
            columns: ColumnScheme::Single,
            main_sections: vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Projects,
                SectionKind::Education,
                SectionKind::Skills,
                SectionKind::Certifications,
                SectionKind::Languages,
            ],
            side_sections: Vec::new(),
            typography: SANS,
            spacing: Spacing {
                margin_pt: 44.0,
                section_gap_pt: 16.0,
                ..STANDARD_SPACING
            },
            marker: BulletMarker::Dash,
            heading_underline: false,
            accent_entry_titles: false,
            summary_heading: false,
            timeline_rail: false,
            skills_join: " · ",
        },
        TemplateId::Bold => TemplatePlan {
            id,
            header: HeaderStyle::FilledBanner,
            columns: ColumnScheme::Sidebar {
                side: Side::Right,
                width_pt: 150.0,
                filled: false,
            },
            main_sections: vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Projects,
            ],
            side_sections: vec![
                SectionKind::Skills,
                SectionKind::Education,
                SectionKind::Certifications,
                SectionKind::Languages,
            ],
            typography: SANS,
            spacing: STANDARD_SPACING,
            marker: BulletMarker::Diamond,
            heading_underline: true,
            accent_entry_titles: false,
            summary_heading: false,
            timeline_rail: false,
            skills_join: " · ",
        },
        TemplateId::Executive => TemplatePlan {
            id,
            header: HeaderStyle::Banner { rule_pt: 1.0 },
            columns: ColumnScheme::Single,
            main_sections: vec![
                SectionKind::Summary,
                SectionKind::Skills,
                SectionKind::Experience,
                SectionKind::Education,
                SectionKind::Certifications,
                SectionKind::Languages,
                SectionKind::Projects,
            ],
            side_sections: Vec::new(),
            typography: SERIF,
            spacing: Spacing {
                margin_pt: 40.0,
                ..STANDARD_SPACING
            },
            marker: BulletMarker::Disc,
            heading_underline: true,
            accent_entry_titles: false,
            summary_heading: true,
            timeline_rail: false,
            skills_join: ", ",
        },
        TemplateId::Compact => TemplatePlan {
            id,
            header: HeaderStyle::SplitContact,
            columns: ColumnScheme::Sidebar {
                side: Side::Right,
                width_pt: 140.0,
                filled: false,
            },
            main_sections: vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Projects,
            ],
            side_sections: vec![
                SectionKind::Skills,
                SectionKind::Education,
                SectionKind::Certifications,
                SectionKind::Languages,
            ],
            typography: Typography {
                base_size_pt: 8.0,
                heading_size_pt: 10.0,
                name_size_pt: 18.0,
                leading: 1.35,
                ..SANS
            },
            spacing: Spacing {
                margin_pt: 30.0,
                section_gap_pt: 10.0,
                entry_gap_pt: 5.0,
                column_gap_pt: 14.0,
                heading_gap_pt: 4.0,
            },
            marker: BulletMarker::Dot,
            heading_underline: true,
            accent_entry_titles: false,
            summary_heading: false,
            timeline_rail: false,
            skills_join: " · ",
        },
        TemplateId::Creative => TemplatePlan {
            id,
            header: HeaderStyle::InSidebar,
            columns: ColumnScheme::Sidebar {
                side: Side::Left,
                width_pt: 180.0,
                filled: true,
            },
            main_sections: vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Projects,
            ],
            side_sections: vec![
                SectionKind::Skills,
                SectionKind::Education,
                SectionKind::Languages,
                SectionKind::Certifications,
            ],
            typography: Typography {
                base_size_pt: 8.5,
                ..SANS
            },
            spacing: Spacing {
                margin_pt: 30.0,
                ..STANDARD_SPACING
            },
            marker: BulletMarker::Dot,
            heading_underline: false,
            accent_entry_titles: true,
            summary_heading: true,
            timeline_rail: false,
            skills_join: " · ",
        },
        TemplateId::Timeline => TemplatePlan {
            id,
            header: HeaderStyle::Centered { rule_pt: 2.0 },
            columns: ColumnScheme::Single,
            main_sections: vec![
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Education,
                SectionKind::Projects,
                SectionKind::Skills,
                SectionKind::Certifications,
                SectionKind::Languages,
            ],
            side_sections: Vec::new(),
            typography: SANS,
            spacing: STANDARD_SPACING,
            marker: BulletMarker::Dot,
            heading_underline: false,
            accent_entry_titles: true,
            summary_heading: false,
            timeline_rail: true,
            skills_join: " · ",
        },
    }
}

/// Display title for a section under a given template. A few templates
/// rename the standard headings.
pub fn section_title(id: TemplateId, kind: SectionKind) -> &'static str {
    match (id, kind) {
        (TemplateId::Classic, SectionKind::Summary) => "Professional Summary",
        (TemplateId::Classic, SectionKind::Experience) => "Professional Experience",
        (TemplateId::Executive, SectionKind::Summary) => "Executive Summary",
        (TemplateId::Executive, SectionKind::Skills) => "Core Competencies",
        (_, SectionKind::Summary) => "Summary",
        (_, SectionKind::Experience) => "Experience",
        (_, SectionKind::Projects) => "Projects",
        (_, SectionKind::Education) => "Education",
        (_, SectionKind::Skills) => "Skills",
        (_, SectionKind::Certifications) => "Certifications",
        (_, SectionKind::Languages) => "Languages",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_sections(plan: &TemplatePlan) -> Vec<SectionKind> {
        plan.main_sections
            .iter()
            .chain(plan.side_sections.iter())
            .copied()
            .collect()
    }

    #[test]
    fn test_every_plan_places_every_section_exactly_once() {
        for id in TemplateId::ALL {
            let plan = plan_for(id);
            let sections = all_sections(&plan);
            assert_eq!(sections.len(), 7, "{id} places 7 sections");
            for kind in [
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Projects,
                SectionKind::Education,
                SectionKind::Skills,
                SectionKind::Certifications,
                SectionKind::Languages,
            ] {
                assert_eq!(
                    sections.iter().filter(|k| **k == kind).count(),
                    1,
                    "{id} places {kind:?} once"
                );
            }
        }
    }

    #[test]
    fn test_single_column_plans_have_no_side_sections() {
        for id in TemplateId::ALL {
            let plan = plan_for(id);
            if plan.columns == ColumnScheme::Single {
                assert!(plan.side_sections.is_empty(), "{id}");
            } else {
                assert!(!plan.side_sections.is_empty(), "{id}");
            }
        }
    }

    #[test]
    fn test_creative_is_the_only_filled_sidebar() {
        for id in TemplateId::ALL {
            let plan = plan_for(id);
            let filled = matches!(plan.columns, ColumnScheme::Sidebar { filled: true, .. });
            assert_eq!(filled, id == TemplateId::Creative, "{id}");
        }
    }

    #[test]
    fn test_timeline_rail_is_unique_to_timeline() {
        for id in TemplateId::ALL {
            assert_eq!(plan_for(id).timeline_rail, id == TemplateId::Timeline);
        }
    }

    #[test]
    fn test_section_titles_honor_template_overrides() {
        assert_eq!(
            section_title(TemplateId::Classic, SectionKind::Summary),
            "Professional Summary"
        );
        assert_eq!(
            section_title(TemplateId::Executive, SectionKind::Skills),
            "Core Competencies"
        );
        assert_eq!(
            section_title(TemplateId::Modern, SectionKind::Skills),
            "Skills"
        );
    }
}
