//! Template registry — the closed, ordered set of visual templates.
//!
//! Static configuration, not computed: adding a template means adding one
//! enum variant, one registry entry, and one layout plan (the compiler
//! enforces the plan via exhaustive matching in `layout::plan`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::UnknownTemplateError;

/// The closed set of template identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Modern,
    Classic,
    Minimal,
    Bold,
    Executive,
    Compact,
    Creative,
    Timeline,
}

impl TemplateId {
    /// Registry order — also the gallery display order.
    pub const ALL: [TemplateId; 8] = [
        TemplateId::Modern,
        TemplateId::Classic,
        TemplateId::Minimal,
        TemplateId::Bold,
        TemplateId::Executive,
        TemplateId::Compact,
        TemplateId::Creative,
        TemplateId::Timeline,
    ];

    /// The designated fallback identity for unrecognized dispatch requests.
    pub const DEFAULT: TemplateId = TemplateId::Modern;

    pub fn key(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Minimal => "minimal",
            TemplateId::Bold => "bold",
            TemplateId::Executive => "executive",
            TemplateId::Compact => "compact",
            TemplateId::Creative => "creative",
            TemplateId::Timeline => "timeline",
        }
    }

    /// Strict lookup by identity key.
    pub fn from_name(name: &str) -> Result<Self, UnknownTemplateError> {
        Self::ALL
            .into_iter()
            .find(|id| id.key() == name)
            .ok_or_else(|| UnknownTemplateError(name.to_string()))
    }

    /// Lenient lookup: an unrecognized identity falls back to
    /// [`TemplateId::DEFAULT`]. The fallback is deliberate and logged —
    /// dispatch never surfaces an unknown identity as an error.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|_| {
            warn!(identity = name, "unknown template identity, falling back to default");
            Self::DEFAULT
        })
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TemplateId {
    type Err = UnknownTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Human-readable registry metadata for one template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateConfig {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    /// Default accent, overridden by the color passed at render time.
    pub accent_color: &'static str,
}

/// The registry, in display order.
pub const TEMPLATES: [TemplateConfig; 8] = [
    TemplateConfig {
        id: TemplateId::Modern,
        name: "Modern",
        description: "Clean two-column layout with accent colors and icons",
        accent_color: "#2563eb",
    },
    TemplateConfig {
        id: TemplateId::Classic,
        name: "Classic",
        description: "Traditional single-column, serif fonts, formal style",
        accent_color: "#1e3a5f",
    },
    TemplateConfig {
        id: TemplateId::Minimal,
        name: "Minimal",
        description: "Lots of whitespace, sans-serif, ultra-clean",
        accent_color: "#374151",
    },
    TemplateConfig {
        id: TemplateId::Bold,
        name: "Bold",
        description: "Strong typography, dark headers, high contrast",
        accent_color: "#dc2626",
    },
    TemplateConfig {
        id: TemplateId::Executive,
        name: "Executive",
        description: "Sophisticated, muted tones, suited for senior roles",
        accent_color: "#6b5b47",
    },
    TemplateConfig {
        id: TemplateId::Compact,
        name: "Compact",
        description: "Dense two-column, fits more content on one page",
        accent_color: "#0f766e",
    },
    TemplateConfig {
        id: TemplateId::Creative,
        name: "Creative",
        description: "Colored sidebar, great for design and marketing roles",
        accent_color: "#7c3aed",
    },
    TemplateConfig {
        id: TemplateId::Timeline,
        name: "Timeline",
        description: "Vertical timeline rail, clear career progression",
        accent_color: "#0369a1",
    },
];

/// Registry lookup. Total over [`TemplateId`], so it cannot fail.
pub fn template_config(id: TemplateId) -> &'static TemplateConfig {
    TEMPLATES
        .iter()
        .find(|t| t.id == id)
        .expect("registry covers every TemplateId")
}
