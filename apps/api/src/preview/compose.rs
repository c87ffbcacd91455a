//! Preview composition: normalized resume data + selected template + colours.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::resume::ResumeData;
use crate::preview::normalize::enhance_resume_data;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    SingleColumn,
    TwoColumn,
    Sidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub index: usize,
    pub id: &'static str,
    pub name: &'static str,
    pub layout: Layout,
    pub default_colors: Palette,
}

/// Resolved colours; every entry is a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub background: &'static str,
}

pub const TEMPLATES: &[TemplateInfo] = &[
    TemplateInfo {
        index: 0,
        id: "modern",
        name: "Modern",
        layout: Layout::SingleColumn,
        default_colors: Palette {
            primary: "#2563eb",
            secondary: "#1e40af",
            accent: "#60a5fa",
            text: "#1f2937",
            background: "#ffffff",
        },
    },
    TemplateInfo {
        index: 1,
        id: "classic",
        name: "Classic",
        layout: Layout::SingleColumn,
        default_colors: Palette {
            primary: "#111827",
            secondary: "#374151",
            accent: "#6b7280",
            text: "#111827",
            background: "#ffffff",
        },
    },
    TemplateInfo {
        index: 2,
        id: "professional",
        name: "Professional",
        layout: Layout::TwoColumn,
        default_colors: Palette {
            primary: "#0f766e",
            secondary: "#115e59",
            accent: "#5eead4",
            text: "#1f2937",
            background: "#ffffff",
        },
    },
    TemplateInfo {
        index: 3,
        id: "creative",
        name: "Creative",
        layout: Layout::Sidebar,
        default_colors: Palette {
            primary: "#7c3aed",
            secondary: "#5b21b6",
            accent: "#f472b6",
            text: "#1f2937",
            background: "#faf5ff",
        },
    },
    TemplateInfo {
        index: 4,
        id: "minimal",
        name: "Minimal",
        layout: Layout::SingleColumn,
        default_colors: Palette {
            primary: "#000000",
            secondary: "#404040",
            accent: "#a3a3a3",
            text: "#171717",
            background: "#ffffff",
        },
    },
    TemplateInfo {
        index: 5,
        id: "executive",
        name: "Executive",
        layout: Layout::Sidebar,
        default_colors: Palette {
            primary: "#1e3a5f",
            secondary: "#0f2440",
            accent: "#c9a227",
            text: "#1f2937",
            background: "#ffffff",
        },
    },
];

/// Colour overrides as sent by the colour picker. Any entry may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub text: Option<String>,
    pub background: Option<String>,
}

/// Colours after applying overrides to a template's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
}

impl ColorConfig {
    pub fn resolve(&self, defaults: &Palette) -> ResolvedColors {
        let pick = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .and_then(normalize_hex)
                .unwrap_or_else(|| default.to_string())
        };

        ResolvedColors {
            primary: pick(&self.primary, defaults.primary),
            secondary: pick(&self.secondary, defaults.secondary),
            accent: pick(&self.accent, defaults.accent),
            text: pick(&self.text, defaults.text),
            background: pick(&self.background, defaults.background),
        }
    }
}

/// Accepts `#rgb` or `#rrggbb` (leading `#` optional); returns lower-case `#rrggbb`.
pub fn normalize_hex(raw: &str) -> Option<String> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_lowercase()))
}

/// Any index outside the catalogue, negative ones included, selects the first
/// template.
pub fn template_at(index: i64) -> &'static TemplateInfo {
    let slot = usize::try_from(index).ok().and_then(|i| TEMPLATES.get(i));
    slot.unwrap_or_else(|| {
        warn!("Template index {index} out of range, using '{}'", TEMPLATES[0].id);
        &TEMPLATES[0]
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub resume_data: Option<ResumeData>,
    #[serde(default)]
    pub template_index: i64,
    #[serde(default)]
    pub colors: ColorConfig,
}

/// Everything a template needs to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub data: ResumeData,
    pub template: TemplateInfo,
    pub colors: ResolvedColors,
}

pub fn compose_preview(data: &ResumeData, template_index: i64, colors: &ColorConfig) -> Preview {
    let template = *template_at(template_index);
    Preview {
        data: enhance_resume_data(data),
        colors: colors.resolve(&template.default_colors),
        template,
    }
}
