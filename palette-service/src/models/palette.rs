//! Palette request and result types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The eight color roles a palette is made of, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Neutral,
    Background,
    Highlight,
    Muted,
    Success,
}

impl ColorRole {
    pub const ALL: [ColorRole; 8] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Accent,
        ColorRole::Neutral,
        ColorRole::Background,
        ColorRole::Highlight,
        ColorRole::Muted,
        ColorRole::Success,
    ];

    /// JSON key of the role's hex field.
    pub fn key(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Neutral => "neutral",
            ColorRole::Background => "background",
            ColorRole::Highlight => "highlight",
            ColorRole::Muted => "muted",
            ColorRole::Success => "success",
        }
    }

    /// Display label used in `colorNames` and `colorNamesDetailed`.
    pub fn label(self) -> &'static str {
        match self {
            ColorRole::Primary => "Primary",
            ColorRole::Secondary => "Secondary",
            ColorRole::Accent => "Accent",
            ColorRole::Neutral => "Neutral",
            ColorRole::Background => "Background",
            ColorRole::Highlight => "Highlight",
            ColorRole::Muted => "Muted",
            ColorRole::Success => "Success",
        }
    }
}

/// Inbound palette request.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaletteRequest {
    #[validate(length(min = 1, message = "businessType cannot be empty"))]
    pub business_type: String,
    pub industry: String,
    pub audience: String,
    pub design_style: String,
    pub color_pref: String,
    pub usage: Vec<String>,
}

/// Human-readable name for one role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorName {
    pub role: String,
    pub name: String,
}

/// Palette as decoded from the model reply.
///
/// Values are kept exactly as the model wrote them; hex strings are not
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteResult {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub neutral: String,
    pub background: String,
    pub highlight: String,
    pub muted: String,
    pub success: String,
    pub font_suggestion: String,
    pub color_names_detailed: Vec<ColorName>,
    pub color_names: Vec<String>,
    pub color_psychology: Vec<String>,
}

impl PaletteResult {
    pub fn color(&self, role: ColorRole) -> &str {
        match role {
            ColorRole::Primary => &self.primary,
            ColorRole::Secondary => &self.secondary,
            ColorRole::Accent => &self.accent,
            ColorRole::Neutral => &self.neutral,
            ColorRole::Background => &self.background,
            ColorRole::Highlight => &self.highlight,
            ColorRole::Muted => &self.muted,
            ColorRole::Success => &self.success,
        }
    }
}

/// Success body of `POST /api/generate-palette`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaletteResponse {
    pub palette: PaletteResult,
}
