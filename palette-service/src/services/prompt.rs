//! Prompt construction for palette requests.
//!
//! The prompt is a fixed template: the request fields are interpolated into
//! a short brief, followed by an example JSON document the model is told to
//! mimic. Output depends only on the request and the empty-usage policy.

use crate::config::EmptyUsagePolicy;
use crate::models::{ColorRole, PaletteRequest};

/// Sample names shown in the example `colorNamesDetailed` block.
const EXAMPLE_COLOR_NAMES: [&str; 8] = [
    "Sky Blue",
    "Royal Purple",
    "Crimson Red",
    "Ivory",
    "Charcoal",
    "Turquoise",
    "Slate Gray",
    "Emerald",
];

const CLOSING_INSTRUCTIONS: &str = "For each color, provide a detailed, one-sentence color \
psychology justification and ensure all colors work together. The palette should be suitable \
for both digital and print, and accessible for all users.";

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    empty_usage: EmptyUsagePolicy,
}

impl PromptBuilder {
    pub fn new(empty_usage: EmptyUsagePolicy) -> Self {
        Self { empty_usage }
    }

    pub fn build_prompt(&self, request: &PaletteRequest) -> String {
        let mut prompt = format!(
            "Generate a professional, harmonious color palette for a {} business in the {} industry.\n\
             Target audience: {}.\n\
             Design style: {}. Color preference: {}.\n",
            request.business_type,
            request.industry,
            request.audience,
            request.design_style,
            request.color_pref
        );
        if !request.usage.is_empty() || self.empty_usage == EmptyUsagePolicy::Render {
            prompt.push_str(&format!(
                "Palette will be used for: {}.\n",
                request.usage.join(", ")
            ));
        }

        prompt.push('\n');
        prompt.push_str("Please return 8 colors in this JSON format:\n");
        prompt.push_str(&example_schema());
        prompt.push('\n');
        prompt.push_str(CLOSING_INSTRUCTIONS);

        prompt
    }
}

/// The example document embedded in every prompt.
fn example_schema() -> String {
    let last = ColorRole::ALL.len() - 1;
    let mut lines = vec!["{".to_string()];

    lines.extend(
        ColorRole::ALL
            .iter()
            .map(|role| format!("  \"{}\": \"#hexcode\",", role.key())),
    );
    lines.push("  \"fontSuggestion\": \"font-family-name\",".to_string());

    lines.push("  \"colorNamesDetailed\": [".to_string());
    lines.extend(
        ColorRole::ALL
            .iter()
            .zip(EXAMPLE_COLOR_NAMES)
            .enumerate()
            .map(|(i, (role, name))| {
                let sep = if i < last { "," } else { "" };
                format!(
                    "    {{ \"role\": \"{}\", \"name\": \"{}\" }}{}",
                    role.label(),
                    name,
                    sep
                )
            }),
    );
    lines.push("  ],".to_string());

    let labels: Vec<String> = ColorRole::ALL
        .iter()
        .map(|role| format!("\"{}\"", role.label()))
        .collect();
    lines.push(format!("  \"colorNames\": [{}],", labels.join(", ")));

    lines.push("  \"colorPsychology\": [".to_string());
    lines.extend(ColorRole::ALL.iter().enumerate().map(|(i, role)| {
        let sep = if i < last { "," } else { "" };
        format!("    \"reason for {}\"{}", role.key(), sep)
    }));
    lines.push("  ]".to_string());
    lines.push("}".to_string());

    lines.join("\n")
}
