//! Static styling table keyed by template id.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontClass {
    Sans,
    Mono,
    Serif,
}

impl FontClass {
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontClass::Sans => "'Helvetica Neue', Helvetica, Arial, sans-serif",
            FontClass::Mono => "'JetBrains Mono', 'Courier New', Courier, monospace",
            FontClass::Serif => "Georgia, 'Times New Roman', Times, serif",
        }
    }
}

/// Colour used for the name, section headings and heading borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccentColor {
    Primary,
    Secondary,
}

impl AccentColor {
    pub fn hex(&self) -> &'static str {
        match self {
            AccentColor::Primary => "#3f51b5",
            AccentColor::Secondary => "#00897b",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStyle {
    /// The template the style resolved to (unknown ids resolve to `classic`).
    pub template_id: &'static str,
    pub font: FontClass,
    pub accent: AccentColor,
}

const CLASSIC: TemplateStyle = TemplateStyle {
    template_id: "classic",
    font: FontClass::Sans,
    accent: AccentColor::Primary,
};

const STYLE_TABLE: &[TemplateStyle] = &[
    CLASSIC,
    TemplateStyle {
        template_id: "modern",
        font: FontClass::Mono,
        accent: AccentColor::Primary,
    },
    TemplateStyle {
        template_id: "creative",
        font: FontClass::Serif,
        accent: AccentColor::Secondary,
    },
    TemplateStyle {
        template_id: "academic",
        font: FontClass::Sans,
        accent: AccentColor::Primary,
    },
    TemplateStyle {
        template_id: "compact",
        font: FontClass::Sans,
        accent: AccentColor::Primary,
    },
];

pub fn template_style(template_id: &str) -> TemplateStyle {
    STYLE_TABLE
        .iter()
        .find(|s| s.template_id == template_id)
        .copied()
        .unwrap_or(CLASSIC)
}
