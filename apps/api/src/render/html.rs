//! HTML rendering of a laid-out resume through the askama templates under
//! `templates/`.
//!
//! The document is self-contained (inline CSS, no external assets) so the same
//! markup serves the preview route and the export rasterizer.

use askama::Template;

use crate::render::layout::{RenderedResume, SectionBody};
use crate::render::styles::{AccentColor, FontClass};

/// Width of the rendered page in CSS pixels (A4 at 96 dpi).
pub const PAGE_WIDTH_PX: u32 = 794;

pub const PREVIEW_PLACEHOLDER: &str =
    "Please fill out the \"Input Resume\" form to see a preview.";

#[derive(Template)]
#[template(path = "resume.html")]
struct ResumePage<'a> {
    font_stack: &'a str,
    accent: &'a str,
    page_width: u32,
    resume: &'a RenderedResume,
}

#[derive(Template)]
#[template(path = "placeholder.html")]
struct PlaceholderPage<'a> {
    font_stack: &'a str,
    accent: &'a str,
    page_width: u32,
    message: &'a str,
}

pub fn to_html(resume: &RenderedResume) -> askama::Result<String> {
    ResumePage {
        font_stack: resume.style.font.css_stack(),
        accent: resume.style.accent.hex(),
        page_width: PAGE_WIDTH_PX,
        resume,
    }
    .render()
}

/// The page shown by the preview route while the resume has no name.
pub fn placeholder_html() -> askama::Result<String> {
    PlaceholderPage {
        font_stack: FontClass::Sans.css_stack(),
        accent: AccentColor::Primary.hex(),
        page_width: PAGE_WIDTH_PX,
        message: PREVIEW_PLACEHOLDER,
    }
    .render()
}
