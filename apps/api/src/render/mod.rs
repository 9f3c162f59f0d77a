//! Template Renderer: resume data plus a template id become an HTML page.

pub mod handlers;
pub mod html;
pub mod layout;
pub mod styles;

use crate::models::resume::ResumeData;

/// Renders the full preview document, or the placeholder page when the
/// resume has no name yet.
pub fn render_page(data: &ResumeData, template_id: &str) -> askama::Result<String> {
    if !data.has_name() {
        return html::placeholder_html();
    }
    html::to_html(&layout::render(data, template_id))
}
