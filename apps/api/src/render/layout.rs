//! Builds the presentational layout of a resume for a template.
//!
//! A section is emitted only when its data is non-empty; order is fixed:
//! summary, experience, education, skills, projects, then custom sections.

use serde::Serialize;

use crate::models::resume::ResumeData;
use crate::resume::validation::is_http_url;
use crate::render::styles::{template_style, TemplateStyle};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedResume {
    pub style: TemplateStyle,
    pub header: Header,
    pub sections: Vec<RenderedSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub name: String,
    pub contacts: Vec<Link>,
}

/// Text that is clickable only when `href` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: Option<String>,
}

impl Link {
    /// A link to `url`, kept as plain text unless it is an http(s) URL.
    fn web(label: impl Into<String>, url: &str) -> Self {
        Self {
            label: label.into(),
            href: is_http_url(url).then(|| url.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub heading: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SectionBody {
    Text(String),
    /// Text whose line breaks are kept.
    Preformatted(String),
    Entries(Vec<Entry>),
}

/// One item of a list section (a job, a degree, a project).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entry {
    pub title: String,
    pub subtitle: Option<String>,
    pub meta: Option<String>,
    pub note: Option<String>,
    pub body: Option<String>,
    pub link: Option<Link>,
    pub bullets: Vec<String>,
}

pub const SKILL_SEPARATOR: &str = " • ";

pub fn render(data: &ResumeData, template_id: &str) -> RenderedResume {
    let mut sections = Vec::new();

    if !data.summary.is_empty() {
        sections.push(RenderedSection {
            kind: SectionKind::Summary,
            heading: "Summary".to_string(),
            body: SectionBody::Text(data.summary.clone()),
        });
    }

    if !data.experiences.is_empty() {
        let entries = data
            .experiences
            .iter()
            .map(|exp| Entry {
                title: exp.job_title.clone(),
                subtitle: Some(exp.company.clone()),
                meta: Some(format!("{} - {}", exp.start_date, exp.end_label())),
                bullets: exp
                    .responsibility_lines()
                    .map(|line| line.trim().to_string())
                    .collect(),
                ..Default::default()
            })
            .collect();
        sections.push(RenderedSection {
            kind: SectionKind::Experience,
            heading: "Experience".to_string(),
            body: SectionBody::Entries(entries),
        });
    }

    if !data.education_items.is_empty() {
        let entries = data
            .education_items
            .iter()
            .map(|edu| Entry {
                title: edu.degree.clone(),
                subtitle: Some(edu.institution.clone()),
                meta: Some(format!("Graduated: {}", edu.graduation_date)),
                note: edu
                    .relevant_coursework
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .map(|c| format!("Relevant Coursework: {c}")),
                ..Default::default()
            })
            .collect();
        sections.push(RenderedSection {
            kind: SectionKind::Education,
            heading: "Education".to_string(),
            body: SectionBody::Entries(entries),
        });
    }

    if !data.skills.is_empty() {
        sections.push(RenderedSection {
            kind: SectionKind::Skills,
            heading: "Skills".to_string(),
            body: SectionBody::Text(split_skills(&data.skills).join(SKILL_SEPARATOR)),
        });
    }

    if !data.projects.is_empty() {
        let entries = data
            .projects
            .iter()
            .map(|proj| Entry {
                title: proj.name.clone(),
                note: Some(format!("Technologies: {}", proj.technologies)),
                body: Some(proj.description.clone()),
                link: proj
                    .link
                    .as_deref()
                    .filter(|l| !l.is_empty())
                    .map(|l| Link::web(l, l)),
                ..Default::default()
            })
            .collect();
        sections.push(RenderedSection {
            kind: SectionKind::Projects,
            heading: "Projects".to_string(),
            body: SectionBody::Entries(entries),
        });
    }

    sections.extend(
        data.custom_sections
            .iter()
            .filter(|s| s.is_renderable())
            .map(|s| RenderedSection {
                kind: SectionKind::Custom,
                heading: s.title.clone(),
                body: SectionBody::Preformatted(s.content.clone()),
            }),
    );

    RenderedResume {
        style: template_style(template_id),
        header: Header {
            name: data.name.clone(),
            contacts: contacts(data),
        },
        sections,
    }
}

/// Splits the flat skills string on commas and newlines, dropping blanks.
pub fn split_skills(skills: &str) -> Vec<&str> {
    skills
        .split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn contacts(data: &ResumeData) -> Vec<Link> {
    let mut contacts = Vec::new();
    if !data.email.is_empty() {
        contacts.push(Link {
            label: data.email.clone(),
            href: Some(format!("mailto:{}", data.email)),
        });
    }
    if !data.phone.is_empty() {
        contacts.push(Link {
            label: data.phone.clone(),
            href: None,
        });
    }
    if !data.linkedin.is_empty() {
        contacts.push(Link::web("LinkedIn", &data.linkedin));
    }
    if !data.portfolio.is_empty() {
        contacts.push(Link::web("Portfolio", &data.portfolio));
    }
    contacts
}
