use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// List entities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    /// Free text, one achievement per line.
    pub responsibilities: String,
}

impl Experience {
    /// The end of the date range as displayed: "Present" for a current role.
    pub fn end_label(&self) -> &str {
        if self.is_current {
            "Present"
        } else {
            &self.end_date
        }
    }

    /// Non-blank responsibility lines, in order.
    pub fn responsibility_lines(&self) -> impl Iterator<Item = &str> {
        self.responsibilities
            .lines()
            .filter(|line| !line.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub graduation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_coursework: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl CustomSection {
    /// A custom section is shown only when both title and content are filled.
    pub fn is_renderable(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

/// The single resume aggregate. Field names follow the stored JSON layout.
///
/// List order is insertion order and drives both rendering and serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub portfolio: String,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub education_items: Vec<Education>,
    pub skills: String,
    pub projects: Vec<Project>,
    pub custom_sections: Vec<CustomSection>,
}

impl ResumeData {
    /// Name, email, phone and skills are all filled in.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.skills]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Assigns a fresh id to every list item that arrived without one.
    pub fn ensure_item_ids(&mut self) {
        let ids = self
            .experiences
            .iter_mut()
            .map(|e| &mut e.id)
            .chain(self.education_items.iter_mut().map(|e| &mut e.id))
            .chain(self.projects.iter_mut().map(|p| &mut p.id))
            .chain(self.custom_sections.iter_mut().map(|s| &mut s.id));
        for id in ids {
            if id.trim().is_empty() {
                *id = new_item_id();
            }
        }
    }

    /// Appends a blank item to `section` and returns its id.
    pub fn append_item(&mut self, section: ResumeSection) -> String {
        let id = new_item_id();
        match section {
            ResumeSection::Experiences => self.experiences.push(Experience {
                id: id.clone(),
                ..Default::default()
            }),
            ResumeSection::EducationItems => self.education_items.push(Education {
                id: id.clone(),
                relevant_coursework: Some(String::new()),
                ..Default::default()
            }),
            ResumeSection::Projects => self.projects.push(Project {
                id: id.clone(),
                link: Some(String::new()),
                ..Default::default()
            }),
            ResumeSection::CustomSections => self.custom_sections.push(CustomSection {
                id: id.clone(),
                ..Default::default()
            }),
        }
        id
    }

    /// Removes the item with `id` from `section`, keeping the order of the rest.
    pub fn remove_item(&mut self, section: ResumeSection, id: &str) -> Result<(), AppError> {
        let before = self.section_len(section);
        match section {
            ResumeSection::Experiences => self.experiences.retain(|e| e.id != id),
            ResumeSection::EducationItems => self.education_items.retain(|e| e.id != id),
            ResumeSection::Projects => self.projects.retain(|p| p.id != id),
            ResumeSection::CustomSections => self.custom_sections.retain(|s| s.id != id),
        }
        if self.section_len(section) == before {
            return Err(AppError::NotFound(format!(
                "No item {id} in {}",
                section.as_str()
            )));
        }
        Ok(())
    }

    fn section_len(&self, section: ResumeSection) -> usize {
        match section {
            ResumeSection::Experiences => self.experiences.len(),
            ResumeSection::EducationItems => self.education_items.len(),
            ResumeSection::Projects => self.projects.len(),
            ResumeSection::CustomSections => self.custom_sections.len(),
        }
    }
}

fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// The list-valued sections of the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSection {
    Experiences,
    EducationItems,
    Projects,
    CustomSections,
}

impl ResumeSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeSection::Experiences => "experiences",
            ResumeSection::EducationItems => "educationItems",
            ResumeSection::Projects => "projects",
            ResumeSection::CustomSections => "customSections",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "experiences" => Some(ResumeSection::Experiences),
            "educationItems" | "education" => Some(ResumeSection::EducationItems),
            "projects" => Some(ResumeSection::Projects),
            "customSections" => Some(ResumeSection::CustomSections),
            _ => None,
        }
    }
}
