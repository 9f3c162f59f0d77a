//! Advisory field validation for the resume form.
//!
//! Validation never blocks persistence: every edit is stored as-is and the
//! report is returned alongside so the client can show inline messages.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::resume::ResumeData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path, e.g. `experiences.0.jobTitle`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub complete: bool,
    pub errors: Vec<FieldError>,
}

struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn required(&mut self, field: String, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.push(field, message);
        }
    }

    fn optional_url(&mut self, field: String, value: Option<&str>, message: &str) {
        match value {
            Some(v) if !v.is_empty() && !is_http_url(v) => self.push(field, message),
            _ => {}
        }
    }

    fn push(&mut self, field: String, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}

pub fn validate(data: &ResumeData) -> ValidationReport {
    let mut c = Checker { errors: Vec::new() };

    c.required("name".into(), &data.name, "Full name is required");
    if !is_email(&data.email) {
        c.push("email".into(), "Invalid email address");
    }
    c.required("phone".into(), &data.phone, "Phone number is required");
    c.optional_url(
        "linkedin".into(),
        Some(&data.linkedin),
        "Invalid LinkedIn URL (must include http/https)",
    );
    c.optional_url(
        "portfolio".into(),
        Some(&data.portfolio),
        "Invalid Portfolio URL (must include http/https)",
    );

    for (i, exp) in data.experiences.iter().enumerate() {
        let path = |f: &str| format!("experiences.{i}.{f}");
        c.required(path("jobTitle"), &exp.job_title, "Job title is required");
        c.required(path("company"), &exp.company, "Company name is required");
        c.required(path("startDate"), &exp.start_date, "Start date is required");
        c.required(
            path("responsibilities"),
            &exp.responsibilities,
            "Responsibilities are required",
        );
    }

    for (i, edu) in data.education_items.iter().enumerate() {
        let path = |f: &str| format!("educationItems.{i}.{f}");
        c.required(path("degree"), &edu.degree, "Degree is required");
        c.required(path("institution"), &edu.institution, "Institution is required");
        c.required(
            path("graduationDate"),
            &edu.graduation_date,
            "Graduation date is required",
        );
    }

    c.required("skills".into(), &data.skills, "Skills are required");

    for (i, proj) in data.projects.iter().enumerate() {
        let path = |f: &str| format!("projects.{i}.{f}");
        c.required(path("name"), &proj.name, "Project name is required");
        c.required(path("description"), &proj.description, "Description is required");
        c.required(
            path("technologies"),
            &proj.technologies,
            "Technologies used are required",
        );
        c.optional_url(path("link"), proj.link.as_deref(), "Invalid URL");
    }

    for (i, section) in data.custom_sections.iter().enumerate() {
        let path = |f: &str| format!("customSections.{i}.{f}");
        c.required(path("title"), &section.title, "Section title is required");
        c.required(path("content"), &section.content, "Content is required");
    }

    ValidationReport {
        valid: c.errors.is_empty(),
        complete: data.is_complete(),
        errors: c.errors,
    }
}

/// Absolute http(s) URL with a host.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// Loose address check: one `@`, non-empty local part, dotted domain, no spaces.
pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(head, tail)| !head.is_empty() && !tail.is_empty() && !tail.ends_with('.'))
                    .unwrap_or(false)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Project};

    fn valid_resume() -> ResumeData {
        ResumeData {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "555-0100".to_string(),
            skills: "Rust".to_string(),
            ..Default::default()
        }
    }

    fn fields(report: &ValidationReport) -> Vec<&str> {
        report.errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_minimal_complete_resume_is_valid() {
        let report = validate(&valid_resume());
        assert!(report.valid, "unexpected errors: {:?}", report.errors);
        assert!(report.complete);
    }

    #[test]
    fn test_empty_resume_reports_required_fields() {
        let report = validate(&ResumeData::default());
        assert!(!report.valid);
        assert!(!report.complete);
        assert_eq!(fields(&report), vec!["name", "email", "phone", "skills"]);
    }

    #[test]
    fn test_urls_must_be_http_when_present() {
        let mut data = valid_resume();
        data.linkedin = "linkedin.com/in/jane".to_string();
        data.portfolio = "https://jane.dev".to_string();
        let report = validate(&data);
        assert_eq!(fields(&report), vec!["linkedin"]);
    }

    #[test]
    fn test_nested_errors_use_dotted_paths() {
        let mut data = valid_resume();
        data.experiences.push(Experience {
            id: "x".to_string(),
            job_title: "Engineer".to_string(),
            ..Default::default()
        });
        data.projects.push(Project {
            id: "p".to_string(),
            name: "Tool".to_string(),
            description: "d".to_string(),
            technologies: "Rust".to_string(),
            link: Some("ftp://example.com".to_string()),
        });
        let report = validate(&data);
        assert_eq!(
            fields(&report),
            vec![
                "experiences.0.company",
                "experiences.0.startDate",
                "experiences.0.responsibilities",
                "projects.0.link",
            ]
        );
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("jane@x.com"));
        assert!(is_email("first.last@sub.example.org"));
        assert!(!is_email("jane"));
        assert!(!is_email("jane@x"));
        assert!(!is_email("@x.com"));
        assert!(!is_email("ja ne@x.com"));
        assert!(!is_email("a@b@c.com"));
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://janedoe.dev"));
        assert!(is_http_url("http://linkedin.com/in/jane"));
        assert!(!is_http_url("mailto:jane@x.com"));
        assert!(!is_http_url("janedoe.dev"));
    }
}
