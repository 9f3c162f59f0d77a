//! Plain-text projection of the resume aggregate, used as the prompt payload
//! for the AI endpoints.
//!
//! The output is advisory text, not a parseable format: nothing is escaped, so a
//! company called "Foo at Bar" reads ambiguously. Block order is fixed:
//! identity, summary, experience, education, skills, projects, custom sections.

use std::fmt::Write;

use crate::models::resume::ResumeData;

/// Serializes `data` to plain text. `None` yields an empty string.
pub fn serialize(data: Option<&ResumeData>) -> String {
    let Some(data) = data else {
        return String::new();
    };

    let mut text = String::new();

    // `write!` into a String cannot fail.
    let _ = writeln!(text, "Name: {}", data.name);
    let _ = writeln!(text, "Email: {}", data.email);
    let _ = writeln!(text, "Phone: {}", data.phone);
    if !data.linkedin.is_empty() {
        let _ = writeln!(text, "LinkedIn: {}", data.linkedin);
    }
    if !data.portfolio.is_empty() {
        let _ = writeln!(text, "Portfolio: {}", data.portfolio);
    }

    if !data.summary.is_empty() {
        let _ = writeln!(text, "\nSummary:\n{}", data.summary);
    }

    if !data.experiences.is_empty() {
        text.push_str("\nExperience:\n");
        for exp in &data.experiences {
            let _ = writeln!(
                text,
                "- {} at {} ({} - {})",
                exp.job_title,
                exp.company,
                exp.start_date,
                exp.end_label()
            );
            text.push_str("  Responsibilities:\n");
            for line in exp.responsibility_lines() {
                let _ = writeln!(text, "    {line}");
            }
        }
    }

    if !data.education_items.is_empty() {
        text.push_str("\nEducation:\n");
        for edu in &data.education_items {
            let _ = writeln!(
                text,
                "- {} from {} (Graduated: {})",
                edu.degree, edu.institution, edu.graduation_date
            );
            if let Some(coursework) = non_empty(edu.relevant_coursework.as_deref()) {
                let _ = writeln!(text, "  Relevant Coursework: {coursework}");
            }
        }
    }

    if !data.skills.is_empty() {
        let _ = writeln!(text, "\nSkills:\n{}", data.skills);
    }

    if !data.projects.is_empty() {
        text.push_str("\nProjects:\n");
        for proj in &data.projects {
            let _ = writeln!(text, "- {}: {}", proj.name, proj.description);
            let _ = writeln!(text, "  Technologies: {}", proj.technologies);
            if let Some(link) = non_empty(proj.link.as_deref()) {
                let _ = writeln!(text, "  Link: {link}");
            }
        }
    }

    for section in &data.custom_sections {
        let _ = writeln!(text, "\n{}:\n{}", section.title, section.content);
    }

    text.trim().to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{CustomSection, Education, Experience, Project};

    fn jane() -> ResumeData {
        ResumeData {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "555-0100".to_string(),
            experiences: vec![Experience {
                id: "1".to_string(),
                job_title: "Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "2021-01".to_string(),
                is_current: true,
                responsibilities: "Built X\nShipped Y".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_none_serializes_to_empty_string() {
        assert_eq!(serialize(None), "");
    }

    #[test]
    fn test_current_experience_renders_present_with_indented_lines() {
        let text = serialize(Some(&jane()));
        let expected = "Experience:\n\
            - Engineer at Acme (2020-01 - Present)\n  \
            Responsibilities:\n    \
            Built X\n    \
            Shipped Y";
        assert!(text.contains(expected), "unexpected text:\n{text}");
        assert!(!text.contains("2021-01"), "endDate must be ignored for a current role");
    }

    #[test]
    fn test_blank_responsibility_lines_are_dropped() {
        let mut data = jane();
        data.experiences[0].responsibilities = "Built X\n\n  \nShipped Y\n".to_string();
        let text = serialize(Some(&data));
        assert!(text.ends_with("    Built X\n    Shipped Y"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let data = jane();
        let first = serialize(Some(&data));
        for _ in 0..5 {
            assert_eq!(serialize(Some(&data)), first);
        }
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let text = serialize(Some(&ResumeData::default()));
        assert_eq!(text, "Name: \nEmail: \nPhone:");
        for heading in ["Summary:", "Experience:", "Education:", "Skills:", "Projects:"] {
            assert!(!text.contains(heading), "{heading} should be omitted");
        }
        assert!(!text.contains("LinkedIn:"));
    }

    #[test]
    fn test_each_section_appears_when_filled() {
        let mut data = jane();
        data.summary = "Systems engineer.".to_string();
        data.skills = "Rust, Go".to_string();
        data.linkedin = "https://linkedin.com/in/jane".to_string();
        data.education_items.push(Education {
            id: "e".to_string(),
            degree: "BSc CS".to_string(),
            institution: "MIT".to_string(),
            graduation_date: "2019".to_string(),
            relevant_coursework: Some("Compilers".to_string()),
        });
        data.projects.push(Project {
            id: "p".to_string(),
            name: "Tool".to_string(),
            description: "A tool".to_string(),
            technologies: "Rust".to_string(),
            link: Some(String::new()),
        });

        let text = serialize(Some(&data));
        assert!(text.contains("LinkedIn: https://linkedin.com/in/jane\n"));
        assert!(text.contains("\nSummary:\nSystems engineer.\n"));
        assert!(text.contains("- BSc CS from MIT (Graduated: 2019)\n  Relevant Coursework: Compilers"));
        assert!(text.contains("\nSkills:\nRust, Go\n"));
        assert!(text.contains("- Tool: A tool\n  Technologies: Rust"));
        assert!(!text.contains("Link:"), "empty link must be omitted");
    }

    #[test]
    fn test_fixed_block_order() {
        let mut data = jane();
        data.summary = "S".to_string();
        data.skills = "K".to_string();
        let text = serialize(Some(&data));
        let summary = text.find("Summary:").unwrap();
        let experience = text.find("Experience:").unwrap();
        let skills = text.find("Skills:").unwrap();
        assert!(summary < experience && experience < skills);
    }

    #[test]
    fn test_custom_sections_follow_list_order_with_blank_line() {
        let mut data = jane();
        data.custom_sections = vec![
            CustomSection {
                id: "a".to_string(),
                title: "Awards".to_string(),
                content: "Best paper".to_string(),
            },
            CustomSection {
                id: "b".to_string(),
                title: "Languages".to_string(),
                content: "French".to_string(),
            },
        ];
        let text = serialize(Some(&data));
        assert!(text.ends_with("\n\nAwards:\nBest paper\n\nLanguages:\nFrench"));
    }
}
