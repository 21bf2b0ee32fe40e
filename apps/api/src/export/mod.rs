//! Export: renders a `ResumeRecord` into a document body.
//!
//! Writers only format; they never change content. Sections with nothing in
//! them are left out of the document.

use serde::Deserialize;
use thiserror::Error;

use crate::models::resume::{ContactInfo, ExperienceItem, ResumeRecord};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("resume has no content to export")]
    EmptyResume,
}

/// A document writer fed with the final (possibly rewritten) resume.
pub trait ResumeWriter: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn write(&self, resume: &ResumeRecord) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Text,
    Markdown,
}

impl ExportFormat {
    pub fn writer(self) -> Box<dyn ResumeWriter> {
        match self {
            ExportFormat::Text => Box::new(PlainTextWriter),
            ExportFormat::Markdown => Box::new(MarkdownWriter),
        }
    }
}

/// `email | phone`, skipping empty parts.
pub fn format_contact_line(contact: &ContactInfo) -> String {
    [contact.email.as_str(), contact.phone.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Heading styles differ per format; layout does not.
struct Style {
    name: fn(&str) -> String,
    section: fn(&str) -> String,
    role: fn(&str) -> String,
}

const TEXT_STYLE: Style = Style {
    name: text_name,
    section: text_section,
    role: plain,
};

const MARKDOWN_STYLE: Style = Style {
    name: markdown_h1,
    section: markdown_h2,
    role: markdown_h3,
};

fn plain(s: &str) -> String {
    s.to_string()
}

fn text_name(s: &str) -> String {
    s.to_uppercase()
}

fn text_section(s: &str) -> String {
    format!("{}\n{}", s.to_uppercase(), "-".repeat(s.chars().count()))
}

fn markdown_h1(s: &str) -> String {
    format!("# {s}")
}

fn markdown_h2(s: &str) -> String {
    format!("## {s}")
}

fn markdown_h3(s: &str) -> String {
    format!("### {s}")
}

fn render(resume: &ResumeRecord, style: &Style) -> Result<Vec<u8>, ExportError> {
    if resume.is_blank() {
        return Err(ExportError::EmptyResume);
    }

    let mut blocks: Vec<String> = Vec::new();

    let mut header = Vec::new();
    if !resume.contact.name.is_empty() {
        header.push((style.name)(&resume.contact.name));
    }
    let contact_line = format_contact_line(&resume.contact);
    if !contact_line.is_empty() {
        header.push(contact_line);
    }
    if !header.is_empty() {
        blocks.push(header.join("\n"));
    }

    if !resume.summary.is_empty() {
        blocks.push(format!(
            "{}\n{}",
            (style.section)("Summary"),
            resume.summary.join(" ")
        ));
    }

    let skills: Vec<&str> = resume
        .skills
        .flatten()
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if !skills.is_empty() {
        blocks.push(format!(
            "{}\n{}",
            (style.section)("Skills"),
            skills.join(", ")
        ));
    }

    if !resume.experience.is_empty() {
        let mut lines = vec![(style.section)("Experience")];
        for item in &resume.experience {
            match item {
                ExperienceItem::Role(role) => {
                    let title = if role.title.is_empty() { "Unknown Position" } else { &role.title };
                    let company = if role.company.is_empty() { "Unknown Company" } else { &role.company };
                    lines.push((style.role)(&format!("{title} – {company}")));
                    lines.extend(role.bullets.iter().map(|b| format!("- {b}")));
                }
                ExperienceItem::Line(line) => lines.push(format!("- {line}")),
            }
        }
        blocks.push(lines.join("\n"));
    }

    for (heading, items) in [("Projects", &resume.projects), ("Education", &resume.education)] {
        if items.is_empty() {
            continue;
        }
        let mut lines = vec![(style.section)(heading)];
        lines.extend(items.iter().map(|i| format!("- {i}")));
        blocks.push(lines.join("\n"));
    }

    let mut document = blocks.join("\n\n");
    document.push('\n');
    Ok(document.into_bytes())
}

pub struct PlainTextWriter;

impl ResumeWriter for PlainTextWriter {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn write(&self, resume: &ResumeRecord) -> Result<Vec<u8>, ExportError> {
        render(resume, &TEXT_STYLE)
    }
}

pub struct MarkdownWriter;

impl ResumeWriter for MarkdownWriter {
    fn content_type(&self) -> &'static str {
        "text/markdown; charset=utf-8"
    }

    fn write(&self, resume: &ResumeRecord) -> Result<Vec<u8>, ExportError> {
        render(resume, &MARKDOWN_STYLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{CategoryValue, ExperienceEntry, Skills};
    use std::collections::BTreeMap;

    fn resume() -> ResumeRecord {
        let mut categories = BTreeMap::new();
        categories.insert(
            "languages".to_string(),
            CategoryValue::Many(vec!["Rust".to_string(), "Go".to_string()]),
        );
        categories.insert("cloud".to_string(), CategoryValue::One("AWS".to_string()));

        ResumeRecord {
            contact: ContactInfo {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-123-4567".to_string(),
            },
            summary: vec!["Backend engineer.".to_string(), "Ships things.".to_string()],
            skills: Skills::Categorized(categories),
            experience: vec![
                ExperienceItem::Role(ExperienceEntry {
                    title: "Engineer".to_string(),
                    company: "Acme".to_string(),
                    bullets: vec!["Built ingest".to_string()],
                }),
                ExperienceItem::Line("Freelance consulting".to_string()),
            ],
            projects: vec![],
            education: vec!["BSc Computer Science".to_string()],
        }
    }

    fn text(writer: &dyn ResumeWriter, resume: &ResumeRecord) -> String {
        String::from_utf8(writer.write(resume).unwrap()).unwrap()
    }

    #[test]
    fn test_contact_line_skips_empty_parts() {
        let contact = ContactInfo {
            email: "a@b.io".to_string(),
            ..Default::default()
        };
        assert_eq!(format_contact_line(&contact), "a@b.io");
        assert_eq!(format_contact_line(&ContactInfo::default()), "");
    }

    #[test]
    fn test_plain_text_layout() {
        let doc = text(&PlainTextWriter, &resume());
        assert!(doc.starts_with("JANE DOE\njane@example.com | 555-123-4567\n\n"));
        assert!(doc.contains("SUMMARY\n-------\nBackend engineer. Ships things."));
        assert!(doc.contains("AWS, Rust, Go"));
        assert!(doc.contains("Engineer – Acme\n- Built ingest\n- Freelance consulting"));
        assert!(doc.contains("- BSc Computer Science"));
        assert!(!doc.contains("PROJECTS"));
    }

    #[test]
    fn test_markdown_layout() {
        let doc = text(&MarkdownWriter, &resume());
        assert!(doc.starts_with("# Jane Doe\n"));
        assert!(doc.contains("## Experience\n### Engineer – Acme\n- Built ingest"));
        assert!(!doc.contains("## Projects"));
    }

    #[test]
    fn test_blank_skills_are_not_rendered() {
        let mut record = resume();
        record.skills = Skills::Flat(vec!["Rust".to_string(), "".to_string(), "  ".to_string()]);
        let doc = text(&PlainTextWriter, &record);
        assert!(doc.contains("SKILLS\n------\nRust\n"));

        record.skills = Skills::Flat(vec!["".to_string()]);
        let doc = text(&MarkdownWriter, &record);
        assert!(!doc.contains("## Skills"));
    }

    #[test]
    fn test_role_placeholders() {
        let mut record = resume();
        record.experience = vec![ExperienceItem::Role(ExperienceEntry::default())];
        let doc = text(&MarkdownWriter, &record);
        assert!(doc.contains("### Unknown Position – Unknown Company"));
    }

    #[test]
    fn test_blank_resume_is_rejected() {
        let err = PlainTextWriter.write(&ResumeRecord::default()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyResume));
    }

    #[test]
    fn test_format_selects_writer() {
        assert_eq!(
            ExportFormat::Markdown.writer().content_type(),
            "text/markdown; charset=utf-8"
        );
        assert_eq!(ExportFormat::default(), ExportFormat::Text);
    }
}
