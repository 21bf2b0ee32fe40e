//! Resume loading: raw text (or PDF bytes) in, `ResumeRecord` out.
//!
//! Failures here are fatal for the one document being loaded and are returned
//! to the caller. A document that loads but has no recognizable headers is
//! not a failure: it produces empty sections and `headers_detected == false`.

use std::panic::{self, AssertUnwindSafe};

use pdf_extract::{Document, PlainTextOutput};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::resume::{ExperienceItem, ResumeRecord, Skills};
use crate::resume::contact::extract_contact;
use crate::resume::segmenter::{segment, SegmenterConfig};

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Clone, Serialize)]
pub struct LoadedResume {
    pub resume: ResumeRecord,
    pub headers_detected: bool,
}

/// Builds a resume record from extracted text.
pub fn load_resume(raw: &str, config: &SegmenterConfig) -> Result<LoadedResume, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::InputMissing("resume text is empty".to_string()));
    }

    let contact = extract_contact(raw);
    let segmented = segment(raw, config);
    let headers_detected = !segmented.headers.is_empty();

    if headers_detected && segmented.sections.is_empty() {
        warn!("Section headers detected but every section is empty");
    } else if headers_detected {
        info!(
            "Segmented resume: {} headers detected ({:?})",
            segmented.headers.len(),
            segmented.headers
        );
    } else {
        warn!("No section headers detected; all sections are empty");
    }

    let sections = segmented.sections;
    let resume = ResumeRecord {
        contact,
        summary: sections.summary,
        skills: Skills::Flat(sections.skills),
        experience: sections
            .experience
            .into_iter()
            .map(ExperienceItem::Line)
            .collect(),
        projects: sections.projects,
        education: sections.education,
    };

    Ok(LoadedResume {
        resume,
        headers_detected,
    })
}

/// Extracts text from an uploaded PDF. CPU-bound; run it inside
/// `tokio::task::spawn_blocking`.
pub fn extract_pdf_text(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    if file_name.trim().is_empty() {
        return Err(AppError::InputMissing("file name is empty".to_string()));
    }
    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(AppError::FormatInvalid(format!(
            "File must be a PDF: {file_name}"
        )));
    }
    if bytes.is_empty() {
        return Err(AppError::FormatInvalid(format!(
            "PDF file appears to be empty: {file_name}"
        )));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::FormatInvalid(format!(
            "File does not look like a PDF document: {file_name}"
        )));
    }

    let mut doc = Document::load_mem(bytes).map_err(|e| {
        AppError::ExtractionFailed(format!("Error reading PDF file {file_name}: {e}"))
    })?;
    if doc.is_encrypted() {
        doc.decrypt("").map_err(|e| {
            AppError::ExtractionFailed(format!("PDF file {file_name} is encrypted: {e}"))
        })?;
    }

    let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
    if page_numbers.is_empty() {
        return Err(AppError::FormatInvalid(format!(
            "PDF file appears to be empty: {file_name}"
        )));
    }

    let mut pages = Vec::with_capacity(page_numbers.len());
    for page_num in page_numbers {
        match extract_page_text(&doc, page_num) {
            Ok(text) if !text.trim().is_empty() => pages.push(text),
            Ok(_) => debug!("Page {page_num} of {file_name} has no text"),
            Err(reason) => warn!("Skipping page {page_num} of {file_name}: {reason}"),
        }
    }

    if pages.is_empty() {
        return Err(AppError::ExtractionFailed(format!(
            "No text could be extracted from PDF: {file_name}"
        )));
    }

    Ok(pages.join("\n"))
}

/// Text of one page. A page the parser chokes on (error or panic) is
/// reported as `Err` so the caller can skip it.
fn extract_page_text(doc: &Document, page_num: u32) -> Result<String, String> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut text = String::new();
        {
            let mut output = PlainTextOutput::new(&mut text);
            pdf_extract::output_doc_page(doc, &mut output, page_num)?;
        }
        Ok::<_, pdf_extract::OutputError>(text)
    }));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("page parser panicked".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_resume_fills_contact_and_sections() {
        let raw = "John Smith\njohn@x.com\nSKILLS\nPython, Go\nEXPERIENCE\n- Built service";
        let loaded = load_resume(raw, &SegmenterConfig::default()).unwrap();
        assert!(loaded.headers_detected);
        assert_eq!(loaded.resume.contact.email, "john@x.com");
        assert_eq!(loaded.resume.contact.name, "John Smith");
        assert_eq!(
            loaded.resume.skills,
            Skills::Flat(vec!["Python, Go".to_string()])
        );
        assert_eq!(
            loaded.resume.experience,
            vec![ExperienceItem::Line("Built service".to_string())]
        );
        assert!(loaded.resume.projects.is_empty());
    }

    #[test]
    fn test_headerless_resume_loads_with_flag_cleared() {
        let loaded = load_resume("Jane Doe\nBuilt things.", &SegmenterConfig::default()).unwrap();
        assert!(!loaded.headers_detected);
        assert!(loaded.resume.summary.is_empty());
        assert!(loaded.resume.experience.is_empty());
        assert_eq!(loaded.resume.contact.name, "Jane Doe");
    }

    #[test]
    fn test_blank_text_is_input_missing() {
        let err = load_resume("  \n\t", &SegmenterConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::InputMissing(_)));
    }

    #[test]
    fn test_pdf_requires_file_name() {
        let err = extract_pdf_text("", b"%PDF-1.7").unwrap_err();
        assert!(matches!(err, AppError::InputMissing(_)));
    }

    #[test]
    fn test_pdf_rejects_other_extensions() {
        let err = extract_pdf_text("resume.docx", b"PK\x03\x04").unwrap_err();
        assert!(matches!(err, AppError::FormatInvalid(_)));
    }

    #[test]
    fn test_pdf_rejects_empty_document() {
        let err = extract_pdf_text("resume.pdf", b"").unwrap_err();
        assert!(matches!(err, AppError::FormatInvalid(_)));
    }

    /// Builds a PDF with one Helvetica text page per entry. Pages flagged
    /// `false` have no MediaBox anywhere in their tree, which the text
    /// extractor cannot render.
    fn pdf_with_pages(renderable: &[bool]) -> Vec<u8> {
        use pdf_extract::{Dictionary, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::from("Font")),
            ("Subtype", Object::from("Type1")),
            ("BaseFont", Object::from("Helvetica")),
        ]));
        let resources_id = doc.add_object(Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
        )]));
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            b"BT /F1 24 Tf 100 600 Td (Hello World) Tj ET".to_vec(),
        ));

        let kids: Vec<Object> = renderable
            .iter()
            .map(|&with_media_box| {
                let mut page = Dictionary::from_iter(vec![
                    ("Type", Object::from("Page")),
                    ("Parent", Object::Reference(pages_id)),
                    ("Contents", Object::Reference(content_id)),
                    ("Resources", Object::Reference(resources_id)),
                ]);
                if with_media_box {
                    page.set(
                        "MediaBox",
                        Object::Array(vec![
                            Object::Integer(0),
                            Object::Integer(0),
                            Object::Integer(612),
                            Object::Integer(792),
                        ]),
                    );
                }
                Object::Reference(doc.add_object(page))
            })
            .collect();

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::from("Pages")),
                ("Kids", Object::Array(kids)),
                ("Count", Object::Integer(count)),
            ])),
        );
        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::from("Catalog")),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pdf_text_is_extracted() {
        let text = extract_pdf_text("resume.pdf", &pdf_with_pages(&[true])).unwrap();
        assert!(text.contains("Hello"));
    }

    #[test]
    fn test_broken_page_is_skipped() {
        let text = extract_pdf_text("resume.pdf", &pdf_with_pages(&[false, true])).unwrap();
        assert!(text.contains("Hello"));
    }

    #[test]
    fn test_pdf_with_only_broken_pages_is_extraction_failed() {
        let err = extract_pdf_text("resume.pdf", &pdf_with_pages(&[false])).unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[test]
    fn test_pdf_without_pages_is_format_invalid() {
        let err = extract_pdf_text("resume.pdf", &pdf_with_pages(&[])).unwrap_err();
        assert!(matches!(err, AppError::FormatInvalid(_)));
    }

    #[test]
    fn test_unparseable_pdf_is_extraction_failed() {
        let err = extract_pdf_text("resume.pdf", b"%PDF-1.7\ngarbage").unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[test]
    fn test_pdf_rejects_missing_magic() {
        let err = extract_pdf_text("Resume.PDF", b"hello world").unwrap_err();
        assert!(matches!(err, AppError::FormatInvalid(_)));
    }
}
