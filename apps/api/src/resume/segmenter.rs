//! Section segmentation: splits a flat text dump into the five resume sections.
//!
//! Header detection is keyword-based: a line is a header when its lowercased
//! form contains a synonym of some section AND it is shorter than
//! `header_max_len` characters. The length guard keeps body sentences that
//! mention "experience" or "skills" from switching sections.
//!
//! Tie-break: sections are checked in `SegmenterConfig::keywords` order and the
//! first section with a matching synonym wins. The default order is
//! summary, skills, experience, projects, education.

use crate::resume::normalize::{header_form, normalize_lines};

pub const DEFAULT_HEADER_MAX_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Summary,
        Section::Skills,
        Section::Experience,
        Section::Projects,
        Section::Education,
    ];

    pub fn default_keywords(self) -> &'static [&'static str] {
        match self {
            Section::Summary => &["summary", "professional summary", "objective", "profile", "about"],
            Section::Skills => &[
                "skills",
                "technical skills",
                "core competencies",
                "competencies",
                "expertise",
            ],
            Section::Experience => &[
                "experience",
                "work experience",
                "employment",
                "work history",
                "professional experience",
            ],
            Section::Projects => &["projects", "project experience", "key projects", "notable projects"],
            Section::Education => &[
                "education",
                "academic background",
                "qualifications",
                "academic qualifications",
            ],
        }
    }
}

/// Synonym lists and header guard. Passed per call; nothing here is global.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Checked in order; earlier sections win ties.
    pub keywords: Vec<(Section, Vec<String>)>,
    pub header_max_len: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            keywords: Section::ALL
                .iter()
                .map(|&s| {
                    (
                        s,
                        s.default_keywords().iter().map(|k| k.to_string()).collect(),
                    )
                })
                .collect(),
            header_max_len: DEFAULT_HEADER_MAX_LEN,
        }
    }
}

impl SegmenterConfig {
    pub fn with_header_max_len(mut self, header_max_len: usize) -> Self {
        self.header_max_len = header_max_len;
        self
    }

    /// Returns the section this line introduces, if it is a header.
    pub fn classify_header(&self, line: &str) -> Option<Section> {
        if line.trim().chars().count() >= self.header_max_len {
            return None;
        }
        let form = header_form(line);
        self.keywords
            .iter()
            .find(|(_, synonyms)| synonyms.iter().any(|kw| form.contains(kw.as_str())))
            .map(|(section, _)| *section)
    }
}

/// Cleaned line items per section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub summary: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
    pub education: Vec<String>,
}

impl Sections {
    pub fn get(&self, section: Section) -> &[String] {
        match section {
            Section::Summary => &self.summary,
            Section::Skills => &self.skills,
            Section::Experience => &self.experience,
            Section::Projects => &self.projects,
            Section::Education => &self.education,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Summary => &mut self.summary,
            Section::Skills => &mut self.skills,
            Section::Experience => &mut self.experience,
            Section::Projects => &mut self.projects,
            Section::Education => &mut self.education,
        }
    }

    pub fn is_empty(&self) -> bool {
        Section::ALL.iter().all(|&s| self.get(s).is_empty())
    }
}

/// Segmentation result. `headers` lists every detected header in document
/// order; an empty list means the text had no recognizable structure.
#[derive(Debug, Clone, Default)]
pub struct Segmented {
    pub sections: Sections,
    pub headers: Vec<Section>,
}

/// Splits raw text into sections. Never fails: empty or header-less text
/// yields empty sections. Lines before the first header are dropped and
/// header lines themselves are never part of the output.
pub fn segment(raw: &str, config: &SegmenterConfig) -> Segmented {
    let mut buffers: [String; 5] = Default::default();
    let mut headers = Vec::new();
    let mut current: Option<Section> = None;

    for line in raw.lines() {
        if let Some(section) = config.classify_header(line) {
            headers.push(section);
            current = Some(section);
            continue;
        }
        if let Some(section) = current {
            let buffer = &mut buffers[section_index(section)];
            buffer.push_str(line);
            buffer.push('\n');
        }
    }

    let mut sections = Sections::default();
    for section in Section::ALL {
        *sections.get_mut(section) = normalize_lines(&buffers[section_index(section)]);
    }

    Segmented { sections, headers }
}

fn section_index(section: Section) -> usize {
    // Discriminants follow `Section::ALL` order.
    section as usize
}
