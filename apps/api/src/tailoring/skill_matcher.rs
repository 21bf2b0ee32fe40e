//! Skill matching: set algebra between resume skills and a job analysis.
//!
//! Both sides go through `normalize_skill` before any comparison, so the
//! report is case- and whitespace-insensitive. Only literal matches count.
//!
//! `safe_to_add` has type `[String; 0]`: the report cannot carry a suggested
//! skill that the resume does not already contain.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::job::JobAnalysis;
use crate::models::resume::Skills;
use crate::resume::normalize::normalize_skill;

/// Overlap report between one resume and one job. Sets render as sorted lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub emphasize_skills: Vec<String>,
    pub resume_gaps: Vec<String>,
    pub safe_to_add: [String; 0],
}

impl MatchReport {
    /// Share of required skills the resume covers, 0–100. 100 when the job lists none.
    pub fn required_coverage(&self) -> u32 {
        let total = self.matched_required.len() + self.missing_required.len();
        if total == 0 {
            return 100;
        }
        ((self.matched_required.len() as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Flattens either skills shape into one normalized set.
pub fn normalized_resume_skills(skills: &Skills) -> BTreeSet<String> {
    normalize_all(skills.flatten())
}

fn normalize_all<'a>(skills: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    skills.into_iter().filter_map(normalize_skill).collect()
}

fn to_sorted_vec(set: BTreeSet<String>) -> Vec<String> {
    set.into_iter().collect()
}

pub fn match_skills(resume_skills: &Skills, job: &JobAnalysis) -> MatchReport {
    let resume = normalized_resume_skills(resume_skills);
    let required = normalize_all(job.required_skills.iter().map(String::as_str));
    let preferred = normalize_all(job.preferred_skills.iter().map(String::as_str));

    let matched_required: BTreeSet<String> = resume.intersection(&required).cloned().collect();
    let missing_required: BTreeSet<String> = required.difference(&resume).cloned().collect();
    let matched_preferred: BTreeSet<String> = resume.intersection(&preferred).cloned().collect();
    let emphasize: BTreeSet<String> = matched_required.union(&matched_preferred).cloned().collect();

    let missing_required = to_sorted_vec(missing_required);

    MatchReport {
        matched_required: to_sorted_vec(matched_required),
        resume_gaps: missing_required.clone(),
        missing_required,
        matched_preferred: to_sorted_vec(matched_preferred),
        emphasize_skills: to_sorted_vec(emphasize),
        safe_to_add: [],
    }
}
