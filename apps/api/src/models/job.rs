use serde::{Deserialize, Serialize};

use crate::models::lenient::{lenient_list, lenient_string};

/// Structured extraction of a job description. Missing fields decode to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAnalysis {
    #[serde(default, deserialize_with = "lenient_list")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub preferred_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tools: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub seniority_level: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub keywords: Vec<String>,
}

/// Minimal job metadata carried through a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "job_url")]
    pub url: Option<String>,
}

impl JobPosting {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }
}

/// One batch result. `analysis` is `None` when the description was empty
/// or the model's answer could not be parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedJob {
    pub job_meta: JobPosting,
    pub analysis: Option<JobAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_analysis_deserializes() {
        let analysis: JobAnalysis = serde_json::from_value(json!({
            "required_skills": ["Rust", "SQL"],
            "preferred_skills": ["Kubernetes"],
            "tools": ["Git"],
            "seniority_level": "senior",
            "responsibilities": ["Own the ingestion pipeline"],
            "keywords": ["distributed", "latency"]
        }))
        .unwrap();
        assert_eq!(analysis.required_skills, vec!["Rust", "SQL"]);
        assert_eq!(analysis.seniority_level, "senior");
        assert_eq!(analysis.keywords.len(), 2);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let analysis: JobAnalysis =
            serde_json::from_value(json!({"required_skills": ["Go"]})).unwrap();
        assert_eq!(analysis.required_skills, vec!["Go"]);
        assert!(analysis.preferred_skills.is_empty());
        assert!(analysis.seniority_level.is_empty());
    }

    #[test]
    fn test_scalar_and_null_fields_are_tolerated() {
        let analysis: JobAnalysis = serde_json::from_value(json!({
            "required_skills": "Python",
            "tools": null,
            "keywords": ["api", 5, {"nested": true}, null],
            "seniority_level": null
        }))
        .unwrap();
        assert_eq!(analysis.required_skills, vec!["Python"]);
        assert!(analysis.tools.is_empty());
        assert_eq!(analysis.keywords, vec!["api", "5"]);
        assert_eq!(analysis.seniority_level, "");
    }

    #[test]
    fn test_job_posting_accepts_job_url_alias() {
        let posting: JobPosting = serde_json::from_value(json!({
            "title": "Backend Engineer",
            "job_url": "https://jobs.example.com/1"
        }))
        .unwrap();
        assert_eq!(posting.url.as_deref(), Some("https://jobs.example.com/1"));
        assert!(posting.description.is_none());
        assert_eq!(posting.display_title(), "Backend Engineer");
    }
}
