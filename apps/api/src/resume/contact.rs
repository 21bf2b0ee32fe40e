//! Contact extraction: name, email and phone from the raw resume text.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::ContactInfo;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

/// Tried in order; the first pattern with any match wins.
static PHONE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // +1 555-123-4567, 555.123.4567, +44 (020) 123 4567
        r"\+?\d{1,3}[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
        // bare digit run
        r"\+?\d{10,15}",
        // (555) 123-4567
        r"\(\d{3}\)\s?\d{3}[-.\s]?\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Only this many leading lines are considered for the name.
const NAME_SCAN_LINES: usize = 5;
const NAME_MAX_TOKENS: usize = 4;
const NAME_EXCLUDED: &[&str] = &["summary", "experience", "education", "skills", "projects", "@"];

pub fn extract_contact(raw: &str) -> ContactInfo {
    ContactInfo {
        name: extract_name(raw),
        email: extract_email(raw),
        phone: extract_phone(raw),
    }
}

fn extract_email(raw: &str) -> String {
    EMAIL_RE
        .find(raw)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_phone(raw: &str) -> String {
    PHONE_RES
        .iter()
        .find_map(|re| re.find(raw))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn extract_name(raw: &str) -> String {
    raw.lines()
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| is_name_candidate(line))
        .unwrap_or_default()
        .to_string()
}

fn is_name_candidate(line: &str) -> bool {
    if line.is_empty() || line.split_whitespace().count() > NAME_MAX_TOKENS {
        return false;
    }
    let lower = line.to_lowercase();
    !NAME_EXCLUDED.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_all_three_fields() {
        let raw = "John Smith\njohn@x.com | +1 555-123-4567\nSKILLS\nPython";
        let contact = extract_contact(raw);
        assert_eq!(contact.name, "John Smith");
        assert_eq!(contact.email, "john@x.com");
        assert_eq!(contact.phone, "+1 555-123-4567");
    }

    #[test]
    fn test_first_email_wins() {
        let raw = "Jane\nwork: jane@corp.io\npersonal: jane@home.dev";
        assert_eq!(extract_contact(raw).email, "jane@corp.io");
    }

    #[test]
    fn test_missing_fields_are_empty_strings() {
        let contact = extract_contact("A very long opening sentence that cannot be a name\n");
        assert_eq!(contact, ContactInfo::default());
    }

    #[test]
    fn test_bare_digit_run_phone() {
        let raw = "Ana Lima\nphone 5511987654321";
        assert_eq!(extract_contact(raw).phone, "5511987654321");
    }

    #[test]
    fn test_parenthesized_phone_is_found() {
        let raw = "Li Wei\nCall (415) 555-0199 after 5";
        assert!(extract_contact(raw).phone.contains("555-0199"));
    }

    #[test]
    fn test_name_skips_header_and_email_lines() {
        let raw = "PROFESSIONAL SUMMARY\nme@site.org\nMaria Garcia\nEngineer";
        assert_eq!(extract_contact(raw).name, "Maria Garcia");
    }

    #[test]
    fn test_name_ignores_lines_past_the_fifth() {
        let raw = "Skills\nSkills\nSkills\nSkills\nSkills\nLate Name";
        assert_eq!(extract_contact(raw).name, "");
    }

    #[test]
    fn test_name_rejects_more_than_four_tokens() {
        let raw = "Senior Staff Platform Reliability Engineer\nKim Park";
        assert_eq!(extract_contact(raw).name, "Kim Park");
    }
}
