//! Line cleaning shared by segmentation, contact extraction and skill matching.

/// Glyphs stripped from both ends of a section line, along with whitespace.
const BULLET_GLYPHS: &[char] = &['•', '-', '*'];

/// Strips bullet glyphs and whitespace from both ends. Returns `None` when
/// nothing is left.
pub fn clean_line(line: &str) -> Option<&str> {
    let cleaned = line.trim_matches(|c: char| c.is_whitespace() || BULLET_GLYPHS.contains(&c));
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Splits section text on line breaks and keeps the cleaned, non-empty lines in order.
/// Idempotent: feeding the output back through yields the same list.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(clean_line)
        .map(str::to_string)
        .collect()
}

/// Lowercased, trimmed form used for header keyword checks.
pub fn header_form(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Canonical form of a skill for set comparison. Blank entries are dropped.
pub fn normalize_skill(skill: &str) -> Option<String> {
    let trimmed = skill.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line_strips_bullets_both_ends() {
        assert_eq!(clean_line("  • Built service"), Some("Built service"));
        assert_eq!(clean_line("- Built service -"), Some("Built service"));
        assert_eq!(clean_line("* * nested"), Some("nested"));
    }

    #[test]
    fn test_clean_line_keeps_inner_glyphs() {
        assert_eq!(clean_line("- CI/CD - GitHub Actions"), Some("CI/CD - GitHub Actions"));
    }

    #[test]
    fn test_clean_line_drops_glyph_only_lines() {
        assert_eq!(clean_line("  •  "), None);
        assert_eq!(clean_line(""), None);
        assert_eq!(clean_line("---"), None);
    }

    #[test]
    fn test_normalize_lines_preserves_order_and_drops_blanks() {
        let text = "• First\n\n  - Second\n*\nThird  \n";
        assert_eq!(normalize_lines(text), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_normalize_lines_is_idempotent() {
        let text = "• Led migration to Rust\n-  Cut p99 latency 40%\n\t* Mentored 3 engineers";
        let once = normalize_lines(text);
        let twice = normalize_lines(&once.join("\n"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_skill_is_case_and_whitespace_insensitive() {
        assert_eq!(normalize_skill("Python "), Some("python".to_string()));
        assert_eq!(normalize_skill("  PYTHON"), normalize_skill("python"));
        assert_eq!(normalize_skill("   "), None);
    }

    #[test]
    fn test_header_form_lowercases_and_trims() {
        assert_eq!(header_form("  TECHNICAL Skills  "), "technical skills");
    }
}
