use once_cell::sync::Lazy;
use regex::Regex;

static QUOTE_WRAP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^["'`]+|["'`]+$"#).unwrap());

static DIGIT_RUN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Cleans a raw LLM answer: strips surrounding whitespace and newlines,
/// then any quotes wrapping the whole answer.
pub fn clean_llm_answer(response: &str) -> String {
    let trimmed = response.trim();
    let unquoted = QUOTE_WRAP_PATTERN.replace_all(trimmed, "");
    unquoted.trim().to_string()
}

/// An answer that is empty or a bare "error"/"none" marker carries no
/// information and the next provider should be consulted instead.
pub fn is_unusable_answer(answer: &str) -> bool {
    answer.is_empty() || answer.eq_ignore_ascii_case("error") || answer.eq_ignore_ascii_case("none")
}

/// First run of consecutive digits in a generated text, if any.
pub fn first_digit_run(text: &str) -> Option<String> {
    DIGIT_RUN_PATTERN.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_trims_whitespace_and_newlines() {
        assert_eq!(clean_llm_answer("  42 \n"), "42");
        assert_eq!(clean_llm_answer("\n\nParis\n"), "Paris");
    }

    #[test]
    fn test_clean_strips_wrapping_quotes() {
        assert_eq!(clean_llm_answer("\"Paris\""), "Paris");
        assert_eq!(clean_llm_answer("'42'"), "42");
        assert_eq!(clean_llm_answer("`answer`"), "answer");
        assert_eq!(clean_llm_answer("\"Paris\"\n"), "Paris");
    }

    #[test]
    fn test_clean_keeps_interior_quotes() {
        assert_eq!(clean_llm_answer("it's fine"), "it's fine");
    }

    #[test]
    fn test_clean_preserves_normal_text() {
        assert_eq!(clean_llm_answer("A plain answer"), "A plain answer");
    }

    #[test]
    fn test_unusable_answers() {
        assert!(is_unusable_answer(""));
        assert!(is_unusable_answer("error"));
        assert!(is_unusable_answer("Error"));
        assert!(is_unusable_answer("none"));
        assert!(is_unusable_answer("NONE"));
    }

    #[test]
    fn test_usable_answers() {
        assert!(!is_unusable_answer("42"));
        assert!(!is_unusable_answer("no error found"));
    }

    #[test]
    fn test_first_digit_run() {
        assert_eq!(first_digit_run("The answer is 7."), Some("7".to_string()));
        assert_eq!(first_digit_run("about 120 or 130"), Some("120".to_string()));
        assert_eq!(first_digit_run("no numbers here"), None);
    }
}
