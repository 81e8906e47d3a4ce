//! Handling of the nullable free-text columns.
//!
//! The previous store folded empty strings into NULL on write and replaced
//! absent values with display placeholders while reading. Both behaviors
//! live here so every entity applies them the same way.

/// Replaces an absent or empty value with its display placeholder.
///
/// Substitution happens at read time only; placeholders are never stored.
pub fn materialize(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => placeholder.to_string(),
    }
}

/// Folds empty input into NULL before binding.
pub fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materialize_keeps_present_text() {
        assert_eq!(
            materialize(Some("penicillin".to_string()), "None"),
            "penicillin"
        );
    }

    #[test]
    fn materialize_substitutes_placeholder() {
        assert_eq!(materialize(None, "None"), "None");
        assert_eq!(
            materialize(Some(String::new()), "No description available"),
            "No description available"
        );
    }

    #[test]
    fn normalize_folds_empty_to_null() {
        assert_eq!(normalize(Some(String::new())), None);
        assert_eq!(normalize(None), None);
        assert_eq!(
            normalize(Some("2 per day".to_string())),
            Some("2 per day".to_string())
        );
    }
}
