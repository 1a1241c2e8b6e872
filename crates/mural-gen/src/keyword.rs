//! Keyword synthesis for human-readable staged filenames
//!
//! Derives a filesystem-safe slug from manifest metadata. Selection order:
//! tags, then title, then the first two words of the description, then the
//! literal `"image"`.

use crate::manifest::PromptEntry;

const FALLBACK_KEYWORD: &str = "image";

/// Derive a filesystem-safe slug for an entry.
///
/// Sanitization keeps only alphanumerics, `_` and `-`, dropping everything
/// else character by character. The result is never empty.
pub fn synthesize(entry: &PromptEntry) -> String {
    let raw = if !entry.tags.is_empty() {
        entry.tags.join("_").to_lowercase()
    } else if let Some(title) = non_empty(entry.title.as_deref()) {
        title.to_lowercase().replace(' ', "_")
    } else if let Some(description) = non_empty(entry.description.as_deref()) {
        description
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    } else {
        FALLBACK_KEYWORD.to_string()
    };

    let slug: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if slug.is_empty() {
        FALLBACK_KEYWORD.to_string()
    } else {
        slug
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_joined_and_lowercased() {
        let entry = PromptEntry {
            tags: vec!["Hero".to_string(), "City".to_string()],
            title: Some("Ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(synthesize(&entry), "hero_city");
    }

    #[test]
    fn test_title_spaces_become_underscores() {
        let entry = PromptEntry {
            title: Some("Tenant Student".to_string()),
            ..Default::default()
        };
        assert_eq!(synthesize(&entry), "tenant_student");
    }

    #[test]
    fn test_description_first_two_words() {
        let entry = PromptEntry {
            description: Some("Rainy Rooftop garden with neon signage".to_string()),
            ..Default::default()
        };
        assert_eq!(synthesize(&entry), "rainy_rooftop");
    }

    #[test]
    fn test_fallback_keyword() {
        assert_eq!(synthesize(&PromptEntry::default()), "image");
    }

    #[test]
    fn test_sanitization_drops_disallowed_characters() {
        let entry = PromptEntry {
            tags: vec!["sci-fi!!".to_string(), "city 2".to_string()],
            ..Default::default()
        };
        assert_eq!(synthesize(&entry), "sci-fi_city2");
    }

    #[test]
    fn test_sanitization_never_empties_the_slug() {
        let entry = PromptEntry {
            title: Some("!!!".to_string()),
            ..Default::default()
        };
        assert_eq!(synthesize(&entry), "image");
    }
}
