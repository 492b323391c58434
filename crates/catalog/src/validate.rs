use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::movie::{Field, MovieDraft};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const IMG_MAX: usize = 300;
pub const SUMMARY_MIN: usize = 20;
pub const SUMMARY_MAX: usize = 300;

// Optional scheme, dotted host, optional path/query from a fixed safe set.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://)?([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]+(/[A-Za-z0-9_ ./?%&=-]*)?$")
        .expect("URL pattern is a valid regex")
});

/// Per-field validation messages. An empty string means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub name: String,
    pub img: String,
    pub summary: String,
}

impl FieldErrors {
    /// True when every field passed.
    pub fn is_valid(&self) -> bool {
        self.name.is_empty() && self.img.is_empty() && self.summary.is_empty()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Img => &self.img,
            Field::Summary => &self.summary,
        }
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Img => &mut self.img,
            Field::Summary => &mut self.summary,
        };
        *slot = message.into();
    }

    pub fn clear(&mut self, field: Field) {
        self.set(field, String::new());
    }

    /// Failing fields with their messages, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
            .filter(|(_, message)| !message.is_empty())
    }

    /// `[{"field": ..., "error": ...}]` entries for an error response body.
    pub fn to_details(&self) -> Vec<serde_json::Value> {
        self.iter()
            .map(|(field, message)| json!({ "field": field.as_str(), "error": message }))
            .collect()
    }

    /// Rebuild from error response details; unknown fields are ignored.
    pub fn from_details(details: &[serde_json::Value]) -> Self {
        let mut errors = Self::default();
        for detail in details {
            let field = detail
                .get("field")
                .and_then(|value| value.as_str())
                .and_then(Field::parse);
            let message = detail.get("error").and_then(|value| value.as_str());
            if let (Some(field), Some(message)) = (field, message) {
                errors.set(field, message);
            }
        }
        errors
    }
}

/// Check a candidate record as typed by a user.
///
/// Each field is checked independently and reports only its first failing
/// rule. Lengths are measured in characters after trimming.
pub fn validate(draft: &MovieDraft) -> FieldErrors {
    FieldErrors {
        name: check_name(&draft.name),
        img: check_img(&draft.img),
        summary: check_summary(&draft.summary),
    }
}

fn check_name(raw: &str) -> String {
    let value = raw.trim();
    let len = value.chars().count();
    if value.is_empty() {
        "Name cannot be empty.".to_string()
    } else if len < NAME_MIN {
        format!("Name must be at least {NAME_MIN} characters.")
    } else if len > NAME_MAX {
        format!("Name cannot exceed {NAME_MAX} characters.")
    } else {
        String::new()
    }
}

fn check_img(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        "Image URL cannot be empty.".to_string()
    } else if value.chars().count() > IMG_MAX {
        format!("Image URL cannot exceed {IMG_MAX} characters.")
    } else if !URL_PATTERN.is_match(value) {
        "Please enter a valid URL.".to_string()
    } else {
        String::new()
    }
}

fn check_summary(raw: &str) -> String {
    let value = raw.trim();
    let len = value.chars().count();
    if value.is_empty() {
        "Summary cannot be empty.".to_string()
    } else if len < SUMMARY_MIN {
        format!("Summary must be at least {SUMMARY_MIN} characters.")
    } else if len > SUMMARY_MAX {
        format!("Summary cannot exceed {SUMMARY_MAX} characters.")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = "A thief who steals corporate secrets through dream-sharing is given a chance at redemption.";

    fn inception() -> MovieDraft {
        MovieDraft::new("Inception", "http://example.com/i.jpg", SUMMARY)
    }

    fn failing_fields(errors: &FieldErrors) -> Vec<Field> {
        errors.iter().map(|(field, _)| field).collect()
    }

    #[test]
    fn valid_record_has_no_errors() {
        let errors = validate(&inception());
        assert!(errors.is_valid(), "{errors:?}");
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        let draft = MovieDraft::new(
            "ab",
            format!("a.io/{}", "p".repeat(IMG_MAX - 5)),
            "s".repeat(SUMMARY_MIN),
        );
        assert!(validate(&draft).is_valid());

        let draft = MovieDraft::new("n".repeat(NAME_MAX), "a.io", "s".repeat(SUMMARY_MAX));
        assert!(validate(&draft).is_valid());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let draft = MovieDraft::new("  Up  ", "  https://pixar.com/up.png ", format!(" {SUMMARY} "));
        assert!(validate(&draft).is_valid());
    }

    #[test]
    fn single_violation_reports_only_that_field() {
        let cases = [
            (Field::Name, "", "Name cannot be empty."),
            (Field::Name, "   ", "Name cannot be empty."),
            (Field::Name, "X", "Name must be at least 2 characters."),
            (Field::Img, "", "Image URL cannot be empty."),
            (Field::Img, "not a url", "Please enter a valid URL."),
            (Field::Img, "localhost/poster.jpg", "Please enter a valid URL."),
            (Field::Img, "ftp://example.com/x.jpg", "Please enter a valid URL."),
            (Field::Summary, "", "Summary cannot be empty."),
            (Field::Summary, "Too short.", "Summary must be at least 20 characters."),
        ];

        for (field, value, expected) in cases {
            let mut draft = inception();
            draft.set(field, value);

            let errors = validate(&draft);

            assert_eq!(failing_fields(&errors), vec![field], "value {value:?}");
            assert_eq!(errors.get(field), expected);
        }
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let mut draft = inception();
        draft.name = "n".repeat(NAME_MAX + 1);
        draft.img = format!("example.com/{}", "p".repeat(IMG_MAX));
        draft.summary = "s".repeat(SUMMARY_MAX + 1);

        let errors = validate(&draft);

        assert_eq!(errors.name, "Name cannot exceed 100 characters.");
        assert_eq!(errors.img, "Image URL cannot exceed 300 characters.");
        assert_eq!(errors.summary, "Summary cannot exceed 300 characters.");
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let mut draft = inception();
        draft.name = "é".repeat(NAME_MAX);
        assert!(validate(&draft).is_valid());
    }

    #[test]
    fn url_pattern_shapes() {
        for ok in [
            "example.com",
            "HTTPS://Images.Example.COM/posters/1.jpg",
            "cdn.example.co.uk/a b/c.png?size=large&q=90",
            "http://my-site.org/100%25.png",
        ] {
            assert!(URL_PATTERN.is_match(ok), "{ok}");
        }
        for bad in [
            "example",
            "http://",
            "example.com/<script>",
            "example.com/#frag",
            "http://exa mple.com",
        ] {
            assert!(!URL_PATTERN.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn details_round_trip_through_response_shape() {
        let errors = validate(&MovieDraft::new("X", "example.com", ""));
        let details = errors.to_details();

        assert_eq!(
            details,
            vec![
                json!({"field": "name", "error": "Name must be at least 2 characters."}),
                json!({"field": "summary", "error": "Summary cannot be empty."}),
            ]
        );
        assert_eq!(FieldErrors::from_details(&details), errors);
    }
}
