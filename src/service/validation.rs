//! Request validation from a declarative field-rule table.

use crate::error::{AppError, ValidationErrors};
use crate::model::{BookChanges, NewBook};
use serde_json::{Map, Value};

/// How a field may appear in a request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// Must be present, non-null and non-empty.
    Required,
    /// May be absent; when present behaves like `Required`.
    Sometimes,
    /// May be absent or null.
    Nullable,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub presence: Presence,
    pub max_length: Option<usize>,
}

pub const MAX_STRING_LENGTH: usize = 255;

pub const CREATE_RULES: &[FieldRule] = &[
    FieldRule { field: "title", presence: Presence::Required, max_length: Some(MAX_STRING_LENGTH) },
    FieldRule { field: "author", presence: Presence::Required, max_length: Some(MAX_STRING_LENGTH) },
    FieldRule { field: "description", presence: Presence::Nullable, max_length: None },
];

pub const UPDATE_RULES: &[FieldRule] = &[
    FieldRule { field: "title", presence: Presence::Sometimes, max_length: Some(MAX_STRING_LENGTH) },
    FieldRule { field: "author", presence: Presence::Sometimes, max_length: Some(MAX_STRING_LENGTH) },
    FieldRule { field: "description", presence: Presence::Nullable, max_length: None },
];

pub struct RequestValidator;

impl RequestValidator {
    /// Body must be an object. Strings are trimmed and empty strings become null.
    pub fn normalize(body: Value) -> Result<Map<String, Value>, AppError> {
        let Value::Object(map) = body else {
            let mut errors = ValidationErrors::default();
            errors.add("body", "The request body must be a JSON object.".into());
            return Err(AppError::Validation(errors));
        };
        Ok(map
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => {
                        let trimmed = s.trim();
                        if trimmed.is_empty() {
                            Value::Null
                        } else if trimmed.len() == s.len() {
                            Value::String(s)
                        } else {
                            Value::String(trimmed.to_string())
                        }
                    }
                    other => other,
                };
                (k, v)
            })
            .collect())
    }

    /// Checks every rule and collects all failures. Keys without a rule are ignored.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        let mut errors = ValidationErrors::default();
        for rule in rules {
            validate_field(body.get(rule.field), rule, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

fn validate_field(val: Option<&Value>, rule: &FieldRule, errors: &mut ValidationErrors) {
    let col = rule.field;
    let v = match (val, rule.presence) {
        (None, Presence::Required) | (Some(Value::Null), Presence::Required | Presence::Sometimes) => {
            errors.add(col, format!("The {} field is required.", col));
            return;
        }
        (None, _) | (Some(Value::Null), Presence::Nullable) => return,
        (Some(v), _) => v,
    };
    let Some(s) = v.as_str() else {
        errors.add(col, format!("The {} field must be a string.", col));
        return;
    };
    if let Some(max) = rule.max_length {
        if s.chars().count() > max {
            errors.add(
                col,
                format!("The {} field must not be greater than {} characters.", col, max),
            );
        }
    }
}

fn string_field(body: &Map<String, Value>, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(String::from)
}

/// Normalizes and validates a create payload.
pub fn new_book(body: Value) -> Result<NewBook, AppError> {
    let body = RequestValidator::normalize(body)?;
    RequestValidator::validate(&body, CREATE_RULES)?;
    Ok(NewBook {
        title: string_field(&body, "title").unwrap_or_default(),
        author: string_field(&body, "author").unwrap_or_default(),
        description: string_field(&body, "description"),
    })
}

/// Normalizes and validates an update payload. Only present fields become changes.
pub fn book_changes(body: Value) -> Result<BookChanges, AppError> {
    let body = RequestValidator::normalize(body)?;
    RequestValidator::validate(&body, UPDATE_RULES)?;
    Ok(BookChanges {
        title: string_field(&body, "title"),
        author: string_field(&body, "author"),
        description: body
            .contains_key("description")
            .then(|| string_field(&body, "description")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn errors_of(result: Result<impl std::fmt::Debug, AppError>) -> ValidationErrors {
        match result {
            Err(AppError::Validation(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn create_accepts_valid_payload() {
        let book = new_book(json!({
            "title": "Test Book",
            "author": "Test Author",
            "description": "This is a test book description."
        }))
        .unwrap();
        assert_eq!(book.title, "Test Book");
        assert_eq!(book.author, "Test Author");
        assert_eq!(book.description.as_deref(), Some("This is a test book description."));
    }

    #[test]
    fn create_without_description_is_null() {
        let book = new_book(json!({"title": "T", "author": "A"})).unwrap();
        assert_eq!(book.description, None);
    }

    #[test]
    fn create_reports_every_missing_field() {
        let errors = errors_of(new_book(json!({})));
        assert_eq!(errors.field("title"), Some(&["The title field is required.".to_string()][..]));
        assert_eq!(errors.field("author"), Some(&["The author field is required.".to_string()][..]));
        assert_eq!(errors.field("description"), None);
    }

    #[rstest]
    #[case(json!({"title": "", "author": "A"}), "title", "The title field is required.")]
    #[case(json!({"title": "   ", "author": "A"}), "title", "The title field is required.")]
    #[case(json!({"title": null, "author": "A"}), "title", "The title field is required.")]
    #[case(json!({"title": 12, "author": "A"}), "title", "The title field must be a string.")]
    #[case(json!({"title": "T", "author": ["A"]}), "author", "The author field must be a string.")]
    #[case(json!({"title": "T", "author": "A", "description": true}), "description", "The description field must be a string.")]
    fn create_rejects_bad_field(#[case] body: Value, #[case] field: &str, #[case] msg: &str) {
        let errors = errors_of(new_book(body));
        assert_eq!(errors.field(field), Some(&[msg.to_string()][..]));
    }

    #[test]
    fn max_length_counts_characters() {
        let exact = "é".repeat(MAX_STRING_LENGTH);
        assert!(new_book(json!({"title": exact, "author": "A"})).is_ok());

        let long = "x".repeat(MAX_STRING_LENGTH + 1);
        let errors = errors_of(new_book(json!({"title": "T", "author": long})));
        assert_eq!(
            errors.field("author"),
            Some(&["The author field must not be greater than 255 characters.".to_string()][..])
        );
    }

    #[test]
    fn strings_are_trimmed() {
        let book = new_book(json!({"title": "  Dune ", "author": "Frank Herbert\n", "description": ""})).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.description, None);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errors = errors_of(new_book(json!(["title", "author"])));
        assert!(errors.field("body").is_some());
    }

    #[test]
    fn update_keeps_absent_fields_out() {
        let changes = book_changes(json!({"title": "Updated Book Title", "id": 99})).unwrap();
        assert_eq!(changes.title.as_deref(), Some("Updated Book Title"));
        assert_eq!(changes.author, None);
        assert_eq!(changes.description, None);
    }

    #[test]
    fn update_with_null_description_clears_it() {
        let changes = book_changes(json!({"description": null})).unwrap();
        assert_eq!(changes.description, Some(None));
    }

    #[test]
    fn update_rejects_present_but_empty_title() {
        let errors = errors_of(book_changes(json!({"title": "", "author": "x".repeat(256)})));
        assert_eq!(errors.field("title"), Some(&["The title field is required.".to_string()][..]));
        assert!(errors.field("author").is_some());
    }

    #[test]
    fn update_accepts_empty_object() {
        assert!(book_changes(json!({})).unwrap().is_empty());
    }
}
