use regex::Regex;
use serde_json::json;

use super::*;

// -- ValidationErrors --

#[test]
fn new_errors_are_empty() {
    let errors = ValidationErrors::new();
    assert!(errors.is_empty());
    assert_eq!(errors.len(), 0);
    assert!(errors.details("name").is_empty());
}

#[test]
fn add_groups_by_field() {
    let mut errors = ValidationErrors::new();
    errors.add("name", "blank");
    errors.add("email", "invalid");
    errors.add("name", "too_short");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "email"]);
    assert_eq!(errors.details("name").len(), 2);
    assert!(errors.contains("name", "blank"));
    assert!(!errors.contains("email", "blank"));
}

#[test]
fn base_category_reads_first_base_entry() {
    let mut errors = ValidationErrors::new();
    errors.add_category(&ErrorCategory::NotFound);
    errors.add(BASE, "conflict");
    assert_eq!(errors.base_category(), Some(ErrorCategory::NotFound));
}

#[test]
fn base_category_absent() {
    let mut errors = ValidationErrors::new();
    errors.add("name", "blank");
    assert_eq!(errors.base_category(), None);
}

#[test]
fn clear_removes_everything() {
    let mut errors = ValidationErrors::new();
    errors.add("name", "blank");
    errors.clear();
    assert!(errors.is_empty());
}

#[test]
fn full_messages_for_fields_and_base() {
    let mut errors = ValidationErrors::new();
    errors.add("first_name", "blank");
    errors.add_category(&ErrorCategory::BadRequest);
    assert_eq!(
        errors.full_messages(),
        vec!["First name can't be blank".to_string(), "Bad request".to_string()]
    );
}

#[test]
fn serializes_as_field_map() {
    let mut errors = ValidationErrors::new();
    errors.add("name", "blank");
    errors.add_with_options("bio", "too_long", count_option(5));
    assert_eq!(
        serde_json::to_value(&errors).unwrap(),
        json!({
            "name": [{"error": "blank"}],
            "bio": [{"error": "too_long", "count": 5}],
        })
    );
}

// -- Presence --

#[test]
fn presence_missing() {
    let mut errors = ValidationErrors::new();
    assert!(!validate_presence(&mut errors, "name", None));
    assert!(errors.contains("name", "blank"));
}

#[test]
fn presence_whitespace() {
    let mut errors = ValidationErrors::new();
    assert!(!validate_presence(&mut errors, "name", Some("   ")));
    assert!(errors.contains("name", "blank"));
}

#[test]
fn presence_ok() {
    let mut errors = ValidationErrors::new();
    assert!(validate_presence(&mut errors, "name", Some("Ada")));
    assert!(errors.is_empty());
}

// -- Length --

#[test]
fn length_too_long() {
    let mut errors = ValidationErrors::new();
    assert!(!validate_length(&mut errors, "bio", "abcdef", None, Some(5)));
    assert_eq!(
        errors.full_messages(),
        vec!["Bio is too long (maximum is 5 characters)".to_string()]
    );
}

#[test]
fn length_too_short() {
    let mut errors = ValidationErrors::new();
    assert!(!validate_length(&mut errors, "code", "a", Some(2), None));
    assert!(errors.contains("code", "too_short"));
}

#[test]
fn length_counts_chars_not_bytes() {
    let mut errors = ValidationErrors::new();
    assert!(validate_length(&mut errors, "name", "\u{00C7}a", None, Some(2)));
}

// -- Format --

#[test]
fn format_mismatch() {
    let mut errors = ValidationErrors::new();
    let pattern = Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap();
    assert!(!validate_format(&mut errors, "email", "not-an-email", &pattern));
    assert!(errors.contains("email", "invalid"));
}

#[test]
fn format_match() {
    let mut errors = ValidationErrors::new();
    let pattern = Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap();
    assert!(validate_format(&mut errors, "email", "ada@example.com", &pattern));
}

// -- Inclusion --

#[test]
fn inclusion_case_insensitive() {
    let mut errors = ValidationErrors::new();
    assert!(validate_inclusion(&mut errors, "role", "Admin", &["admin", "member"]));
}

#[test]
fn inclusion_rejects_unknown() {
    let mut errors = ValidationErrors::new();
    assert!(!validate_inclusion(&mut errors, "role", "root", &["admin", "member"]));
    assert_eq!(errors.details("role")[0].options["value"], json!("root"));
}

// -- Numericality --

#[test]
fn numericality_not_a_number() {
    let mut errors = ValidationErrors::new();
    assert!(!validate_numericality(&mut errors, "page", "two", None, None));
    assert!(errors.contains("page", "not_a_number"));
}

#[test]
fn numericality_below_min() {
    let mut errors = ValidationErrors::new();
    assert!(!validate_numericality(&mut errors, "page", "0", Some(1), None));
    assert_eq!(
        errors.full_messages(),
        vec!["Page must be greater than or equal to 1".to_string()]
    );
}

#[test]
fn numericality_above_max() {
    let mut errors = ValidationErrors::new();
    assert!(!validate_numericality(&mut errors, "page_size", "101", Some(1), Some(100)));
    assert!(errors.contains("page_size", "less_than_or_equal_to"));
}

#[test]
fn numericality_in_range() {
    let mut errors = ValidationErrors::new();
    assert!(validate_numericality(&mut errors, "page_size", "20", Some(1), Some(100)));
    assert!(errors.is_empty());
}
