//! Submission-time validation
//!
//! Evaluates each descriptor's rule set against the current form state and
//! populates the error mapping. Configured messages are surfaced verbatim;
//! there is no fallback message construction.

use validator::ValidateEmail;

use super::field::{FieldDescriptor, FieldType, ValidationRules};
use super::registry::FormRegistry;
use super::render::is_suppressed;
use super::state::FormState;

/// Validate every visible field of `registry` against `state`
///
/// Clears previously recorded errors first. Fields suppressed by a
/// dependency are skipped entirely. Returns `true` when no error was
/// recorded; all fields are checked, first violated rule per field wins.
pub fn validate_form(registry: &FormRegistry, state: &mut FormState) -> bool {
    state.clear_errors();

    let mut failures: Vec<(&str, String)> = Vec::new();
    for field in registry {
        if is_suppressed(field, state) {
            continue;
        }
        if let Some(message) = check_field(field, state) {
            failures.push((field.name, message));
        }
    }

    for (name, message) in failures {
        tracing::debug!(field = name, error = %message, "validation failed");
        state.set_error(name, message);
    }

    !state.has_errors()
}

fn check_field(field: &FieldDescriptor, state: &FormState) -> Option<String> {
    let value = state.value_of(field.name);
    let rules = &field.validation;

    if value.is_blank() {
        return rules.required.clone();
    }

    // File fields only carry a required rule
    if field.field_type == FieldType::File {
        return None;
    }

    let text = value.as_text().unwrap_or("");
    check_text(rules, field.field_type, text)
}

fn check_text(rules: &ValidationRules, field_type: FieldType, text: &str) -> Option<String> {
    let length = text.chars().count();

    if let Some(min) = rules.min_length {
        if length < min {
            return Some(format!("must be at least {min} characters"));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            return Some(format!("must be at most {max} characters"));
        }
    }
    if let Some(pattern) = &rules.pattern {
        if !pattern.regex.is_match(text) {
            return Some(pattern.message.clone());
        }
    }
    // Email fields without an explicit pattern still get format checking
    if field_type == FieldType::Email && rules.pattern.is_none() && !text.validate_email() {
        return Some("invalid email address".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::registry::{PRODUCT_FORM, REGISTER_FORM};
    use crate::uploads::PendingImage;

    fn valid_registration() -> FormState {
        let mut state = FormState::new();
        state.set_text("firstName", "Omar");
        state.set_text("secondName", "Samir");
        state.set_text("email", "omar@example.com");
        state.set_text("phone", "01012345678");
        state.set_text("password", "secret-pass");
        state.set_text("confirmedPassword", "secret-pass");
        state.set_text("address", "12 Main Street, Cairo");
        state.set_files(
            "image",
            vec![PendingImage::new("me.png", "image/png", b"png".to_vec())],
        );
        state
    }

    #[test]
    fn test_valid_registration_passes() {
        let mut state = valid_registration();
        assert!(validate_form(&REGISTER_FORM, &mut state));
        assert!(!state.has_errors());
    }

    #[test]
    fn test_required_message_verbatim() {
        let mut state = valid_registration();
        state.set_text("email", "");

        assert!(!validate_form(&REGISTER_FORM, &mut state));
        assert_eq!(state.error_of("email"), Some("email is required"));
    }

    #[test]
    fn test_missing_file_uses_required_message() {
        let mut state = valid_registration();
        state.set_files("image", vec![]);

        assert!(!validate_form(&REGISTER_FORM, &mut state));
        assert_eq!(state.error_of("image"), Some("profile image is required"));
    }

    #[test]
    fn test_phone_pattern_message_verbatim() {
        let mut state = valid_registration();
        state.set_text("phone", "9912345678");

        assert!(!validate_form(&REGISTER_FORM, &mut state));
        assert_eq!(state.error_of("phone"), Some("invalid phone number"));
    }

    #[test]
    fn test_min_length() {
        let mut state = valid_registration();
        state.set_text("firstName", "Om");

        assert!(!validate_form(&REGISTER_FORM, &mut state));
        assert_eq!(
            state.error_of("firstName"),
            Some("must be at least 3 characters")
        );
    }

    #[test]
    fn test_max_length() {
        let mut state = valid_registration();
        state.set_text("password", "x".repeat(19));

        assert!(!validate_form(&REGISTER_FORM, &mut state));
        assert_eq!(
            state.error_of("password"),
            Some("must be at most 18 characters")
        );
    }

    #[test]
    fn test_all_fields_checked() {
        let mut state = FormState::new();
        assert!(!validate_form(&REGISTER_FORM, &mut state));
        // Every required field reports, not just the first
        assert!(state.error_of("firstName").is_some());
        assert!(state.error_of("image").is_some());
    }

    #[test]
    fn test_suppressed_field_skipped() {
        let mut state = FormState::from_registry(&PRODUCT_FORM);
        state.set_text("hasDiscount", "No");
        state.set_text("name", "Chair");
        state.set_text("productCategoryId", "3");
        state.set_text("price", "120");
        state.set_text("description", "<p>solid oak</p>");
        state.set_files(
            "image",
            vec![PendingImage::new("chair.png", "image/png", b"img".to_vec())],
        );

        // discount is empty but must not be validated while suppressed
        assert!(validate_form(&PRODUCT_FORM, &mut state));
    }

    #[test]
    fn test_email_fallback_without_pattern() {
        let rules = ValidationRules::required("email is required");
        assert_eq!(
            check_text(&rules, FieldType::Email, "nope"),
            Some("invalid email address".to_string())
        );
        assert_eq!(check_text(&rules, FieldType::Email, "a@b.co"), None);
    }
}
