use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{ValidateEmail, ValidateLength};

const FULL_NAME_MIN: u64 = 2;
const FULL_NAME_MAX: u64 = 80;
const PHONE_NUMBER_MIN: u64 = 6;
const PHONE_NUMBER_MAX: u64 = 20;
const MESSAGE_MIN: u64 = 5;
const MESSAGE_MAX: u64 = 1024;

/// Unvalidated lead fields exactly as submitted by the form.
///
/// Missing keys deserialize to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLeadForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadField {
    FullName,
    Email,
    PhoneNumber,
    Message,
}

impl LeadField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::Message => "message",
        }
    }
}

/// Per-field validation messages, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<LeadField, Vec<String>>);

impl FieldErrors {
    fn add(&mut self, field: LeadField, message: &str) {
        let messages = self.0.entry(field).or_default();
        if !messages.iter().any(|m| m == message) {
            messages.push(message.to_string());
        }
    }

    #[must_use]
    pub fn get(&self, field: LeadField) -> Option<&[String]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = LeadField> + '_ {
        self.0.keys().copied()
    }
}

/// A lead that satisfied every field constraint.
///
/// Only [`validate`] constructs this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadInput {
    full_name: String,
    email: Option<String>,
    phone_number: String,
    message: String,
}

impl LeadInput {
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validates every field of a raw form in one pass.
///
/// Lengths are counted in Unicode scalar values, so an emoji counts as one
/// character rather than two UTF-16 code units.
///
/// # Errors
/// Returns the messages for every field that violates its constraints.
pub fn validate(raw: &RawLeadForm) -> Result<LeadInput, FieldErrors> {
    let mut errors = FieldErrors::default();

    check_length(
        &mut errors,
        LeadField::FullName,
        &raw.full_name,
        (FULL_NAME_MIN, "Name must have at least 2 characters"),
        (FULL_NAME_MAX, "Name is too long"),
    );

    if !raw.email.is_empty() && !raw.email.validate_email() {
        errors.add(LeadField::Email, "Enter a valid email address");
    }

    check_length(
        &mut errors,
        LeadField::PhoneNumber,
        &raw.phone_number,
        (PHONE_NUMBER_MIN, "Phone number must have at least 6 digits"),
        (PHONE_NUMBER_MAX, "Phone number is too long"),
    );

    check_length(
        &mut errors,
        LeadField::Message,
        &raw.message,
        (MESSAGE_MIN, "Message must have at least 5 characters"),
        (MESSAGE_MAX, "Message is too long"),
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LeadInput {
        full_name: raw.full_name.clone(),
        email: Some(raw.email.clone()).filter(|e| !e.is_empty()),
        phone_number: raw.phone_number.clone(),
        message: raw.message.clone(),
    })
}

fn check_length(
    errors: &mut FieldErrors,
    field: LeadField,
    value: &str,
    (min, too_short): (u64, &str),
    (max, too_long): (u64, &str),
) {
    if !value.validate_length(Some(min), None, None) {
        errors.add(field, too_short);
    }
    if !value.validate_length(None, Some(max), None) {
        errors.add(field, too_long);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RawLeadForm {
        RawLeadForm {
            full_name: "Alexa Johnson".to_string(),
            email: String::new(),
            phone_number: "+15551234567".to_string(),
            message: "Hi there!".to_string(),
        }
    }

    #[test]
    fn test_valid_form_produces_lead() {
        let lead = validate(&valid_form()).unwrap();
        assert_eq!(lead.full_name(), "Alexa Johnson");
        assert_eq!(lead.email(), None);
        assert_eq!(lead.phone_number(), "+15551234567");
        assert_eq!(lead.message(), "Hi there!");
    }

    #[test]
    fn test_boundary_lengths_are_accepted() {
        for (name, phone, message) in [
            ("ab".to_string(), "123456".to_string(), "hello".to_string()),
            ("a".repeat(80), "1".repeat(20), "m".repeat(1024)),
        ] {
            let form = RawLeadForm { full_name: name, phone_number: phone, message, ..valid_form() };
            assert!(validate(&form).is_ok(), "boundary form rejected: {form:?}");
        }
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let form = RawLeadForm { full_name: "é".repeat(80), ..valid_form() };
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn test_short_name_reports_only_that_field() {
        let form = RawLeadForm { full_name: "A".to_string(), ..valid_form() };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![LeadField::FullName]);
        assert_eq!(errors.get(LeadField::FullName).unwrap(), ["Name must have at least 2 characters"]);
    }

    #[test]
    fn test_long_phone_number_reports_only_that_field() {
        let form = RawLeadForm { phone_number: "1".repeat(21), ..valid_form() };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![LeadField::PhoneNumber]);
        assert_eq!(errors.get(LeadField::PhoneNumber).unwrap(), ["Phone number is too long"]);
    }

    #[test]
    fn test_short_message_reports_only_that_field() {
        let form = RawLeadForm { message: "Hiya".to_string(), ..valid_form() };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![LeadField::Message]);
        assert_eq!(errors.get(LeadField::Message).unwrap(), ["Message must have at least 5 characters"]);
    }

    #[test]
    fn test_all_errors_are_aggregated() {
        let form = RawLeadForm {
            full_name: "x".repeat(81),
            email: "not-an-email".to_string(),
            phone_number: "123".to_string(),
            message: "m".repeat(1025),
        };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.get(LeadField::FullName).unwrap(), ["Name is too long"]);
        assert_eq!(errors.get(LeadField::Email).unwrap(), ["Enter a valid email address"]);
        assert_eq!(errors.get(LeadField::PhoneNumber).unwrap(), ["Phone number must have at least 6 digits"]);
        assert_eq!(errors.get(LeadField::Message).unwrap(), ["Message is too long"]);
    }

    #[test]
    fn test_email_optional_or_valid() {
        let with_email = RawLeadForm { email: "a@b.com".to_string(), ..valid_form() };
        assert_eq!(validate(&with_email).unwrap().email(), Some("a@b.com"));

        let bad = RawLeadForm { email: "a@".to_string(), ..valid_form() };
        let errors = validate(&bad).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![LeadField::Email]);
    }

    #[test]
    fn test_phone_number_has_no_grammar() {
        let form = RawLeadForm { phone_number: "call me!".to_string(), ..valid_form() };
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let form = RawLeadForm { full_name: "A".to_string(), message: "hey".to_string(), ..valid_form() };
        assert_eq!(validate(&form), validate(&form));
        assert_eq!(validate(&valid_form()), validate(&valid_form()));
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let form: RawLeadForm = serde_json::from_str(r#"{"fullName": "Alexa Johnson"}"#).unwrap();
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![LeadField::PhoneNumber, LeadField::Message]);
    }

    #[test]
    fn test_field_errors_serialize_with_form_keys() {
        let form = RawLeadForm { full_name: "A".to_string(), ..valid_form() };
        let errors = validate(&form).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "fullName": ["Name must have at least 2 characters"] }));
    }
}
