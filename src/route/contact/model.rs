use std::collections::BTreeMap;

use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

const MISSING_FIELD: &str = "missing_field";
const INVALID_FORMAT: &str = "invalid_format";

/// A message submitted through the contact form.
///
/// Messages are read-only once stored.
#[model(create)]
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, Validate, sqlx::FromRow)]
pub struct ContactMessage {
	/// The unique identifier of the message.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	#[serde(default)]
	#[validate(length(min = 1, code = "missing_field"))]
	pub name: String,
	#[serde(default)]
	#[validate(length(min = 1, code = "missing_field"), email(code = "invalid_format"))]
	pub email: String,
	#[serde(default)]
	#[validate(length(min = 1, code = "missing_field"))]
	pub subject: String,
	#[serde(default)]
	#[validate(length(min = 1, code = "missing_field"))]
	pub message: String,
	/// The time the message was received.
	#[serde(skip_deserializing)]
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// The contact form as submitted, with its forgery protection token.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
	#[serde(default, rename = "csrfmiddlewaretoken")]
	pub csrf_token: String,
	#[serde(flatten)]
	pub message: CreateContactMessage,
}

/// Why a single form field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
	MissingField,
	InvalidFormat,
}

impl FieldError {
	/// The text shown next to the field.
	pub fn text(self) -> &'static str {
		match self {
			Self::MissingField => "This field is required.",
			Self::InvalidFormat => "Enter a valid email address.",
		}
	}
}

/// Rejected fields, keyed by field name.
pub type FieldErrors = BTreeMap<String, FieldError>;

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
	errors
		.field_errors()
		.into_iter()
		.map(|(field, errors)| {
			let error = if errors.iter().any(|error| error.code == MISSING_FIELD) {
				FieldError::MissingField
			} else {
				debug_assert!(errors.iter().all(|error| error.code == INVALID_FORMAT));
				FieldError::InvalidFormat
			};

			(field.to_string(), error)
		})
		.collect()
}

impl CreateContactMessage {
	fn trimmed(&self) -> Self {
		Self {
			name: self.name.trim().to_owned(),
			email: self.email.trim().to_owned(),
			subject: self.subject.trim().to_owned(),
			message: self.message.trim().to_owned(),
		}
	}

	/// Checks a submission, returning the value to store on success.
	///
	/// Surrounding whitespace is removed first, so a field of only
	/// whitespace is missing. A missing email is not also reported as
	/// badly formatted.
	pub fn check(&self) -> Result<Self, FieldErrors> {
		let message = self.trimmed();

		match message.validate() {
			Ok(()) => Ok(message),
			Err(errors) => Err(field_errors(&errors)),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test::contact_form;

	#[test]
	fn test_valid_submission() {
		let message = contact_form("A", "a@b.com", "S", "M").check().unwrap();

		assert_eq!(message.name, "A");
		assert_eq!(message.email, "a@b.com");
		assert_eq!(message.subject, "S");
		assert_eq!(message.message, "M");
	}

	#[test]
	fn test_invalid_email() {
		let errors = contact_form("A", "not-an-email", "S", "M")
			.check()
			.unwrap_err();

		assert_eq!(
			errors,
			FieldErrors::from([("email".to_owned(), FieldError::InvalidFormat)])
		);
	}

	#[test]
	fn test_missing_fields() {
		let errors = contact_form("", "", "  ", "M").check().unwrap_err();

		assert_eq!(
			errors,
			FieldErrors::from([
				("email".to_owned(), FieldError::MissingField),
				("name".to_owned(), FieldError::MissingField),
				("subject".to_owned(), FieldError::MissingField),
			])
		);
	}

	#[test]
	fn test_whitespace_is_trimmed() {
		let message = contact_form(" A ", " a@b.com\n", "S", "\tM ").check().unwrap();

		assert_eq!(message.name, "A");
		assert_eq!(message.email, "a@b.com");
		assert_eq!(message.message, "M");
	}

	#[test]
	fn test_absent_fields_deserialize_as_missing() {
		let form: CreateContactMessage =
			serde_json::from_value(serde_json::json!({ "name": "A" })).unwrap();

		let errors = form.check().unwrap_err();

		assert_eq!(errors.len(), 3);
		assert!(errors.values().all(|error| *error == FieldError::MissingField));
	}
}
