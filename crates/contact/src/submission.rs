use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Reject values that are empty or only whitespace
fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }

    Ok(())
}

/// Non-blank and free of line breaks, for values that end up in mail headers
fn single_line(value: &str, label: &str) -> Result<(), ValidationError> {
    required(value).map_err(|e| e.with_message(format!("{label} is required").into()))?;

    if value.chars().any(char::is_control) {
        return Err(ValidationError::new("single_line")
            .with_message(format!("{label} must fit on one line").into()));
    }

    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    single_line(name, "Name")
}

fn validate_subject(subject: &str) -> Result<(), ValidationError> {
    single_line(subject, "Subject")
}

/// A message left through the site's contact form
#[derive(Validate, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ContactSubmission {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(
        custom(function = "required", message = "Email is required"),
        email(message = "Email must be a valid address")
    )]
    pub email: String,
    #[validate(custom(function = "validate_subject"))]
    pub subject: String,
    #[validate(custom(function = "required", message = "Message is required"))]
    pub message: String,
}
