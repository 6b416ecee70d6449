use std::sync::LazyLock;

use axum::{extract::State, Json};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::mail::{OutgoingEmail, CONTACT_RECIPIENT};

use super::extractors::JsonOrForm;
use super::AppState;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// One contact-form submission, as parsed from the request body.
/// Fields default to empty so presence is checked here, not by the extractor.
#[derive(Debug, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// Handler for contact-form submission
///
/// Validates shape and email syntax, renders the message, and relays it
/// through the configured mailer. Send failures are logged in full
/// server-side; the caller only ever sees the generic fallback text.
pub async fn submit(
    State(state): State<AppState>,
    JsonOrForm(submission): JsonOrForm<ContactSubmission>,
) -> AppResult<Json<ContactResponse>> {
    tracing::info!("Contact form submission received");
    validate(&submission)?;

    let email = OutgoingEmail::contact_form(
        &state.config.email_user,
        &submission.name,
        &submission.email,
        &submission.subject,
        &submission.message,
    );

    tracing::info!("Attempting to send email...");
    if let Err(err) = state.mailer.send(&email).await {
        tracing::error!(error = %err, "Error sending contact form email");
        return Err(AppError::SendFailed(format!(
            "Failed to send message. Please try again or email us directly at {CONTACT_RECIPIENT}"
        )));
    }

    tracing::info!(from = %submission.email, "Contact form email sent");
    Ok(Json(ContactResponse {
        success: true,
        message: "Your message has been sent successfully! We'll get back to you within 24-48 hours."
            .to_string(),
    }))
}

/// Short-circuits on the first failed check: presence, then email syntax
fn validate(submission: &ContactSubmission) -> AppResult<()> {
    let required = [
        &submission.name,
        &submission.email,
        &submission.subject,
        &submission.message,
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(AppError::MissingFields);
    }

    if !EMAIL_PATTERN.is_match(&submission.email) {
        return Err(AppError::InvalidEmail);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, subject: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn complete_submission_passes() {
        let s = submission("Ada", "user@example.com", "Hi", "Hello there");
        assert!(validate(&s).is_ok());
    }

    #[test]
    fn any_empty_field_is_rejected_first() {
        for s in [
            submission("", "user@example.com", "Hi", "Hello"),
            submission("Ada", "", "Hi", "Hello"),
            submission("Ada", "user@example.com", "", "Hello"),
            submission("Ada", "user@example.com", "Hi", ""),
        ] {
            assert!(matches!(validate(&s), Err(AppError::MissingFields)));
        }
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["no-at-sign", "a@b", "@b.com", "a b@c.com", "a@b c.com"] {
            let s = submission("Ada", email, "Hi", "Hello");
            assert!(matches!(validate(&s), Err(AppError::InvalidEmail)), "{email}");
        }
    }

    #[test]
    fn plausible_emails_are_accepted() {
        for email in ["user@example.com", "a@b.co", "first.last@sub.domain.org"] {
            let s = submission("Ada", email, "Hi", "Hello");
            assert!(validate(&s).is_ok(), "{email}");
        }
    }
}
