//! `/api/contact` handler.

use crate::error::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

/// Message left through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Sender name.
    pub name: String,
    /// Reply address.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// Checks that every field is filled and the email looks like one.
pub fn validate_contact(request: &ContactRequest) -> Result<(), String> {
    if request.name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    let email = request.email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => return Err("A valid email is required".to_string()),
    }
    if request.message.trim().is_empty() {
        return Err("Message is required".to_string());
    }
    Ok(())
}

#[instrument(skip_all)]
pub(super) async fn submit(
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(request) = body?;
    validate_contact(&request).map_err(|reason| {
        warn!(%reason, "Contact form rejected");
        ApiError::unprocessable(reason)
    })?;
    info!(name = %request.name, chars = request.message.len(), "Contact message received");
    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "received" }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn complete_form_passes() {
        assert!(validate_contact(&request("Ada", "ada@example.com", "Hello")).is_ok());
    }

    #[test]
    fn blank_fields_fail() {
        assert_eq!(
            validate_contact(&request(" ", "ada@example.com", "Hi")),
            Err("Name is required".to_string())
        );
        assert_eq!(
            validate_contact(&request("Ada", "ada@example.com", "\n")),
            Err("Message is required".to_string())
        );
    }

    #[test]
    fn malformed_email_fails() {
        for email in ["", "ada", "@example.com", "ada@localhost"] {
            assert!(validate_contact(&request("Ada", email, "Hi")).is_err(), "{email}");
        }
    }
}
