//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers, alongside the `validator` derive on request DTOs.

use validator::Validate;

use crate::utils::AppError;

// ========== Text Length Limits ==========

/// Entity names: product, user, category, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, comments, address lines
pub const MAX_TEXT_LEN: usize = 1000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

// ========== Validation Helpers ==========

/// Run `validator` derive checks and fold failures into a single message.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let mut parts: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors {
                match &err.message {
                    Some(msg) => parts.push(format!("{field}: {msg}")),
                    None => parts.push(format!("{field} is invalid")),
                }
            }
        }
        parts.sort();
        AppError::validation(parts.join("; "))
    })
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}
