//! Request validation helpers

use uuid::Uuid;
use validator::ValidationErrors;

use crate::error::AppError;

/// Parse a path identifier, rejecting malformed values with `message`.
///
/// Each resource words its invalid-id response differently, so the caller
/// supplies the text.
pub fn parse_object_id(raw: &str, message: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::bad_request(message))
}

/// First human-readable message found in a set of validation failures.
///
/// Fields are visited in name order so the result is stable when several
/// fields fail at once.
pub fn first_message(errors: &ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
}

/// Lenient page-number parsing: anything that is not a positive integer falls
/// back to `default`.
pub fn parse_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}
