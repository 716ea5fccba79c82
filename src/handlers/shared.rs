use crate::error::{AppError, AppResult};

pub const MISSING_URL: &str = "Please provide a valid URL";

/// Pull the required `url` query parameter, rejecting missing or blank values
/// before any fetch is attempted.
pub fn require_url(url: Option<String>) -> AppResult<String> {
    url.map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation(MISSING_URL.into()))
}

pub fn validation_error(e: validator::ValidationErrors) -> AppError {
    AppError::Validation(
        e.field_errors()
            .values()
            .flat_map(|v| v.iter())
            .filter_map(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    )
}
