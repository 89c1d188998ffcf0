//! Form service error types.

use crate::state::SchemaError;

/// Errors that can occur while talking to the form service.
///
/// A non-2xx response is not an error here: login reports it as a
/// rejection and the schema fetch reports it as an absent form.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request could not be sent or the response could not be read
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Schema decoded but cannot drive a form
    #[error("Invalid form schema: {0}")]
    InvalidSchema(#[from] SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ApiError::InvalidSchema(SchemaError::NoSections);
        assert!(error.to_string().contains("Invalid form schema"));
        assert!(error.to_string().contains("no sections"));

        let error = ApiError::InvalidSchema(SchemaError::DuplicateFieldId("email".into()));
        assert!(error.to_string().contains("email"));
    }

    #[test]
    fn test_api_error_from_serde() {
        let serde_error = serde_json::from_str::<u32>("nope").unwrap_err();
        let error: ApiError = serde_error.into();
        assert!(error
            .to_string()
            .starts_with("Failed to deserialize API response"));
    }
}
