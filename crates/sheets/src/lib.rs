//! Spreadsheet-backed data stores
//!
//! Implementations of [`vyapar_core::DataStore`]:
//! - [`SheetsClient`] - Google Sheets values API (`values/{range}`, `values:batchGet`)
//! - [`InMemoryStore`] - fixture tables with failure injection

pub mod client;
pub mod memory;

pub use client::SheetsClient;
pub use memory::InMemoryStore;

use thiserror::Error;

/// Sheets errors
#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for SheetsError {
    fn from(err: reqwest::Error) -> Self {
        SheetsError::Network(err.to_string())
    }
}

impl From<SheetsError> for vyapar_core::Error {
    fn from(err: SheetsError) -> Self {
        vyapar_core::Error::DataStore(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vyapar_core::FailureBoundary;

    #[test]
    fn test_sheets_error_is_data_access() {
        let err: vyapar_core::Error = SheetsError::Api {
            status: 403,
            message: "PERMISSION_DENIED".to_string(),
        }
        .into();
        assert_eq!(err.boundary(), FailureBoundary::DataAccess);
        assert!(err.to_string().contains("HTTP 403"));
    }
}
