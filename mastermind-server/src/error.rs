use thiserror::Error;

use mastermind_types::ErrorCategory;

/// Failure reported by the content store, carrying its message unmodified
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        // Alternate formatting keeps the whole context chain
        StoreError::new(format!("{:#}", err))
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("No company found")]
    NotFound,

    #[error("Missing personas/subreddits/keywords")]
    MissingInputs,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GenerateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenerateError::NotFound => ErrorCategory::NoCompanyFound,
            GenerateError::MissingInputs => ErrorCategory::MissingInputs,
            GenerateError::Store(_) => ErrorCategory::StoreError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_store_error_keeps_context_chain() {
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("UNIQUE constraint failed: weeks.company_id, weeks.week_number"));
        let err = err.context("Failed to create week 2").unwrap_err();

        let store_err = StoreError::from(err);
        assert_eq!(
            store_err.message(),
            "Failed to create week 2: UNIQUE constraint failed: weeks.company_id, weeks.week_number"
        );
    }

    #[test]
    fn test_store_message_passes_through() {
        let err = GenerateError::from(StoreError::new("disk I/O error"));
        assert_eq!(err.to_string(), "disk I/O error");
        assert_eq!(err.category(), ErrorCategory::StoreError);
        assert_eq!(GenerateError::NotFound.category(), ErrorCategory::NoCompanyFound);
        assert_eq!(GenerateError::MissingInputs.category(), ErrorCategory::MissingInputs);
    }
}
