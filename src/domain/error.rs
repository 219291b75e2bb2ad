use thiserror::Error;

/// Input rejected before the store is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Todo text must not be empty")]
    EmptyText,
    #[error("User must not be empty")]
    EmptyUser,
    #[error("Invalid date format. Please use YYYY-MM-DD (got `{0}`)")]
    InvalidDate(String),
    #[error("Invalid priority `{0}`. Expected one of: low, medium, high")]
    InvalidPriority(String),
}

#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid todo id `{0}`")]
    InvalidIdentifier(String),
    #[error("Database error: {0}")]
    StorageUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TodoError {
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::StorageUnavailable(Box::new(err))
    }
}
