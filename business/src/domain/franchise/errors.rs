use crate::domain::errors::RepositoryError;

/// Failure kinds callers branch on. The entrypoint maps them to transport statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Business,
    NotFound,
    Generic,
}

#[derive(Debug, thiserror::Error)]
pub enum FranchiseError {
    #[error("franchise name must not be empty")]
    FranchiseNameEmpty,
    #[error("branch name must not be empty")]
    BranchNameEmpty,
    #[error("product name must not be empty")]
    ProductNameEmpty,
    #[error("new name must not be empty")]
    NewNameEmpty,
    #[error("stock is required")]
    StockRequired,
    #[error("stock must not be negative")]
    NegativeStock,
    #[error("a franchise named '{0}' already exists")]
    FranchiseAlreadyExists(String),
    #[error("a branch named '{0}' already exists in this franchise")]
    BranchAlreadyExists(String),
    #[error("the name is already used by a sibling")]
    NameConflict,
    #[error("the id is already used by another product")]
    IdConflict,
    #[error("franchise not found with id: {0}")]
    FranchiseNotFound(String),
    #[error("franchise or branch not found")]
    BranchNotFound,
    #[error("franchise, branch or product not found")]
    ProductNotFound,
    #[error("an unexpected error occurred while processing the request")]
    Repository(#[source] RepositoryError),
}

impl FranchiseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FranchiseError::FranchiseNameEmpty
            | FranchiseError::BranchNameEmpty
            | FranchiseError::ProductNameEmpty
            | FranchiseError::NewNameEmpty
            | FranchiseError::StockRequired
            | FranchiseError::NegativeStock => ErrorKind::Validation,
            FranchiseError::FranchiseAlreadyExists(_)
            | FranchiseError::BranchAlreadyExists(_)
            | FranchiseError::NameConflict
            | FranchiseError::IdConflict => ErrorKind::Business,
            FranchiseError::FranchiseNotFound(_)
            | FranchiseError::BranchNotFound
            | FranchiseError::ProductNotFound => ErrorKind::NotFound,
            FranchiseError::Repository(_) => ErrorKind::Generic,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Business => "BUSINESS_ERROR",
            ErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            ErrorKind::Generic => "INTERNAL_ERROR",
        }
    }

    /// Translates a port failure, using `not_found` for the store's "no match" answer.
    pub fn from_repository(error: RepositoryError, not_found: FranchiseError) -> Self {
        match error {
            RepositoryError::NotFound => not_found,
            RepositoryError::Duplicated => FranchiseError::NameConflict,
            RepositoryError::DuplicatedId => FranchiseError::IdConflict,
            other => FranchiseError::Repository(other),
        }
    }
}
