/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants so adapters never leak store detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.duplicated")]
    Duplicated,
    /// The caller-supplied id belongs to another record.
    #[error("repository.duplicated_id")]
    DuplicatedId,
    #[error("repository.database_error")]
    DatabaseError,
    #[error("repository.timeout")]
    Timeout,
    #[error("repository.unavailable")]
    Unavailable,
}

impl RepositoryError {
    /// Infrastructure faults, as opposed to answers the store gave about the data.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RepositoryError::DatabaseError | RepositoryError::Timeout | RepositoryError::Unavailable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_infrastructure_faults_as_transient() {
        assert!(RepositoryError::DatabaseError.is_transient());
        assert!(RepositoryError::Timeout.is_transient());
        assert!(RepositoryError::Unavailable.is_transient());
    }

    #[test]
    fn should_not_classify_data_answers_as_transient() {
        assert!(!RepositoryError::NotFound.is_transient());
        assert!(!RepositoryError::Duplicated.is_transient());
        assert!(!RepositoryError::DuplicatedId.is_transient());
    }
}
