use super::domain::{Company, CompanyId, Customer};

/// Company directory lookup consumed during onboarding.
///
/// A missing company is a broken precondition upstream of this pipeline,
/// so the error propagates rather than being mapped to a rejection.
pub trait CompanyRepository: Send + Sync {
    fn get_by_id(&self, id: CompanyId) -> Result<Company, RepositoryError>;
}

/// Storage abstraction for accepted customers.
pub trait CustomerRepository: Send + Sync {
    fn add_customer(&self, customer: Customer) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
