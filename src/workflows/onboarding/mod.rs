//! Customer onboarding: intake validation, credit resolution, and
//! persistence of accepted customers.
//!
//! The pipeline validates a submission, fetches the company snapshot,
//! resolves a credit limit through the configured strategy stack (with a
//! remote bureau check as the fallback), applies the approval threshold,
//! and hands accepted customers to the repository.

pub mod batch;
pub mod credit;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{
    onboard_all, requests_from_path, requests_from_reader, BatchIntakeError, BatchOutcome,
};
pub use credit::{
    CreditBureauError, CreditBureauGateway, CreditBureauSession, CreditPolicy, CreditResolver,
    CreditStrategy, ImportantClientStrategy, VeryImportantClientStrategy,
};
pub use domain::{Company, CompanyId, Customer, NewCustomerRequest};
pub use repository::{CompanyRepository, CustomerRepository, RepositoryError};
pub use router::onboarding_router;
pub use service::{OnboardingError, OnboardingService};
