use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use super::credit::{CreditBureauError, CreditBureauGateway, CreditPolicy, CreditResolver};
use super::domain::{Customer, NewCustomerRequest};
use super::repository::{CompanyRepository, CustomerRepository, RepositoryError};

/// Service composing validation, company lookup, credit resolution, and
/// persistence for new customers.
pub struct OnboardingService<C, R> {
    companies: Arc<C>,
    customers: Arc<R>,
    credit: Arc<CreditResolver>,
    policy: CreditPolicy,
}

impl<C, R> OnboardingService<C, R>
where
    C: CompanyRepository + 'static,
    R: CustomerRepository + 'static,
{
    pub fn new(
        companies: Arc<C>,
        customers: Arc<R>,
        bureau: Arc<dyn CreditBureauGateway>,
        policy: CreditPolicy,
    ) -> Self {
        let credit = Arc::new(CreditResolver::with_policy(&policy, bureau));
        Self::with_resolver(companies, customers, credit, policy)
    }

    /// Escape hatch for callers supplying a custom strategy stack.
    pub fn with_resolver(
        companies: Arc<C>,
        customers: Arc<R>,
        credit: Arc<CreditResolver>,
        policy: CreditPolicy,
    ) -> Self {
        Self {
            companies,
            customers,
            credit,
            policy,
        }
    }

    /// Run the full onboarding pipeline for one submission.
    ///
    /// `Ok(true)` means the customer was accepted and persisted. `Ok(false)`
    /// covers both a submission that failed validation and a credit limit
    /// below the approval threshold; the boolean boundary does not
    /// distinguish the two. Collaborator failures surface as `Err` and
    /// leave no customer recorded.
    pub fn add_customer(&self, request: NewCustomerRequest) -> Result<bool, OnboardingError> {
        self.add_customer_as_of(request, Local::now().date_naive())
    }

    /// Same pipeline with the clock injected, so tests and batch replays
    /// can pin the validation date.
    pub fn add_customer_as_of(
        &self,
        request: NewCustomerRequest,
        today: NaiveDate,
    ) -> Result<bool, OnboardingError> {
        if !request.is_valid(today) {
            info!(
                company_id = request.company_id.0,
                "submission rejected during validation"
            );
            return Ok(false);
        }

        let company = self.companies.get_by_id(request.company_id)?;
        let mut customer = Customer::from_request(request, company);

        self.credit.set_credit_limit(&mut customer)?;

        if customer.has_credit_limit && customer.credit_limit < self.policy.approval_threshold {
            info!(
                company = %customer.company.name,
                credit_limit = customer.credit_limit,
                threshold = self.policy.approval_threshold,
                "submission rejected by credit rule"
            );
            return Ok(false);
        }

        self.customers.add_customer(customer)?;
        Ok(true)
    }
}

/// Error raised by the onboarding service for collaborator failures.
///
/// Expected outcomes (invalid submission, credit rule rejection) are the
/// `Ok(false)` side of the contract and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    CreditBureau(#[from] CreditBureauError),
}
