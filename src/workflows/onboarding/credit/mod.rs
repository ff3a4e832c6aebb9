pub mod bureau;
pub mod strategies;

pub use bureau::{CreditBureauError, CreditBureauGateway, CreditBureauSession};
pub use strategies::{CreditStrategy, ImportantClientStrategy, VeryImportantClientStrategy};

use std::sync::Arc;

use crate::workflows::onboarding::domain::Customer;

/// Business constants gating credit resolution and approval.
///
/// These are constructor configuration, not runtime dials: callers needing
/// a different threshold or company roster substitute a policy before the
/// service is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditPolicy {
    /// Minimum limit a checked customer must hold to be accepted.
    pub approval_threshold: i64,
    /// Company whose customers skip the credit check entirely.
    pub trusted_company: String,
    /// Company whose customers receive double the bureau-reported limit.
    pub preferred_company: String,
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self {
            approval_threshold: 500,
            trusted_company: "VeryImportantClient".to_string(),
            preferred_company: "ImportantClient".to_string(),
        }
    }
}

/// Picks the first applicable strategy for a customer, falling back to a
/// direct bureau check for standard accounts.
pub struct CreditResolver {
    strategies: Vec<Box<dyn CreditStrategy>>,
    bureau: Arc<dyn CreditBureauGateway>,
}

impl CreditResolver {
    pub fn new(
        strategies: Vec<Box<dyn CreditStrategy>>,
        bureau: Arc<dyn CreditBureauGateway>,
    ) -> Self {
        Self { strategies, bureau }
    }

    /// Standard wiring: trusted accounts first, preferred accounts second,
    /// then the uncapped fallback check. Order is significant; the first
    /// supported strategy wins.
    pub fn with_policy(policy: &CreditPolicy, bureau: Arc<dyn CreditBureauGateway>) -> Self {
        let strategies: Vec<Box<dyn CreditStrategy>> = vec![
            Box::new(VeryImportantClientStrategy::new(
                policy.trusted_company.clone(),
            )),
            Box::new(ImportantClientStrategy::new(
                policy.preferred_company.clone(),
                bureau.clone(),
            )),
        ];
        Self::new(strategies, bureau)
    }

    /// Resolve and write the customer's credit fields in place.
    ///
    /// Bureau failures propagate to the caller; nothing is retried and a
    /// customer carrying a failed lookup is never persisted.
    pub fn set_credit_limit(&self, customer: &mut Customer) -> Result<(), CreditBureauError> {
        if let Some(strategy) = self
            .strategies
            .iter()
            .find(|strategy| strategy.is_supported(customer))
        {
            return strategy.set_credit_data(customer);
        }

        customer.has_credit_limit = true;
        let reported = {
            let mut session = self.bureau.open_session()?;
            session.credit_limit(
                &customer.firstname,
                &customer.surname,
                customer.date_of_birth,
            )?
        };
        customer.credit_limit = reported;
        Ok(())
    }
}
