use std::sync::Arc;

use super::bureau::{CreditBureauError, CreditBureauGateway};
use crate::workflows::onboarding::domain::Customer;

/// Pluggable credit rule keyed off the customer's company affiliation.
///
/// A strategy both reports whether it applies and, if so, writes the
/// credit fields in place. The resolver evaluates strategies in their
/// configured order and the first supported one wins.
pub trait CreditStrategy: Send + Sync {
    fn is_supported(&self, customer: &Customer) -> bool;
    fn set_credit_data(&self, customer: &mut Customer) -> Result<(), CreditBureauError>;
}

/// Implicitly trusted accounts: the credit check is skipped outright and
/// no limit applies.
pub struct VeryImportantClientStrategy {
    company_name: String,
}

impl VeryImportantClientStrategy {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
        }
    }
}

impl CreditStrategy for VeryImportantClientStrategy {
    fn is_supported(&self, customer: &Customer) -> bool {
        customer.company.name == self.company_name
    }

    fn set_credit_data(&self, customer: &mut Customer) -> Result<(), CreditBureauError> {
        customer.has_credit_limit = false;
        Ok(())
    }
}

/// Preferred accounts: checked against the bureau, then granted double the
/// reported limit.
pub struct ImportantClientStrategy {
    company_name: String,
    bureau: Arc<dyn CreditBureauGateway>,
}

impl ImportantClientStrategy {
    pub fn new(company_name: impl Into<String>, bureau: Arc<dyn CreditBureauGateway>) -> Self {
        Self {
            company_name: company_name.into(),
            bureau,
        }
    }
}

impl CreditStrategy for ImportantClientStrategy {
    fn is_supported(&self, customer: &Customer) -> bool {
        customer.company.name == self.company_name
    }

    fn set_credit_data(&self, customer: &mut Customer) -> Result<(), CreditBureauError> {
        customer.has_credit_limit = true;
        let reported = {
            let mut session = self.bureau.open_session()?;
            session.credit_limit(
                &customer.firstname,
                &customer.surname,
                customer.date_of_birth,
            )?
        };
        customer.credit_limit = reported * 2;
        Ok(())
    }
}
