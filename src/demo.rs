//! In-memory collaborators backing the CLI and the demo server wiring.
//!
//! Production deployments substitute real repository and bureau adapters;
//! these implementations keep the binary self-contained.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use customer_intake::workflows::onboarding::{
    Company, CompanyId, CompanyRepository, CreditBureauError, CreditBureauGateway,
    CreditBureauSession, Customer, CustomerRepository, RepositoryError,
};

pub(crate) struct InMemoryCompanyDirectory {
    companies: HashMap<CompanyId, Company>,
}

impl InMemoryCompanyDirectory {
    pub(crate) fn seeded() -> Self {
        let companies = [
            Company {
                id: CompanyId(1),
                name: "VeryImportantClient".to_string(),
            },
            Company {
                id: CompanyId(2),
                name: "ImportantClient".to_string(),
            },
            Company {
                id: CompanyId(3),
                name: "Acme Logistics".to_string(),
            },
        ]
        .into_iter()
        .map(|company| (company.id, company))
        .collect();

        Self { companies }
    }
}

impl CompanyRepository for InMemoryCompanyDirectory {
    fn get_by_id(&self, id: CompanyId) -> Result<Company, RepositoryError> {
        self.companies
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCustomerStore {
    customers: Arc<Mutex<Vec<Customer>>>,
}

impl InMemoryCustomerStore {
    pub(crate) fn accepted(&self) -> Vec<Customer> {
        self.customers.lock().expect("store mutex poisoned").clone()
    }
}

impl CustomerRepository for InMemoryCustomerStore {
    fn add_customer(&self, customer: Customer) -> Result<(), RepositoryError> {
        self.customers
            .lock()
            .expect("store mutex poisoned")
            .push(customer);
        Ok(())
    }
}

/// Stand-in for the remote bureau reporting a fixed limit for every
/// applicant, so demo outcomes are reproducible.
pub(crate) struct FixedLimitBureau {
    limit: i64,
}

impl FixedLimitBureau {
    pub(crate) fn new(limit: i64) -> Self {
        Self { limit }
    }
}

impl CreditBureauGateway for FixedLimitBureau {
    fn open_session(&self) -> Result<Box<dyn CreditBureauSession>, CreditBureauError> {
        Ok(Box::new(FixedLimitSession { limit: self.limit }))
    }
}

struct FixedLimitSession {
    limit: i64,
}

impl CreditBureauSession for FixedLimitSession {
    fn credit_limit(
        &mut self,
        _firstname: &str,
        _surname: &str,
        _date_of_birth: NaiveDate,
    ) -> Result<i64, CreditBureauError> {
        Ok(self.limit)
    }
}
