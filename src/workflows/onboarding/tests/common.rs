use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::onboarding::credit::{
    CreditBureauError, CreditBureauGateway, CreditBureauSession, CreditPolicy,
};
use crate::workflows::onboarding::domain::{Company, CompanyId, Customer, NewCustomerRequest};
use crate::workflows::onboarding::repository::{
    CompanyRepository, CustomerRepository, RepositoryError,
};
use crate::workflows::onboarding::service::OnboardingService;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn request() -> NewCustomerRequest {
    NewCustomerRequest {
        firstname: "Joe".to_string(),
        surname: "Bloggs".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 3, 27).expect("valid date"),
        email_address: "joe.bloggs@adomain.com".to_string(),
        company_id: CompanyId(4),
    }
}

pub(super) fn company(name: &str) -> Company {
    Company {
        id: CompanyId(4),
        name: name.to_string(),
    }
}

pub(super) fn credit_policy() -> CreditPolicy {
    CreditPolicy {
        approval_threshold: 500,
        trusted_company: "VeryImportantClient".to_string(),
        preferred_company: "ImportantClient".to_string(),
    }
}

pub(super) fn build_service(
    company: Company,
    bureau: Arc<RecordingBureau>,
) -> (
    OnboardingService<MemoryCompanies, MemoryCustomers>,
    Arc<MemoryCompanies>,
    Arc<MemoryCustomers>,
) {
    let companies = Arc::new(MemoryCompanies::returning(company));
    let customers = Arc::new(MemoryCustomers::default());
    let service = OnboardingService::new(
        companies.clone(),
        customers.clone(),
        bureau,
        credit_policy(),
    );
    (service, companies, customers)
}

/// Company directory double answering every lookup with one snapshot and
/// recording the requested ids.
pub(super) struct MemoryCompanies {
    company: Company,
    lookups: Mutex<Vec<CompanyId>>,
}

impl MemoryCompanies {
    pub(super) fn returning(company: Company) -> Self {
        Self {
            company,
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn lookups(&self) -> Vec<CompanyId> {
        self.lookups.lock().expect("directory mutex poisoned").clone()
    }
}

impl CompanyRepository for MemoryCompanies {
    fn get_by_id(&self, id: CompanyId) -> Result<Company, RepositoryError> {
        self.lookups
            .lock()
            .expect("directory mutex poisoned")
            .push(id);
        Ok(self.company.clone())
    }
}

pub(super) struct MissingCompanies;

impl CompanyRepository for MissingCompanies {
    fn get_by_id(&self, _id: CompanyId) -> Result<Company, RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

#[derive(Default)]
pub(super) struct MemoryCustomers {
    saved: Mutex<Vec<Customer>>,
}

impl MemoryCustomers {
    pub(super) fn saved(&self) -> Vec<Customer> {
        self.saved.lock().expect("store mutex poisoned").clone()
    }
}

impl CustomerRepository for MemoryCustomers {
    fn add_customer(&self, customer: Customer) -> Result<(), RepositoryError> {
        self.saved
            .lock()
            .expect("store mutex poisoned")
            .push(customer);
        Ok(())
    }
}

pub(super) struct UnavailableCustomers;

impl CustomerRepository for UnavailableCustomers {
    fn add_customer(&self, _customer: Customer) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Bureau double tracking session lifecycles so tests can assert that
/// every opened session is released, on success and on failure.
pub(super) struct RecordingBureau {
    limit: i64,
    fail_lookup: bool,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl RecordingBureau {
    pub(super) fn with_limit(limit: i64) -> Self {
        Self {
            limit,
            fail_lookup: false,
            opened: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(super) fn failing_lookup() -> Self {
        Self {
            fail_lookup: true,
            ..Self::with_limit(0)
        }
    }

    pub(super) fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub(super) fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl CreditBureauGateway for RecordingBureau {
    fn open_session(&self) -> Result<Box<dyn CreditBureauSession>, CreditBureauError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingSession {
            limit: self.limit,
            fail_lookup: self.fail_lookup,
            released: self.released.clone(),
        }))
    }
}

struct RecordingSession {
    limit: i64,
    fail_lookup: bool,
    released: Arc<AtomicUsize>,
}

impl CreditBureauSession for RecordingSession {
    fn credit_limit(
        &mut self,
        _firstname: &str,
        _surname: &str,
        _date_of_birth: NaiveDate,
    ) -> Result<i64, CreditBureauError> {
        if self.fail_lookup {
            return Err(CreditBureauError::Lookup(
                "score service timeout".to_string(),
            ));
        }
        Ok(self.limit)
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
