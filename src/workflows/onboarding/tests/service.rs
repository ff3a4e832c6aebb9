use std::sync::Arc;

use super::common::*;
use crate::workflows::onboarding::domain::CompanyId;
use crate::workflows::onboarding::repository::RepositoryError;
use crate::workflows::onboarding::service::{OnboardingError, OnboardingService};

#[test]
fn invalid_submission_is_rejected_before_any_collaborator_runs() {
    let bureau = Arc::new(RecordingBureau::with_limit(600));
    let (service, companies, customers) = build_service(company("Acme Logistics"), bureau.clone());

    let mut submission = request();
    submission.firstname = String::new();

    let accepted = service
        .add_customer_as_of(submission, today())
        .expect("pipeline returns");

    assert!(!accepted);
    assert!(companies.lookups().is_empty());
    assert!(customers.saved().is_empty());
    assert_eq!(bureau.opened(), 0);
}

#[test]
fn company_is_fetched_exactly_once_by_submitted_id() {
    let bureau = Arc::new(RecordingBureau::with_limit(600));
    let (service, companies, _) = build_service(company("Acme Logistics"), bureau);

    service
        .add_customer_as_of(request(), today())
        .expect("pipeline returns");

    assert_eq!(companies.lookups(), vec![CompanyId(4)]);
}

#[test]
fn trusted_company_is_accepted_without_a_credit_check() {
    let bureau = Arc::new(RecordingBureau::with_limit(0));
    let (service, _, customers) = build_service(company("VeryImportantClient"), bureau.clone());

    let accepted = service
        .add_customer_as_of(request(), today())
        .expect("pipeline returns");

    assert!(accepted);
    assert_eq!(bureau.opened(), 0);

    let saved = customers.saved();
    assert_eq!(saved.len(), 1);
    assert!(!saved[0].has_credit_limit);
}

#[test]
fn preferred_company_is_accepted_when_doubled_limit_meets_threshold() {
    let bureau = Arc::new(RecordingBureau::with_limit(250));
    let (service, _, customers) = build_service(company("ImportantClient"), bureau);

    let accepted = service
        .add_customer_as_of(request(), today())
        .expect("pipeline returns");

    assert!(accepted);
    let saved = customers.saved();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].has_credit_limit);
    assert_eq!(saved[0].credit_limit, 500);
}

#[test]
fn preferred_company_is_rejected_when_doubled_limit_stays_below_threshold() {
    let bureau = Arc::new(RecordingBureau::with_limit(200));
    let (service, _, customers) = build_service(company("ImportantClient"), bureau);

    let accepted = service
        .add_customer_as_of(request(), today())
        .expect("pipeline returns");

    assert!(!accepted);
    assert!(customers.saved().is_empty());
}

#[test]
fn standard_company_is_accepted_at_the_threshold() {
    let bureau = Arc::new(RecordingBureau::with_limit(500));
    let (service, _, customers) = build_service(company("Acme Logistics"), bureau);

    let accepted = service
        .add_customer_as_of(request(), today())
        .expect("pipeline returns");

    assert!(accepted);
    let saved = customers.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].credit_limit, 500);
}

#[test]
fn standard_company_is_rejected_below_the_threshold() {
    let bureau = Arc::new(RecordingBureau::with_limit(400));
    let (service, _, customers) = build_service(company("Acme Logistics"), bureau);

    let accepted = service
        .add_customer_as_of(request(), today())
        .expect("pipeline returns");

    assert!(!accepted);
    assert!(customers.saved().is_empty());
}

#[test]
fn persisted_customer_carries_the_submission_fields() {
    let bureau = Arc::new(RecordingBureau::with_limit(600));
    let (service, _, customers) = build_service(company("Acme Logistics"), bureau);

    let submission = request();
    service
        .add_customer_as_of(submission.clone(), today())
        .expect("pipeline returns");

    let saved = customers.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].firstname, submission.firstname);
    assert_eq!(saved[0].surname, submission.surname);
    assert_eq!(saved[0].email_address, submission.email_address);
    assert_eq!(saved[0].date_of_birth, submission.date_of_birth);
    assert_eq!(saved[0].company.name, "Acme Logistics");
}

#[test]
fn repeated_submissions_run_the_full_pipeline_each_time() {
    let bureau = Arc::new(RecordingBureau::with_limit(600));
    let (service, companies, customers) = build_service(company("Acme Logistics"), bureau.clone());

    for _ in 0..2 {
        let accepted = service
            .add_customer_as_of(request(), today())
            .expect("pipeline returns");
        assert!(accepted);
    }

    assert_eq!(companies.lookups().len(), 2);
    assert_eq!(customers.saved().len(), 2);
    assert_eq!(bureau.opened(), 2);
}

#[test]
fn bureau_failure_propagates_and_leaves_no_customer_recorded() {
    let bureau = Arc::new(RecordingBureau::failing_lookup());
    let (service, _, customers) = build_service(company("Acme Logistics"), bureau.clone());

    match service.add_customer_as_of(request(), today()) {
        Err(OnboardingError::CreditBureau(_)) => {}
        other => panic!("expected bureau failure, got {other:?}"),
    }
    assert!(customers.saved().is_empty());
    assert_eq!(bureau.released(), 1);
}

#[test]
fn missing_company_propagates_as_repository_error() {
    let bureau = Arc::new(RecordingBureau::with_limit(600));
    let companies = Arc::new(MissingCompanies);
    let customers = Arc::new(MemoryCustomers::default());
    let service = OnboardingService::new(companies, customers.clone(), bureau, credit_policy());

    match service.add_customer_as_of(request(), today()) {
        Err(OnboardingError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected missing company error, got {other:?}"),
    }
    assert!(customers.saved().is_empty());
}

#[test]
fn persistence_failure_propagates() {
    let bureau = Arc::new(RecordingBureau::with_limit(600));
    let companies = Arc::new(MemoryCompanies::returning(company("Acme Logistics")));
    let customers = Arc::new(UnavailableCustomers);
    let service = OnboardingService::new(companies, customers, bureau, credit_policy());

    match service.add_customer_as_of(request(), today()) {
        Err(OnboardingError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected persistence failure, got {other:?}"),
    }
}
