use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::Deserialize;

use super::domain::{CompanyId, NewCustomerRequest};
use super::repository::{CompanyRepository, CustomerRepository};
use super::service::{OnboardingError, OnboardingService};

/// Error raised while loading or replaying a customer export.
#[derive(Debug, thiserror::Error)]
pub enum BatchIntakeError {
    #[error("failed to read customer export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid customer CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {message}")]
    Row { row: usize, message: String },
    #[error(transparent)]
    Onboarding(#[from] OnboardingError),
}

/// Outcome of one batch row, keyed back to the source line so operators
/// can reconcile the export against what was onboarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub row: usize,
    pub applicant: String,
    pub accepted: bool,
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    #[serde(rename = "Firstname")]
    firstname: String,
    #[serde(rename = "Surname")]
    surname: String,
    #[serde(rename = "Date Of Birth")]
    date_of_birth: String,
    #[serde(rename = "Email")]
    email_address: String,
    #[serde(rename = "Company Id")]
    company_id: i64,
}

/// Parse a customer export into intake requests.
///
/// Rows are positional (1-based, excluding the header) so failures point
/// operators at the offending line. No row is skipped silently.
pub fn requests_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<NewCustomerRequest>, BatchIntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut requests = Vec::new();

    for (index, record) in csv_reader.deserialize::<CustomerRow>().enumerate() {
        let row = record?;
        let date_of_birth = NaiveDate::parse_from_str(&row.date_of_birth, "%Y-%m-%d").map_err(
            |err| BatchIntakeError::Row {
                row: index + 1,
                message: format!("invalid date of birth '{}' ({err})", row.date_of_birth),
            },
        )?;

        requests.push(NewCustomerRequest {
            firstname: row.firstname,
            surname: row.surname,
            date_of_birth,
            email_address: row.email_address,
            company_id: CompanyId(row.company_id),
        });
    }

    Ok(requests)
}

pub fn requests_from_path(
    path: impl AsRef<Path>,
) -> Result<Vec<NewCustomerRequest>, BatchIntakeError> {
    let file = File::open(path)?;
    requests_from_reader(file)
}

/// Replay a parsed export through the onboarding service.
///
/// Each row runs the full pipeline independently; a collaborator failure
/// aborts the batch, while per-row accept/reject outcomes are collected
/// for reporting.
pub fn onboard_all<C, R>(
    service: &OnboardingService<C, R>,
    requests: Vec<NewCustomerRequest>,
) -> Result<Vec<BatchOutcome>, BatchIntakeError>
where
    C: CompanyRepository + 'static,
    R: CustomerRepository + 'static,
{
    let today = Local::now().date_naive();
    let mut outcomes = Vec::with_capacity(requests.len());

    for (index, request) in requests.into_iter().enumerate() {
        let applicant = format!("{} {}", request.firstname, request.surname);
        let accepted = service.add_customer_as_of(request, today)?;
        outcomes.push(BatchOutcome {
            row: index + 1,
            applicant,
            accepted,
        });
    }

    Ok(outcomes)
}
