use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Minimum applicant age accepted at intake.
const MINIMUM_AGE_YEARS: i32 = 21;

/// Identifier wrapper for companies known to the company directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub i64);

/// Immutable company snapshot fetched once per onboarding attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
}

/// Inbound submission for a prospective customer.
///
/// Created by the caller, validated once, and consumed when the pipeline
/// maps it into a [`Customer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomerRequest {
    pub firstname: String,
    pub surname: String,
    pub date_of_birth: NaiveDate,
    pub email_address: String,
    pub company_id: CompanyId,
}

impl NewCustomerRequest {
    /// Structural validation of the submission as of `today`.
    ///
    /// The date is injected so callers control the clock; the HTTP and CLI
    /// boundaries pass `Local::now().date_naive()`.
    pub fn is_valid(&self, today: NaiveDate) -> bool {
        self.has_complete_name() && self.has_plausible_email() && self.meets_minimum_age(today)
    }

    fn has_complete_name(&self) -> bool {
        !self.firstname.is_empty() && !self.surname.is_empty()
    }

    // Intentionally permissive: presence of '@' and '.' only.
    fn has_plausible_email(&self) -> bool {
        self.email_address.contains('@') && self.email_address.contains('.')
    }

    fn meets_minimum_age(&self, today: NaiveDate) -> bool {
        self.age_on(today) >= MINIMUM_AGE_YEARS
    }

    /// Exact elapsed years: the calendar-year difference, minus one when
    /// today's month/day falls before the birthday's month/day.
    fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.date_of_birth.year();
        if (today.month(), today.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            age -= 1;
        }
        age
    }
}

/// Customer flowing through the onboarding pipeline.
///
/// Constructed from a validated request plus the company snapshot; the
/// credit fields keep their defaults until the credit resolution step
/// writes them, after which the value is handed to persistence unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub firstname: String,
    pub surname: String,
    pub email_address: String,
    pub date_of_birth: NaiveDate,
    pub company: Company,
    pub credit_limit: i64,
    pub has_credit_limit: bool,
}

impl Customer {
    pub fn from_request(request: NewCustomerRequest, company: Company) -> Self {
        Self {
            firstname: request.firstname,
            surname: request.surname,
            email_address: request.email_address,
            date_of_birth: request.date_of_birth,
            company,
            credit_limit: 0,
            has_credit_limit: false,
        }
    }
}
