use chrono::NaiveDate;

/// Error raised by the remote credit bureau collaborator.
#[derive(Debug, thiserror::Error)]
pub enum CreditBureauError {
    #[error("credit bureau unavailable: {0}")]
    Unavailable(String),
    #[error("credit bureau rejected the lookup: {0}")]
    Lookup(String),
}

/// Factory handing out scoped sessions against the remote credit bureau.
///
/// The gateway itself is a stateless, shareable collaborator; each credit
/// check opens its own session immediately before the call.
pub trait CreditBureauGateway: Send + Sync {
    fn open_session(&self) -> Result<Box<dyn CreditBureauSession>, CreditBureauError>;
}

/// Live connection to the bureau for a single lookup.
///
/// Dropping the session releases the underlying connection, so callers
/// keep it inside the narrowest scope around the call and release happens
/// on every exit path, including lookup failure.
pub trait CreditBureauSession {
    fn credit_limit(
        &mut self,
        firstname: &str,
        surname: &str,
        date_of_birth: NaiveDate,
    ) -> Result<i64, CreditBureauError>;
}
