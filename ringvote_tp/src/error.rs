use thiserror::Error;

/// How the host ledger should treat a failed operation.
///
/// Invalid transactions are the submitter's fault and final; internal
/// errors mean the peer could not serve the request and the host may
/// retry the transaction.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<ringvote::Error> for ApplyError {
    fn from(err: ringvote::Error) -> Self {
        match err {
            ringvote::Error::StorageFailure(_) => ApplyError::InternalError(err.to_string()),
            _ => ApplyError::InvalidTransaction(err.to_string()),
        }
    }
}
