//! Error types for lookout-events

use crate::kind::ObservationKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A value crossing a boundary matched none of the defined kind tags.
    /// Never coerced to a default kind; the caller decides what to do.
    #[error("invalid observation kind: {token:?}")]
    InvalidKind { token: String },

    /// A dispatch table was built without a handler for a defined kind.
    /// Programming/integration error, fatal to dispatcher setup.
    #[error("no handler registered for observation kind '{0}'")]
    MissingHandler(ObservationKind),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_kind(token: impl Into<String>) -> Self {
        Self::InvalidKind {
            token: token.into(),
        }
    }
}
