//! Store error types.

use haulbook_core::ledger::LedgerError;
use haulbook_core::party::PartyRole;
use haulbook_shared::AppError;
use haulbook_shared::types::{OpeningBalanceId, PartyId};
use thiserror::Error;

/// Result type alias using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while reading or writing ledger data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Party does not exist in the store.
    #[error("Party not found: {0}")]
    PartyNotFound(PartyId),

    /// Opening balance line does not exist.
    #[error("Opening balance not found: {0}")]
    OpeningBalanceNotFound(OpeningBalanceId),

    /// Capital movements can only be recorded for administration parties.
    #[error("Party {0} is not an administration party")]
    NotAdministration(PartyId),

    /// A delivery names a party in a slot its role does not fill.
    #[error("Party {party_id} is a {actual}, expected a {expected}")]
    RoleMismatch {
        /// The party.
        party_id: PartyId,
        /// Role the slot requires.
        expected: PartyRole,
        /// Role the party is registered with.
        actual: PartyRole,
    },

    /// Dataset file could not be read or written.
    #[error("Dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset file is not valid JSON for the expected shape.
    #[error("Dataset format error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record or request broke a ledger rule.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl StoreError {
    /// Returns the error code for logs and exit status.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PartyNotFound(_) => "PARTY_NOT_FOUND",
            Self::OpeningBalanceNotFound(_) => "OPENING_BALANCE_NOT_FOUND",
            Self::NotAdministration(_) => "NOT_ADMINISTRATION_PARTY",
            Self::RoleMismatch { .. } => "PARTY_ROLE_MISMATCH",
            Self::Io(_) => "DATASET_IO_ERROR",
            Self::Json(_) => "DATASET_FORMAT_ERROR",
            Self::Ledger(err) => err.error_code(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PartyNotFound(_) | StoreError::OpeningBalanceNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            StoreError::NotAdministration(_) | StoreError::RoleMismatch { .. } => {
                Self::BusinessRule(err.to_string())
            }
            StoreError::Ledger(err) => err.into(),
            StoreError::Json(err) => Self::Validation(err.to_string()),
            StoreError::Io(_) => Self::Store(err.to_string()),
        }
    }
}
