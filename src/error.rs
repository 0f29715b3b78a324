// Ledger error taxonomy
//
// Every failure is either a deterministic rejection of bad input or a hard
// storage fault; there is no retry logic anywhere in this system. Validation
// errors are always raised before any persistence attempt.
//
// Deleting a nonexistent id is NOT an error: it is an expected outcome,
// reported as `Ok(false)` from `LedgerService::remove`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// A required add field (`tipo`, `categoria`, `monto`) was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// `monto` could not be interpreted as a number.
    #[error("monto is not a number")]
    TypeConversion,

    /// `tipo` was something other than "ingreso" or "gasto".
    #[error("invalid tipo {0:?}: expected \"ingreso\" or \"gasto\"")]
    InvalidType(String),

    /// The magnitude was negative or non-finite. Sign comes from `tipo`;
    /// accepting a negative monto would silently invert the totals.
    #[error("monto must be a non-negative finite number, got {0}")]
    InvalidAmount(f64),

    /// Strict category policy only: `categoria` is not in the published set.
    #[error("unknown categoria {0:?}")]
    UnknownCategory(String),

    /// Underlying SQLite fault. Propagated to the caller as a server-side
    /// error; never retried.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl LedgerError {
    /// True for deterministic input rejections, false for storage faults.
    /// Transports map client errors to 4xx-style responses and storage
    /// faults to server-side failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, LedgerError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_vs_server_errors() {
        assert!(LedgerError::MissingField("monto").is_client_error());
        assert!(LedgerError::TypeConversion.is_client_error());
        assert!(LedgerError::InvalidType("transfer".into()).is_client_error());
        assert!(LedgerError::InvalidAmount(-1.0).is_client_error());
        assert!(LedgerError::UnknownCategory("x".into()).is_client_error());
        assert!(!LedgerError::Storage(rusqlite::Error::InvalidQuery).is_client_error());
    }

    #[test]
    fn test_error_messages_name_the_wire_field() {
        assert_eq!(
            LedgerError::MissingField("tipo").to_string(),
            "missing required field: tipo"
        );
        assert!(LedgerError::InvalidType("abc".into())
            .to_string()
            .contains("ingreso"));
    }
}
