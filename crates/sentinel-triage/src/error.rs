use sentinel_ledger::LedgerError;

/// Errors produced while triaging classifier output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriageError {
    #[error("confidence must be a finite value in [0, 1], got {0}")]
    InvalidConfidence(f64),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
