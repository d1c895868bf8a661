use sentinel_crypto::EncodingError;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("entry cannot be encoded deterministically: {0}")]
    Encoding(String),

    #[error("chain has no blocks; the genesis block was never created")]
    EmptyChain,

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl From<EncodingError> for LedgerError {
    fn from(err: EncodingError) -> Self {
        Self::Encoding(err.to_string())
    }
}
