use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::audit::AuditReport;
use crate::block::Block;
use crate::error::LedgerError;
use crate::ledger::ThreatLedger;

/// Thread-safe handle to a single threat ledger.
///
/// `append` holds the write lock across the read-last / hash / push sequence,
/// so concurrent writers can never fork the chain. `verify` and `export` share
/// the read lock and never observe a half-finished append.
pub struct SharedLedger {
    inner: RwLock<ThreatLedger>,
}

impl SharedLedger {
    pub fn new(ledger: ThreatLedger) -> Self {
        Self {
            inner: RwLock::new(ledger),
        }
    }

    pub fn append<T: Serialize + ?Sized>(&self, entry: &T) -> Result<Block, LedgerError> {
        self.write()?.append(entry)
    }

    pub fn verify(&self) -> Result<bool, LedgerError> {
        Ok(self.read()?.verify())
    }

    pub fn export(&self) -> Result<Vec<Block>, LedgerError> {
        Ok(self.read()?.export())
    }

    pub fn audit(&self) -> Result<AuditReport, LedgerError> {
        Ok(self.read()?.audit())
    }

    pub fn head(&self) -> Result<Option<Block>, LedgerError> {
        Ok(self.read()?.head())
    }

    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.len())
    }

    /// Unwrap the inner ledger.
    pub fn into_inner(self) -> Result<ThreatLedger, LedgerError> {
        self.inner.into_inner().map_err(|_| LedgerError::LockPoisoned)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ThreatLedger>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ThreatLedger>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}
