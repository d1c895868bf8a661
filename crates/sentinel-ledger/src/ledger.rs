use sentinel_crypto::HashChainVerifier;
use sentinel_types::{Clock, EventType, PrevHash, SystemClock};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::audit::{AuditReport, ChainAuditor};
use crate::block::{to_entry, Block, Entry};
use crate::config::LedgerConfig;
use crate::error::LedgerError;

/// In-memory, append-only chain of hash-linked blocks.
///
/// Construction always creates the genesis block, so no caller ever sees an
/// empty chain. Appends take `&mut self`; wrap the ledger in a
/// [`SharedLedger`](crate::SharedLedger) to share it across threads.
pub struct ThreatLedger {
    config: LedgerConfig,
    clock: Box<dyn Clock>,
    blocks: Vec<Block>,
}

impl ThreatLedger {
    /// Create a ledger stamped by the system clock.
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Create a ledger that stamps blocks using `clock`.
    pub fn with_clock(config: LedgerConfig, clock: Box<dyn Clock>) -> Result<Self, LedgerError> {
        let mut ledger = Self {
            config,
            clock,
            blocks: Vec::new(),
        };
        ledger.ensure_initialized()?;
        Ok(ledger)
    }

    /// Create the genesis block if the chain is empty. No-op otherwise.
    fn ensure_initialized(&mut self) -> Result<(), LedgerError> {
        if !self.blocks.is_empty() {
            return Ok(());
        }

        let mut data = Entry::new();
        data.insert(
            "info".to_string(),
            Value::String(self.config.genesis_info.clone()),
        );
        let genesis = Block::seal(
            0,
            self.clock.now(),
            EventType::Genesis,
            data,
            PrevHash::Genesis,
        )?;
        info!(hash = %genesis.hash.short_hex(), "threat ledger genesis created");
        self.blocks.push(genesis);
        Ok(())
    }

    /// Append an intrusion entry as a new block and return a copy of it.
    ///
    /// The entry is any value that serializes to a string-keyed mapping. If it
    /// cannot be encoded, nothing is appended. NaN and infinite numbers are
    /// rejected.
    ///
    /// Set-like data must use `BTreeSet` / `BTreeMap`. A `HashSet` serializes
    /// as a sequence in iteration order, so equal sets can hash differently.
    pub fn append<T: Serialize + ?Sized>(&mut self, entry: &T) -> Result<Block, LedgerError> {
        self.ensure_initialized()?;
        let data = to_entry(entry)?;

        let last = self.blocks.last().ok_or(LedgerError::EmptyChain)?;
        let block = Block::seal(
            last.index + 1,
            self.clock.now(),
            EventType::IntrusionLog,
            data,
            PrevHash::Block(last.hash),
        )?;

        debug!(index = block.index, hash = %block.hash.short_hex(), "appended block");
        self.blocks.push(block.clone());
        Ok(block)
    }

    /// Re-scan the whole chain. Returns `false` on the first block whose
    /// content or back-link no longer matches.
    pub fn verify(&self) -> bool {
        match HashChainVerifier::verify_chain(&self.blocks) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "threat ledger verification failed");
                false
            }
        }
    }

    /// Copy of the full chain, genesis first.
    pub fn export(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    /// Full integrity report listing every violation in the chain.
    pub fn audit(&self) -> AuditReport {
        ChainAuditor::audit(&self.blocks)
    }

    /// Copy of the most recent block.
    pub fn head(&self) -> Option<Block> {
        self.blocks.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}
