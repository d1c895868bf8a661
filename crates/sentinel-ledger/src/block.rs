use sentinel_crypto::{canonical, BlockHasher, ChainLink, EncodingError};
use sentinel_types::{BlockHash, EventType, PrevHash, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LedgerError;

/// Caller-supplied payload stored verbatim in a block's `data` field.
///
/// The ledger never inspects it; it is only hashed and stored.
pub type Entry = Map<String, Value>;

/// One sealed record in the threat ledger.
///
/// `hash` commits to the other five fields. Blocks handed out by the ledger
/// are copies; editing one never touches the chain it came from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: Timestamp,
    pub event_type: EventType,
    pub data: Entry,
    pub prev_hash: PrevHash,
    pub hash: BlockHash,
}

/// The hashed part of a block: every field except `hash`.
#[derive(Serialize)]
struct BlockCore<'a> {
    index: u64,
    timestamp: Timestamp,
    event_type: EventType,
    data: &'a Entry,
    prev_hash: &'a PrevHash,
}

impl Block {
    /// Build a block from its core fields and attach the computed hash.
    pub fn seal(
        index: u64,
        timestamp: Timestamp,
        event_type: EventType,
        data: Entry,
        prev_hash: PrevHash,
    ) -> Result<Self, EncodingError> {
        let core = BlockCore {
            index,
            timestamp,
            event_type,
            data: &data,
            prev_hash: &prev_hash,
        };
        let hash = BlockHasher::hash_canonical(&core)?;
        Ok(Self {
            index,
            timestamp,
            event_type,
            data,
            prev_hash,
            hash,
        })
    }

    /// Canonical bytes of the core fields, exactly as they are fed to SHA-256.
    pub fn canonical_core(&self) -> Result<Vec<u8>, EncodingError> {
        canonical::encode(&self.core())
    }

    /// Recompute the hash from the stored core fields.
    pub fn compute_hash(&self) -> Result<BlockHash, EncodingError> {
        BlockHasher::hash_canonical(&self.core())
    }

    /// Returns `true` if the stored hash still matches the stored content.
    pub fn is_intact(&self) -> bool {
        self.compute_hash().is_ok_and(|h| h == self.hash)
    }

    pub fn is_genesis(&self) -> bool {
        self.event_type == EventType::Genesis
    }

    fn core(&self) -> BlockCore<'_> {
        BlockCore {
            index: self.index,
            timestamp: self.timestamp,
            event_type: self.event_type,
            data: &self.data,
            prev_hash: &self.prev_hash,
        }
    }
}

impl ChainLink for Block {
    fn stored_hash(&self) -> BlockHash {
        self.hash
    }

    fn prev_hash(&self) -> PrevHash {
        self.prev_hash
    }

    fn recompute_hash(&self) -> Result<BlockHash, EncodingError> {
        self.compute_hash()
    }
}

/// Turn any serializable mapping into an [`Entry`].
///
/// Fails if the value cannot be represented as JSON (for example non-string
/// map keys or a NaN score) or if it is not a mapping at the top level.
pub fn to_entry<T: Serialize + ?Sized>(entry: &T) -> Result<Entry, LedgerError> {
    match canonical::to_value(entry)? {
        Value::Object(map) => Ok(map),
        other => Err(LedgerError::Encoding(format!(
            "entry must be a mapping, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
