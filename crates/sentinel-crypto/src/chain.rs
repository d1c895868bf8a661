use sentinel_types::{BlockHash, PrevHash};

use crate::canonical::EncodingError;

/// Trait for records that participate in a hash chain.
pub trait ChainLink {
    /// The hash stored on the record when it was sealed.
    fn stored_hash(&self) -> BlockHash;
    /// Back-reference to the previous record.
    fn prev_hash(&self) -> PrevHash;
    /// Recompute the hash from the record's stored core fields.
    fn recompute_hash(&self) -> Result<BlockHash, EncodingError>;
}

/// Hash chain integrity verifier.
///
/// The first record anchors the chain and is taken as given. Every later
/// record must re-hash to its stored hash and must point at the stored hash
/// of the record before it.
pub struct HashChainVerifier;

impl HashChainVerifier {
    /// Verify a chain, stopping at the first failing record.
    pub fn verify_chain(links: &[impl ChainLink]) -> Result<(), ChainError> {
        for i in 1..links.len() {
            let current = &links[i];

            let computed = current
                .recompute_hash()
                .map_err(|_| ChainError::Unencodable { index: i })?;
            if computed != current.stored_hash() {
                return Err(ChainError::HashMismatch { index: i });
            }

            let expected_prev = links[i - 1].stored_hash();
            match current.prev_hash() {
                PrevHash::Block(prev) if prev == expected_prev => {}
                PrevHash::Block(_) => return Err(ChainError::BrokenLink { index: i }),
                PrevHash::Genesis => return Err(ChainError::MissingPrevHash { index: i }),
            }
        }

        Ok(())
    }

    /// Boolean form of [`HashChainVerifier::verify_chain`].
    pub fn is_valid(links: &[impl ChainLink]) -> bool {
        Self::verify_chain(links).is_ok()
    }
}

/// Errors from chain verification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("hash mismatch at index {index}: computed hash differs from stored")]
    HashMismatch { index: usize },

    #[error("broken link at index {index}: prev_hash does not match")]
    BrokenLink { index: usize },

    #[error("missing prev_hash at index {index} (should reference previous block)")]
    MissingPrevHash { index: usize },

    #[error("block at index {index} can no longer be canonically encoded")]
    Unencodable { index: usize },
}

impl ChainError {
    /// Position of the first failing record.
    pub fn index(&self) -> usize {
        match self {
            Self::HashMismatch { index }
            | Self::BrokenLink { index }
            | Self::MissingPrevHash { index }
            | Self::Unencodable { index } => *index,
        }
    }
}
