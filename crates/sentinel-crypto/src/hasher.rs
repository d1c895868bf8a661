use sentinel_types::BlockHash;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical::{self, EncodingError};

/// SHA-256 hasher over canonical block encodings.
///
/// There is no domain tag. A block hash is the plain digest of its canonical
/// core bytes, so anyone holding an exported chain can recompute it with
/// stock tooling.
pub struct BlockHasher;

impl BlockHasher {
    /// Hash raw bytes.
    pub fn digest(data: &[u8]) -> BlockHash {
        BlockHash::from_digest(Sha256::digest(data).into())
    }

    /// Canonically encode a serializable value and hash the result.
    pub fn hash_canonical<T: Serialize + ?Sized>(value: &T) -> Result<BlockHash, EncodingError> {
        let bytes = canonical::encode(value)?;
        Ok(Self::digest(&bytes))
    }

    /// Verify that data produces the expected hash.
    pub fn verify(data: &[u8], expected: &BlockHash) -> bool {
        Self::digest(data) == *expected
    }
}
