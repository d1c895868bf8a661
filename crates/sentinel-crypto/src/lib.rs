//! Cryptographic primitives for the SentinelSecure threat ledger.
//!
//! Provides the deterministic JSON encoding that block hashes commit to,
//! SHA-256 block hashing, and hash chain verification.
//!
//! All crypto operations wrap established libraries. There is no custom cryptography.

pub mod canonical;
pub mod chain;
mod finite;
pub mod hasher;

pub use canonical::{encode, encode_value, to_value, EncodingError};
pub use chain::{ChainError, ChainLink, HashChainVerifier};
pub use finite::ensure_finite;
pub use hasher::BlockHasher;
