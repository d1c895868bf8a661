//! Foundation types for the SentinelSecure threat ledger.
//!
//! Every other `sentinel-*` crate depends on `sentinel-types`.
//!
//! # Key Types
//!
//! - [`BlockHash`]: SHA-256 digest that identifies a sealed block
//! - [`PrevHash`]: back-reference to the previous block, or the genesis sentinel
//! - [`EventType`]: tag separating the genesis block from logged intrusions
//! - [`Timestamp`] and [`Clock`]: fractional UNIX seconds captured at append time

pub mod error;
pub mod event;
pub mod hash;
pub mod temporal;

pub use error::TypeError;
pub use event::EventType;
pub use hash::{BlockHash, PrevHash, GENESIS_PREV_HASH};
pub use temporal::{Clock, FixedClock, SystemClock, Timestamp};
