//! Append-only threat ledger for SentinelSecure.
//!
//! This crate is the core of the system. It provides:
//! - [`Block`]: an immutable, hash-committed record of one security event
//! - [`ThreatLedger`]: the owned chain with append / verify / export
//! - [`SharedLedger`]: a lock-guarded wrapper for multi-threaded hosts
//! - [`ChainAuditor`]: a full, non-short-circuiting integrity report

pub mod audit;
pub mod block;
pub mod config;
pub mod error;
pub mod ledger;
pub mod shared;

pub use audit::{AuditReport, ChainAuditor, Violation, ViolationKind};
pub use block::{Block, Entry};
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use ledger::ThreatLedger;
pub use shared::SharedLedger;
