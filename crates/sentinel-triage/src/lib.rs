//! Upstream producers for the SentinelSecure threat ledger.
//!
//! The classifier itself lives outside this workspace. This crate takes its
//! per-flow output (raw prediction, optional score, feature record), decides
//! the verdict and the recommended response, and packages intrusions into
//! ledger entries.

pub mod action;
pub mod commit;
pub mod confidence;
pub mod entry;
pub mod error;
pub mod label;

pub use action::{recommend_action, ActionThresholds, ResponseAction};
pub use commit::{commit_flow, commit_intrusions, BlockReceipt, ClassifiedFlow, CommitSummary};
pub use confidence::confidence_from_probabilities;
pub use entry::{feature_record, IntrusionEntry, BOOKKEEPING_KEYS};
pub use error::TriageError;
pub use label::{normalize_label, normalize_label_str, Verdict};
