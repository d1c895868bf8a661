use sentinel_ledger::{Block, Entry, ThreatLedger};
use sentinel_types::{BlockHash, PrevHash, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::action::{recommend_action, ActionThresholds, ResponseAction};
use crate::confidence::{confidence_from_probabilities, validate_confidence};
use crate::entry::IntrusionEntry;
use crate::error::TriageError;
use crate::label::{normalize_label, Verdict};

/// One row of classifier output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedFlow {
    /// Row position in the uploaded batch.
    pub flow_index: u64,
    /// Raw model output: `0`/`1`, or a class name such as `"normal"`.
    pub prediction: Value,
    /// Confidence of the predicted class, if the model reported one directly.
    #[serde(default)]
    pub score: Option<f64>,
    /// Class-probability vector, used when `score` is absent.
    #[serde(default)]
    pub probabilities: Vec<f64>,
    #[serde(default)]
    pub features: Entry,
}

impl ClassifiedFlow {
    pub fn verdict(&self) -> Verdict {
        normalize_label(&self.prediction)
    }

    /// Explicit score if present, otherwise the maximum class probability.
    pub fn confidence(&self) -> Result<Option<f64>, TriageError> {
        match self.score {
            Some(score) => validate_confidence(score).map(Some),
            None => confidence_from_probabilities(&self.probabilities),
        }
    }

    /// Build the ledger entry for this flow.
    pub fn to_entry(&self, thresholds: &ActionThresholds) -> Result<IntrusionEntry, TriageError> {
        let verdict = self.verdict();
        let confidence = self.confidence()?;
        let action = recommend_action(verdict, confidence, thresholds);
        IntrusionEntry::new(
            self.flow_index,
            verdict,
            action,
            confidence,
            self.features.clone(),
        )
    }
}

/// Outcome of committing a batch of flows.
#[derive(Clone, Debug, PartialEq)]
pub struct CommitSummary {
    /// Intrusions appended to the ledger.
    pub committed: usize,
    /// Benign flows left out.
    pub skipped: usize,
    /// Result of verifying the chain after the batch.
    pub chain_valid: bool,
    /// The appended blocks, in order.
    pub blocks: Vec<Block>,
}

/// Compact view of a freshly appended block for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlockReceipt {
    pub block_index: u64,
    pub timestamp: Timestamp,
    pub hash: BlockHash,
    pub prev_hash: PrevHash,
    pub recommended_action: ResponseAction,
    pub chain_valid: bool,
}

/// Append every flow judged an intrusion to the ledger.
///
/// All entries are built before the first append, so an invalid score
/// anywhere in the batch leaves the ledger untouched.
pub fn commit_intrusions(
    ledger: &mut ThreatLedger,
    flows: &[ClassifiedFlow],
    thresholds: &ActionThresholds,
) -> Result<CommitSummary, TriageError> {
    let mut entries = Vec::new();
    let mut skipped = 0;
    for flow in flows {
        if flow.verdict().is_intrusion() {
            entries.push(flow.to_entry(thresholds)?.without_bookkeeping());
        } else {
            skipped += 1;
        }
    }

    let mut blocks = Vec::with_capacity(entries.len());
    for entry in &entries {
        let block = ledger.append(entry)?;
        debug!(
            flow_index = entry.flow_index,
            index = block.index,
            action = %entry.recommended_action,
            "intrusion committed"
        );
        blocks.push(block);
    }

    let chain_valid = ledger.verify();
    info!(
        committed = blocks.len(),
        skipped, chain_valid, "intrusion batch committed"
    );

    Ok(CommitSummary {
        committed: blocks.len(),
        skipped,
        chain_valid,
        blocks,
    })
}

/// Log a single inspected flow, whatever its verdict, and report the new
/// block together with the chain's validity. The flow's columns are logged
/// as given.
pub fn commit_flow(
    ledger: &mut ThreatLedger,
    flow: &ClassifiedFlow,
    thresholds: &ActionThresholds,
) -> Result<BlockReceipt, TriageError> {
    let entry = flow.to_entry(thresholds)?;
    let block = ledger.append(&entry)?;
    Ok(BlockReceipt {
        block_index: block.index,
        timestamp: block.timestamp,
        hash: block.hash,
        prev_hash: block.prev_hash,
        recommended_action: entry.recommended_action,
        chain_valid: ledger.verify(),
    })
}
