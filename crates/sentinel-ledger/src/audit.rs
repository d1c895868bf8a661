use sentinel_types::{EventType, PrevHash};
use tracing::warn;

use crate::block::Block;

/// Result of a full chain audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub block_count: u64,
    pub genesis_valid: bool,
    pub indices_contiguous: bool,
    pub links_valid: bool,
    pub hashes_valid: bool,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Position of the earliest violation, if any.
    pub fn first_violation(&self) -> Option<usize> {
        self.violations.iter().map(|v| v.position).min()
    }
}

/// A specific integrity violation detected during an audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Position of the offending block within the audited sequence.
    pub position: usize,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// First block is not a well-formed genesis block.
    BadGenesis,
    /// Stored index differs from the block's position.
    IndexGap,
    /// `prev_hash` does not name the previous block's hash.
    BrokenLink,
    /// Stored hash differs from the recomputed one.
    HashMismatch,
    /// Stored content can no longer be canonically encoded.
    Unencodable,
}

/// Chain integrity auditor.
///
/// Unlike `ThreatLedger::verify`, the auditor never stops early. It also
/// checks the genesis block and index continuity, which makes it suitable for
/// pinpointing where an exported copy was altered.
pub struct ChainAuditor;

impl ChainAuditor {
    pub fn audit(blocks: &[Block]) -> AuditReport {
        let mut violations = Vec::new();
        let mut genesis_valid = true;
        let mut indices_contiguous = true;
        let mut links_valid = true;
        let mut hashes_valid = true;

        match blocks.first() {
            None => {
                genesis_valid = false;
                violations.push(Violation {
                    position: 0,
                    kind: ViolationKind::BadGenesis,
                    description: "chain has no genesis block".into(),
                });
            }
            Some(first) => {
                if first.event_type != EventType::Genesis || !first.prev_hash.is_genesis() {
                    genesis_valid = false;
                    violations.push(Violation {
                        position: 0,
                        kind: ViolationKind::BadGenesis,
                        description: format!(
                            "first block has event_type {} and prev_hash {}",
                            first.event_type, first.prev_hash
                        ),
                    });
                }
            }
        }

        for (position, block) in blocks.iter().enumerate() {
            if block.index != position as u64 {
                indices_contiguous = false;
                violations.push(Violation {
                    position,
                    kind: ViolationKind::IndexGap,
                    description: format!("expected index {position}, found {}", block.index),
                });
            }

            match block.compute_hash() {
                Ok(h) if h == block.hash => {}
                Ok(_) => {
                    hashes_valid = false;
                    violations.push(Violation {
                        position,
                        kind: ViolationKind::HashMismatch,
                        description: "stored hash does not match recomputed hash".into(),
                    });
                }
                Err(e) => {
                    hashes_valid = false;
                    violations.push(Violation {
                        position,
                        kind: ViolationKind::Unencodable,
                        description: e.to_string(),
                    });
                }
            }

            if position == 0 {
                continue;
            }
            let prev = &blocks[position - 1];
            if block.prev_hash != PrevHash::Block(prev.hash) {
                links_valid = false;
                violations.push(Violation {
                    position,
                    kind: ViolationKind::BrokenLink,
                    description: format!(
                        "prev_hash {} does not match hash {} of block at position {}",
                        block.prev_hash,
                        prev.hash,
                        position - 1
                    ),
                });
            }
        }

        if !violations.is_empty() {
            warn!(count = violations.len(), "chain audit found violations");
        }

        AuditReport {
            block_count: blocks.len() as u64,
            genesis_valid,
            indices_contiguous,
            links_valid,
            hashes_valid,
            violations,
        }
    }
}
