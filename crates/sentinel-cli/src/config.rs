use std::path::Path;

use anyhow::Context;
use sentinel_ledger::LedgerConfig;
use sentinel_triage::ActionThresholds;
use serde::{Deserialize, Serialize};

/// Operator configuration, loaded from an optional TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    pub ledger: LedgerConfig,
    pub thresholds: ActionThresholds,
}

impl SentinelConfig {
    /// Read `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
