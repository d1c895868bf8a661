use serde::{Deserialize, Serialize};

/// Marker text stored in the genesis block unless configured otherwise.
pub const DEFAULT_GENESIS_INFO: &str = "SentinelSecure threat ledger genesis block";

/// Configuration for a threat ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Text recorded as `data.info` in the genesis block.
    pub genesis_info: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            genesis_info: DEFAULT_GENESIS_INFO.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(LedgerConfig::default().genesis_info, DEFAULT_GENESIS_INFO);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: LedgerConfig = toml::from_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn genesis_info_is_configurable() {
        let config: LedgerConfig = toml::from_str(r#"genesis_info = "soc-east""#).unwrap();
        assert_eq!(config.genesis_info, "soc-east");
    }
}
