use std::fmt;

use serde::{Deserialize, Serialize};

use crate::label::Verdict;

/// Response an analyst is advised to take for a classified flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseAction {
    #[serde(rename = "BLOCK")]
    Block,
    #[serde(rename = "QUARANTINE")]
    Quarantine,
    #[serde(rename = "ALERT")]
    Alert,
    #[serde(rename = "ALLOW")]
    Allow,
    #[serde(rename = "ALLOW (monitor)")]
    AllowMonitor,
}

impl ResponseAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "BLOCK",
            Self::Quarantine => "QUARANTINE",
            Self::Alert => "ALERT",
            Self::Allow => "ALLOW",
            Self::AllowMonitor => "ALLOW (monitor)",
        }
    }
}

impl fmt::Display for ResponseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence cut-offs for [`recommend_action`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionThresholds {
    /// Intrusions at or above this score are blocked.
    pub block: f64,
    /// Intrusions at or above this score (and below `block`) are quarantined.
    pub quarantine: f64,
    /// Benign flows at or above this score are allowed without monitoring.
    pub allow: f64,
}

impl Default for ActionThresholds {
    fn default() -> Self {
        Self {
            block: 0.9,
            quarantine: 0.7,
            allow: 0.9,
        }
    }
}

/// Pick a response for a verdict and its (optional) confidence score.
///
/// An intrusion with no score is blocked outright.
pub fn recommend_action(
    verdict: Verdict,
    score: Option<f64>,
    thresholds: &ActionThresholds,
) -> ResponseAction {
    match (verdict, score) {
        (Verdict::Intrusion, None) => ResponseAction::Block,
        (Verdict::Intrusion, Some(s)) if s >= thresholds.block => ResponseAction::Block,
        (Verdict::Intrusion, Some(s)) if s >= thresholds.quarantine => ResponseAction::Quarantine,
        (Verdict::Intrusion, Some(_)) => ResponseAction::Alert,
        (Verdict::Benign, Some(s)) if s >= thresholds.allow => ResponseAction::Allow,
        (Verdict::Benign, _) => ResponseAction::AllowMonitor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommend(verdict: Verdict, score: Option<f64>) -> ResponseAction {
        recommend_action(verdict, score, &ActionThresholds::default())
    }

    #[test]
    fn intrusion_tiers() {
        assert_eq!(recommend(Verdict::Intrusion, Some(0.97)), ResponseAction::Block);
        assert_eq!(recommend(Verdict::Intrusion, Some(0.9)), ResponseAction::Block);
        assert_eq!(recommend(Verdict::Intrusion, Some(0.75)), ResponseAction::Quarantine);
        assert_eq!(recommend(Verdict::Intrusion, Some(0.7)), ResponseAction::Quarantine);
        assert_eq!(recommend(Verdict::Intrusion, Some(0.4)), ResponseAction::Alert);
        assert_eq!(recommend(Verdict::Intrusion, None), ResponseAction::Block);
    }

    #[test]
    fn benign_tiers() {
        assert_eq!(recommend(Verdict::Benign, Some(0.95)), ResponseAction::Allow);
        assert_eq!(recommend(Verdict::Benign, Some(0.6)), ResponseAction::AllowMonitor);
        assert_eq!(recommend(Verdict::Benign, None), ResponseAction::AllowMonitor);
    }

    #[test]
    fn custom_thresholds() {
        let strict = ActionThresholds {
            block: 0.5,
            quarantine: 0.3,
            allow: 0.99,
        };
        assert_eq!(
            recommend_action(Verdict::Intrusion, Some(0.6), &strict),
            ResponseAction::Block
        );
        assert_eq!(
            recommend_action(Verdict::Benign, Some(0.95), &strict),
            ResponseAction::AllowMonitor
        );
    }

    #[test]
    fn wire_names() {
        assert_eq!(
            serde_json::to_string(&ResponseAction::AllowMonitor).unwrap(),
            "\"ALLOW (monitor)\""
        );
        assert_eq!(ResponseAction::Quarantine.to_string(), "QUARANTINE");
    }

    #[test]
    fn thresholds_from_partial_toml() {
        let thresholds: ActionThresholds = toml::from_str("block = 0.8").unwrap();
        assert_eq!(thresholds.block, 0.8);
        assert_eq!(thresholds.quarantine, 0.7);
    }
}
