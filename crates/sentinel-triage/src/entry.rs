use sentinel_ledger::Entry;
use serde::{Deserialize, Serialize};

use crate::action::ResponseAction;
use crate::confidence::validate_confidence;
use crate::error::TriageError;
use crate::label::Verdict;

/// Result-table columns that describe the prediction rather than the flow.
pub const BOOKKEEPING_KEYS: &[&str] = &["prediction_raw", "label", "score", "recommended_action"];

/// Ledger entry describing one triaged flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntrusionEntry {
    pub flow_index: u64,
    pub label: Verdict,
    pub recommended_action: ResponseAction,
    /// Serialized as `null` when the model gave no score.
    pub confidence: Option<f64>,
    pub features: Entry,
}

impl IntrusionEntry {
    pub fn new(
        flow_index: u64,
        label: Verdict,
        recommended_action: ResponseAction,
        confidence: Option<f64>,
        features: Entry,
    ) -> Result<Self, TriageError> {
        let confidence = confidence.map(validate_confidence).transpose()?;
        Ok(Self {
            flow_index,
            label,
            recommended_action,
            confidence,
            features,
        })
    }

    /// Same entry with the prediction bookkeeping dropped from `features`.
    pub fn without_bookkeeping(mut self) -> Self {
        self.features = feature_record(&self.features);
        self
    }
}

/// Copy of a flow's columns without the prediction bookkeeping.
pub fn feature_record(row: &Entry) -> Entry {
    row.iter()
        .filter(|(key, _)| !BOOKKEEPING_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn row() -> Entry {
        match json!({
            "protocol_type": "tcp",
            "service": "http",
            "src_bytes": 181,
            "label": "Intrusion",
            "score": 0.97,
            "prediction_raw": 1,
            "recommended_action": "BLOCK"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn feature_record_drops_bookkeeping() {
        let features = feature_record(&row());
        let mut keys: Vec<&str> = features.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["protocol_type", "service", "src_bytes"]);
    }

    #[test]
    fn entry_shape_matches_ledger_contract() {
        let entry = IntrusionEntry::new(
            42,
            Verdict::Intrusion,
            ResponseAction::Block,
            Some(0.97),
            row(),
        )
        .unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["flow_index"], json!(42));
        assert_eq!(value["label"], json!("Intrusion"));
        assert_eq!(value["recommended_action"], json!("BLOCK"));
        assert_eq!(value["confidence"], json!(0.97));
        assert_eq!(value["features"]["service"], json!("http"));
        assert_eq!(value["features"]["score"], json!(0.97));
    }

    #[test]
    fn without_bookkeeping_keeps_flow_columns() {
        let entry = IntrusionEntry::new(
            42,
            Verdict::Intrusion,
            ResponseAction::Block,
            Some(0.97),
            row(),
        )
        .unwrap()
        .without_bookkeeping();
        assert_eq!(entry.features, feature_record(&row()));
        assert_eq!(entry.confidence, Some(0.97));
    }

    #[test]
    fn missing_confidence_is_null() {
        let entry = IntrusionEntry::new(
            0,
            Verdict::Intrusion,
            ResponseAction::Block,
            None,
            Entry::new(),
        )
        .unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["confidence"], Value::Null);
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let err = IntrusionEntry::new(
            0,
            Verdict::Intrusion,
            ResponseAction::Block,
            Some(f64::INFINITY),
            Entry::new(),
        )
        .unwrap_err();
        assert!(matches!(err, TriageError::InvalidConfidence(_)));
    }
}
