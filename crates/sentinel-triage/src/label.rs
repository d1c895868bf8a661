use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Two-class outcome of flow classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Intrusion,
    Benign,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intrusion => "Intrusion",
            Self::Benign => "Benign",
        }
    }

    pub fn is_intrusion(&self) -> bool {
        matches!(self, Self::Intrusion)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const INTRUSION_LABELS: &[&str] = &["1", "attack", "intrusion", "malicious", "anomaly", "bad"];

/// Map whatever the model emitted onto a [`Verdict`].
///
/// Numbers (and booleans) are truncated toward zero and compared with 1.
/// Strings are trimmed and matched case-insensitively against known attack
/// names. Anything unrecognised is treated as benign.
pub fn normalize_label(raw: &Value) -> Verdict {
    match raw {
        Value::Bool(b) => verdict_from_class(i64::from(*b)),
        Value::Number(n) => {
            let class = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64));
            class.map_or(Verdict::Benign, verdict_from_class)
        }
        Value::String(s) => normalize_label_str(s),
        _ => Verdict::Benign,
    }
}

/// String form of [`normalize_label`].
pub fn normalize_label_str(raw: &str) -> Verdict {
    let label = raw.trim().to_lowercase();
    if INTRUSION_LABELS.contains(&label.as_str()) {
        Verdict::Intrusion
    } else {
        Verdict::Benign
    }
}

fn verdict_from_class(class: i64) -> Verdict {
    if class == 1 {
        Verdict::Intrusion
    } else {
        Verdict::Benign
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numeric_predictions() {
        assert_eq!(normalize_label(&json!(1)), Verdict::Intrusion);
        assert_eq!(normalize_label(&json!(0)), Verdict::Benign);
        assert_eq!(normalize_label(&json!(1.0)), Verdict::Intrusion);
        assert_eq!(normalize_label(&json!(1.8)), Verdict::Intrusion);
        assert_eq!(normalize_label(&json!(2)), Verdict::Benign);
        assert_eq!(normalize_label(&json!(-1)), Verdict::Benign);
        assert_eq!(normalize_label(&json!(true)), Verdict::Intrusion);
    }

    #[test]
    fn string_predictions() {
        for raw in ["1", "attack", " Intrusion ", "MALICIOUS", "anomaly", "bad"] {
            assert_eq!(normalize_label(&json!(raw)), Verdict::Intrusion, "{raw}");
        }
        for raw in ["0", "normal", "Benign", "good"] {
            assert_eq!(normalize_label(&json!(raw)), Verdict::Benign, "{raw}");
        }
    }

    #[test]
    fn unknown_labels_are_benign() {
        assert_eq!(normalize_label(&json!("neptune")), Verdict::Benign);
        assert_eq!(normalize_label(&Value::Null), Verdict::Benign);
        assert_eq!(normalize_label(&json!([1])), Verdict::Benign);
    }

    #[test]
    fn verdict_serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&Verdict::Intrusion).unwrap(), "\"Intrusion\"");
        assert_eq!(Verdict::Benign.to_string(), "Benign");
        assert!(Verdict::Intrusion.is_intrusion());
    }
}
