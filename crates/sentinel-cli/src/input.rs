use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context};
use sentinel_ledger::Entry;
use sentinel_triage::ClassifiedFlow;
use serde_json::Value;

/// Read classified flows from a JSON-lines file. Blank lines are skipped.
pub fn read_flows(path: &Path) -> anyhow::Result<Vec<ClassifiedFlow>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut flows = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let flow: ClassifiedFlow = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid flow record", path.display(), n + 1))?;
        flows.push(flow);
    }
    Ok(flows)
}

/// Read a single entry mapping from a JSON file.
pub fn read_entry(path: &Path) -> anyhow::Result<Entry> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("{}: entry must be a JSON object", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    fn file_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_json_lines_and_skips_blanks() {
        let file = file_with(
            "{\"flow_index\": 0, \"prediction\": 1, \"score\": 0.97}\n\n\
             {\"flow_index\": 1, \"prediction\": \"normal\"}\n",
        );
        let flows = read_flows(file.path()).unwrap();
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].score, Some(0.97));
        assert_eq!(flows[1].prediction, json!("normal"));
    }

    #[test]
    fn bad_line_reports_position() {
        let file = file_with("{\"flow_index\": 0, \"prediction\": 1}\nnot json\n");
        let err = read_flows(file.path()).unwrap_err();
        assert!(err.to_string().ends_with(":2: invalid flow record"));
    }

    #[test]
    fn reads_entry_object() {
        let file = file_with(r#"{"label": "Intrusion", "confidence": 0.97}"#);
        let entry = read_entry(file.path()).unwrap();
        assert_eq!(entry["label"], json!("Intrusion"));
    }

    #[test]
    fn entry_must_be_an_object() {
        let file = file_with("[1, 2]");
        assert!(read_entry(file.path()).is_err());
    }
}
