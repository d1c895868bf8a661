use anyhow::Context;
use chrono::{DateTime, SecondsFormat};
use colored::Colorize;
use sentinel_ledger::{AuditReport, Block, ThreatLedger};
use sentinel_triage::{commit_flow, commit_intrusions, BlockReceipt, CommitSummary};
use sentinel_types::{EventType, PrevHash, Timestamp};
use serde_json::json;

use crate::cli::*;
use crate::config::SentinelConfig;
use crate::input;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = SentinelConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Commit(args) => cmd_commit(args, &config, &cli.format),
        Command::Chain(args) => cmd_chain(args, &config, &cli.format),
        Command::Hash(args) => cmd_hash(args, &cli.format),
    }
}

fn cmd_commit(args: CommitArgs, config: &SentinelConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let flows = input::read_flows(&args.input)?;
    let mut ledger = ThreatLedger::new(config.ledger.clone())?;

    if args.all {
        let receipts = flows
            .iter()
            .map(|flow| commit_flow(&mut ledger, flow, &config.thresholds))
            .collect::<Result<Vec<_>, _>>()?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&receipts)?),
            OutputFormat::Text => {
                println!("{} Logged {} flows to the threat ledger", "✓".green().bold(), receipts.len());
                for receipt in &receipts {
                    print_receipt(receipt);
                }
                print_validity(ledger.verify());
            }
        }
        return Ok(());
    }

    let summary = commit_intrusions(&mut ledger, &flows, &config.thresholds)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary_json(&summary))?),
        OutputFormat::Text => {
            if summary.committed == 0 {
                println!("No intrusions detected in this batch ({} benign).", summary.skipped);
            } else {
                println!(
                    "{} Committed {} intrusion logs to the threat ledger ({} benign skipped)",
                    "✓".green().bold(),
                    summary.committed,
                    summary.skipped
                );
                for block in &summary.blocks {
                    print_block_line(block);
                }
            }
            print_validity(summary.chain_valid);
        }
    }
    Ok(())
}

fn cmd_chain(args: ChainArgs, config: &SentinelConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let flows = input::read_flows(&args.input)?;
    let mut ledger = ThreatLedger::new(config.ledger.clone())?;
    commit_intrusions(&mut ledger, &flows, &config.thresholds)?;

    let chain = ledger.export();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&chain)?),
        OutputFormat::Text => {
            for block in &chain {
                print_block_line(block);
                println!("      {}", serde_json::to_string(&block.data)?.dimmed());
            }
            print_audit(&ledger.audit());
        }
    }
    Ok(())
}

fn cmd_hash(args: HashArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let entry = input::read_entry(&args.entry)?;
    let timestamp = Timestamp::from_secs(args.timestamp)?;
    let prev_hash: PrevHash = args.prev_hash.parse().context("invalid --prev-hash")?;
    let event_type = if args.genesis {
        EventType::Genesis
    } else {
        EventType::IntrusionLog
    };

    let block = Block::seal(args.index, timestamp, event_type, entry, prev_hash)?;
    let canonical = String::from_utf8(block.canonical_core()?)?;
    match format {
        OutputFormat::Json => {
            let out = json!({"canonical": canonical, "hash": block.hash});
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("{} {}", "canonical:".bold(), canonical);
            println!("{} {}", "hash:".bold(), block.hash.to_string().yellow());
        }
    }
    Ok(())
}

fn summary_json(summary: &CommitSummary) -> serde_json::Value {
    json!({
        "committed": summary.committed,
        "skipped": summary.skipped,
        "chain_valid": summary.chain_valid,
        "blocks": summary.blocks,
    })
}

fn print_block_line(block: &Block) {
    let tag = match block.event_type {
        EventType::Genesis => block.event_type.to_string().cyan(),
        EventType::IntrusionLog => block.event_type.to_string().red(),
    };
    println!(
        "  {}  {}  {}  hash {}  prev {}",
        format!("#{}", block.index).yellow().bold(),
        render_time(block.timestamp).dimmed(),
        tag,
        block.hash.short_hex(),
        short_prev(&block.prev_hash),
    );
}

fn print_receipt(receipt: &BlockReceipt) {
    println!(
        "  {}  {}  {}  hash {}  prev {}",
        format!("#{}", receipt.block_index).yellow().bold(),
        render_time(receipt.timestamp).dimmed(),
        receipt.recommended_action.to_string().bold(),
        receipt.hash.short_hex(),
        short_prev(&receipt.prev_hash),
    );
}

fn print_validity(valid: bool) {
    if valid {
        println!("Chain integrity: {}", "valid".green());
    } else {
        println!("Chain integrity: {}", "BROKEN (hash mismatch)".red().bold());
    }
}

fn print_audit(report: &AuditReport) {
    print_validity(report.is_valid());
    println!("  Blocks: {}", report.block_count);
    for violation in &report.violations {
        println!(
            "  {} position {}: {:?} ({})",
            "✗".red(),
            violation.position,
            violation.kind,
            violation.description
        );
    }
}

fn short_prev(prev: &PrevHash) -> String {
    match prev {
        PrevHash::Genesis => prev.to_string(),
        PrevHash::Block(hash) => hash.short_hex(),
    }
}

fn render_time(ts: Timestamp) -> String {
    let secs = ts.as_secs_f64();
    let nanos = (secs.fract() * 1e9) as u32;
    DateTime::from_timestamp(secs.trunc() as i64, nanos)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| ts.to_string())
}

#[cfg(test)]
mod tests {
    use sentinel_ledger::LedgerConfig;
    use sentinel_triage::{ActionThresholds, ClassifiedFlow};

    use super::*;

    #[test]
    fn render_time_is_rfc3339_utc() {
        let ts = Timestamp::from_secs(1_700_000_000.25).unwrap();
        assert_eq!(render_time(ts), "2023-11-14T22:13:20.250Z");
    }

    #[test]
    fn short_prev_keeps_genesis_sentinel() {
        assert_eq!(short_prev(&PrevHash::Genesis), "0");
    }

    #[test]
    fn summary_json_lists_blocks() {
        let mut ledger = ThreatLedger::new(LedgerConfig::default()).unwrap();
        let flow: ClassifiedFlow =
            serde_json::from_value(json!({"flow_index": 0, "prediction": 1})).unwrap();
        let flows = vec![flow];
        let summary = commit_intrusions(&mut ledger, &flows, &ActionThresholds::default()).unwrap();

        let out = summary_json(&summary);
        assert_eq!(out["committed"], json!(1));
        assert_eq!(out["chain_valid"], json!(true));
        assert_eq!(out["blocks"][0]["index"], json!(1));
        assert_eq!(out["blocks"][0]["data"]["recommended_action"], json!("BLOCK"));
    }
}
