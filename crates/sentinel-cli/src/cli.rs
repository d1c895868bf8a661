use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sentinel",
    about = "SentinelSecure: tamper-evident threat ledger for classified network flows",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with `[ledger]` and `[thresholds]` sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Commit classified flows to a fresh ledger and show the new blocks
    Commit(CommitArgs),
    /// Commit classified flows and dump the whole chain
    Chain(ChainArgs),
    /// Show the canonical encoding and hash a block would get for an entry
    Hash(HashArgs),
}

#[derive(Args)]
pub struct CommitArgs {
    /// JSON-lines file, one classified flow per line
    #[arg(short, long)]
    pub input: PathBuf,
    /// Log every flow, benign ones included
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct ChainArgs {
    #[arg(short, long)]
    pub input: PathBuf,
}

#[derive(Args)]
pub struct HashArgs {
    /// JSON file holding a single entry mapping
    #[arg(short, long)]
    pub entry: PathBuf,
    #[arg(long, default_value = "1")]
    pub index: u64,
    /// Seconds since the UNIX epoch
    #[arg(long)]
    pub timestamp: f64,
    #[arg(long, default_value = "0")]
    pub prev_hash: String,
    /// Hash as a genesis block instead of an intrusion log
    #[arg(long)]
    pub genesis: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commit() {
        let cli = Cli::try_parse_from(["sentinel", "commit", "-i", "flows.jsonl"]).unwrap();
        if let Command::Commit(args) = cli.command {
            assert_eq!(args.input, PathBuf::from("flows.jsonl"));
            assert!(!args.all);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_commit_all() {
        let cli = Cli::try_parse_from(["sentinel", "commit", "--input", "f.jsonl", "--all"]).unwrap();
        if let Command::Commit(args) = cli.command {
            assert!(args.all);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn commit_requires_input() {
        assert!(Cli::try_parse_from(["sentinel", "commit"]).is_err());
    }

    #[test]
    fn parse_chain() {
        let cli = Cli::try_parse_from(["sentinel", "chain", "-i", "f.jsonl"]).unwrap();
        assert!(matches!(cli.command, Command::Chain(_)));
    }

    #[test]
    fn parse_hash_defaults() {
        let cli = Cli::try_parse_from([
            "sentinel", "hash", "--entry", "e.json", "--timestamp", "1700000000.5",
        ])
        .unwrap();
        if let Command::Hash(args) = cli.command {
            assert_eq!(args.index, 1);
            assert_eq!(args.prev_hash, "0");
            assert_eq!(args.timestamp, 1_700_000_000.5);
            assert!(!args.genesis);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "sentinel", "--verbose", "--format", "json", "--config", "s.toml", "chain", "-i", "f",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.config, Some(PathBuf::from("s.toml")));
    }
}
