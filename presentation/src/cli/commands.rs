//! CLI command definitions

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Largest pool size `thresholds --max` accepts
pub const MAX_THRESHOLD_POOL: u64 = 10_000;

/// Output format for governance outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with tallies and thresholds
    Full,
    /// One line per outcome
    Compact,
    /// JSON output
    Json,
}

impl From<OutputFormat> for governance_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => governance_domain::OutputFormat::Full,
            OutputFormat::Compact => governance_domain::OutputFormat::Compact,
            OutputFormat::Json => governance_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for community-governance
#[derive(Parser, Debug)]
#[command(name = "community-governance")]
#[command(author, version, about = "Peer-review quorum engine for community content")]
#[command(long_about = r#"
Community Governance decides whether proposed content (posts, enrichments,
community contributions) is approved or rejected by peer vote.

A subject is decided when:
1. Approvals reach a strict majority of the eligible contributors, or
2. Rejections reach a strict majority, or
3. Every contributor has voted (ties follow engine.tie_break)

Configuration files are loaded from (in priority order):
1. GOVERNANCE_* environment variables
2. --config <path>            Explicit config file
3. ./governance.toml          Project-level config
4. ~/.config/community-governance/config.toml   Global config

Example:
  community-governance run demos/review.json
  community-governance -o json run demos/review.json
  community-governance thresholds --max 12
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors and final statuses
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a scripted review scenario against in-memory stores
    Run {
        /// Scenario file (JSON)
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,
    },
    /// Print quorum thresholds for pool sizes 0..=MAX
    Thresholds {
        #[arg(
            long,
            default_value_t = 10,
            value_parser = RangedU64ValueParser::<usize>::new().range(..=MAX_THRESHOLD_POOL)
        )]
        max: usize,
    },
}
