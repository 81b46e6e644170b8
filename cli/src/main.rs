//! CLI entrypoint for Community Governance
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod scenario;

use anyhow::{Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use governance_domain::QuorumThresholds;
use governance_infrastructure::ConfigLoader;
use governance_presentation::{Cli, Command, ConsoleFormatter, OutputFormatter};
use scenario::{Scenario, ScenarioRunner};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validate() {
        warn!("Configuration: {}", issue);
    }

    if cli.no_color || !config.output.color {
        ConsoleFormatter::disable_color();
    }

    let format = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    let formatter = ConsoleFormatter::new(format);

    match cli.command {
        Some(Command::Thresholds { max }) => {
            let rows: Vec<QuorumThresholds> = (0..=max).map(QuorumThresholds::for_pool).collect();
            println!("{}", formatter.format_thresholds(&rows));
        }
        Some(Command::Run { scenario }) => {
            info!("Running scenario {}", scenario.display());
            let loaded = Scenario::load(&scenario)?;

            // === Dependency Injection ===
            let mut runner = ScenarioRunner::new(&loaded, &config).await?;
            let report = runner.run(&loaded.steps, &formatter, cli.quiet).await;
            runner.print_summary(&formatter).await?;

            info!(
                steps = report.steps,
                refused = report.refused,
                notifications = report.notifications,
                "Scenario finished"
            );
            if report.mismatches > 0 {
                bail!(
                    "{} of {} step(s) did not match their expected outcome",
                    report.mismatches,
                    report.steps
                );
            }
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
