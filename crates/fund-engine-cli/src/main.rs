mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use fund_engine_core::FundPolicy;

use commands::compliance::{IntakeArgs, ValidateArgs};
use commands::fees::{CommissionArgs, TierArgs};
use commands::projection::{ProjectArgs, ScenariosArgs};
use commands::risk::RiskArgs;

/// Carry fee, return projection and subscription policy calculations
#[derive(Parser)]
#[command(
    name = "fundx",
    version,
    about = "Carry fee, return projection and subscription policy calculations",
    long_about = "A CLI for fund economics with decimal precision. Resolves tiered carry \
                  rates, projects carry revenue and IRR, gates subscriptions against the \
                  investment policy and scores portfolio risk."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Policy overrides as JSON or YAML (.yaml / .yml)
    #[arg(long, global = true, env = "FUNDX_CONFIG")]
    config: Option<String>,

    /// Log calculation detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the carry tier for an investment amount
    Tier(TierArgs),
    /// List the carry tier schedule
    Tiers,
    /// Quote upfront commission on a subscription
    Commission(CommissionArgs),
    /// Project yearly carry revenue and IRR
    Project(ProjectArgs),
    /// Run the projection across annual return scenarios
    Scenarios(ScenariosArgs),
    /// Validate a subscription against the investment policy
    Validate(ValidateArgs),
    /// Check dated subscriptions against the monthly intake cap
    Intake(IntakeArgs),
    /// Assess portfolio concentration, liquidity and size risk
    Risk(RiskArgs),
    /// Print the effective fund policy
    Policy,
    /// Print version information
    Version,
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_policy(path: Option<&str>) -> Result<FundPolicy, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(FundPolicy::default());
    };
    let policy: FundPolicy = input::file::read_json_or_yaml(path)?;
    policy.validate()?;
    tracing::debug!(path, "loaded fund policy overrides");
    Ok(policy)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Version = cli.command {
        println!("fundx {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = load_policy(cli.config.as_deref()).and_then(|policy| match cli.command {
        Commands::Tier(args) => commands::fees::run_tier(args, &policy),
        Commands::Tiers => commands::fees::run_tiers(&policy),
        Commands::Commission(args) => commands::fees::run_commission(args, &policy),
        Commands::Project(args) => commands::projection::run_project(args, &policy),
        Commands::Scenarios(args) => commands::projection::run_scenarios(args, &policy),
        Commands::Validate(args) => commands::compliance::run_validate(args, &policy),
        Commands::Intake(args) => commands::compliance::run_intake(args, &policy),
        Commands::Risk(args) => commands::risk::run_risk(args, &policy),
        Commands::Policy => commands::policy::run_policy(&policy),
        Commands::Version => unreachable!(),
    });

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
