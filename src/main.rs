//! switch-qa - Network Switch Validation Tool
//!
//! A CLI tool that validates switch and interface behavior against a
//! vendor management endpoint: interface/VLAN enumeration, VLAN
//! add/remove cycles, and admin-state toggling, each confirmed by
//! bounded fixed-interval polling and reported as timed pass/fail
//! test cases.
//!
//! ## Usage
//!
//! ```bash
//! # Full run against a Cisco Nexus switch
//! switch-qa validate --vendor nexus --endpoint http://10.0.0.1:8080 --interface Ethernet1
//!
//! # Interface suite only, custom VLAN
//! switch-qa validate --vendor arista --endpoint http://sw1 --interface Ethernet12 \
//!     --suite interface --vlan 2002
//!
//! # Single scenario against the built-in simulated switch
//! switch-qa validate --scenario 5 --interface Ethernet1
//!
//! # List scenarios
//! switch-qa list --detailed --vendors
//! ```

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{info, warn};

mod cli;
mod config;
mod device;
mod models;
mod output;
mod poll;
mod runner;
mod scenarios;
mod utils;

use cli::Args;
use config::ValidatorConfig;
use device::Vendor;
use models::{TestInfo, TestReport, TestSystemInfo};
use output::OutputFormat;
use scenarios::{Scenario, Suite};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    utils::logger::init_from_verbose(args.verbose);

    match args.command {
        cli::Command::Validate(validate_args) => run_validation(validate_args).await?,
        cli::Command::List(list_args) => list_scenarios(list_args),
        cli::Command::Config(config_args) => manage_config(config_args)?,
    }

    Ok(())
}

/// Merge CLI overrides into the loaded configuration.
fn effective_config(args: &cli::ValidateArgs) -> Result<ValidatorConfig> {
    let mut config = match &args.config {
        Some(path) => ValidatorConfig::load(path)?,
        None => ValidatorConfig::default(),
    };

    if args.simulate {
        config.vendor = "simulated".to_string();
    } else if let Some(vendor) = &args.vendor {
        config.vendor = vendor.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if let Some(interface) = &args.interface {
        config.interface = Some(interface.clone());
    }
    if let Some(vlan) = args.vlan {
        config.vlan_to_set = vlan;
    }
    if let Some(timeout) = args.timeout {
        config.command_timeout_secs = timeout;
    }
    if let Some(interval) = args.poll_interval {
        config.poll_interval_ms = interval;
    }
    if let Some(settle) = args.settle {
        config.settle_ms = settle;
    }

    Ok(config)
}

/// Resolve which scenarios to run from `--scenario` / `--suite`.
fn select_scenarios(args: &cli::ValidateArgs) -> Result<Vec<Scenario>> {
    if let Some(number) = args.scenario {
        let scenario = Scenario::from_number(number)
            .ok_or_else(|| anyhow::anyhow!("Invalid scenario number: {number}"))?;
        return Ok(vec![scenario]);
    }

    match args.suite.to_lowercase().as_str() {
        "all" => Ok(Scenario::all()),
        "general" => Ok(Scenario::in_suite(Suite::General)),
        "interface" => Ok(Scenario::in_suite(Suite::Interface)),
        other => bail!("Unknown suite: {other} (expected general, interface, or all)"),
    }
}

async fn run_validation(args: cli::ValidateArgs) -> Result<()> {
    let config = effective_config(&args)?;
    let selected = select_scenarios(&args)?;

    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", args.format))?;

    let device = device::connect_protocol(&config.vendor, config.endpoint.as_deref())?;
    let params = config.scenario_params();

    let needs_interface = selected.iter().any(|s| s.suite() == Suite::Interface);
    if needs_interface && params.interface.is_empty() {
        warn!("No target interface specified; interface scenarios will fail their precondition");
    }

    info!(
        "Validating '{}' switch ({} scenario(s), vlan {})",
        config.vendor,
        selected.len(),
        params.vlan_to_set
    );

    let mut report = TestReport::new(
        TestInfo::new(
            &config.report.title,
            &config.report.team,
            config.report.project_ids.clone(),
            &config.report.description,
        ),
        TestSystemInfo::new(&config.report.system_name),
    );

    scenarios::run_suite(device.as_ref(), &selected, &params, &mut report).await;

    output::emit(&report, format, args.output.as_deref())?;

    if !report.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn list_scenarios(args: cli::ListArgs) {
    println!("\nSwitch Validation Scenarios\n");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut current_suite: Option<Suite> = None;

    for scenario in Scenario::all() {
        let suite = scenario.suite();
        if current_suite != Some(suite) {
            println!("\n{suite} suite:");
            println!("──────────────────────────────────────────────────────────────────────");
            current_suite = Some(suite);
        }

        if args.detailed {
            println!(
                "  {:2}. {:22} {}",
                scenario.number(),
                scenario.name(),
                scenario.description()
            );
        } else {
            println!("  {:2}. {}", scenario.number(), scenario.name());
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    if args.vendors {
        println!("Supported vendors:\n");
        for vendor in Vendor::all() {
            println!("  - {}", vendor.protocol_name());
        }
        println!();
    }
}

fn manage_config(args: cli::ConfigArgs) -> Result<()> {
    match args.action {
        cli::ConfigAction::Show { config } => {
            let config = match config {
                Some(path) => ValidatorConfig::load(path)?,
                None => ValidatorConfig::default(),
            };
            println!("{}", serde_yaml::to_string(&config)?);
        }
        cli::ConfigAction::Init { path } => {
            ValidatorConfig::default().save(&path)?;
            info!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}
