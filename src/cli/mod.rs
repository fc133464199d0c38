//! CLI argument parsing
//!
//! Defines the command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Network switch and interface validation tool
#[derive(Parser, Debug)]
#[command(name = "switch-qa")]
#[command(version)]
#[command(about = "Validate switch interface enumeration and VLAN/admin-state behavior")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run validation scenarios against a switch
    Validate(ValidateArgs),

    /// List available scenarios and vendors
    List(ListArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Switch vendor (aperi, nexus, arista, simulated)
    #[arg(long)]
    pub vendor: Option<String>,

    /// Run against the built-in simulated switch
    #[arg(long, conflicts_with = "vendor")]
    pub simulate: bool,

    /// Management endpoint base URL
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Target interface name (required for the interface suite)
    #[arg(short, long)]
    pub interface: Option<String>,

    /// VLAN to use for add/remove cycles
    #[arg(long)]
    pub vlan: Option<u16>,

    /// Suite to run (general, interface, all)
    #[arg(short, long, default_value = "all")]
    pub suite: String,

    /// Specific scenario number to run (1-7)
    #[arg(long)]
    pub scenario: Option<u8>,

    /// Interface scenario timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Poll interval in milliseconds
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Settle pause between scenarios in milliseconds
    #[arg(long)]
    pub settle: Option<u64>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file to load
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show scenario descriptions
    #[arg(short, long)]
    pub detailed: bool,

    /// Show supported vendors
    #[arg(long)]
    pub vendors: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show {
        /// Configuration file to load
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default configuration file
    Init {
        /// Destination path
        #[arg(default_value = "switch-qa.yaml")]
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_args_parsing() {
        let args = Args::parse_from(["switch-qa", "list", "--detailed"]);
        match args.command {
            Command::List(list_args) => assert!(list_args.detailed),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn validate_args_parsing() {
        let args = Args::parse_from([
            "switch-qa",
            "validate",
            "--vendor",
            "nexus",
            "--endpoint",
            "http://10.0.0.1:8080",
            "--interface",
            "Ethernet1",
            "--suite",
            "interface",
            "--vlan",
            "1001",
        ]);
        match args.command {
            Command::Validate(v) => {
                assert_eq!(v.vendor.as_deref(), Some("nexus"));
                assert_eq!(v.interface.as_deref(), Some("Ethernet1"));
                assert_eq!(v.suite, "interface");
                assert_eq!(v.vlan, Some(1001));
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn simulate_flag() {
        let args = Args::parse_from(["switch-qa", "validate", "--simulate"]);
        match args.command {
            Command::Validate(v) => assert!(v.simulate),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn config_init_default_path() {
        let args = Args::parse_from(["switch-qa", "config", "init"]);
        match args.command {
            Command::Config(config_args) => match config_args.action {
                ConfigAction::Init { path } => {
                    assert_eq!(path, PathBuf::from("switch-qa.yaml"));
                }
                _ => panic!("Expected Init action"),
            },
            _ => panic!("Expected Config command"),
        }
    }
}
