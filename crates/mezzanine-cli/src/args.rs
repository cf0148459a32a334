//! Command-line argument definitions for the mezzanine CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each subcommand reads a configuration JSON file; global
//! options select the TOML configuration file and logging verbosity.

use clap::{Parser, Subcommand};

use mezzanine::export::ExportFormat;

/// Command-line arguments for the mezzanine configurator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the price breakdown of a configuration
    Price {
        /// Path to the configuration JSON file
        input: String,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the accessory placements as JSON
    Layout {
        /// Path to the configuration JSON file
        input: String,
    },

    /// Export a report of the configuration
    Export {
        /// Path to the configuration JSON file
        input: String,

        /// Output format (csv, json, svg)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output path, defaults to mezzanine-configuration.<format>
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Submit a quote request for the configuration
    Quote(QuoteArgs),
}

impl Command {
    /// Path of the configuration JSON file the command reads.
    pub fn input(&self) -> &str {
        match self {
            Self::Price { input, .. }
            | Self::Layout { input }
            | Self::Export { input, .. }
            | Self::Quote(QuoteArgs { input, .. }) => input,
        }
    }
}

/// Contact details for a quote request
#[derive(clap::Args, Debug)]
pub struct QuoteArgs {
    /// Path to the configuration JSON file
    pub input: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub telephone: String,

    #[arg(long, default_value = "")]
    pub company: String,

    #[arg(long, default_value = "")]
    pub postal_code: String,

    /// Free-text message to the sales team
    #[arg(long, default_value = "")]
    pub message: String,

    /// Ask for installation to be included in the quote
    #[arg(long)]
    pub include_installation: bool,

    /// Attach a drawing or photo (jpg, jpeg, png or pdf); repeatable
    #[arg(long = "attach")]
    pub attachments: Vec<String>,
}
