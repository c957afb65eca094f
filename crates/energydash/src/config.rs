//! Application configuration from CLI flags and environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use energydash_core::constants::{DEFAULT_DATA_FILE, DEFAULT_INPUT_SIZE};

use crate::errors::AppError;

/// EnergyDash: energy consumption of sorting algorithms, with one-way ANOVA.
#[derive(Parser, Debug)]
#[command(name = "energydash", version, about)]
pub struct AppConfig {
    /// CSV file with Algorithm, Input_Size and Energy_Consumption columns.
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE, env = "ENERGYDASH_DATA")]
    pub data: PathBuf,

    /// Input size to show first; `report` limits itself to this size.
    #[arg(long, global = true, env = "ENERGYDASH_INPUT_SIZE")]
    pub input_size: Option<String>,

    /// Address the web dashboard binds to.
    #[arg(long, global = true, default_value = "127.0.0.1", env = "ENERGYDASH_HOST")]
    pub host: String,

    /// Port the web dashboard listens on.
    #[arg(short, long, global = true, default_value_t = 8050, env = "ENERGYDASH_PORT")]
    pub port: u16,

    /// Print report results as JSON lines.
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode (only conclusions).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to run. Defaults to `serve`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the browser dashboard.
    Serve,
    /// Open the interactive terminal dashboard.
    Tui,
    /// Print the dataset summary, graph summaries and ANOVA tables.
    Report,
    /// Run the generalized ANOVA calculator on comma-separated groups.
    Anova {
        /// Comma-separated values of one group; repeat per group.
        #[arg(short, long = "group", required = true)]
        groups: Vec<String>,
    },
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// The selected command, `serve` when none was given.
    #[must_use]
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Input size preferred at startup.
    #[must_use]
    pub fn preferred_input_size(&self) -> &str {
        self.input_size.as_deref().unwrap_or(DEFAULT_INPUT_SIZE)
    }

    /// Socket address for the web dashboard.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| AppError::InvalidAddress(addr))
    }
}
