use crate::config::{CliOverrides, Config, PairingPolicy};
use crate::error::Result;
use crate::logging;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "enfield-report.toml";

#[derive(Parser, Debug)]
#[command(name = "enfield-report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract depth, gate and timing metrics from a benchmark log")]
#[command(
    long_about = "enfield-report reads a benchmark log and prints the Testing labels, \
                  Depth and Gates counters, real time, and user + sys time, one section each."
)]
#[command(after_help = "EXAMPLES:\n  \
    enfield-report bench.log\n  \
    enfield-report bench.log --pairing truncate\n  \
    enfield-report bench.log --config report.toml -v\n  \
    enfield-report --generate-config --config report.toml")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Benchmark log file to read
    #[arg(required_unless_present = "generate_config")]
    pub logfile: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// How to pair user and sys lines when their counts differ
    #[arg(long, value_enum)]
    pub pairing: Option<PairingPolicy>,

    /// Error presentation style on stderr
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose diagnostics on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Write a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored messages with suggestions
    Human,
    /// Plain prefixed lines
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_pairing(self.pairing)
            .with_log_level(logging::level_from_flags(self.verbose, self.quiet))
    }

    pub fn config_output_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
