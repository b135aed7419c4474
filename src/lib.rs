pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, LoggingConfig, PairingPolicy, TimingConfig};
pub use error::{ReportError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{Log, Pass, Report, ReportExtractor, Section, Value};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;

/// Main library interface: loads a log, runs the pass table, presents the
/// result.
pub struct EnfieldReport {
    config: Config,
    extractor: ReportExtractor,
    output_formatter: OutputFormatter,
}

impl EnfieldReport {
    pub fn new(config: Config, output_mode: OutputMode) -> Self {
        let extractor = ReportExtractor::new(config.timing.pairing);
        let output_formatter = OutputFormatter::new(output_mode);

        Self {
            config,
            extractor,
            output_formatter,
        }
    }

    /// Create an instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode))
    }

    /// Read `path` and extract every section. Nothing is printed.
    pub fn generate_report<P: AsRef<Path>>(&self, path: P) -> Result<Report> {
        let path = path.as_ref();
        let log = Log::read(path)?;
        let report = self.extractor.extract(&log)?;

        tracing::info!(
            path = %path.display(),
            lines = log.len(),
            values = report.total_values(),
            "Report extracted"
        );
        Ok(report)
    }

    /// Extract and print. stdout stays empty if extraction fails.
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let report = self.generate_report(path)?;
        self.output_formatter.print_report(&report)
    }

    /// Write the default configuration as TOML to `output_path`.
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ReportError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function: extract a report with default settings
pub fn extract_report<P: AsRef<Path>>(path: P) -> Result<Report> {
    EnfieldReport::new(Config::default(), OutputMode::Plain).generate_report(path)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
