use clap::Parser;
use enfield_report::{
    logging, Cli, EnfieldReport, OutputFormatter, OutputMode, ReportError, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match EnfieldReport::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    logging::init(&app.config().logging.level);

    let Some(ref logfile) = cli.logfile else {
        // clap enforces the positional unless --generate-config was given
        return 1;
    };

    match app.run(logfile) {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(error = %e, "Report failed");
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ReportError) -> i32 {
    match error {
        ReportError::Io { .. } => 2,
        ReportError::MalformedLine { .. } => 3,
        ReportError::UnpairedTiming { .. } => 4,
        ReportError::Output { .. } | ReportError::Config { .. } => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli.config_output_path();
    let formatter = OutputFormatter::new(OutputMode::Human);

    match EnfieldReport::generate_sample_config(&config_path) {
        Ok(()) => {
            formatter.success(&format!(
                "Generated sample configuration file: {}",
                config_path.display()
            ));
            eprintln!("\nTo use this configuration:");
            eprintln!("  enfield-report <logfile> --config {}", config_path.display());
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &ReportError) {
    let formatter = OutputFormatter::new(OutputMode::Human);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::try_parse_from([
            PathBuf::from("enfield-report"),
            PathBuf::from("--generate-config"),
            PathBuf::from("--config"),
            config_path.clone(),
        ])
        .unwrap();

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[timing]"));
    }

    #[test]
    fn test_exit_codes() {
        let io = ReportError::Io {
            path: PathBuf::from("x"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "x"),
        };
        assert_eq!(exit_code_for(&io), 2);

        let malformed = ReportError::MalformedLine {
            pass: "Real",
            line_number: 1,
            line: "real".to_string(),
        };
        assert_eq!(exit_code_for(&malformed), 3);

        let unpaired = ReportError::UnpairedTiming {
            user_lines: 1,
            sys_lines: 0,
        };
        assert_eq!(exit_code_for(&unpaired), 4);

        let output = ReportError::Output {
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
        };
        assert_eq!(exit_code_for(&output), 1);
    }
}
