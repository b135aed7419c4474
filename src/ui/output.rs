use crate::error::{ReportError, Result, UserFriendlyError};
use crate::extractor::Report;
use console::{style, Emoji, Term};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");

/// The report goes to stdout untouched; every other message goes to stderr.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stderr().features().colors_supported(),
            OutputMode::Plain => false,
        };

        Self { mode, use_colors }
    }

    pub fn print_report(&self, report: &Report) -> Result<()> {
        write_report(report, io::stdout().lock())
    }

    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Plain => eprintln!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn print_user_friendly_error(&self, error: &ReportError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (&CHECKMARK, style(message).green().bold()),
                MessageType::Error => (&CROSS, style(message).red().bold()),
            };
            eprintln!("{}{}", emoji, styled);
        } else {
            eprintln!("{} {}", msg_type.prefix(), message);
        }
    }
}

fn write_report<W: Write>(report: &Report, out: W) -> Result<()> {
    report
        .write_to(out)
        .map_err(|source| ReportError::Output { source })
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
}

impl MessageType {
    fn prefix(self) -> &'static str {
        match self {
            MessageType::Success => "✓",
            MessageType::Error => "✗",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{Section, Value};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_plain_mode_never_colors() {
        let formatter = OutputFormatter::new(OutputMode::Plain);
        assert_eq!(formatter.mode, OutputMode::Plain);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_message_prefixes() {
        assert_eq!(MessageType::Success.prefix(), "✓");
        assert_eq!(MessageType::Error.prefix(), "✗");
    }

    #[test]
    fn test_write_failure_is_output_error() {
        let report = Report::new(vec![Section {
            label: "Depth",
            values: vec![Value::Count("3".into())],
        }]);

        match write_report(&report, BrokenPipe) {
            Err(ReportError::Output { source }) => {
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe)
            }
            other => panic!("expected Output error, got {:?}", other),
        }
    }
}
