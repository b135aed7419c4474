use crate::extractor::pass::{DEPTH, GATES, REAL, TESTING, USER_SYS};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read log file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {pass} line {line_number}: {line}")]
    MalformedLine {
        pass: &'static str,
        line_number: usize,
        line: String,
    },

    #[error("Unpaired timing lines: {user_lines} user vs {sys_lines} sys")]
    UnpairedTiming { user_lines: usize, sys_lines: usize },

    #[error("Failed to write report: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ReportError {
    fn user_message(&self) -> String {
        match self {
            ReportError::Io { path, source } => {
                format!("Cannot read log file {}: {}", path.display(), source)
            }
            ReportError::MalformedLine {
                pass,
                line_number,
                line,
            } => {
                format!(
                    "Line {} looks like a {} line but could not be parsed: {}",
                    line_number, pass, line
                )
            }
            ReportError::UnpairedTiming {
                user_lines,
                sys_lines,
            } => {
                format!(
                    "Found {} user timing lines but {} sys timing lines",
                    user_lines, sys_lines
                )
            }
            ReportError::Output { source } => {
                format!("Could not write the report to standard output: {}", source)
            }
            ReportError::Config { message } => {
                format!("Configuration error: {}", message)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ReportError::Io { .. } => Some(
                "Check that the path exists and is readable.".to_string()
            ),
            ReportError::MalformedLine { pass, .. } => expected_shape(pass).map(|shape| {
                format!(
                    "{} lines must look like {}; fix or remove the offending line.",
                    pass, shape
                )
            }),
            ReportError::UnpairedTiming { .. } => Some(
                "Use --pairing truncate to pair only the overlapping user/sys lines.".to_string()
            ),
            ReportError::Output { .. } => None,
            ReportError::Config { .. } => Some(
                "Check your configuration file syntax; --generate-config writes a valid sample.".to_string()
            ),
        }
    }
}

fn expected_shape(pass: &str) -> Option<&'static str> {
    match pass {
        TESTING => Some("`Testing <label>`"),
        DEPTH => Some("`<digits>::Depth`"),
        GATES => Some("`<digits>::Gates`"),
        REAL => Some("`real 1m2.500s`"),
        USER_SYS => Some("`user 0m1.000s` and `sys 0m0.500s`"),
        _ => None,
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
