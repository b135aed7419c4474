use crate::error::{ReportError, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// One line of the input log together with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub number: usize,
    pub text: String,
}

/// The whole input file split into lines. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Log {
    lines: Vec<LogLine>,
}

impl Log {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // Invalid UTF-8 becomes U+FFFD; only lines a pass selects matter.
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            tracing::warn!(path = %path.display(), "Log contains invalid UTF-8; bytes replaced");
        }

        let log = Self::from_text(&content);
        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            lines = log.len(),
            "Loaded log file"
        );
        Ok(log)
    }

    /// Split on `\n`; a trailing `\r` is dropped from each line.
    pub fn from_text(content: &str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .map(|(idx, text)| LogLine {
                number: idx + 1,
                text: text.to_string(),
            })
            .collect();

        Self { lines }
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// Lines starting with `prefix`, in file order.
    pub fn starting_with<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a LogLine> + 'a {
        self.lines.iter().filter(move |l| l.text.starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
