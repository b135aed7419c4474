use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

/// A single extracted value, printed as one bare line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Label(String),
    /// Leading digit run, kept as written (`0042` stays `0042`).
    Count(String),
    Millis(Duration),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Label(label) => f.write_str(label),
            Value::Count(digits) => f.write_str(digits),
            Value::Millis(duration) => f.write_str(&format_millis(*duration)),
        }
    }
}

/// Whole milliseconds, plus a trimmed decimal tail for any sub-millisecond
/// remainder: 62.5s -> "62500", 1.00025s -> "1000.25".
pub fn format_millis(duration: Duration) -> String {
    let millis = duration.as_millis();
    let rem_nanos = duration.subsec_nanos() % 1_000_000;

    if rem_nanos == 0 {
        millis.to_string()
    } else {
        let frac = format!("{:06}", rem_nanos);
        format!("{}.{}", millis, frac.trim_end_matches('0'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: &'static str,
    pub values: Vec<Value>,
}

/// The extracted sections, in pass order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    sections: Vec<Section>,
}

impl Report {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn total_values(&self) -> usize {
        self.sections.iter().map(|s| s.values.len()).sum()
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self)?;
        out.flush()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "{}", section.label)?;
            for value in &section.values {
                writeln!(f, "{}", value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(Duration::from_millis(62_500)), "62500");
        assert_eq!(format_millis(Duration::ZERO), "0");
        assert_eq!(format_millis(Duration::from_micros(1_000_250)), "1000.25");
        assert_eq!(format_millis(Duration::from_nanos(1)), "0.000001");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Label("foo bar".into()).to_string(), "foo bar");
        assert_eq!(Value::Count("123".into()).to_string(), "123");
        assert_eq!(Value::Count("0042".into()).to_string(), "0042");
        assert_eq!(Value::Millis(Duration::from_millis(1500)).to_string(), "1500");
    }

    #[test]
    fn test_report_rendering() {
        let report = Report::new(vec![
            Section {
                label: "Depth",
                values: vec![Value::Count("3".into()), Value::Count("4".into())],
            },
            Section {
                label: "Gates",
                values: vec![],
            },
        ]);

        assert_eq!(report.to_string(), "Depth\n3\n4\nGates\n");
        assert_eq!(report.total_values(), 2);
    }

    #[test]
    fn test_write_to_buffer() {
        let report = Report::new(vec![Section {
            label: "Testing",
            values: vec![Value::Label("qft_4".into())],
        }]);

        let mut buf = Vec::new();
        report.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Testing\nqft_4\n");
    }
}
