use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// Which shell `time` field a timing line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingField {
    Real,
    User,
    Sys,
}

impl TimingField {
    pub fn prefix(self) -> &'static str {
        match self {
            TimingField::Real => "real",
            TimingField::User => "user",
            TimingField::Sys => "sys",
        }
    }

    fn pattern(self) -> &'static Regex {
        static REAL: OnceLock<Regex> = OnceLock::new();
        static USER: OnceLock<Regex> = OnceLock::new();
        static SYS: OnceLock<Regex> = OnceLock::new();

        let (cell, source) = match self {
            TimingField::Real => (&REAL, r"real\s+([0-9]+)m([0-9.]+)s"),
            TimingField::User => (&USER, r"^user\s+([0-9]+)m([0-9.]+)s"),
            TimingField::Sys => (&SYS, r"^sys\s+([0-9]+)m([0-9.]+)s"),
        };
        cell.get_or_init(|| Regex::new(source).expect("timing pattern is valid"))
    }
}

/// Parse a `<field> <minutes>m<seconds>s` line.
///
/// Returns `None` when the line does not match or the numbers do not fit
/// a `Duration`.
pub fn parse_timing(field: TimingField, line: &str) -> Option<Duration> {
    let caps = field.pattern().captures(line)?;
    let minutes: u64 = caps[1].parse().ok()?;
    let seconds = parse_seconds(&caps[2])?;

    let minute_secs = minutes.checked_mul(60)?;
    Duration::from_secs(minute_secs).checked_add(seconds)
}

/// Exact decimal seconds. Digits past nanosecond precision are truncated.
fn parse_seconds(text: &str) -> Option<Duration> {
    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (text, ""),
    };

    if frac.contains('.') || (whole.is_empty() && frac.is_empty()) {
        return None;
    }

    let secs: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let mut nanos: u32 = 0;
    for (i, digit) in frac.bytes().take(9).enumerate() {
        nanos += u32::from(digit - b'0') * 10u32.pow(8 - i as u32);
    }

    Some(Duration::new(secs, nanos))
}
