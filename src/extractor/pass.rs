use crate::config::PairingPolicy;
use crate::error::{ReportError, Result};
use crate::extractor::log::{Log, LogLine};
use crate::extractor::report::{Report, Section, Value};
use crate::extractor::timing::{parse_timing, TimingField};
use regex::Regex;
use std::sync::OnceLock;

pub const TESTING: &str = "Testing";
pub const DEPTH: &str = "Depth";
pub const GATES: &str = "Gates";
pub const REAL: &str = "Real";
pub const USER_SYS: &str = "User + Sys";

/// One filter + extract cycle over the whole log.
pub trait Pass {
    fn label(&self) -> &'static str;
    fn extract(&self, log: &Log) -> Result<Vec<Value>>;
}

/// A pass that selects lines independently and turns each into one value.
///
/// Every selected line must yield a value; a miss is a `MalformedLine`.
pub struct LinePass {
    label: &'static str,
    selects: fn(&str) -> bool,
    value: fn(&str) -> Option<Value>,
}

impl LinePass {
    pub fn new(
        label: &'static str,
        selects: fn(&str) -> bool,
        value: fn(&str) -> Option<Value>,
    ) -> Self {
        Self {
            label,
            selects,
            value,
        }
    }

    pub fn testing() -> Self {
        Self::new(TESTING, |line| line.starts_with("Testing"), testing_label)
    }

    pub fn depth() -> Self {
        Self::new(
            DEPTH,
            |line| depth_pattern().is_match(line),
            |line| leading_count(depth_pattern(), line),
        )
    }

    pub fn gates() -> Self {
        Self::new(
            GATES,
            |line| gates_pattern().is_match(line),
            |line| leading_count(gates_pattern(), line),
        )
    }

    pub fn real() -> Self {
        Self::new(
            REAL,
            |line| line.starts_with(TimingField::Real.prefix()),
            |line| parse_timing(TimingField::Real, line).map(Value::Millis),
        )
    }
}

impl Pass for LinePass {
    fn label(&self) -> &'static str {
        self.label
    }

    fn extract(&self, log: &Log) -> Result<Vec<Value>> {
        log.lines()
            .iter()
            .filter(|line| (self.selects)(&line.text))
            .map(|line| (self.value)(&line.text).ok_or_else(|| malformed(self.label, line)))
            .collect()
    }
}

/// Sums `user` and `sys` timings paired by their position among lines of
/// the same kind.
pub struct PairedTimingPass {
    policy: PairingPolicy,
}

impl PairedTimingPass {
    pub fn new(policy: PairingPolicy) -> Self {
        Self { policy }
    }
}

impl Pass for PairedTimingPass {
    fn label(&self) -> &'static str {
        USER_SYS
    }

    fn extract(&self, log: &Log) -> Result<Vec<Value>> {
        let user: Vec<&LogLine> = log.starting_with(TimingField::User.prefix()).collect();
        let sys: Vec<&LogLine> = log.starting_with(TimingField::Sys.prefix()).collect();

        if user.len() != sys.len() {
            match self.policy {
                PairingPolicy::Strict => {
                    return Err(ReportError::UnpairedTiming {
                        user_lines: user.len(),
                        sys_lines: sys.len(),
                    });
                }
                PairingPolicy::Truncate => {
                    tracing::warn!(
                        user_lines = user.len(),
                        sys_lines = sys.len(),
                        dropped = user.len().abs_diff(sys.len()),
                        "Unpaired timing lines dropped"
                    );
                }
            }
        }

        user.iter()
            .zip(sys.iter())
            .map(|(u, s)| {
                let user_time = parse_timing(TimingField::User, &u.text)
                    .ok_or_else(|| malformed(USER_SYS, u))?;
                let sys_time = parse_timing(TimingField::Sys, &s.text)
                    .ok_or_else(|| malformed(USER_SYS, s))?;
                user_time
                    .checked_add(sys_time)
                    .map(Value::Millis)
                    .ok_or_else(|| malformed(USER_SYS, u))
            })
            .collect()
    }
}

/// The fixed pass table: Testing, Depth, Gates, Real, User + Sys.
pub struct ReportExtractor {
    passes: Vec<Box<dyn Pass>>,
}

impl ReportExtractor {
    pub fn new(policy: PairingPolicy) -> Self {
        Self {
            passes: vec![
                Box::new(LinePass::testing()),
                Box::new(LinePass::depth()),
                Box::new(LinePass::gates()),
                Box::new(LinePass::real()),
                Box::new(PairedTimingPass::new(policy)),
            ],
        }
    }

    /// Runs every pass. The first failing pass aborts the whole report.
    pub fn extract(&self, log: &Log) -> Result<Report> {
        let mut sections = Vec::with_capacity(self.passes.len());

        for pass in &self.passes {
            let values = pass.extract(log)?;
            tracing::debug!(pass = pass.label(), values = values.len(), "Pass complete");
            sections.push(Section {
                label: pass.label(),
                values,
            });
        }

        Ok(Report::new(sections))
    }
}

impl Default for ReportExtractor {
    fn default() -> Self {
        Self::new(PairingPolicy::default())
    }
}

fn malformed(pass: &'static str, line: &LogLine) -> ReportError {
    ReportError::MalformedLine {
        pass,
        line_number: line.number,
        line: line.text.clone(),
    }
}

fn testing_label(line: &str) -> Option<Value> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"Testing (.*)").expect("testing pattern is valid"));

    pattern
        .captures(line)
        .map(|caps| Value::Label(caps[1].to_string()))
}

fn depth_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([0-9]+)::Depth").expect("depth pattern is valid"))
}

fn gates_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([0-9]+)::Gates").expect("gates pattern is valid"))
}

fn leading_count(pattern: &Regex, line: &str) -> Option<Value> {
    let caps = pattern.captures(line)?;
    Some(Value::Count(caps[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn values(pass: &dyn Pass, text: &str) -> Vec<String> {
        pass.extract(&Log::from_text(text))
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect()
    }

    #[test]
    fn test_testing_pass() {
        let pass = LinePass::testing();
        assert_eq!(values(&pass, "Testing foo bar\nnoise"), vec!["foo bar"]);
        assert_eq!(values(&pass, "Testing "), vec![""]);
    }

    #[test]
    fn test_testing_without_space_is_malformed() {
        let err = LinePass::testing()
            .extract(&Log::from_text("ok\nTestingfoo"))
            .unwrap_err();

        match err {
            ReportError::MalformedLine {
                pass, line_number, ..
            } => {
                assert_eq!(pass, TESTING);
                assert_eq!(line_number, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_depth_and_gates_passes() {
        let text = "123::Depth:something\n456::Gates:x\n 7::Depth\nDepth::8\n0042::Gates";
        assert_eq!(values(&LinePass::depth(), text), vec!["123"]);
        assert_eq!(values(&LinePass::gates(), text), vec!["456", "0042"]);
    }

    #[test]
    fn test_long_digit_runs_print_verbatim() {
        let text = "0042::Depth\n99999999999999999999999::Gates\n";
        let report = ReportExtractor::default().extract(&Log::from_text(text)).unwrap();

        assert_eq!(
            report.to_string(),
            "Testing\nDepth\n0042\nGates\n99999999999999999999999\nReal\nUser + Sys\n"
        );
    }

    #[test]
    fn test_real_pass() {
        assert_eq!(values(&LinePass::real(), "real 1m2.500s"), vec!["62500"]);
        assert!(matches!(
            LinePass::real().extract(&Log::from_text("really broken")),
            Err(ReportError::MalformedLine { pass: REAL, .. })
        ));
    }

    #[test]
    fn test_user_sys_pairing() {
        let text = "user 0m1.000s\nnoise\nuser 1m0.000s\nsys 0m0.500s\nsys 0m0.250s";
        let pass = PairedTimingPass::new(PairingPolicy::Strict);
        assert_eq!(values(&pass, text), vec!["1500", "60250"]);
    }

    #[test]
    fn test_strict_pairing_rejects_mismatch() {
        let text = "user 0m1.000s\nuser 0m2.000s\nsys 0m0.500s";
        let err = PairedTimingPass::new(PairingPolicy::Strict)
            .extract(&Log::from_text(text))
            .unwrap_err();

        assert!(matches!(
            err,
            ReportError::UnpairedTiming {
                user_lines: 2,
                sys_lines: 1
            }
        ));
    }

    #[test]
    fn test_truncate_pairing_uses_overlap() {
        let text = "user 0m1.000s\nsys 0m0.500s\nsys 0m9.000s";
        let pass = PairedTimingPass::new(PairingPolicy::Truncate);
        assert_eq!(values(&pass, text), vec!["1500"]);
    }

    #[test]
    fn test_malformed_sys_line() {
        let text = "user 0m1.000s\nsystem 0m0.5s";
        let err = PairedTimingPass::new(PairingPolicy::Strict)
            .extract(&Log::from_text(text))
            .unwrap_err();

        assert!(matches!(
            err,
            ReportError::MalformedLine {
                pass: USER_SYS,
                line_number: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_report_order_ignores_line_order() {
        let text = "sys 0m0.500s\nreal 0m2.000s\n3::Gates\n2::Depth\nuser 0m1.000s\nTesting last";
        let report = ReportExtractor::default().extract(&Log::from_text(text)).unwrap();

        assert_eq!(
            report.to_string(),
            "Testing\nlast\nDepth\n2\nGates\n3\nReal\n2000\nUser + Sys\n1500\n"
        );
    }

    #[test]
    fn test_empty_log_prints_headers_only() {
        let report = ReportExtractor::default().extract(&Log::default()).unwrap();
        assert_eq!(report.to_string(), "Testing\nDepth\nGates\nReal\nUser + Sys\n");
        assert_eq!(report.total_values(), 0);
    }

    #[test]
    fn test_real_values_are_typed() {
        let values = LinePass::real()
            .extract(&Log::from_text("real 0m0.129s"))
            .unwrap();

        assert_eq!(values, vec![Value::Millis(Duration::from_millis(129))]);
    }
}
