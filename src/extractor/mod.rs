pub mod log;
pub mod pass;
pub mod report;
pub mod timing;

pub use log::{Log, LogLine};
pub use pass::{LinePass, PairedTimingPass, Pass, ReportExtractor};
pub use report::{Report, Section, Value};
pub use timing::{parse_timing, TimingField};
