//! Progress reporting types.
//!
//! Progress flows from the provisioner through the installer to a
//! caller-supplied sink, unmodified — no buffering, no rate limiting. The
//! sink is invoked zero or more times with intermediate states, in whatever
//! order the provisioner emits them.

use std::time::Duration;

/// Phase of an in-flight installation, as reported by the provisioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Downloading,
    Extracting,
}

/// Optional measurements accompanying a progress event.
///
/// Every field is best-effort; a provisioner that can't estimate one simply
/// leaves it `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressInfo {
    /// Estimated time remaining
    pub eta: Option<Duration>,
    /// Completion percentage, 0.0..=100.0
    pub percent: Option<f64>,
    /// Average transfer speed in bytes per second
    pub avg_speed: Option<u64>,
}

/// Caller-supplied progress sink.
pub type ProgressSink = Box<dyn Fn(InstallState, Option<ProgressInfo>) + Send + Sync>;

/// A sink that discards everything, for callers that don't render progress.
pub fn null_sink() -> ProgressSink {
    Box::new(|_, _| {})
}
