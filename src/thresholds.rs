//! Turning connection counts into a `Status`

use std::fmt;

use crate::connections::ConnectionCounts;
use crate::Status;

/// What the thresholds are measured against
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    /// Raw number of connected threads
    Absolute,
    /// Connected threads as a percent of `max_connections`
    Percentage,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub warning: u64,
    pub critical: u64,
    pub mode: Mode,
}

/// The result of a check: a status and the line to print for it
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub status: Status,
    pub message: String,
}

impl Outcome {
    pub fn new<S: Into<String>>(status: Status, message: S) -> Outcome {
        Outcome {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Thresholds {
    /// Compare `counts` against the thresholds
    ///
    /// Both comparisons are inclusive: sitting exactly on a threshold trips
    /// it. Critical is checked first, so a warning threshold above the
    /// critical one never fires.
    pub fn evaluate(&self, counts: ConnectionCounts) -> Outcome {
        let ConnectionCounts { used, max } = counts;
        let (value, suffix) = match self.mode {
            Mode::Absolute => (used as f64, String::new()),
            Mode::Percentage => {
                if max == 0 {
                    return Outcome::new(
                        Status::Critical,
                        "max connections reported as 0, cannot compute percentage",
                    );
                }
                let percent = used as f64 * 100.0 / max as f64;
                (percent, format!(" ({:.1}%)", percent))
            }
        };

        let status = if value >= self.critical as f64 {
            Status::Critical
        } else if value >= self.warning as f64 {
            Status::Warning
        } else {
            Status::Ok
        };

        let message = if status == Status::Ok {
            format!(
                "max connections is under limit in MySQL: {} out of {}{}",
                used, max, suffix
            )
        } else {
            format!(
                "max connections reached in MySQL: {} out of {}{}",
                used, max, suffix
            )
        };
        Outcome::new(status, message)
    }
}
