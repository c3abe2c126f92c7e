//! Shared plumbing for MySQL checks
//!
//! The checks in this crate follow the [Sensu][] / Nagios plugin protocol:
//! print a single line describing what was found and exit with a status code
//! (see `Status`). Each check is a binary in `src/bin`, the reusable parts
//! (connection targets, credentials, threshold logic) live here.
//!
//! See the `scripts` module for the `--help` output of each check.
//!
//! [Sensu]: https://docs.sensu.io/sensu-go/latest/plugins/

use std::fmt;
use std::process;

pub mod connections;
pub mod credentials;
pub mod logging;
pub mod scripts;
pub mod target;
pub mod thresholds;

/// All possible exit statuses for a check
///
/// Ordered by how bad they are, so `max` of two statuses is the worse one.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// Exit with the code the monitoring framework expects for this status
    pub fn exit(self) -> ! {
        process::exit(self.code())
    }

    /// The process exit code for this status
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Status::*;
        let name = match *self {
            Ok => "OK",
            Warning => "WARNING",
            Critical => "CRITICAL",
            Unknown => "UNKNOWN",
        };
        f.pad(name)
    }
}
