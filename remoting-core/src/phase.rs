//! Hook phases.

use std::fmt;

/// One of the four lifecycle points at which hooks fire.
///
/// Phases fire in declaration order for every call: `BeforeSend` first,
/// then exactly one of `Success` or `Failure`, then `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fired with the invocation context before the manager is invoked.
    BeforeSend,
    /// Fired when the remote call is classified as a success.
    Success,
    /// Fired when the remote call is classified as a failure.
    Failure,
    /// Fired after `Success` or `Failure`, regardless of outcome.
    Complete,
}

impl Phase {
    /// All phases in firing order.
    pub const ALL: [Phase; 4] = [
        Phase::BeforeSend,
        Phase::Success,
        Phase::Failure,
        Phase::Complete,
    ];

    /// The phase name used in logs and errors.
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::BeforeSend => "before-send",
            Phase::Success => "success",
            Phase::Failure => "failure",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
