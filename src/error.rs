//! Controller error types
//!
//! Everything in here is fatal to the control loop. A malformed host report is
//! not an error at this level; see [`crate::protocol::codec::DecodeError`].

use core::fmt;

use crate::state::Axis;

/// Result type for controller operations
pub type Result<T> = core::result::Result<T, Error>;

/// Fatal controller errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "firmware", derive(defmt::Format))]
pub enum Error {
    /// Servo output for the given axis rejected a write
    Servo(Axis),
    /// Addressable LED strip rejected a write
    Indicator,
    /// Host interface never came up during startup
    HostUnavailable,
    /// Host interface failed while sending a report
    Transport,
    /// Build-time configuration is inconsistent
    InvalidConfig,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Servo(axis) => write!(f, "servo write failed on {} axis", axis),
            Error::Indicator => write!(f, "indicator write failed"),
            Error::HostUnavailable => write!(f, "host interface unavailable"),
            Error::Transport => write!(f, "host interface transport failure"),
            Error::InvalidConfig => write!(f, "invalid controller configuration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_axis() {
        let msg = format!("{}", Error::Servo(Axis::Tilt));
        assert_eq!(msg, "servo write failed on tilt axis");
    }
}
