//! Command and acknowledgment codec.
//!
//! Inbound: report 3 carries `[pan, tilt]`, one byte each.
//! Outbound: report 1 carries a constant liveness token, sent every tick.

use core::fmt;

use crate::state::InboundReport;

/// Payload length of a command report
pub const COMMAND_LEN: usize = 2;

/// Acknowledgment payload; does not depend on the command.
pub const ACK: [u8; 4] = [4, 5, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "firmware", derive(defmt::Format))]
pub enum DecodeError {
    Length { expected: usize, actual: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Length { expected, actual } => {
                write!(f, "expected {} byte command, got {}", expected, actual)
            }
        }
    }
}

/// Strict decode of a command payload.
pub fn decode_command(payload: &[u8]) -> Result<InboundReport, DecodeError> {
    match *payload {
        [pan, tilt] => Ok(InboundReport { pan, tilt }),
        _ => Err(DecodeError::Length {
            expected: COMMAND_LEN,
            actual: payload.len(),
        }),
    }
}

/// Decode whatever report 3 delivered this tick.
///
/// `None` in means nothing arrived; a malformed payload is logged and also
/// comes back as `None`.
pub fn decode(raw: Option<&[u8]>) -> Option<InboundReport> {
    let payload = raw?;
    match decode_command(payload) {
        Ok(report) => Some(report),
        Err(e) => {
            crate::log_warn!("Dropping malformed command report: {}", e);
            None
        }
    }
}

pub const fn encode_ack() -> [u8; 4] {
    ACK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_absent() {
        assert_eq!(decode(None), None);
    }

    #[test]
    fn test_decode_command() {
        assert_eq!(
            decode(Some(&[200, 50][..])),
            Some(InboundReport { pan: 200, tilt: 50 })
        );
    }

    #[test]
    fn test_explicit_zero_is_not_absent() {
        assert_eq!(decode(Some(&[0, 0][..])), Some(InboundReport { pan: 0, tilt: 0 }));
    }

    #[test]
    fn test_decode_wrong_length_is_absent() {
        assert_eq!(decode(Some(&[7][..])), None);
        assert_eq!(decode(Some(&[][..])), None);
        assert_eq!(decode(Some(&[1, 2, 3][..])), None);
    }

    #[test]
    fn test_decode_command_reports_length() {
        assert_eq!(
            decode_command(&[9]),
            Err(DecodeError::Length {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_ack_is_constant() {
        assert_eq!(encode_ack(), [4, 5, 0, 0]);
    }
}
