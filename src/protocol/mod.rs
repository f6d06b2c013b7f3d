//! Host report protocol: report ids, the command/ack codec, the HID report
//! descriptor and the inbound report latch.

pub mod codec;
pub mod descriptor;
pub mod latch;

pub use codec::{decode, encode_ack, DecodeError};
pub use latch::ReportLatch;

/// Largest report payload buffered per report id
pub const MAX_REPORT_LEN: usize = 64;

/// Owned copy of one report payload (report id byte not included).
pub type ReportBuf = heapless::Vec<u8, MAX_REPORT_LEN>;

/// Acknowledgment IN report id
pub const REPORT_ID_ACK: u8 = 1;
/// OUT report id carrying the pan/tilt command
pub const REPORT_ID_COMMAND: u8 = 3;
/// OUT report ids drained every tick
pub const INBOUND_REPORT_IDS: core::ops::RangeInclusive<u8> = 1..=5;
