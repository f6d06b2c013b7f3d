//! Last-received buffer for inbound HID reports.
//!
//! The USB side stores every OUT report it sees; the control loop takes them
//! once per tick. Each report id keeps only its newest payload, and taking a
//! payload empties the slot, so a host that stops sending produces `None`
//! rather than a replay of the previous command.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::{ReportBuf, INBOUND_REPORT_IDS};

const SLOT_COUNT: usize = 5;

struct Slots {
    reports: [Option<ReportBuf>; SLOT_COUNT],
    dropped: u32,
}

pub struct ReportLatch {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Slots>>,
}

impl ReportLatch {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Slots {
                reports: [None, None, None, None, None],
                dropped: 0,
            })),
        }
    }

    fn slot(id: u8) -> Option<usize> {
        if INBOUND_REPORT_IDS.contains(&id) {
            Some((id - INBOUND_REPORT_IDS.start()) as usize)
        } else {
            None
        }
    }

    /// Replace the buffered payload for `id`.
    ///
    /// Returns `false` (and counts a drop) for unknown ids or oversized
    /// payloads.
    pub fn store(&self, id: u8, payload: &[u8]) -> bool {
        self.inner.lock(|cell| {
            let mut slots = cell.borrow_mut();
            let Some(index) = Self::slot(id) else {
                slots.dropped = slots.dropped.wrapping_add(1);
                return false;
            };
            match ReportBuf::from_slice(payload) {
                Ok(buf) => {
                    slots.reports[index] = Some(buf);
                    true
                }
                Err(_) => {
                    slots.dropped = slots.dropped.wrapping_add(1);
                    false
                }
            }
        })
    }

    /// Store a report still carrying its id byte. A framing mismatch counts
    /// as a drop.
    pub fn store_framed(&self, id: u8, framed: &[u8]) -> bool {
        match strip_report_id(id, framed) {
            Some(payload) => self.store(id, payload),
            None => {
                self.inner.lock(|cell| {
                    let mut slots = cell.borrow_mut();
                    slots.dropped = slots.dropped.wrapping_add(1);
                });
                false
            }
        }
    }

    /// Take the buffered payload for `id`, leaving the slot empty.
    pub fn take(&self, id: u8) -> Option<ReportBuf> {
        let index = Self::slot(id)?;
        self.inner
            .lock(|cell| cell.borrow_mut().reports[index].take())
    }

    /// Reports rejected since startup
    pub fn dropped(&self) -> u32 {
        self.inner.lock(|cell| cell.borrow().dropped)
    }
}

impl Default for ReportLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a framed OUT report into its payload.
///
/// Both the interrupt OUT endpoint and a control pipe SET_REPORT hand over the
/// report with its id still in the first byte. Returns `None` when the buffer
/// is empty or its first byte disagrees with `id`.
pub fn strip_report_id(id: u8, framed: &[u8]) -> Option<&[u8]> {
    match framed.split_first() {
        Some((&first, payload)) if first == id => Some(payload),
        _ => None,
    }
}

#[cfg(feature = "firmware")]
pub use usb::LatchHandler;

#[cfg(feature = "firmware")]
mod usb {
    use embassy_usb::class::hid::{ReportId, RequestHandler};
    use embassy_usb::control::OutResponse;

    use super::ReportLatch;

    /// Feeds OUT reports into a shared [`ReportLatch`]. One instance serves
    /// the interrupt endpoint reader, another the control pipe.
    pub struct LatchHandler {
        latch: &'static ReportLatch,
    }

    impl LatchHandler {
        pub const fn new(latch: &'static ReportLatch) -> Self {
            Self { latch }
        }
    }

    impl RequestHandler for LatchHandler {
        fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
            None
        }

        fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
            let ReportId::Out(id) = id else {
                return OutResponse::Rejected;
            };
            if self.latch.store_framed(id, data) {
                OutResponse::Accepted
            } else {
                crate::log_warn!("Rejected OUT report id={} len={}", id, data.len());
                OutResponse::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_empty() {
        let latch = ReportLatch::new();
        assert_eq!(latch.take(3), None);
    }

    #[test]
    fn test_take_consumes() {
        let latch = ReportLatch::new();
        assert!(latch.store(3, &[200, 50]));
        assert_eq!(latch.take(3).as_deref(), Some(&[200u8, 50][..]));
        assert_eq!(latch.take(3), None);
    }

    #[test]
    fn test_newest_report_wins() {
        let latch = ReportLatch::new();
        latch.store(3, &[1, 2]);
        latch.store(3, &[3, 4]);
        assert_eq!(latch.take(3).as_deref(), Some(&[3u8, 4][..]));
    }

    #[test]
    fn test_ids_are_independent() {
        let latch = ReportLatch::new();
        latch.store(1, &[9]);
        latch.store(5, &[8, 7]);
        assert_eq!(latch.take(3), None);
        assert_eq!(latch.take(5).as_deref(), Some(&[8u8, 7][..]));
        assert_eq!(latch.take(1).as_deref(), Some(&[9u8][..]));
    }

    #[test]
    fn test_unknown_id_is_dropped() {
        let latch = ReportLatch::new();
        assert!(!latch.store(0, &[1, 2]));
        assert!(!latch.store(6, &[1, 2]));
        assert_eq!(latch.take(0), None);
        assert_eq!(latch.dropped(), 2);
    }

    #[test]
    fn test_oversized_payload_is_dropped() {
        let latch = ReportLatch::new();
        let big = [0u8; 65];
        assert!(!latch.store(3, &big));
        assert_eq!(latch.take(3), None);
        assert_eq!(latch.dropped(), 1);
    }

    #[test]
    fn test_strip_report_id() {
        assert_eq!(strip_report_id(3, &[3, 200, 50]), Some(&[200u8, 50][..]));
        assert_eq!(strip_report_id(1, &[1]), Some(&[][..]));
        assert_eq!(strip_report_id(3, &[4, 200, 50]), None);
        assert_eq!(strip_report_id(3, &[]), None);
    }

    #[test]
    fn test_framed_command_decodes() {
        // Layout handed over by both the interrupt endpoint and SET_REPORT: id, pan, tilt
        let latch = ReportLatch::new();
        assert!(latch.store_framed(3, &[3, 200, 50]));
        let command = crate::protocol::codec::decode(latch.take(3).as_deref());
        assert_eq!(command, Some(crate::InboundReport { pan: 200, tilt: 50 }));
    }

    #[test]
    fn test_framed_id_mismatch_is_dropped() {
        let latch = ReportLatch::new();
        assert!(!latch.store_framed(3, &[2, 200, 50]));
        assert!(!latch.store_framed(3, &[]));
        assert_eq!(latch.take(3), None);
        assert_eq!(latch.take(2), None);
        assert_eq!(latch.dropped(), 2);
    }

    #[test]
    fn test_framed_unknown_id_is_dropped() {
        let latch = ReportLatch::new();
        assert!(!latch.store_framed(7, &[7, 1, 2]));
        assert_eq!(latch.dropped(), 1);
    }
}
