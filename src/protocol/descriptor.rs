//! HID report descriptor presented to the host.
//!
//! Vendor-defined page. Input report 1 is the 4-byte acknowledgment; output
//! reports 1..=5 are 2 bytes each, of which only report 3 is interpreted.

/// USB vendor id the host application matches on
pub const USB_VID: u16 = 0x2E8A;
/// USB product id the host application matches on
pub const USB_PID: u16 = 0x101A;

#[rustfmt::skip]
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x06, 0x00, 0xFF,   // Usage Page (Vendor Defined 0xFF00)
    0x09, 0x01,         // Usage (0x01)
    0xA1, 0x01,         // Collection (Application)
    0x15, 0x00,         //   Logical Minimum (0)
    0x26, 0xFF, 0x00,   //   Logical Maximum (255)
    0x75, 0x08,         //   Report Size (8)

    0x85, 0x01,         //   Report ID (1)
    0x95, 0x04,         //   Report Count (4)
    0x09, 0x02,         //   Usage (0x02)
    0x81, 0x02,         //   Input (Data, Var, Abs)

    0x85, 0x01,         //   Report ID (1)
    0x95, 0x02,         //   Report Count (2)
    0x09, 0x03,         //   Usage (0x03)
    0x91, 0x02,         //   Output (Data, Var, Abs)

    0x85, 0x02,         //   Report ID (2)
    0x95, 0x02,         //   Report Count (2)
    0x09, 0x04,         //   Usage (0x04)
    0x91, 0x02,         //   Output (Data, Var, Abs)

    0x85, 0x03,         //   Report ID (3): pan/tilt command
    0x95, 0x02,         //   Report Count (2)
    0x09, 0x05,         //   Usage (0x05)
    0x91, 0x02,         //   Output (Data, Var, Abs)

    0x85, 0x04,         //   Report ID (4)
    0x95, 0x02,         //   Report Count (2)
    0x09, 0x06,         //   Usage (0x06)
    0x91, 0x02,         //   Output (Data, Var, Abs)

    0x85, 0x05,         //   Report ID (5)
    0x95, 0x02,         //   Report Count (2)
    0x09, 0x07,         //   Usage (0x07)
    0x91, 0x02,         //   Output (Data, Var, Abs)
    0xC0,               // End Collection
];
