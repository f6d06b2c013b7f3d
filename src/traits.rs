//! Peripheral capabilities consumed by the control loop
//!
//! The control loop never touches a HAL type directly. Firmware provides
//! implementations backed by the timer PWM, the WS2812 bit-banger and the USB
//! HID class; host tests provide recording fakes.

use crate::error::Result;
use crate::protocol::ReportBuf;
use crate::state::{Axis, Rgb};

/// Servo bank driving the pan and tilt axes.
///
/// A call is one physical actuation write. Implementations must not retry;
/// an `Err` is treated as fatal by the caller.
pub trait ServoOutput {
    /// Command `axis` to `angle_deg` (0 ..= that axis' `max_angle`).
    fn set_angle(&mut self, axis: Axis, angle_deg: f32) -> Result<()>;
}

/// Addressable LED array.
pub trait PixelStrip {
    /// Number of pixels on the strip
    fn pixel_count(&self) -> usize;

    /// Set pixel `index` to `color`; the new color is visible when this returns.
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<()>;
}

/// Host-facing report transport.
#[allow(async_fn_in_trait)]
pub trait HostLink {
    /// Take the most recent OUT report for `id`, if one arrived since the last
    /// call. Never blocks.
    fn take_report(&mut self, id: u8) -> Option<ReportBuf>;

    /// Send an IN report on `id`.
    async fn send_report(&mut self, id: u8, data: &[u8]) -> Result<()>;
}
