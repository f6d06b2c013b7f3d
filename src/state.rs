//! Shared value types passed between the report codec, the control loop and
//! the peripheral capabilities.
//!
//! All types are `Copy`; nothing in here is persisted beyond a single tick.

use core::fmt;

// ── Axis ──────────────────────────────────────────────────────────────────────

/// Raw 8-bit position command for one axis, as sent by the host.
pub type AxisCommand = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "firmware", derive(defmt::Format))]
pub enum Axis {
    Pan,
    Tilt,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Pan, Axis::Tilt];

    /// Feedback slot (LED index) statically bound to this axis.
    pub const fn slot(self) -> usize {
        match self {
            Axis::Pan => 0,
            Axis::Tilt => 1,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Pan => f.write_str("pan"),
            Axis::Tilt => f.write_str("tilt"),
        }
    }
}

// ── Reports ───────────────────────────────────────────────────────────────────

/// Decoded pan/tilt command from report channel 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "firmware", derive(defmt::Format))]
pub struct InboundReport {
    pub pan: AxisCommand,
    pub tilt: AxisCommand,
}

impl InboundReport {
    pub fn command(&self, axis: Axis) -> AxisCommand {
        match axis {
            Axis::Pan => self.pan,
            Axis::Tilt => self.tilt,
        }
    }
}

/// Outcome of one control loop tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub command: Option<InboundReport>,
    pub pan_changed: bool,
    pub tilt_changed: bool,
}

impl TickReport {
    pub fn changed(&self, axis: Axis) -> bool {
        match axis {
            Axis::Pan => self.pan_changed,
            Axis::Tilt => self.tilt_changed,
        }
    }
}

// ── Color ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "firmware", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
