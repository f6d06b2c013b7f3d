#![cfg_attr(not(test), no_std)]

//! pan_tilt - HID-commanded two-axis servo head
//!
//! Host reports set pan/tilt positions; two LEDs flash on the axes that moved.
//! Decision logic lives here and runs on the host under test. The embassy
//! firmware binaries (`firmware` feature) supply the peripherals.

pub mod logging;

pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod protocol;
pub mod state;
pub mod traits;

#[cfg(test)]
mod mock;

pub use config::{ActuationRange, ControllerConfig, FaultPolicy};
pub use control::ControlLoop;
pub use error::{Error, Result};
pub use state::{Axis, AxisCommand, InboundReport, Rgb, TickReport};
