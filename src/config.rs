//! Build-time controller configuration
//!
//! Nothing in here is mutable at runtime. The firmware builds a
//! [`ControllerConfig`] once, validates it, and hands it to the control loop.

use embassy_time::Duration;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::error::{Error, Result};
use crate::state::{Axis, AxisCommand, Rgb};

/// Servo frame period at 50 Hz
pub const SERVO_PERIOD_US: u32 = 20_000;

/// Physical actuation range of one servo axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuationRange {
    /// Largest reachable angle in degrees; the smallest is always 0
    pub max_angle: f32,
    /// Pulse width commanding 0°
    pub min_pulse_us: u16,
    /// Pulse width commanding `max_angle`
    pub max_pulse_us: u16,
}

impl ActuationRange {
    pub const fn new(max_angle: f32, min_pulse_us: u16, max_pulse_us: u16) -> Self {
        Self {
            max_angle,
            min_pulse_us,
            max_pulse_us,
        }
    }

    /// Pulse width for `angle`, clamped to the range, rounded to the nearest µs.
    pub fn pulse_width_us(&self, angle: f32) -> u16 {
        let fraction = (angle / self.max_angle).clamp(0.0, 1.0);
        let span = (self.max_pulse_us - self.min_pulse_us) as f32;
        self.min_pulse_us + (span * fraction).round() as u16
    }

    fn validate(&self) -> Result<()> {
        if self.max_angle.is_nan() || self.max_angle <= 0.0 || self.min_pulse_us >= self.max_pulse_us {
            return Err(Error::InvalidConfig);
        }
        if self.max_pulse_us as u32 > SERVO_PERIOD_US {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}

/// What the controller commands after a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Leave actuators and indicator exactly where they are
    HoldLast,
    /// One best-effort move to a parking position
    Park { pan: AxisCommand, tilt: AxisCommand },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub pan_range: ActuationRange,
    pub tilt_range: ActuationRange,
    pub pan_startup: AxisCommand,
    pub tilt_startup: AxisCommand,
    pub tick_period: Duration,
    pub active_color: Rgb,
    pub idle_color: Rgb,
    pub led_count: usize,
    /// Global LED brightness, 0.0 ..= 1.0
    pub brightness: f32,
    pub fault_policy: FaultPolicy,
}

impl ControllerConfig {
    pub const DEFAULT: ControllerConfig = ControllerConfig {
        pan_range: ActuationRange::new(360.0, 500, 2500),
        tilt_range: ActuationRange::new(300.0, 500, 2500),
        pan_startup: 128,
        tilt_startup: 50,
        tick_period: Duration::from_millis(10),
        active_color: Rgb::WHITE,
        idle_color: Rgb::OFF,
        led_count: 6,
        brightness: 0.3,
        fault_policy: FaultPolicy::HoldLast,
    };

    pub fn range(&self, axis: Axis) -> ActuationRange {
        match axis {
            Axis::Pan => self.pan_range,
            Axis::Tilt => self.tilt_range,
        }
    }

    pub fn startup(&self, axis: Axis) -> AxisCommand {
        match axis {
            Axis::Pan => self.pan_startup,
            Axis::Tilt => self.tilt_startup,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.pan_range.validate()?;
        self.tilt_range.validate()?;
        if self.tick_period.as_ticks() == 0 {
            return Err(Error::InvalidConfig);
        }
        // both feedback slots must exist on the strip
        if self.led_count < Axis::ALL.len() {
            return Err(Error::InvalidConfig);
        }
        if !(0.0..=1.0).contains(&self.brightness) {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
