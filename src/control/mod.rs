//! Pan/tilt control loop
//!
//! One tick: drain the host reports, apply the pan/tilt command to the servos,
//! light the feedback slot of every axis that moved, then acknowledge. The
//! caller owns the cadence and awaits the tick period between calls.
//!
//! Peripherals are passed into every call rather than stored, so the loop can
//! be driven against recording fakes on the host.

pub mod actuator;
pub mod indicator;
pub mod mapper;

pub use actuator::ActuatorChannel;
pub use indicator::FeedbackIndicator;

use crate::config::{ControllerConfig, FaultPolicy};
use crate::error::{Error, Result};
use crate::protocol::{codec, INBOUND_REPORT_IDS, REPORT_ID_ACK, REPORT_ID_COMMAND};
use crate::state::{Axis, AxisCommand, InboundReport, TickReport};
use crate::traits::{HostLink, PixelStrip, ServoOutput};

pub struct ControlLoop {
    pan: ActuatorChannel,
    tilt: ActuatorChannel,
    indicator: FeedbackIndicator,
    fault_policy: FaultPolicy,
}

impl ControlLoop {
    /// Validate `config`, drive both servos to their startup commands and blank
    /// the LED strip.
    pub fn start<S, P>(config: &ControllerConfig, servos: &mut S, pixels: &mut P) -> Result<Self>
    where
        S: ServoOutput,
        P: PixelStrip,
    {
        config.validate()?;
        if pixels.pixel_count() < Axis::ALL.len() {
            return Err(Error::InvalidConfig);
        }

        let pan = ActuatorChannel::new(Axis::Pan, config.pan_range, config.pan_startup, servos)?;
        let tilt = ActuatorChannel::new(Axis::Tilt, config.tilt_range, config.tilt_startup, servos)?;

        let indicator = FeedbackIndicator::new(config.active_color, config.idle_color);
        indicator.blank(pixels)?;

        Ok(Self {
            pan,
            tilt,
            indicator,
            fault_policy: config.fault_policy,
        })
    }

    pub fn channel(&self, axis: Axis) -> &ActuatorChannel {
        match axis {
            Axis::Pan => &self.pan,
            Axis::Tilt => &self.tilt,
        }
    }

    fn channel_mut(&mut self, axis: Axis) -> &mut ActuatorChannel {
        match axis {
            Axis::Pan => &mut self.pan,
            Axis::Tilt => &mut self.tilt,
        }
    }

    /// Run one tick. Any `Err` is fatal; see [`ControlLoop::on_fault`].
    pub async fn tick<S, P, H>(
        &mut self,
        servos: &mut S,
        pixels: &mut P,
        host: &mut H,
    ) -> Result<TickReport>
    where
        S: ServoOutput,
        P: PixelStrip,
        H: HostLink,
    {
        let command = Self::receive(host);
        let mut report = TickReport {
            command,
            ..TickReport::default()
        };

        match command {
            Some(command) => {
                for axis in Axis::ALL {
                    let changed = self.channel_mut(axis).apply(command.command(axis), servos)?;
                    self.indicator.show(axis, changed, pixels)?;
                    match axis {
                        Axis::Pan => report.pan_changed = changed,
                        Axis::Tilt => report.tilt_changed = changed,
                    }
                }
            }
            None => {
                for axis in Axis::ALL {
                    self.indicator.clear(axis, pixels)?;
                }
            }
        }

        host.send_report(REPORT_ID_ACK, &codec::encode_ack()).await?;
        Ok(report)
    }

    /// Drain every inbound report id. Only the command id is interpreted; the
    /// rest are logged and discarded.
    fn receive<H: HostLink>(host: &mut H) -> Option<InboundReport> {
        let mut command = None;
        for id in INBOUND_REPORT_IDS {
            let Some(payload) = host.take_report(id) else {
                continue;
            };
            crate::log_debug!("report {}: {:?}", id, payload.as_slice());
            if id == REPORT_ID_COMMAND {
                command = codec::decode(Some(payload.as_slice()));
            }
        }
        command
    }

    /// Apply the configured fault policy after `tick` failed with `error`.
    ///
    /// Best effort: failures while parking are logged, never returned.
    pub fn on_fault<S, P>(&mut self, error: Error, servos: &mut S, pixels: &mut P)
    where
        S: ServoOutput,
        P: PixelStrip,
    {
        crate::log_error!("Control loop halted: {}", error);

        let FaultPolicy::Park { pan, tilt } = self.fault_policy else {
            return;
        };
        crate::log_warn!("Parking at pan={} tilt={}", pan, tilt);

        for (axis, target) in [(Axis::Pan, pan), (Axis::Tilt, tilt)] {
            if let Err(e) = self.park(axis, target, servos) {
                crate::log_warn!("Parking {} failed: {}", axis, e);
            }
            if let Err(e) = self.indicator.clear(axis, pixels) {
                crate::log_warn!("Clearing {} slot failed: {}", axis, e);
            }
        }
    }

    fn park<S: ServoOutput>(&mut self, axis: Axis, target: AxisCommand, servos: &mut S) -> Result<()> {
        self.channel_mut(axis).apply(target, servos).map(|_| ())
    }
}
