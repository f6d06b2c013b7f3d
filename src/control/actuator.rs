use crate::config::ActuationRange;
use crate::control::mapper;
use crate::error::Result;
use crate::state::{Axis, AxisCommand};
use crate::traits::ServoOutput;

/// One physical servo axis plus the last command written to it.
///
/// The angle physically commanded is always `map(last_command, range)`.
/// Repeating a command issues no write.
#[derive(Debug, Clone, Copy)]
pub struct ActuatorChannel {
    axis: Axis,
    range: ActuationRange,
    last_command: AxisCommand,
}

impl ActuatorChannel {
    /// Create the channel and write `startup` once, unconditionally, so the
    /// servo starts from a known position.
    pub fn new<S: ServoOutput>(
        axis: Axis,
        range: ActuationRange,
        startup: AxisCommand,
        servos: &mut S,
    ) -> Result<Self> {
        let angle = mapper::map(startup, &range);
        servos.set_angle(axis, angle)?;
        crate::log_info!("{} startup command {} -> {} deg", axis, startup, angle);
        Ok(Self {
            axis,
            range,
            last_command: startup,
        })
    }

    /// Apply `cmd`. Returns whether a write was issued.
    ///
    /// `last_command` only moves after the write succeeded.
    pub fn apply<S: ServoOutput>(&mut self, cmd: AxisCommand, servos: &mut S) -> Result<bool> {
        if cmd == self.last_command {
            return Ok(false);
        }
        let angle = mapper::map(cmd, &self.range);
        servos.set_angle(self.axis, angle)?;
        crate::log_debug!("Setting {} {} -> {} deg", self.axis, cmd, angle);
        self.last_command = cmd;
        Ok(true)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn last_command(&self) -> AxisCommand {
        self.last_command
    }

    /// Angle currently held by the servo
    pub fn angle(&self) -> f32 {
        mapper::map(self.last_command, &self.range)
    }
}

/// Commands from `from` to `to` in `step` increments, always ending on `to`.
pub fn ramp(from: AxisCommand, to: AxisCommand, step: u8) -> impl Iterator<Item = AxisCommand> {
    let step = step.max(1);
    let mut next = Some(from);
    core::iter::from_fn(move || {
        let cmd = next?;
        next = if cmd < to {
            Some(cmd.saturating_add(step).min(to))
        } else if cmd > to {
            Some(cmd.saturating_sub(step).max(to))
        } else {
            None
        };
        Some(cmd)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::mock::MockServos;

    const PAN: ActuationRange = ActuationRange::new(360.0, 500, 2500);

    #[test]
    fn test_startup_writes_once() {
        let mut servos = MockServos::new();
        let channel = ActuatorChannel::new(Axis::Pan, PAN, 128, &mut servos).unwrap();
        assert_eq!(servos.writes(), &[(Axis::Pan, 180.0)]);
        assert_eq!(channel.last_command(), 128);
        assert_eq!(channel.angle(), 180.0);
    }

    #[test]
    fn test_apply_same_command_twice() {
        let mut servos = MockServos::new();
        let mut channel = ActuatorChannel::new(Axis::Pan, PAN, 0, &mut servos).unwrap();
        servos.clear();

        assert_eq!(channel.apply(64, &mut servos), Ok(true));
        assert_eq!(channel.apply(64, &mut servos), Ok(false));
        assert_eq!(servos.writes(), &[(Axis::Pan, 90.0)]);
    }

    #[test]
    fn test_apply_distinct_commands() {
        let mut servos = MockServos::new();
        let mut channel = ActuatorChannel::new(Axis::Pan, PAN, 0, &mut servos).unwrap();
        servos.clear();

        assert_eq!(channel.apply(64, &mut servos), Ok(true));
        assert_eq!(channel.apply(128, &mut servos), Ok(true));
        assert_eq!(servos.writes(), &[(Axis::Pan, 90.0), (Axis::Pan, 180.0)]);
    }

    #[test]
    fn test_repeating_startup_command_is_suppressed() {
        let mut servos = MockServos::new();
        let mut channel = ActuatorChannel::new(Axis::Pan, PAN, 128, &mut servos).unwrap();
        assert_eq!(channel.apply(128, &mut servos), Ok(false));
        assert_eq!(servos.writes().len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_last_command() {
        let mut servos = MockServos::new();
        let mut channel = ActuatorChannel::new(Axis::Pan, PAN, 10, &mut servos).unwrap();
        servos.fail_on(Axis::Pan);

        assert_eq!(channel.apply(20, &mut servos), Err(Error::Servo(Axis::Pan)));
        assert_eq!(channel.last_command(), 10);
    }

    #[test]
    fn test_ramp_reaches_both_ends() {
        let up: Vec<_> = ramp(0, u8::MAX, 4).collect();
        assert_eq!(up.first(), Some(&0));
        assert_eq!(up.last(), Some(&255));
        assert_eq!(up[up.len() - 2], 252);

        let down: Vec<_> = ramp(u8::MAX, 0, 4).collect();
        assert_eq!(down.first(), Some(&255));
        assert_eq!(down.last(), Some(&0));
        assert_eq!(down[1], 251);
    }

    #[test]
    fn test_ramp_single_point() {
        assert_eq!(ramp(50, 50, 4).collect::<Vec<_>>(), vec![50]);
        assert_eq!(ramp(0, 3, 0).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }
}
