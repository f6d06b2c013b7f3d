use crate::config::SERVO_PERIOD_US;

/// Timer compare value for `pulse_us` at 50 Hz, given the timer's full-scale
/// duty.
pub fn pulse_to_duty(pulse_us: u16, max_duty: u16) -> u16 {
    let duty = pulse_us as u32 * max_duty as u32 / SERVO_PERIOD_US;
    duty.min(max_duty as u32) as u16
}

#[cfg(feature = "firmware")]
pub use hw::PwmServos;

#[cfg(feature = "firmware")]
mod hw {
    use embassy_stm32::peripherals::TIM4;
    use embassy_stm32::timer::simple_pwm::SimplePwm;
    use embassy_stm32::timer::Channel;

    use super::pulse_to_duty;
    use crate::config::ActuationRange;
    use crate::error::{Error, Result};
    use crate::state::Axis;
    use crate::traits::ServoOutput;

    /// Pan on TIM4 CH1, tilt on TIM4 CH2, one shared 50 Hz timebase.
    pub struct PwmServos {
        pwm: SimplePwm<'static, TIM4>,
        pan_range: ActuationRange,
        tilt_range: ActuationRange,
    }

    impl PwmServos {
        const PAN: Channel = Channel::Ch1;
        const TILT: Channel = Channel::Ch2;

        /// Outputs stay low until the first `set_angle`.
        pub fn new(
            mut pwm: SimplePwm<'static, TIM4>,
            pan_range: ActuationRange,
            tilt_range: ActuationRange,
        ) -> Self {
            pwm.set_duty(Self::PAN, 0);
            pwm.set_duty(Self::TILT, 0);
            pwm.enable(Self::PAN);
            pwm.enable(Self::TILT);
            Self {
                pwm,
                pan_range,
                tilt_range,
            }
        }
    }

    impl ServoOutput for PwmServos {
        fn set_angle(&mut self, axis: Axis, angle_deg: f32) -> Result<()> {
            if !angle_deg.is_finite() {
                return Err(Error::Servo(axis));
            }
            let (channel, range) = match axis {
                Axis::Pan => (Self::PAN, self.pan_range),
                Axis::Tilt => (Self::TILT, self.tilt_range),
            };
            let pulse = range.pulse_width_us(angle_deg);
            let duty = pulse_to_duty(pulse, self.pwm.get_max_duty());
            self.pwm.set_duty(channel, duty);
            crate::log_trace!("{} pulse {}us duty {}", axis, pulse, duty);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_to_duty() {
        assert_eq!(pulse_to_duty(500, 20_000), 500);
        assert_eq!(pulse_to_duty(1500, 60_000), 4500);
        assert_eq!(pulse_to_duty(2500, 65_535), 8191);
    }

    #[test]
    fn test_pulse_to_duty_saturates() {
        assert_eq!(pulse_to_duty(30_000, 1000), 1000);
    }
}
