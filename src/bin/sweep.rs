#![no_std]
#![no_main]

//! # Servo range sweep
//!
//! Bench bring-up for the pan/tilt head, no host needed. Walks each axis
//! through the whole command range with the same mapping and PWM driver as
//! the controller, logging command, angle and pulse width over RTT. The
//! feedback slot of the axis being swept stays lit.
//!
//! ```sh
//! cargo run --release --features firmware --bin sweep
//! ```
//!
//! Check on a scope that pan and tilt stay within their configured pulse
//! bounds before connecting the mechanics.

#[path = "../board.rs"]
mod board;

use embassy_executor::Spawner;
use embassy_stm32::gpio::{OutputType, Pin};
use embassy_stm32::time::hz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::CountingMode;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use pan_tilt::control::actuator::ramp;
use pan_tilt::control::{ActuatorChannel, FeedbackIndicator};
use pan_tilt::drivers::servo::PwmServos;
use pan_tilt::drivers::ws2812::Ws2812;
use pan_tilt::traits::ServoOutput;
use pan_tilt::{Axis, AxisCommand, ControllerConfig};

const LED_COUNT: usize = 6;

/// Dwell per command step
const STEP_MS: u64 = 20;
/// Command increment per step
const STEP: AxisCommand = 4;
/// Pause at each end of the sweep
const END_PAUSE_MS: u64 = 1000;

const CONFIG: ControllerConfig = ControllerConfig {
    led_count: LED_COUNT,
    ..ControllerConfig::DEFAULT
};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = board::init();

    let pan_pin = PwmPin::new_ch1(p.PB6, OutputType::PushPull);
    let tilt_pin = PwmPin::new_ch2(p.PB7, OutputType::PushPull);
    let pwm = SimplePwm::new(
        p.TIM4,
        Some(pan_pin),
        Some(tilt_pin),
        None,
        None,
        hz(50),
        CountingMode::EdgeAlignedUp,
    );
    let mut servos = PwmServos::new(pwm, CONFIG.pan_range, CONFIG.tilt_range);
    let mut pixels = Ws2812::<LED_COUNT>::new(p.PA8.degrade(), CONFIG.brightness);
    let indicator = FeedbackIndicator::new(CONFIG.active_color, CONFIG.idle_color);

    if let Err(e) = indicator.blank(&mut pixels) {
        defmt::panic!("LED strip: {}", e);
    }

    let mut channels = [Axis::Pan, Axis::Tilt].map(|axis| {
        match ActuatorChannel::new(axis, CONFIG.range(axis), CONFIG.startup(axis), &mut servos) {
            Ok(channel) => channel,
            Err(e) => defmt::panic!("startup: {}", e),
        }
    });

    loop {
        for channel in channels.iter_mut() {
            let axis = channel.axis();
            if let Err(e) = indicator.mark(axis, &mut pixels) {
                defmt::panic!("LED strip: {}", e);
            }
            defmt::info!("Sweeping {}", axis);

            sweep(channel, &mut servos, ramp(0, u8::MAX, STEP)).await;
            Timer::after(Duration::from_millis(END_PAUSE_MS)).await;
            sweep(channel, &mut servos, ramp(u8::MAX, 0, STEP)).await;
            Timer::after(Duration::from_millis(END_PAUSE_MS)).await;
            sweep(channel, &mut servos, ramp(0, CONFIG.startup(axis), STEP)).await;

            if let Err(e) = indicator.clear(axis, &mut pixels) {
                defmt::panic!("LED strip: {}", e);
            }
        }
    }
}

async fn sweep<S, I>(channel: &mut ActuatorChannel, servos: &mut S, commands: I)
where
    S: ServoOutput,
    I: Iterator<Item = AxisCommand>,
{
    let range = CONFIG.range(channel.axis());
    for cmd in commands {
        match channel.apply(cmd, servos) {
            Ok(true) => defmt::info!(
                "{} cmd={} angle={} pulse={}us",
                channel.axis(),
                cmd,
                channel.angle(),
                range.pulse_width_us(channel.angle())
            ),
            Ok(false) => {}
            Err(e) => defmt::panic!("servo write: {}", e),
        }
        Timer::after(Duration::from_millis(STEP_MS)).await;
    }
}
