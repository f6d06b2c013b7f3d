#![no_std]
#![no_main]

mod board;
mod tasks;
mod usb;

use embassy_executor::Spawner;
use embassy_stm32::gpio::{OutputType, Pin};
use embassy_stm32::time::hz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::CountingMode;
use {defmt_rtt as _, panic_probe as _};

use pan_tilt::drivers::servo::PwmServos;
use pan_tilt::drivers::ws2812::Ws2812;
use pan_tilt::ControllerConfig;

use crate::tasks::control_task::control_task;

/// Pixels on the indicator strip; the first two are the pan/tilt slots
pub const LED_COUNT: usize = 6;

const CONFIG: ControllerConfig = ControllerConfig {
    led_count: LED_COUNT,
    ..ControllerConfig::DEFAULT
};

// ── Main ──────────────────────────────────────────────────────────────────────
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    pan_tilt::log_info!("Starting");

    // 1. Clocks (168 MHz core, 48 MHz USB)
    let p = board::init();

    // 2. USB HID: device task + OUT report reader
    let (usb_dev, hid_reader, host) = usb::init(p.USB_OTG_FS, p.PA12, p.PA11);
    spawner.spawn(usb::usb_task(usb_dev)).unwrap();
    spawner.spawn(usb::hid_reader_task(hid_reader)).unwrap();

    // 3. Servos @ 50 Hz on TIM4 (pan=PB6 CH1, tilt=PB7 CH2)
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
    let servos = PwmServos::new(pwm, CONFIG.pan_range, CONFIG.tilt_range);

    // 4. WS2812 indicator strip on PA8
    let pixels = Ws2812::<LED_COUNT>::new(p.PA8.degrade(), CONFIG.brightness);

    // 5. Control loop owns servos, strip and the HID writer from here on
    spawner
        .spawn(control_task(CONFIG, servos, pixels, host))
        .unwrap();
}
