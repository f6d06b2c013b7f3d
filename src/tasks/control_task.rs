use embassy_executor::task;
use embassy_time::{Duration, Timer};

use pan_tilt::drivers::servo::PwmServos;
use pan_tilt::drivers::ws2812::Ws2812;
use pan_tilt::{Axis, ControlLoop, ControllerConfig, Error};

use crate::usb::HidLink;
use crate::LED_COUNT;

/// How long to wait for the host to configure the USB device
const HOST_READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Control task: startup positions, wait for the host, then one tick per
/// `tick_period` for as long as the device is powered.
#[task]
pub async fn control_task(
    config: ControllerConfig,
    mut servos: PwmServos,
    mut pixels: Ws2812<LED_COUNT>,
    mut host: HidLink,
) {
    let error = run(&config, &mut servos, &mut pixels, &mut host).await;
    defmt::panic!("Control loop stopped: {}", error);
}

async fn run(
    config: &ControllerConfig,
    servos: &mut PwmServos,
    pixels: &mut Ws2812<LED_COUNT>,
    host: &mut HidLink,
) -> Error {
    let mut control = match ControlLoop::start(config, servos, pixels) {
        Ok(control) => control,
        Err(e) => return e,
    };

    if let Err(e) = host.wait_ready(HOST_READY_TIMEOUT).await {
        control.on_fault(e, servos, pixels);
        return e;
    }
    pan_tilt::log_info!("Host connected, polling every {} ms", config.tick_period.as_millis());

    let mut dropped = 0;
    loop {
        match control.tick(servos, pixels, host).await {
            Ok(report) => {
                if Axis::ALL.iter().any(|&axis| report.changed(axis)) {
                    pan_tilt::log_trace!(
                        "moved pan={} tilt={}",
                        control.channel(Axis::Pan).angle(),
                        control.channel(Axis::Tilt).angle()
                    );
                }
            }
            Err(e) => {
                control.on_fault(e, servos, pixels);
                return e;
            }
        }

        let now_dropped = host.dropped_reports();
        if now_dropped != dropped {
            pan_tilt::log_warn!("{} OUT reports rejected so far", now_dropped);
            dropped = now_dropped;
        }

        Timer::after(config.tick_period).await;
    }
}
