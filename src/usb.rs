use embassy_stm32::usb_otg::{self, Driver};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::{with_timeout, Duration};
use embassy_usb::class::hid::{self, HidReader, HidReaderWriter, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

use pan_tilt::error::{Error, Result};
use pan_tilt::protocol::descriptor::{REPORT_DESCRIPTOR, USB_PID, USB_VID};
use pan_tilt::protocol::latch::LatchHandler;
use pan_tilt::protocol::{ReportBuf, ReportLatch, MAX_REPORT_LEN};
use pan_tilt::traits::HostLink;

bind_interrupts!(struct Irqs {
    OTG_FS => usb_otg::InterruptHandler<peripherals::USB_OTG_FS>;
});

pub type UsbDriver = Driver<'static, peripherals::USB_OTG_FS>;
pub type HidOut = HidReader<'static, UsbDriver, MAX_REPORT_LEN>;
pub type HidIn = HidWriter<'static, UsbDriver, MAX_REPORT_LEN>;

/// Written by the USB side, taken by the control loop.
pub static REPORT_LATCH: ReportLatch = ReportLatch::new();

struct UsbBuffers {
    config_desc: [u8; 256],
    bos_desc: [u8; 256],
    control_buf: [u8; 64],
    ep_out_buffer: [u8; 256],
}

static BUFFERS: StaticCell<UsbBuffers> = StaticCell::new();
static HID_STATE: StaticCell<State<'static>> = StaticCell::new();
static CONTROL_HANDLER: StaticCell<LatchHandler> = StaticCell::new();

#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

/// Feeds interrupt OUT reports into [`REPORT_LATCH`].
#[embassy_executor::task]
pub async fn hid_reader_task(reader: HidOut) -> ! {
    let mut handler = LatchHandler::new(&REPORT_LATCH);
    reader.run(true, &mut handler).await
}

pub fn init(
    usb_periph: peripherals::USB_OTG_FS,
    pa12: peripherals::PA12,
    pa11: peripherals::PA11,
) -> (UsbDevice<'static, UsbDriver>, HidOut, HidLink) {
    let buffers = BUFFERS.init(UsbBuffers {
        config_desc: [0; 256],
        bos_desc: [0; 256],
        control_buf: [0; 64],
        ep_out_buffer: [0; 256],
    });

    let mut usb_config = usb_otg::Config::default();
    usb_config.vbus_detection = false;
    let driver = Driver::new_fs(
        usb_periph,
        Irqs,
        pa12,
        pa11,
        &mut buffers.ep_out_buffer,
        usb_config,
    );

    let mut config = Config::new(USB_VID, USB_PID);
    config.manufacturer = Some("PanTilt");
    config.product = Some("Camera Pan/Tilt Head");
    config.serial_number = Some("00000001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        config,
        &mut buffers.config_desc,
        &mut buffers.bos_desc,
        &mut [], // msos_descs
        &mut buffers.control_buf,
    );

    let hid_config = hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(CONTROL_HANDLER.init(LatchHandler::new(&REPORT_LATCH))),
        poll_ms: 10,
        max_packet_size: 64,
    };
    let hid = HidReaderWriter::<_, MAX_REPORT_LEN, MAX_REPORT_LEN>::new(
        &mut builder,
        HID_STATE.init(State::new()),
        hid_config,
    );
    let (reader, writer) = hid.split();
    let usb = builder.build();

    (
        usb,
        reader,
        HidLink {
            writer,
            latch: &REPORT_LATCH,
        },
    )
}

/// [`HostLink`] over the HID class: latched OUT reports in, interrupt IN
/// reports out.
pub struct HidLink {
    writer: HidIn,
    latch: &'static ReportLatch,
}

impl HidLink {
    /// Wait for the host to configure the device.
    pub async fn wait_ready(&mut self, timeout: Duration) -> Result<()> {
        with_timeout(timeout, self.writer.ready())
            .await
            .map_err(|_| Error::HostUnavailable)
    }

    /// OUT reports rejected by the latch since startup
    pub fn dropped_reports(&self) -> u32 {
        self.latch.dropped()
    }
}

impl HostLink for HidLink {
    fn take_report(&mut self, id: u8) -> Option<ReportBuf> {
        self.latch.take(id)
    }

    async fn send_report(&mut self, id: u8, data: &[u8]) -> Result<()> {
        let mut report = ReportBuf::new();
        report.push(id).map_err(|_| Error::Transport)?;
        report
            .extend_from_slice(data)
            .map_err(|_| Error::Transport)?;
        self.writer
            .write(&report)
            .await
            .map_err(|_| Error::Transport)
    }
}
