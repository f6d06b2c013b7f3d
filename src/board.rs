use embassy_stm32::rcc::{self, *};
use embassy_stm32::time::Hertz;
use embassy_stm32::{Config, Peripherals};

/// External crystal on the controller board
const HSE_HZ: u32 = 8_000_000;

// Main PLL: VCO in = HSE / M, VCO out = in * N, sysclk = out / P, USB = out / Q
const PLL_M: u32 = 4;
const PLL_N: u32 = 168;
const PLL_P: u32 = 2;
const PLL_Q: u32 = 7;

/// Core clock. The WS2812 bit timings are counted in these cycles.
pub const SYSCLK_HZ: u32 = HSE_HZ / PLL_M * PLL_N / PLL_P;
const USB_HZ: u32 = HSE_HZ / PLL_M * PLL_N / PLL_Q;

const _: () = assert!(SYSCLK_HZ == 168_000_000);
const _: () = assert!(USB_HZ == 48_000_000);

fn rcc_config() -> rcc::Config {
    let mut rcc = rcc::Config::default();
    rcc.hse = Some(Hse {
        freq: Hertz(HSE_HZ),
        mode: HseMode::Oscillator,
    });
    rcc.pll_src = PllSource::HSE;
    rcc.pll = Some(Pll {
        prediv: PllPreDiv::DIV4,
        mul: PllMul::MUL168,
        divp: Some(PllPDiv::DIV2),
        divq: Some(PllQDiv::DIV7),
        divr: None,
    });
    rcc.sys = Sysclk::PLL1_P;
    // APB1 tops out at 42 MHz, APB2 at 84 MHz
    rcc.ahb_pre = AHBPrescaler::DIV1;
    rcc.apb1_pre = APBPrescaler::DIV4;
    rcc.apb2_pre = APBPrescaler::DIV2;
    rcc
}

pub fn init() -> Peripherals {
    let mut config = Config::default();
    config.rcc = rcc_config();
    let p = embassy_stm32::init(config);
    defmt::info!("Clocks up: sysclk {} Hz, usb {} Hz", SYSCLK_HZ, USB_HZ);
    p
}
