use crate::state::Rgb;

/// Scale one color by the global brightness (0.0 ..= 1.0), truncating.
pub fn scale(color: Rgb, brightness: f32) -> Rgb {
    let b = brightness.clamp(0.0, 1.0);
    Rgb::new(
        (color.r as f32 * b) as u8,
        (color.g as f32 * b) as u8,
        (color.b as f32 * b) as u8,
    )
}

/// 24-bit wire word, green first, sent MSB first.
pub fn grb_word(color: Rgb) -> u32 {
    ((color.g as u32) << 16) | ((color.r as u32) << 8) | color.b as u32
}

#[cfg(feature = "firmware")]
pub use hw::Ws2812;

#[cfg(feature = "firmware")]
mod hw {
    use cortex_m::asm;
    use embassy_stm32::gpio::{AnyPin, Level, Output, Speed};

    use super::{grb_word, scale};
    use crate::error::{Error, Result};
    use crate::state::Rgb;
    use crate::traits::PixelStrip;

    /// Bit-banged WS2812 strip holding its own frame buffer. Every pixel write
    /// re-sends the whole strip.
    pub struct Ws2812<const N: usize> {
        pin: Output<'static, AnyPin>,
        frame: [Rgb; N],
        brightness: f32,
    }

    impl<const N: usize> Ws2812<N> {
        // 168 MHz core clock, 1.25 µs bit period
        const BIT_TOTAL_CYCLES: u32 = 210;
        const BIT1_HIGH_CYCLES: u32 = 118;
        const BIT1_LOW_CYCLES: u32 = Self::BIT_TOTAL_CYCLES - Self::BIT1_HIGH_CYCLES;
        const BIT0_HIGH_CYCLES: u32 = 59;
        const BIT0_LOW_CYCLES: u32 = Self::BIT_TOTAL_CYCLES - Self::BIT0_HIGH_CYCLES;
        // > 50 µs low latches the frame
        const RESET_CYCLES: u32 = 9_000;

        pub fn new(pin: AnyPin, brightness: f32) -> Self {
            Self {
                pin: Output::new(pin, Level::Low, Speed::VeryHigh),
                frame: [Rgb::OFF; N],
                brightness,
            }
        }

        pub fn flush(&mut self) {
            let mut words = [0u32; N];
            for (word, color) in words.iter_mut().zip(self.frame.iter()) {
                *word = grb_word(scale(*color, self.brightness));
            }

            // USB and timer ISRs would stretch the high phase past the
            // 0/1 threshold; hold them off for 30 µs per pixel (24 bits at
            // 1.25 µs), 180 µs for a 6 pixel strip.
            critical_section::with(|_cs| {
                for word in words {
                    for bit in (0..24).rev() {
                        let one = ((word >> bit) & 0x1) != 0;

                        self.pin.set_high();
                        if one {
                            asm::delay(Self::BIT1_HIGH_CYCLES);
                            self.pin.set_low();
                            asm::delay(Self::BIT1_LOW_CYCLES);
                        } else {
                            asm::delay(Self::BIT0_HIGH_CYCLES);
                            self.pin.set_low();
                            asm::delay(Self::BIT0_LOW_CYCLES);
                        }
                    }
                }
            });

            self.pin.set_low();
            asm::delay(Self::RESET_CYCLES);
        }
    }

    impl<const N: usize> PixelStrip for Ws2812<N> {
        fn pixel_count(&self) -> usize {
            N
        }

        fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<()> {
            let pixel = self.frame.get_mut(index).ok_or(Error::Indicator)?;
            *pixel = color;
            self.flush();
            Ok(())
        }
    }
}
