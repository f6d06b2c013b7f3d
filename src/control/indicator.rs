use crate::error::Result;
use crate::state::{Axis, Rgb};
use crate::traits::PixelStrip;

/// Per-axis activity lights on the LED strip.
///
/// Holds no per-tick state: every tick each slot is either marked or cleared
/// again, so the strip mirrors the current tick only.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackIndicator {
    active: Rgb,
    idle: Rgb,
}

impl FeedbackIndicator {
    pub const fn new(active: Rgb, idle: Rgb) -> Self {
        Self { active, idle }
    }

    pub fn mark<P: PixelStrip>(&self, axis: Axis, pixels: &mut P) -> Result<()> {
        pixels.set_pixel(axis.slot(), self.active)
    }

    pub fn clear<P: PixelStrip>(&self, axis: Axis, pixels: &mut P) -> Result<()> {
        pixels.set_pixel(axis.slot(), self.idle)
    }

    /// Mark when `changed`, clear otherwise.
    pub fn show<P: PixelStrip>(&self, axis: Axis, changed: bool, pixels: &mut P) -> Result<()> {
        if changed {
            self.mark(axis, pixels)
        } else {
            self.clear(axis, pixels)
        }
    }

    /// Idle color on every pixel of the strip, feedback slots or not.
    pub fn blank<P: PixelStrip>(&self, pixels: &mut P) -> Result<()> {
        for index in 0..pixels.pixel_count() {
            pixels.set_pixel(index, self.idle)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStrip;

    const INDICATOR: FeedbackIndicator = FeedbackIndicator::new(Rgb::WHITE, Rgb::OFF);

    #[test]
    fn test_slots_follow_axes() {
        let mut strip = MockStrip::new(6);
        INDICATOR.mark(Axis::Tilt, &mut strip).unwrap();
        assert_eq!(strip.pixel(0), Rgb::OFF);
        assert_eq!(strip.pixel(1), Rgb::WHITE);

        INDICATOR.mark(Axis::Pan, &mut strip).unwrap();
        INDICATOR.clear(Axis::Tilt, &mut strip).unwrap();
        assert_eq!(strip.pixel(0), Rgb::WHITE);
        assert_eq!(strip.pixel(1), Rgb::OFF);
    }

    #[test]
    fn test_show_writes_every_time() {
        let mut strip = MockStrip::new(6);
        INDICATOR.show(Axis::Pan, false, &mut strip).unwrap();
        INDICATOR.show(Axis::Pan, false, &mut strip).unwrap();
        assert_eq!(strip.write_count(), 2);
    }

    #[test]
    fn test_blank_whole_strip() {
        let mut strip = MockStrip::new(6);
        for i in 0..6 {
            strip.set_pixel(i, Rgb::WHITE).unwrap();
        }
        INDICATOR.blank(&mut strip).unwrap();
        assert!((0..6).all(|i| strip.pixel(i) == Rgb::OFF));
    }
}
