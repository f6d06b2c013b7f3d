//! Recording fakes for the peripheral capabilities, used by host tests.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::protocol::ReportBuf;
use crate::state::{Axis, Rgb};
use crate::traits::{HostLink, PixelStrip, ServoOutput};

/// Records every successful `set_angle` call in order.
#[derive(Debug, Default)]
pub struct MockServos {
    writes: Vec<(Axis, f32)>,
    failing: Option<Axis>,
}

impl MockServos {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[(Axis, f32)] {
        &self.writes
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Make every write to `axis` fail from now on.
    pub fn fail_on(&mut self, axis: Axis) {
        self.failing = Some(axis);
    }
}

impl ServoOutput for MockServos {
    fn set_angle(&mut self, axis: Axis, angle_deg: f32) -> Result<()> {
        if self.failing == Some(axis) {
            return Err(Error::Servo(axis));
        }
        self.writes.push((axis, angle_deg));
        Ok(())
    }
}

/// In-memory pixel buffer with a write counter.
#[derive(Debug)]
pub struct MockStrip {
    pixels: Vec<Rgb>,
    writes: usize,
    failing: bool,
}

impl MockStrip {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![Rgb::OFF; len],
            writes: 0,
            failing: false,
        }
    }

    pub fn pixel(&self, index: usize) -> Rgb {
        self.pixels[index]
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn reset_count(&mut self) {
        self.writes = 0;
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl PixelStrip for MockStrip {
    fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<()> {
        if self.failing {
            return Err(Error::Indicator);
        }
        let pixel = self.pixels.get_mut(index).ok_or(Error::Indicator)?;
        *pixel = color;
        self.writes += 1;
        Ok(())
    }
}

/// Queued inbound reports per id, recorded outbound reports.
#[derive(Debug, Default)]
pub struct MockHost {
    inbound: VecDeque<(u8, ReportBuf)>,
    sent: Vec<(u8, Vec<u8>)>,
    failing: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `payload` on `id`, replacing anything not yet taken.
    pub fn push_report(&mut self, id: u8, payload: &[u8]) {
        self.inbound.retain(|(pending, _)| *pending != id);
        let buf = ReportBuf::from_slice(payload).expect("test payload too long");
        self.inbound.push_back((id, buf));
    }

    pub fn pending(&self) -> Vec<u8> {
        self.inbound.iter().map(|(id, _)| *id).collect()
    }

    pub fn sent(&self) -> &[(u8, Vec<u8>)] {
        &self.sent
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl HostLink for MockHost {
    fn take_report(&mut self, id: u8) -> Option<ReportBuf> {
        let pos = self.inbound.iter().position(|(pending, _)| *pending == id)?;
        self.inbound.remove(pos).map(|(_, buf)| buf)
    }

    async fn send_report(&mut self, id: u8, data: &[u8]) -> Result<()> {
        if self.failing {
            return Err(Error::Transport);
        }
        self.sent.push((id, data.to_vec()));
        Ok(())
    }
}
