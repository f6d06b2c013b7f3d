use crate::config::ActuationRange;
use crate::state::AxisCommand;

/// Full-scale denominator. Deliberately 256 rather than 255, so the top command
/// stops one step short of `max_angle`.
pub const FULL_SCALE: f32 = 256.0;

/// Map an 8-bit command onto `[0, range.max_angle]` degrees.
pub fn map(value: AxisCommand, range: &ActuationRange) -> f32 {
    let angle = range.max_angle * value as f32 / FULL_SCALE;
    angle.clamp(0.0, range.max_angle)
}
