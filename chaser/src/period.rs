//! Maps a motion sample to a step period
use crate::{MAX_PERIOD, MIN_PERIOD};

/// Offset that shifts a motion sample into the non-negative range
const SAMPLE_OFFSET: i32 = 128;
/// Width of the motion sample range
const SAMPLE_SPAN: i32 = 255;

/// Clamp a period into `[MIN_PERIOD, MAX_PERIOD]`
pub fn clamp_period(period: u16) -> u16 {
    let clamped = period.clamp(MIN_PERIOD, MAX_PERIOD);
    if clamped != period {
        warn!("Period {}ms out of range, using {}ms", period, clamped);
    }
    clamped
}

/// Map a signed motion sample in `[-128, 127]` linearly onto `[MIN_PERIOD, MAX_PERIOD]`.
///
/// Uses truncating integer division, so `-128 -> 1` and `127 -> MAX_PERIOD`.
pub const fn map_to_period(sample: i8) -> u16 {
    let shifted = sample as i32 + SAMPLE_OFFSET;
    let scaled = shifted * (MAX_PERIOD - MIN_PERIOD) as i32 / SAMPLE_SPAN;
    (scaled + MIN_PERIOD as i32) as u16
}
