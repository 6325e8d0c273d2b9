//! Tunable configuration of the chaser
use embassy_time::Duration;

use crate::period::clamp_period;
use crate::{DEFAULT_PERIOD_MS, SETTLE_DELAY_MS};

/// Runtime configuration.
///
/// The period bounds and the output bank width are compile-time constants in the crate root,
/// this struct only carries values that a board may want to tune.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChaserConfig {
    /// Step period used until the first calibration, in milliseconds
    pub initial_period: u16,
    /// Pause after a consumed right click
    pub settle_delay: Duration,
}

impl Default for ChaserConfig {
    fn default() -> Self {
        Self {
            initial_period: DEFAULT_PERIOD_MS,
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
        }
    }
}

impl ChaserConfig {
    /// The initial period, clamped into `[MIN_PERIOD, MAX_PERIOD]`
    pub fn clamped_initial_period(&self) -> u16 {
        clamp_period(self.initial_period)
    }
}
