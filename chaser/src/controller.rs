//! The input-driven mode state machine.
//!
//! [`InputModeController::tick`] consumes one poll result and returns what the caller has to do
//! next: write a pattern, wait. It never sleeps itself, so the scheduler that calls it decides
//! the cadence. See [`crate::runner::Chaser`] for the runner that executes the outcome.
use embassy_time::Duration;
use heapless::Vec;

use crate::config::ChaserConfig;
use crate::event::DeviceEvent;
use crate::notify::Notice;
use crate::period::{clamp_period, map_to_period};
use crate::sequencer::Sequencer;
use crate::OUTPUT_BANK_WIDTH;

/// Maximum number of notices a single tick can emit
pub const MAX_NOTICES_PER_TICK: usize = 4;

/// Current mode of the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// The sequencer advances every tick
    Running,
    /// The sequencer holds its pattern
    Paused,
    /// Motion samples are collected until a confirming right click
    Calibrating,
}

/// Mutable state of the controller.
///
/// All latches live here instead of being hidden across loop iterations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    pub mode: Mode,
    /// Set while the left button stays pressed, so a held button toggles only once
    pub left_was_held: bool,
    /// Current step period in milliseconds
    pub period: u16,
    /// Largest-magnitude X sample seen in this calibration, 0 outside calibration
    pub extreme_sample: i8,
}

impl ControllerState {
    /// Fresh state: running, no latch held, no calibration sample
    pub fn new(period: u16) -> Self {
        Self {
            mode: Mode::Running,
            left_was_held: false,
            period,
            extreme_sample: 0,
        }
    }
}

/// A pattern emitted by the sequencer, and how long to show it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub pattern: u32,
    pub hold: Duration,
}

/// What a tick asks its caller to do, in order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Announcements produced by this tick
    pub notices: Vec<Notice, MAX_NOTICES_PER_TICK>,
    /// Wait this long first, a right click was just consumed
    pub settle: Option<Duration>,
    /// Then write this pattern and hold it
    pub step: Option<Step>,
}

impl TickOutcome {
    fn notice(&mut self, notice: Notice) {
        if self.notices.push(notice).is_err() {
            warn!("Too many notices in one tick, dropping {:?}", notice);
        }
    }

    /// Total time the caller is asked to wait
    pub fn total_delay(&self) -> Duration {
        let none = Duration::from_ticks(0);
        let settle = self.settle.unwrap_or(none);
        let hold = self.step.map(|s| s.hold).unwrap_or(none);
        settle + hold
    }
}

/// Mode state machine driven by pointing device reports.
///
/// - Running ⇄ Paused on a left button press edge
/// - Running or Paused → Calibrating on a right click
/// - Calibrating → Running on the confirming right click, even when calibration was entered
///   from Paused
pub struct InputModeController<const WIDTH: usize = OUTPUT_BANK_WIDTH> {
    state: ControllerState,
    sequencer: Sequencer<WIDTH>,
    settle_delay: Duration,
}

impl<const WIDTH: usize> Default for InputModeController<WIDTH> {
    fn default() -> Self {
        Self::new(ChaserConfig::default())
    }
}

impl<const WIDTH: usize> InputModeController<WIDTH> {
    /// Start in Running mode with the configured initial period
    pub fn new(config: ChaserConfig) -> Self {
        Self::with_state(ControllerState::new(config.clamped_initial_period()), config)
    }

    /// Resume from an existing state.
    ///
    /// The period is clamped into `[MIN_PERIOD, MAX_PERIOD]`.
    pub fn with_state(state: ControllerState, config: ChaserConfig) -> Self {
        Self {
            state: ControllerState {
                period: clamp_period(state.period),
                ..state
            },
            sequencer: Sequencer::new(),
            settle_delay: config.settle_delay,
        }
    }

    /// The full controller state
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Current step period in milliseconds
    pub fn period(&self) -> u16 {
        self.state.period
    }

    /// The sequencer, to inspect the next pattern
    pub fn sequencer(&self) -> &Sequencer<WIDTH> {
        &self.sequencer
    }

    /// Handle one poll result.
    ///
    /// `event` is `None` when the device had nothing new, which leaves the mode and the latches
    /// untouched. In Running mode the sequencer advances on every tick, event or not.
    pub fn tick(&mut self, event: Option<DeviceEvent>) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if let Some(event) = event {
            match self.state.mode {
                Mode::Running | Mode::Paused => self.handle_event(event, &mut outcome),
                Mode::Calibrating => self.handle_calibration_event(event, &mut outcome),
            }
        }

        if self.state.mode == Mode::Running {
            let pattern = self.sequencer.advance();
            outcome.step = Some(Step {
                pattern,
                hold: Duration::from_millis(self.state.period as u64),
            });
        }

        outcome
    }

    fn handle_event(&mut self, event: DeviceEvent, outcome: &mut TickOutcome) {
        if event.right() {
            info!("Right click, calibrating period");
            outcome.notice(Notice::Paused);
            self.state.mode = Mode::Calibrating;
            self.state.extreme_sample = 0;
            outcome.settle = Some(self.settle_delay);
        } else if event.left() {
            if !self.state.left_was_held {
                let (mode, notice) = match self.state.mode {
                    Mode::Running => (Mode::Paused, Notice::Paused),
                    _ => (Mode::Running, Notice::Resumed),
                };
                debug!("Left click, {:?} -> {:?}", self.state.mode, mode);
                self.state.mode = mode;
                outcome.notice(notice);
            }
            self.state.left_was_held = true;
        } else {
            self.state.left_was_held = false;
        }
    }

    fn handle_calibration_event(&mut self, event: DeviceEvent, outcome: &mut TickOutcome) {
        outcome.notice(Notice::Sample {
            x: event.x,
            period: map_to_period(event.x),
        });
        // Ties keep the stored sample
        if event.x.unsigned_abs() > self.state.extreme_sample.unsigned_abs() {
            self.state.extreme_sample = event.x;
        }

        if event.right() {
            let period = map_to_period(self.state.extreme_sample);
            info!(
                "Calibration confirmed, extreme sample {} -> period {}ms",
                self.state.extreme_sample, period
            );
            self.state.period = period;
            self.state.extreme_sample = 0;
            self.state.mode = Mode::Running;
            outcome.notice(Notice::PeriodSelected(period));
            outcome.notice(Notice::Resumed);
            outcome.settle = Some(self.settle_delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButtons;
    use crate::{MAX_PERIOD, MIN_PERIOD};

    // Init logger for tests
    #[ctor::ctor]
    fn init_log() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    fn controller() -> InputModeController<16> {
        InputModeController::new(ChaserConfig::default())
    }

    fn left() -> Option<DeviceEvent> {
        Some(DeviceEvent::buttons(MouseButtons::LEFT))
    }

    fn right() -> Option<DeviceEvent> {
        Some(DeviceEvent::buttons(MouseButtons::RIGHT))
    }

    fn release() -> Option<DeviceEvent> {
        Some(DeviceEvent::buttons(MouseButtons::NONE))
    }

    #[test]
    fn test_running_advances_every_tick() {
        let mut c = controller();
        assert_eq!(c.mode(), Mode::Running);

        let first = c.tick(None);
        assert_eq!(
            first.step,
            Some(Step {
                pattern: 1,
                hold: Duration::from_millis(50)
            })
        );
        assert_eq!(first.settle, None);
        assert!(first.notices.is_empty());

        let second = c.tick(Some(DeviceEvent::motion(10, -3)));
        assert_eq!(second.step.map(|s| s.pattern), Some(2));
    }

    #[test]
    fn test_held_left_toggles_once() {
        let mut c = controller();
        let outcome = c.tick(left());
        assert_eq!(c.mode(), Mode::Paused);
        assert_eq!(outcome.notices.as_slice(), &[Notice::Paused]);
        assert_eq!(outcome.step, None);

        for _ in 0..10 {
            let outcome = c.tick(left());
            assert!(outcome.notices.is_empty());
            assert_eq!(c.mode(), Mode::Paused);
            assert!(c.state().left_was_held);
        }

        // Polls without a report keep the latch
        c.tick(None);
        c.tick(left());
        assert_eq!(c.mode(), Mode::Paused);

        c.tick(release());
        assert!(!c.state().left_was_held);

        let outcome = c.tick(left());
        assert_eq!(c.mode(), Mode::Running);
        assert_eq!(outcome.notices.as_slice(), &[Notice::Resumed]);
        assert_eq!(outcome.step.map(|s| s.pattern), Some(1));
    }

    #[test]
    fn test_paused_does_not_advance() {
        let mut c = controller();
        c.tick(None);
        c.tick(left());
        assert_eq!(c.mode(), Mode::Paused);
        let pattern = c.sequencer().pattern();
        for _ in 0..5 {
            let outcome = c.tick(None);
            assert_eq!(outcome.step, None);
            assert_eq!(outcome.total_delay(), Duration::from_ticks(0));
        }
        assert_eq!(c.sequencer().pattern(), pattern);
    }

    #[test]
    fn test_right_click_enters_calibration() {
        let state = ControllerState {
            mode: Mode::Running,
            left_was_held: false,
            period: 100,
            extreme_sample: 77,
        };
        let mut c: InputModeController<16> =
            InputModeController::with_state(state, ChaserConfig::default());

        let outcome = c.tick(right());
        assert_eq!(c.mode(), Mode::Calibrating);
        assert_eq!(c.state().extreme_sample, 0);
        assert_eq!(outcome.notices.as_slice(), &[Notice::Paused]);
        assert_eq!(outcome.settle, Some(Duration::from_millis(500)));
        assert_eq!(outcome.step, None);

        // Calibration waits as long as it takes
        for _ in 0..100 {
            assert_eq!(c.tick(None), TickOutcome::default());
        }
        assert_eq!(c.mode(), Mode::Calibrating);
    }

    #[test]
    fn test_restored_period_is_clamped() {
        for (period, expected) in [(0, MIN_PERIOD), (1000, MAX_PERIOD)] {
            let state = ControllerState {
                period,
                ..ControllerState::new(50)
            };
            let mut c: InputModeController<16> =
                InputModeController::with_state(state, ChaserConfig::default());
            assert_eq!(c.period(), expected);

            let step = c.tick(None).step.unwrap();
            assert_eq!(step.hold, Duration::from_millis(expected as u64));
        }
    }

    #[test]
    fn test_right_wins_over_left() {
        let mut c = controller();
        c.tick(Some(DeviceEvent::buttons(MouseButtons::LEFT | MouseButtons::RIGHT)));
        assert_eq!(c.mode(), Mode::Calibrating);
        assert!(!c.state().left_was_held);
    }

    #[test]
    fn test_calibration_keeps_extreme_sample() {
        let mut c = controller();
        c.tick(right());

        c.tick(release());
        c.tick(Some(DeviceEvent::motion(-40, 0)));
        assert_eq!(c.state().extreme_sample, -40);
        c.tick(Some(DeviceEvent::motion(40, 5)));
        assert_eq!(c.state().extreme_sample, -40, "ties keep the stored sample");
        c.tick(Some(DeviceEvent::motion(-128, 0)));
        assert_eq!(c.state().extreme_sample, -128);
        c.tick(Some(DeviceEvent::motion(127, 0)));
        assert_eq!(c.state().extreme_sample, -128);
        // Y motion is ignored
        c.tick(Some(DeviceEvent::motion(0, 127)));
        assert_eq!(c.state().extreme_sample, -128);
        // Left clicks don't leave calibration
        c.tick(left());
        assert_eq!(c.mode(), Mode::Calibrating);
    }

    #[test]
    fn test_calibration_end_to_end() {
        let mut c = controller();
        c.tick(right());

        let sample = c.tick(release());
        assert_eq!(sample.notices.as_slice(), &[Notice::Sample { x: 0, period: 176 }]);
        c.tick(Some(DeviceEvent::motion(-40, 0)));
        c.tick(Some(DeviceEvent::motion(90, 0)));
        assert_eq!(c.state().extreme_sample, 90);

        let outcome = c.tick(right());
        assert_eq!(c.mode(), Mode::Running);
        assert_eq!(c.period(), 299);
        assert_eq!(c.state().extreme_sample, 0);
        assert_eq!(
            outcome.notices.as_slice(),
            &[
                Notice::Sample { x: 0, period: 176 },
                Notice::PeriodSelected(299),
                Notice::Resumed
            ]
        );
        assert_eq!(outcome.settle, Some(Duration::from_millis(500)));
        assert_eq!(
            outcome.step,
            Some(Step {
                pattern: 1,
                hold: Duration::from_millis(299)
            })
        );
        assert_eq!(outcome.total_delay(), Duration::from_millis(799));
    }

    #[test]
    fn test_confirming_click_motion_is_sampled() {
        let mut c = controller();
        c.tick(right());
        c.tick(Some(DeviceEvent::motion(10, 0)));
        c.tick(Some(DeviceEvent::new(MouseButtons::RIGHT, i8::MIN, 0)));
        assert_eq!(c.period(), 1);
    }

    #[test]
    fn test_calibration_from_paused_resumes_running() {
        let mut c = controller();
        c.tick(left());
        c.tick(release());
        assert_eq!(c.mode(), Mode::Paused);

        c.tick(right());
        assert_eq!(c.mode(), Mode::Calibrating);

        c.tick(Some(DeviceEvent::motion(127, 0)));
        let outcome = c.tick(right());
        assert_eq!(c.mode(), Mode::Running);
        assert_eq!(c.period(), 350);
        assert!(outcome.step.is_some());
    }

    #[test]
    fn test_calibration_without_motion() {
        let mut c = controller();
        c.tick(right());
        c.tick(right());
        assert_eq!(c.mode(), Mode::Running);
        assert_eq!(c.period(), map_to_period(0));
    }
}
