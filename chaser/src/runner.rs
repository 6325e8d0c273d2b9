//! The async runner.
//!
//! [`Chaser`] owns the controller and its four collaborators: the pointing device, the output
//! bank, the notice sink and the delay. Each [`step`](Chaser::step) polls the device once, feeds
//! the result to [`InputModeController::tick`] and executes the outcome.
use embassy_futures::yield_now;
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::config::ChaserConfig;
use crate::controller::{InputModeController, TickOutcome};
use crate::driver::OutputBank;
use crate::input_device::PointingInput;
use crate::notify::Notifier;
use crate::OUTPUT_BANK_WIDTH;

/// Runs the chaser on top of its collaborators.
///
/// # Example
/// ```rust,ignore
/// static NOTICE_CHANNEL: Channel<RawMutex, Notice, NOTICE_CHANNEL_SIZE> = Channel::new();
///
/// let mut chaser: Chaser<_, _, _, _> = Chaser::new(
///     ChannelInput::new(DEVICE_EVENT_CHANNEL.receiver()),
///     LedBank::new(led_pins, false),
///     ChannelNotifier::new(NOTICE_CHANNEL.sender()),
///     embassy_time::Delay,
///     ChaserConfig::default(),
/// );
/// chaser.run().await;
/// ```
pub struct Chaser<I, O, N, D, const WIDTH: usize = OUTPUT_BANK_WIDTH>
where
    I: PointingInput,
    O: OutputBank,
    N: Notifier,
    D: DelayNs,
{
    input: I,
    output: O,
    notifier: N,
    delay: D,
    controller: InputModeController<WIDTH>,
}

impl<I, O, N, D, const WIDTH: usize> Chaser<I, O, N, D, WIDTH>
where
    I: PointingInput,
    O: OutputBank,
    N: Notifier,
    D: DelayNs,
{
    pub fn new(input: I, output: O, notifier: N, delay: D, config: ChaserConfig) -> Self {
        info!("Creating chaser with config: {:?}", config);
        Self {
            input,
            output,
            notifier,
            delay,
            controller: InputModeController::new(config),
        }
    }

    pub fn controller(&self) -> &InputModeController<WIDTH> {
        &self.controller
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (I, O, N, D) {
        (self.input, self.output, self.notifier, self.delay)
    }

    /// Poll once, tick the controller and carry out the outcome.
    ///
    /// Waits for the settle delay and the step hold time, if the tick asked for them. Returns the
    /// executed outcome.
    pub async fn step(&mut self) -> TickOutcome {
        let event = self.input.poll_event();
        let outcome = self.controller.tick(event);

        for notice in outcome.notices.iter() {
            self.notifier.notify(*notice);
        }

        if let Some(settle) = outcome.settle {
            self.delay.delay_ms(as_delay_ms(settle)).await;
        }

        if let Some(step) = outcome.step {
            self.output.set_pattern(step.pattern);
            self.delay.delay_ms(as_delay_ms(step.hold)).await;
        }

        outcome
    }

    /// Run forever.
    ///
    /// Ticks that didn't wait (paused or calibrating without input) yield to the executor before
    /// polling again.
    pub async fn run(&mut self) -> ! {
        info!("Chaser started, period {}ms", self.controller.period());
        loop {
            let outcome = self.step().await;
            if outcome.settle.is_none() && outcome.step.is_none() {
                yield_now().await;
            }
        }
    }
}

/// Saturate a duration to whole milliseconds for `DelayNs::delay_ms`
fn as_delay_ms(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
