use std::collections::VecDeque;

use chaser::driver::OutputBank;
use chaser::input_device::PointingInput;
use chaser::notify::{Notice, Notifier};
use chaser::{DeviceEvent, MouseButtons};
use embedded_hal_async::delay::DelayNs;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Pointing input that replays a script, one entry per poll.
/// `None` entries, and polls after the end of the script, report "nothing new".
#[derive(Default)]
pub struct ScriptedInput {
    pub script: VecDeque<Option<DeviceEvent>>,
    pub polls: usize,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = Option<DeviceEvent>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            polls: 0,
        }
    }
}

impl PointingInput for ScriptedInput {
    fn poll_event(&mut self) -> Option<DeviceEvent> {
        self.polls += 1;
        self.script.pop_front().flatten()
    }
}

#[derive(Default)]
pub struct RecordingOutput {
    pub patterns: Vec<u32>,
}

impl OutputBank for RecordingOutput {
    fn set_pattern(&mut self, pattern: u32) {
        self.patterns.push(pattern);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Delay that returns at once and remembers what it was asked for, in milliseconds
#[derive(Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

pub fn left() -> Option<DeviceEvent> {
    Some(DeviceEvent::buttons(MouseButtons::LEFT))
}

pub fn right() -> Option<DeviceEvent> {
    Some(DeviceEvent::buttons(MouseButtons::RIGHT))
}

pub fn release() -> Option<DeviceEvent> {
    Some(DeviceEvent::buttons(MouseButtons::NONE))
}

pub fn motion(x: i8) -> Option<DeviceEvent> {
    Some(DeviceEvent::motion(x, 0))
}
