//! Diagnostic notices and the sinks that receive them.
//!
//! Notices are write-only: the controller never reads them back, and a sink that drops them
//! doesn't change the control flow.
use embassy_sync::channel::Sender;

use crate::RawMutex;

/// Something worth announcing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    /// The animation stopped, either by a left click or by entering calibration
    Paused,
    /// The animation runs again
    Resumed,
    /// A motion sample seen during calibration, with the period it would map to
    Sample { x: i8, period: u16 },
    /// Calibration finished with this period, in milliseconds
    PeriodSelected(u16),
}

/// Sink for [`Notice`]s
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Writes notices to the log
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Paused => info!("Pause"),
            Notice::Resumed => info!("Resume"),
            Notice::Sample { x, period } => debug!("Sample x = {}, current delay: {}ms", x, period),
            Notice::PeriodSelected(period) => info!("Selected period = {}ms", period),
        }
    }
}

/// Forwards notices to a channel, e.g. for a display task.
///
/// Never blocks: when the channel is full the notice is dropped.
pub struct ChannelNotifier<'a, const N: usize> {
    sender: Sender<'a, RawMutex, Notice, N>,
}

impl<'a, const N: usize> ChannelNotifier<'a, N> {
    pub fn new(sender: Sender<'a, RawMutex, Notice, N>) -> Self {
        Self { sender }
    }
}

impl<const N: usize> Notifier for ChannelNotifier<'_, N> {
    fn notify(&mut self, notice: Notice) {
        if self.sender.try_send(notice).is_err() {
            warn!("Notice channel full, dropping {:?}", notice);
        }
    }
}
