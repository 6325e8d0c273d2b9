//! Input device module.
//!
//! This module defines the [`PointingInput`] trait, the non-blocking poll the controller consumes
//! once per tick. The bus-level driver of the pointing device lives outside this crate, it only
//! has to produce [`DeviceEvent`]s.
use embassy_sync::channel::Receiver;

use crate::RawMutex;
use crate::event::DeviceEvent;

/// The trait for pointing devices.
///
/// # Example
/// ```rust,ignore
/// struct MyMouse;
///
/// impl PointingInput for MyMouse {
///     fn poll_event(&mut self) -> Option<DeviceEvent> {
///         // Return the next decoded report, or `None` if nothing new arrived
///     }
/// }
/// ```
pub trait PointingInput {
    /// Return the next report, or `None` if nothing arrived since the last poll.
    ///
    /// Must return immediately.
    fn poll_event(&mut self) -> Option<DeviceEvent>;
}

impl<T: PointingInput + ?Sized> PointingInput for &mut T {
    fn poll_event(&mut self) -> Option<DeviceEvent> {
        (**self).poll_event()
    }
}

/// Pointing input fed through a channel.
///
/// A separate driver task decodes the device reports and sends them to the channel, the
/// controller side polls it without waiting.
///
/// ```rust,ignore
/// static DEVICE_EVENT_CHANNEL: Channel<RawMutex, DeviceEvent, DEVICE_EVENT_CHANNEL_SIZE> = Channel::new();
///
/// let input = ChannelInput::new(DEVICE_EVENT_CHANNEL.receiver());
/// // In the driver task
/// DEVICE_EVENT_CHANNEL.send(event).await;
/// ```
pub struct ChannelInput<'a, const N: usize> {
    receiver: Receiver<'a, RawMutex, DeviceEvent, N>,
}

impl<'a, const N: usize> ChannelInput<'a, N> {
    pub fn new(receiver: Receiver<'a, RawMutex, DeviceEvent, N>) -> Self {
        Self { receiver }
    }
}

impl<const N: usize> PointingInput for ChannelInput<'_, N> {
    fn poll_event(&mut self) -> Option<DeviceEvent> {
        let event = self.receiver.try_receive().ok()?;
        trace!("Polled device event: {:?}", event);
        Some(event)
    }
}
