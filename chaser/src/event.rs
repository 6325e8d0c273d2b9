//! Events reported by the pointing device
use core::ops::BitOr;

use bitfield_struct::bitfield;

/// Button state of a pointing device.
///
/// The bit layout follows the first byte of a standard mouse packet: left, right, middle.
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq)]
pub struct MouseButtons {
    #[bits(1)]
    pub left: bool,
    #[bits(1)]
    pub right: bool,
    #[bits(1)]
    pub middle: bool,
    #[bits(5)]
    _reserved: u8,
}

impl BitOr for MouseButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}

impl MouseButtons {
    pub const NONE: Self = Self::new();
    pub const LEFT: Self = Self::new().with_left(true);
    pub const RIGHT: Self = Self::new().with_right(true);
}

/// One report from the pointing device.
///
/// A poll that found nothing new is represented as `None` by
/// [`PointingInput::poll_event`](crate::input_device::PointingInput::poll_event),
/// so a `DeviceEvent` with no buttons and zero motion is still a real report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceEvent {
    pub buttons: MouseButtons,
    /// Relative motion on the X axis
    pub x: i8,
    /// Relative motion on the Y axis
    pub y: i8,
}

impl DeviceEvent {
    pub const fn new(buttons: MouseButtons, x: i8, y: i8) -> Self {
        Self { buttons, x, y }
    }

    /// A report carrying only motion
    pub const fn motion(x: i8, y: i8) -> Self {
        Self::new(MouseButtons::NONE, x, y)
    }

    /// A report carrying only buttons
    pub const fn buttons(buttons: MouseButtons) -> Self {
        Self::new(buttons, 0, 0)
    }

    pub const fn left(&self) -> bool {
        self.buttons.left()
    }

    pub const fn right(&self) -> bool {
        self.buttons.right()
    }
}
