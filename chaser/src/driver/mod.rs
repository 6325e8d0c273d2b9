//! Output drivers

pub mod gpio;

pub use gpio::{LedBank, OutputController};

/// A bank of indicator outputs, driven as one bitmask.
///
/// Bit `i` of the pattern maps to output `i`. Writing is idempotent and can't fail from the
/// caller's point of view: implementations deal with their own errors.
pub trait OutputBank {
    fn set_pattern(&mut self, pattern: u32);
}

impl<T: OutputBank + ?Sized> OutputBank for &mut T {
    fn set_pattern(&mut self, pattern: u32) {
        (**self).set_pattern(pattern)
    }
}
