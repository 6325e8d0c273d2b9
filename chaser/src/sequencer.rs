//! The bouncing single-bit output pattern

/// Direction in which the lit output moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards the top bit
    Increasing,
    /// Towards bit 0
    Decreasing,
}

/// Rotating-bit sequencer over a bank of `WIDTH` outputs.
///
/// Exactly one bit of `pattern` is set at any time. Each [`advance`](Self::advance) emits the
/// current pattern and moves the bit one position, reversing at bit 0 and at bit `WIDTH - 1`,
/// which gives the sweep `1, 2, 4, .., top, .., 4, 2, 1, 2, ..`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequencer<const WIDTH: usize> {
    pattern: u32,
    direction: Direction,
}

impl<const WIDTH: usize> Default for Sequencer<WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WIDTH: usize> Sequencer<WIDTH> {
    /// The highest output of the bank
    pub const TOP: u32 = {
        assert!(WIDTH >= 2 && WIDTH <= 32, "output bank width must be in 2..=32");
        1 << (WIDTH - 1)
    };

    /// Start at bit 0, moving up
    pub const fn new() -> Self {
        Self {
            pattern: 1,
            direction: Direction::Increasing,
        }
    }

    /// The pattern the next [`advance`](Self::advance) will emit
    pub const fn pattern(&self) -> u32 {
        self.pattern
    }

    /// The direction the next [`advance`](Self::advance) moves in
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Emit the current pattern and step to the next one
    pub fn advance(&mut self) -> u32 {
        let emitted = self.pattern;
        match self.direction {
            Direction::Increasing => {
                if self.pattern == Self::TOP {
                    self.direction = Direction::Decreasing;
                    self.pattern >>= 1;
                } else {
                    self.pattern <<= 1;
                }
            }
            Direction::Decreasing => {
                if self.pattern == 1 {
                    self.direction = Direction::Increasing;
                    self.pattern <<= 1;
                } else {
                    self.pattern >>= 1;
                }
            }
        }
        emitted
    }
}
