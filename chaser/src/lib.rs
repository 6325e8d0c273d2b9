//! # Chaser
//!
//! A pointing-device driven LED chaser.
//!
//! A single light bounces back and forth across a bank of indicator outputs. The pointing device
//! controls it:
//!
//! - left click pauses or resumes the animation, once per press no matter how long it is held
//! - right click enters calibration, where horizontal motion is sampled; the next right click
//!   maps the strongest sample to a new step period and resumes the animation
//!
//! ## Modules
//!
//! - [`period`] - maps a motion sample to a step period
//! - [`sequencer`] - the bouncing single-bit pattern
//! - [`controller`] - the input-driven mode state machine
//! - [`runner`] - the async runner that wires the state machine to its collaborators
//! - [`input_device`], [`driver`], [`notify`] - collaborator traits and their adapters
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod controller;
pub mod driver;
pub mod event;
pub mod input_device;
pub mod notify;
pub mod period;
pub mod runner;
pub mod sequencer;

pub use config::ChaserConfig;
pub use controller::{ControllerState, InputModeController, Mode, TickOutcome};
pub use event::{DeviceEvent, MouseButtons};
pub use notify::Notice;
pub use period::map_to_period;
pub use runner::Chaser;
pub use sequencer::{Direction, Sequencer};

/// Raw mutex used by the channels exposed by this crate
pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Shortest step period, in milliseconds
pub const MIN_PERIOD: u16 = 1;
/// Longest step period, in milliseconds
pub const MAX_PERIOD: u16 = 350;
/// Step period used until the first calibration, in milliseconds
pub const DEFAULT_PERIOD_MS: u16 = 50;
/// Pause after a consumed right click, so the same physical click isn't observed twice
pub const SETTLE_DELAY_MS: u64 = 500;
/// Number of indicator outputs driven by the demo
pub const OUTPUT_BANK_WIDTH: usize = 16;
/// Capacity of the notice channel used by [`notify::ChannelNotifier`]
pub const NOTICE_CHANNEL_SIZE: usize = 8;
/// Capacity of the device event channel used by [`input_device::ChannelInput`]
pub const DEVICE_EVENT_CHANNEL_SIZE: usize = 16;
