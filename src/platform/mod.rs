//! Platform abstraction layer
//!
//! Handles the host-facing seams the simulation depends on:
//! - Time (injectable clock)
//! - Input events

pub mod input;
pub mod time;

pub use input::{InputEvent, Key, MouseButton};
pub use time::{Clock, ManualClock, SystemClock};
