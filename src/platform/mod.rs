//! Platform abstraction layer
//!
//! Handles the host-facing edges of the simulation:
//! - Pointer position to intent (hit regions)
//! - Host timestamps to clamped frame deltas

pub mod input;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Button, HitRegions, Rect};
pub use time::FrameClock;
