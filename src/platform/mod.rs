//! Platform abstraction layer
//!
//! Host-facing plumbing that turns device events into simulation input.

pub mod input;

pub use input::{Action, InputState};
