//! CLI command implementations.

pub mod common;
pub mod devices;
pub mod profiles;
pub mod play;
pub mod render;
