//! Animated cursor for pointer-driven interfaces.
//!
//! This crate re-exports [`tactile_anim`]; see there for the engine and
//! `tactile-config` for the `tactile.toml` settings.

pub use tactile_anim::*;
