//! Nullable infrastructure for deterministic tests and scripted replays.
//!
//! The token reads "now" through the `vtk_types::Clock` trait. [`NullClock`]
//! is the controllable stand-in: it starts wherever it is told and only moves
//! when advanced, so expiry and eviction can be driven second by second.

pub mod clock;

pub use clock::NullClock;
