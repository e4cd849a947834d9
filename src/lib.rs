//! Arcade snake for the terminal.
//!
//! A fixed-tick snake game with a twist: the food drifts across the board
//! in sub-cell steps, bouncing off the edges, and every capture sets off a
//! particle burst while the tick interval ratchets down. The crate splits
//! into:
//! - `game`: the pure simulation (engine, state, particles)
//! - `input`: key event mapping
//! - `render`: ratatui drawing
//! - `metrics`: in-session stats for the header
//! - `app`: the tokio event loop tying it together

pub mod app;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
