//! Core simulation for the arcade snake game.
//!
//! Everything in this module is free of I/O: the engine advances a
//! `GameState` one fixed tick at a time, and the terminal layer decides
//! when ticks happen and how the state is drawn.

pub mod action;
pub mod config;
pub mod engine;
pub mod particles;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use particles::{Particle, ParticleSystem};
pub use state::{
    CollisionType, Food, GameState, GameStatus, Position, Snake, BACKDROP_PALETTE_SIZE,
};
