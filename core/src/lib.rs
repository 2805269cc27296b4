//! Minesweeper rules without any rendering.
//!
//! A game is a [`GameState`] value driven by [`Msg`]s through [`GameState::update`]. Board
//! generation is handed back to the caller as a [`GenerateRequest`], so the caller owns the
//! randomness and the state machine never blocks on it.

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use grid::*;
pub use safe_start::*;
pub use stats::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod game;
mod generator;
mod grid;
mod safe_start;
mod stats;
mod types;
