//! Bounce Through - tap to keep a falling ball alive between scrolling pipes.
//!
//! Core modules:
//! - `game`: Simulation (physics, pipe queue, collisions, scoring)
//! - `mode`: Easy/hard selection and the hit policy
//! - `menu`: Mode-select screen
//! - `draw`: Presentation as a display list
//! - `highscore`: Single-value JSON persistence
//! - `surface` / `term`: Input and output, with a crossterm backend
//! - `app`: Fixed-rate loops tying it all together

pub mod app;
pub mod draw;
pub mod game;
pub mod highscore;
pub mod menu;
pub mod mode;
pub mod surface;
pub mod term;
pub mod tuning;

pub use game::{Game, Phase};
pub use highscore::{JsonFile, ScoreStore};
pub use mode::{Mode, Rules};
pub use tuning::Tuning;

/// Fixed canvas and timing constants
pub mod consts {
    /// Logical canvas width
    pub const WIDTH: f64 = 400.0;
    /// Logical canvas height
    pub const HEIGHT: f64 = 600.0;

    /// Pipes kept alive during play
    pub const PIPE_COUNT: usize = 3;

    /// Well-known high score file, relative to the working directory
    pub const HIGHSCORE_FILE: &str = "highscore.json";
    /// Log file, written only when RUST_LOG is set
    pub const LOG_FILE: &str = "bounce-through.log";
}
