//! Difficulty mode and what a collision costs in it.

use crate::tuning::Tuning;

/// Picked once on the mode-select screen and kept for the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Easy,
    Hard,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Hard => "hard",
        }
    }
}

/// Hit policy for the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rules {
    /// Each hit costs a life; the run ends when none are left
    Easy { lives: u32 },
    /// First hit ends the run
    Hard,
}

/// Result of applying a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Survived,
    GameOver,
}

impl Rules {
    pub fn for_mode(mode: Mode, tuning: &Tuning) -> Self {
        match mode {
            Mode::Easy => Rules::Easy {
                lives: tuning.easy_lives,
            },
            Mode::Hard => Rules::Hard,
        }
    }

    /// Lives left; hard mode always reports a single life
    pub fn lives(&self) -> u32 {
        match *self {
            Rules::Easy { lives } => lives,
            Rules::Hard => 1,
        }
    }

    pub fn resolve_hit(&mut self) -> HitOutcome {
        match self {
            Rules::Easy { lives } => {
                *lives = lives.saturating_sub(1);
                if *lives == 0 {
                    HitOutcome::GameOver
                } else {
                    HitOutcome::Survived
                }
            }
            Rules::Hard => HitOutcome::GameOver,
        }
    }
}
