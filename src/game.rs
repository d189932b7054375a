//! Simulation core: the falling ball, the pipe queue, scoring and collisions.
//!
//! Nothing in here touches the terminal or the disk. `App` feeds taps in,
//! calls [`Game::update`] once per tick and acts on the returned [`Step`].

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{HEIGHT, PIPE_COUNT, WIDTH};
use crate::mode::{HitOutcome, Mode, Rules};
use crate::tuning::Tuning;

/// The player's ball. Only the vertical axis moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    pub x: f64,
    pub y: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Avatar {
    fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.avatar_x,
            y: (HEIGHT / 2.0).floor(),
            vy: 0.0,
            radius: tuning.avatar_radius(),
        }
    }

    fn top(&self) -> f64 {
        self.y - self.radius
    }

    fn bottom(&self) -> f64 {
        self.y + self.radius
    }
}

/// One gapped obstacle. The gap height is shared by every pipe, so only the
/// top edge of the gap is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub top: f64,
}

impl Pipe {
    pub fn bottom(&self, gap: f64) -> f64 {
        self.top + gap
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Waiting for a tap to restart
    GameOver,
}

/// What the ball ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Index into the pipe queue
    Pipe(usize),
    Ceiling,
    Floor,
}

/// What happened during one [`Game::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Step {
    /// A pipe was recycled and the score went up
    pub scored: bool,
    /// Speed and gap changed this tick
    pub difficulty_up: bool,
    /// New record to be persisted right away
    pub new_highscore: Option<u32>,
    pub hit: Option<Hit>,
    /// The run ended this tick
    pub game_over: bool,
}

pub struct Game {
    tuning: Tuning,
    rng: Pcg32,
    mode: Mode,
    pub avatar: Avatar,
    /// Front leaves the screen first, back was spawned last
    pub pipes: VecDeque<Pipe>,
    pub score: u32,
    pub highscore: u32,
    pub rules: Rules,
    pub phase: Phase,
    /// Shared by all pipes, raised as the score climbs
    pub pipe_speed: f64,
    /// Shared by all pipes, narrowed as the score climbs
    pub gap: f64,
}

impl Game {
    pub fn new(mode: Mode, highscore: u32, tuning: Tuning, seed: u64) -> Self {
        let mut g = Game {
            rng: Pcg32::seed_from_u64(seed),
            mode,
            avatar: Avatar::new(&tuning),
            pipes: VecDeque::with_capacity(PIPE_COUNT + 1),
            score: 0,
            highscore,
            rules: Rules::for_mode(mode, &tuning),
            phase: Phase::Running,
            pipe_speed: tuning.initial_speed,
            gap: tuning.initial_gap,
            tuning,
        };
        g.spawn_initial_pipes();
        g
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// A discrete input: flap while running, restart after game over.
    pub fn tap(&mut self) {
        match self.phase {
            Phase::Running => self.flap(),
            Phase::GameOver => self.restart(),
        }
    }

    /// Overwrites velocity, however fast the ball was moving.
    pub fn flap(&mut self) {
        self.avatar.vy = self.tuning.flap_velocity;
    }

    pub fn restart(&mut self) {
        self.avatar = Avatar::new(&self.tuning);
        self.score = 0;
        self.rules = Rules::for_mode(self.mode, &self.tuning);
        self.phase = Phase::Running;
        if self.tuning.reset_difficulty_on_restart {
            self.pipe_speed = self.tuning.initial_speed;
            self.gap = self.tuning.initial_gap;
        }
        self.spawn_initial_pipes();
        log::info!(
            "Restarted in {} mode (speed {}, gap {})",
            self.mode.as_str(),
            self.pipe_speed,
            self.gap
        );
    }

    /// Advance one tick. Does nothing once the run is over.
    pub fn update(&mut self) -> Step {
        let mut step = Step::default();
        if self.phase == Phase::GameOver {
            return step;
        }

        self.integrate();
        self.advance_pipes();

        if self.recycle_front_pipe() {
            step.scored = true;
            self.score += 1;
            log::debug!("Passed pipe, score {}", self.score);
            if self.score % self.tuning.difficulty_every.max(1) == 0 {
                self.step_difficulty();
                step.difficulty_up = true;
            }
        }

        if self.score > self.highscore {
            self.highscore = self.score;
            step.new_highscore = Some(self.score);
        }

        if let Some(hit) = self.detect_collision() {
            step.hit = Some(hit);
            if self.rules.resolve_hit() == HitOutcome::GameOver {
                self.phase = Phase::GameOver;
                step.game_over = true;
                log::info!("Game over: hit {:?} at score {}", hit, self.score);
            } else {
                log::debug!("Hit {:?}, {} lives left", hit, self.rules.lives());
            }
        }

        step
    }

    /// Semi-implicit Euler: velocity first, then position.
    fn integrate(&mut self) {
        self.avatar.vy += self.tuning.gravity;
        self.avatar.y += self.avatar.vy;
    }

    fn advance_pipes(&mut self) {
        for p in &mut self.pipes {
            p.x -= self.pipe_speed;
        }
    }

    /// Evict the front pipe once it is fully off the left edge and append a
    /// fresh one behind the back pipe. At most one per tick.
    fn recycle_front_pipe(&mut self) -> bool {
        let gone = match self.pipes.front() {
            Some(front) => front.x + self.tuning.pipe_width < 0.0,
            None => false,
        };
        if !gone {
            return false;
        }
        self.pipes.pop_front();
        let x = match self.pipes.back() {
            Some(back) => back.x + self.tuning.pipe_spacing,
            None => WIDTH,
        };
        let top = self.random_gap_top();
        self.pipes.push_back(Pipe { x, top });
        true
    }

    fn step_difficulty(&mut self) {
        self.pipe_speed += self.tuning.speed_step;
        self.gap = (self.gap - self.tuning.gap_step).max(self.tuning.min_gap);
        log::info!(
            "Difficulty up at score {}: speed {}, gap {}",
            self.score,
            self.pipe_speed,
            self.gap
        );
    }

    /// First pipe hit in queue order wins; the ceiling and floor are checked
    /// only when no pipe was hit, so a tick costs at most one life.
    pub fn detect_collision(&self) -> Option<Hit> {
        let a = &self.avatar;
        let w = self.tuning.pipe_width;
        for (i, p) in self.pipes.iter().enumerate() {
            let overlaps = a.x + a.radius > p.x && a.x - a.radius < p.x + w;
            if overlaps && (a.top() < p.top || a.bottom() > p.bottom(self.gap)) {
                return Some(Hit::Pipe(i));
            }
        }
        if a.top() <= 0.0 {
            Some(Hit::Ceiling)
        } else if a.bottom() >= HEIGHT {
            Some(Hit::Floor)
        } else {
            None
        }
    }

    fn spawn_initial_pipes(&mut self) {
        self.pipes.clear();
        for i in 0..PIPE_COUNT {
            let top = self.random_gap_top();
            self.pipes.push_back(Pipe {
                x: WIDTH + i as f64 * self.tuning.pipe_spacing,
                top,
            });
        }
    }

    /// Whole-pixel gap top, leaving the margin clear above and below.
    fn random_gap_top(&mut self) -> f64 {
        let lo = self.tuning.gap_margin as i64;
        let hi = (HEIGHT - self.gap - self.tuning.gap_margin) as i64;
        if hi <= lo {
            return lo as f64;
        }
        self.rng.random_range(lo..=hi) as f64
    }
}
