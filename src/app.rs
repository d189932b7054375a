//! Fixed-rate loops: the mode-select screen, then the game itself.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::draw;
use crate::game::Game;
use crate::highscore::ScoreStore;
use crate::menu::{self, PointerState};
use crate::mode::Mode;
use crate::surface::{InputEvent, Surface};
use crate::tuning::Tuning;

pub struct App<S, St> {
    surface: S,
    store: St,
    tuning: Tuning,
}

impl<S: Surface, St: ScoreStore> App<S, St> {
    pub fn new(surface: S, store: St, tuning: Tuning) -> Self {
        Self {
            surface,
            store,
            tuning,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Pick a mode, then play until the player quits.
    pub fn run(&mut self, seed: u64) -> Result<()> {
        let highscore = self.store.get();
        let Some(mode) = self.select_mode()? else {
            log::info!("Quit on mode select");
            return Ok(());
        };
        log::info!("Starting {} mode, high score {}", mode.as_str(), highscore);
        let game = Game::new(mode, highscore, self.tuning.clone(), seed);
        let game = self.play(game)?;
        log::info!("Quit with score {}, high score {}", game.score, game.highscore);
        Ok(())
    }

    /// Redraw the two buttons every tick until one is clicked.
    /// `None` means the player quit instead.
    pub fn select_mode(&mut self) -> Result<Option<Mode>> {
        let mut pointer = PointerState::default();
        let frame = menu::menu_frame();
        loop {
            let started = Instant::now();
            for event in self.surface.poll()? {
                if event == InputEvent::Quit {
                    return Ok(None);
                }
                pointer.apply(&event);
                if let Some(mode) = menu::shortcut(&event).or_else(|| pointer.selection()) {
                    return Ok(Some(mode));
                }
            }
            self.surface.present(&frame)?;
            pace(started, self.tuning.tick());
        }
    }

    /// Main loop: input, update, render. A quit still lets the current tick
    /// finish and draw. Returns the game as it was at exit.
    pub fn play(&mut self, mut game: Game) -> Result<Game> {
        loop {
            let started = Instant::now();
            let mut quit = false;
            for event in self.surface.poll()? {
                if event == InputEvent::Quit {
                    quit = true;
                } else if event.is_tap() {
                    game.tap();
                }
            }

            let step = game.update();
            if let Some(score) = step.new_highscore {
                log::info!("New high score {}", score);
                if let Err(e) = self.store.set(score) {
                    log::warn!("Could not save high score {}: {}", score, e);
                }
            }

            self.surface.present(&draw::game_frame(&game))?;
            if quit {
                return Ok(game);
            }
            pace(started, self.tuning.tick());
        }
    }
}

/// Sleep off whatever is left of this tick.
fn pace(started: Instant, tick: Duration) {
    let elapsed = started.elapsed();
    if elapsed < tick {
        thread::sleep(tick - elapsed);
    }
}
