//! Presentation: turns game state into a display list in logical units.
//!
//! Frames are plain data. The terminal backend decides how many cells a
//! logical pixel is worth.

use crate::consts::{HEIGHT, WIDTH};
use crate::game::Game;
use crate::mode::Mode;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const PIPE: Rgb = Rgb(0, 255, 0);
pub const BALL: Rgb = Rgb(0, 255, 255);
pub const ALERT: Rgb = Rgb(255, 0, 0);
pub const BUTTON: Rgb = Rgb(200, 200, 200);

// ── Display list ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { x: f64, y: f64, r: f64, color: Rgb },
    Rect { x: f64, y: f64, w: f64, h: f64, color: Rgb },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `x` is where the text starts
    Left,
    /// `x` is the middle of the text
    Center,
}

/// A line of text; `y` is the vertical middle of the line
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Rgb,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub background: Rgb,
    /// Painted in order, later shapes on top
    pub shapes: Vec<Shape>,
    /// Drawn over all shapes
    pub labels: Vec<Label>,
}

impl Frame {
    pub fn new(background: Rgb) -> Self {
        Self {
            background,
            shapes: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.shapes.push(Shape::Rect { x, y, w, h, color });
    }

    pub fn circle(&mut self, x: f64, y: f64, r: f64, color: Rgb) {
        self.shapes.push(Shape::Circle { x, y, r, color });
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, color: Rgb, align: Align) {
        self.labels.push(Label {
            x,
            y,
            text: text.into(),
            color,
            align,
        });
    }

    /// Filled box with its caption centered inside
    #[allow(clippy::too_many_arguments)]
    pub fn button(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgb,
        text_color: Rgb,
    ) {
        self.rect(x, y, w, h, color);
        self.text(x + w / 2.0, y + h / 2.0, text, text_color, Align::Center);
    }

    /// Whether any label reads exactly `text`
    pub fn has_text(&self, text: &str) -> bool {
        self.labels.iter().any(|l| l.text == text)
    }
}

// ── Game screen ─────────────────────────────────────────────────────────────

/// Height of one line of HUD text
const LINE_H: f64 = 30.0;

pub fn game_frame(game: &Game) -> Frame {
    let mut f = Frame::new(BLACK);
    draw_ball(&mut f, game);
    draw_pipes(&mut f, game);
    draw_hud(&mut f, game);
    if game.is_over() {
        draw_game_over(&mut f);
    }
    f
}

fn draw_ball(f: &mut Frame, game: &Game) {
    let a = &game.avatar;
    f.circle(a.x, a.y.trunc(), a.radius, BALL);
}

fn draw_pipes(f: &mut Frame, game: &Game) {
    let w = game.tuning().pipe_width;
    for p in &game.pipes {
        let bottom = p.bottom(game.gap);
        f.rect(p.x, 0.0, w, p.top, PIPE);
        f.rect(p.x, bottom, w, HEIGHT - bottom, PIPE);
    }
}

fn draw_hud(f: &mut Frame, game: &Game) {
    let y = 10.0 + LINE_H / 2.0;
    f.text(10.0, y, format!("Score: {}", game.score), WHITE, Align::Left);
    f.text(
        WIDTH - 150.0,
        y,
        format!("Highscore: {}", game.highscore),
        WHITE,
        Align::Left,
    );
    if game.mode() == Mode::Easy {
        f.text(
            10.0,
            y + LINE_H,
            format!("Lives: {}", game.rules.lives()),
            WHITE,
            Align::Left,
        );
    }
}

fn draw_game_over(f: &mut Frame) {
    f.text(WIDTH / 2.0, HEIGHT / 2.0 - 25.0, "Game Over", ALERT, Align::Center);
    f.button(
        "Tap to Restart",
        WIDTH / 2.0 - 100.0,
        HEIGHT / 2.0 + 20.0,
        200.0,
        50.0,
        BUTTON,
        BLACK,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Phase;
    use crate::tuning::Tuning;

    #[test]
    fn test_running_frame() {
        let mut g = Game::new(Mode::Hard, 9, Tuning::default(), 3);
        g.score = 4;
        let f = game_frame(&g);

        assert_eq!(f.background, BLACK);
        // Ball plus two segments per pipe
        assert_eq!(f.shapes.len(), 1 + 2 * 3);
        assert_eq!(
            f.shapes[0],
            Shape::Circle {
                x: 50.0,
                y: 300.0,
                r: 15.0,
                color: BALL
            }
        );
        assert!(f.has_text("Score: 4"));
        assert!(f.has_text("Highscore: 9"));
        assert!(!f.labels.iter().any(|l| l.text.starts_with("Lives")));
        assert!(!f.has_text("Game Over"));
    }

    #[test]
    fn test_pipe_segments_frame_the_gap() {
        let g = Game::new(Mode::Easy, 0, Tuning::default(), 3);
        let f = game_frame(&g);
        let p = g.pipes[0];
        assert_eq!(
            f.shapes[1],
            Shape::Rect {
                x: p.x,
                y: 0.0,
                w: 80.0,
                h: p.top,
                color: PIPE
            }
        );
        assert_eq!(
            f.shapes[2],
            Shape::Rect {
                x: p.x,
                y: p.top + 150.0,
                w: 80.0,
                h: HEIGHT - p.top - 150.0,
                color: PIPE
            }
        );
        assert!(f.has_text("Lives: 3"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut g = Game::new(Mode::Easy, 0, Tuning::default(), 3);
        g.phase = Phase::GameOver;
        let f = game_frame(&g);
        assert!(f.has_text("Game Over"));
        assert!(f.has_text("Tap to Restart"));
        assert_eq!(f.shapes.len(), 1 + 2 * 3 + 1);
    }

    #[test]
    fn test_ball_drawn_at_whole_pixel() {
        let mut g = Game::new(Mode::Hard, 0, Tuning::default(), 3);
        g.avatar.y = 123.9;
        let f = game_frame(&g);
        assert!(matches!(f.shapes[0], Shape::Circle { y, .. } if y == 123.0));
    }
}
