//! Mode-select screen: two buttons, picked with the pointer.

use crate::consts::{HEIGHT, WIDTH};
use crate::draw::{BLACK, BUTTON, Frame};
use crate::mode::Mode;
use crate::surface::{InputEvent, Point};

/// A clickable rectangle, edges included
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Zone {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

pub struct Button {
    pub label: &'static str,
    pub zone: Zone,
    pub mode: Mode,
}

pub const BUTTONS: [Button; 2] = [
    Button {
        label: "Easy Mode",
        zone: Zone {
            x: WIDTH / 2.0 - 100.0,
            y: HEIGHT / 2.0 - 60.0,
            w: 200.0,
            h: 50.0,
        },
        mode: Mode::Easy,
    },
    Button {
        label: "Hard Mode",
        zone: Zone {
            x: WIDTH / 2.0 - 100.0,
            y: HEIGHT / 2.0 + 20.0,
            w: 200.0,
            h: 50.0,
        },
        mode: Mode::Hard,
    },
];

pub fn mode_at(p: Point) -> Option<Mode> {
    BUTTONS.iter().find(|b| b.zone.contains(p)).map(|b| b.mode)
}

/// Last known pointer position and primary button state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub pos: Option<Point>,
    pub held: bool,
}

impl PointerState {
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown(p) => {
                self.pos = Some(p);
                self.held = true;
            }
            InputEvent::PointerUp(p) => {
                self.pos = Some(p);
                self.held = false;
            }
            InputEvent::PointerMove(p) | InputEvent::OtherButtonDown(p) => self.pos = Some(p),
            _ => {}
        }
    }

    /// Mode under the pointer while the button is held
    pub fn selection(&self) -> Option<Mode> {
        if !self.held {
            return None;
        }
        self.pos.and_then(mode_at)
    }
}

/// Keyboard fallback for terminals that don't report the mouse
pub fn shortcut(event: &InputEvent) -> Option<Mode> {
    match event {
        InputEvent::Key(Some('e' | 'E')) => Some(Mode::Easy),
        InputEvent::Key(Some('h' | 'H')) => Some(Mode::Hard),
        _ => None,
    }
}

pub fn menu_frame() -> Frame {
    let mut f = Frame::new(BLACK);
    for b in &BUTTONS {
        f.button(b.label, b.zone.x, b.zone.y, b.zone.w, b.zone.h, BUTTON, BLACK);
    }
    f
}
