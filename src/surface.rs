//! What the loops need from a screen: drain input, show a frame.

use std::io;

use crate::draw::Frame;

/// A position on the 400x600 logical canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close or a quit key
    Quit,
    /// Any other key press, with its character when it has one
    Key(Option<char>),
    /// Primary button pressed
    PointerDown(Point),
    /// Primary button released
    PointerUp(Point),
    /// Right, middle or any other button pressed
    OtherButtonDown(Point),
    /// Pointer moved, with or without a button held
    PointerMove(Point),
}

impl InputEvent {
    /// Discrete input that flaps or restarts
    pub fn is_tap(&self) -> bool {
        matches!(
            self,
            InputEvent::Key(_) | InputEvent::PointerDown(_) | InputEvent::OtherButtonDown(_)
        )
    }
}

pub trait Surface {
    /// Everything that arrived since the last call, oldest first. Never blocks.
    fn poll(&mut self) -> io::Result<Vec<InputEvent>>;
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}
