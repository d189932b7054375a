//! Terminal backend: half-block pixels, mouse input, text over the top.
//!
//! Each cell shows two stacked pixels (`▀` with separate fg/bg colors). The
//! 400x600 logical canvas is scaled to fit and centered; whatever is left
//! around it is painted in a dim letterbox color.

use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{self, Color as CColor},
    terminal,
};

use crate::consts::{HEIGHT, WIDTH};
use crate::draw::{Align, Frame, Label, Rgb, Shape};
use crate::surface::{InputEvent, Point, Surface};

const LETTERBOX: Rgb = Rgb(28, 28, 36);

fn ccolor(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![LETTERBOX; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, LETTERBOX);
    }

    pub fn fill(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_span(&mut self, x0: i32, x1: i32, y0: i32, y1: i32, c: Rgb) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, c);
            }
        }
    }

    /// Emit the whole buffer starting at the top-left cell. Colors are only
    /// re-sent when they change along a row.
    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let rows = self.h / 2;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;

        for row in 0..rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(ccolor(bot)))?;
                    bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                    continue;
                }
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(ccolor(top)))?;
                    fg = Some(top);
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
        }
        queue!(out, style::ResetColor)
    }
}

// ── Logical canvas to terminal mapping ──────────────────────────────────────

/// Where the canvas sits inside the pixel buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Buffer pixels per logical unit
    pub scale: f64,
    pub off_x: f64,
    pub off_y: f64,
}

impl Viewport {
    pub fn fit(cols: u16, rows: u16) -> Self {
        let pw = cols as f64;
        let ph = rows as f64 * 2.0;
        let scale = (pw / WIDTH).min(ph / HEIGHT).max(f64::EPSILON);
        Self {
            scale,
            off_x: ((pw - WIDTH * scale) / 2.0).floor(),
            off_y: ((ph - HEIGHT * scale) / 2.0).floor(),
        }
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (self.off_x + x * self.scale, self.off_y + y * self.scale)
    }

    /// Logical position of the middle of a terminal cell
    pub fn cell_to_logical(&self, col: u16, row: u16) -> Point {
        let px = col as f64 + 0.5;
        let py = row as f64 * 2.0 + 1.0;
        Point::new((px - self.off_x) / self.scale, (py - self.off_y) / self.scale)
    }

    /// Canvas bounds in buffer pixels, end exclusive
    fn canvas(&self) -> (i32, i32, i32, i32) {
        let (x0, y0) = self.to_pixel(0.0, 0.0);
        let (x1, y1) = self.to_pixel(WIDTH, HEIGHT);
        (x0.round() as i32, y0.round() as i32, x1.round() as i32, y1.round() as i32)
    }
}

/// Paint a frame into the buffer. Shapes are clipped to the canvas.
pub fn rasterize(buf: &mut PixelBuf, view: &Viewport, frame: &Frame) {
    buf.fill(LETTERBOX);
    let (cx0, cy0, cx1, cy1) = view.canvas();
    buf.fill_span(cx0, cx1, cy0, cy1, frame.background);

    for shape in &frame.shapes {
        match *shape {
            Shape::Rect { x, y, w, h, color } => {
                let (x0, y0) = view.to_pixel(x, y);
                let (x1, y1) = view.to_pixel(x + w, y + h);
                buf.fill_span(
                    (x0.round() as i32).max(cx0),
                    (x1.round() as i32).min(cx1),
                    (y0.round() as i32).max(cy0),
                    (y1.round() as i32).min(cy1),
                    color,
                );
            }
            Shape::Circle { x, y, r, color } => {
                let (px, py) = view.to_pixel(x, y);
                // Never thinner than the pixel holding the center
                let rr = (r * view.scale).max(0.71);
                let ys = ((py - rr).floor() as i32).max(cy0)..((py + rr).ceil() as i32).min(cy1);
                for iy in ys {
                    let xs =
                        ((px - rr).floor() as i32).max(cx0)..((px + rr).ceil() as i32).min(cx1);
                    for ix in xs {
                        let dx = ix as f64 + 0.5 - px;
                        let dy = iy as f64 + 0.5 - py;
                        if dx * dx + dy * dy <= rr * rr {
                            buf.set(ix, iy, color);
                        }
                    }
                }
            }
        }
    }
}

/// First cell column and row of a label
pub fn label_cell(view: &Viewport, label: &Label) -> (i32, i32) {
    let (px, py) = view.to_pixel(label.x, label.y);
    let row = (py / 2.0).floor() as i32;
    let len = label.text.chars().count() as i32;
    let col = match label.align {
        Align::Left => px.floor() as i32,
        Align::Center => px.round() as i32 - len / 2,
    };
    (col, row)
}

fn render_labels(
    out: &mut impl Write,
    buf: &PixelBuf,
    view: &Viewport,
    frame: &Frame,
) -> io::Result<()> {
    let rows = (buf.h / 2) as i32;
    let cols = buf.w as i32;
    for label in &frame.labels {
        let (col, row) = label_cell(view, label);
        if row < 0 || row >= rows {
            continue;
        }
        queue!(out, style::SetForegroundColor(ccolor(label.color)))?;
        for (i, ch) in label.text.chars().enumerate() {
            let c = col + i as i32;
            if c < 0 || c >= cols {
                continue;
            }
            // Keep whatever is painted underneath as the text background
            let under = buf.get(c as usize, row as usize * 2);
            queue!(
                out,
                cursor::MoveTo(c as u16, row as u16),
                style::SetBackgroundColor(ccolor(under)),
                style::Print(ch)
            )?;
        }
    }
    queue!(out, style::ResetColor)
}

/// Only the left button drives the held state; other buttons just tap.
pub fn translate_mouse(view: &Viewport, m: MouseEvent) -> Option<InputEvent> {
    let p = view.cell_to_logical(m.column, m.row);
    match m.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown(p)),
        MouseEventKind::Down(_) => Some(InputEvent::OtherButtonDown(p)),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp(p)),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(InputEvent::PointerMove(p)),
        _ => None,
    }
}

// ── Surface ─────────────────────────────────────────────────────────────────

/// Raw-mode alternate screen with mouse capture. Restored on drop.
pub struct Terminal {
    out: Stdout,
    buf: PixelBuf,
    view: Viewport,
}

impl Terminal {
    /// Sized to nothing until the real size is known
    fn blank() -> Self {
        Self {
            out: stdout(),
            buf: PixelBuf::new(0, 0),
            view: Viewport::fit(0, 0),
        }
    }

    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on an early return drops `term`, which leaves raw mode
        let mut term = Self::blank();
        execute!(
            term.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;

        let (cols, rows) = terminal::size()?;
        log::debug!("Terminal is {}x{} cells", cols, rows);
        term.resize(cols, rows);
        Ok(term)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
        self.view = Viewport::fit(cols, rows);
        log::debug!("Resized to {}x{} cells, scale {:.3}", cols, rows, self.view.scale);
    }

    fn translate(&mut self, ev: Event) -> Option<InputEvent> {
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    InputEvent::Quit
                }
                KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,
                KeyCode::Char(c) => InputEvent::Key(Some(c)),
                _ => InputEvent::Key(None),
            }),
            Event::Mouse(m) => translate_mouse(&self.view, m),
            Event::Resize(c, r) => {
                self.resize(c, r);
                None
            }
            _ => None,
        }
    }
}

impl Surface for Terminal {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            events.extend(self.translate(ev));
        }
        Ok(events)
    }

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        rasterize(&mut self.buf, &self.view, frame);
        self.buf.render(&mut self.out)?;
        render_labels(&mut self.out, &self.buf, &self.view, frame)?;
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, WHITE};

    #[test]
    fn test_viewport_fits_height() {
        // 80x24 cells is 80x48 pixels; height is the limit
        let v = Viewport::fit(80, 24);
        assert!((v.scale - 0.08).abs() < 1e-12);
        assert_eq!(v.off_y, 0.0);
        assert_eq!(v.off_x, 24.0);
    }

    #[test]
    fn test_viewport_fits_width() {
        let v = Viewport::fit(40, 100);
        assert!((v.scale - 0.1).abs() < 1e-12);
        assert_eq!(v.off_x, 0.0);
        assert_eq!(v.off_y, 70.0);
    }

    #[test]
    fn test_cell_to_logical_round_trips_through_center() {
        let v = Viewport::fit(80, 24);
        // Cell (40, 12) is at pixel (40.5, 25) which is logical (206.25, 312.5)
        let p = v.cell_to_logical(40, 12);
        assert!((p.x - 206.25).abs() < 1e-9);
        assert!((p.y - 312.5).abs() < 1e-9);
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 40,
            row: 12,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_only_left_button_is_primary() {
        let v = Viewport::fit(80, 24);
        let p = v.cell_to_logical(40, 12);
        let left = translate_mouse(&v, mouse(MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(left, Some(InputEvent::PointerDown(p)));

        for button in [MouseButton::Right, MouseButton::Middle] {
            let ev = translate_mouse(&v, mouse(MouseEventKind::Down(button)));
            assert_eq!(ev, Some(InputEvent::OtherButtonDown(p)));
            assert!(ev.is_some_and(|e| e.is_tap()));
            assert_eq!(translate_mouse(&v, mouse(MouseEventKind::Up(button))), None);
        }

        let up = translate_mouse(&v, mouse(MouseEventKind::Up(MouseButton::Left)));
        assert_eq!(up, Some(InputEvent::PointerUp(p)));
        assert_eq!(translate_mouse(&v, mouse(MouseEventKind::ScrollUp)), None);
    }

    #[test]
    fn test_blank_terminal_presents_nothing() {
        let mut buf = PixelBuf::new(0, 0);
        let v = Viewport::fit(0, 0);
        let mut f = Frame::new(BLACK);
        f.circle(50.0, 300.0, 15.0, WHITE);
        f.text(10.0, 25.0, "Score: 0", WHITE, Align::Left);
        rasterize(&mut buf, &v, &f);

        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        render_labels(&mut out, &buf, &v, &f).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(!s.contains("Score"));
    }

    #[test]
    fn test_tiny_terminal_does_not_divide_by_zero() {
        let v = Viewport::fit(0, 0);
        assert!(v.cell_to_logical(0, 0).x.is_finite());
    }

    #[test]
    fn test_rasterize_letterbox_and_clip() {
        let v = Viewport::fit(80, 24);
        let mut buf = PixelBuf::new(80, 48);
        let mut f = Frame::new(BLACK);
        // Pipe hanging off the right edge of the canvas
        f.rect(380.0, 0.0, 80.0, 100.0, WHITE);
        rasterize(&mut buf, &v, &f);

        assert_eq!(buf.get(0, 0), LETTERBOX);
        assert_eq!(buf.get(24, 47), BLACK);
        // Canvas spans pixel columns 24..56
        assert_eq!(buf.get(55, 0), WHITE);
        assert_eq!(buf.get(56, 0), LETTERBOX);
    }

    #[test]
    fn test_small_circle_still_visible() {
        let v = Viewport::fit(80, 24);
        let mut buf = PixelBuf::new(80, 48);
        let mut f = Frame::new(BLACK);
        f.circle(50.0, 300.0, 15.0, WHITE);
        rasterize(&mut buf, &v, &f);
        // Center lands at pixel (28, 24)
        assert_eq!(buf.get(28, 24), WHITE);
        assert_eq!(buf.get(32, 24), BLACK);
    }

    #[test]
    fn test_label_cells() {
        let v = Viewport::fit(80, 24);
        let left = Label {
            x: 10.0,
            y: 25.0,
            text: "Score: 0".into(),
            color: WHITE,
            align: Align::Left,
        };
        assert_eq!(label_cell(&v, &left), (24, 1));

        let centered = Label {
            align: Align::Center,
            x: 200.0,
            ..left
        };
        assert_eq!(label_cell(&v, &centered), (36, 1));
    }

    #[test]
    fn test_render_emits_half_blocks() {
        let mut buf = PixelBuf::new(2, 2);
        buf.set(0, 0, WHITE);
        buf.set(0, 1, BLACK);
        buf.set(1, 0, BLACK);
        buf.set(1, 1, BLACK);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert_eq!(s.matches('\u{2580}').count(), 1);
    }
}
