//! The two capabilities the engine talks to: a monochrome display and a
//! four-button pad. Drivers implement these; the engine never sees hardware.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    // One-pixel outline, inside untouched.
    Transparent,
    Black,
    White,
}

/// A 1-bit bitmap, one string per row, `#` for a set pixel.
#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    pub rows: &'static [&'static str],
}

impl Sprite {
    pub const fn new(rows: &'static [&'static str]) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    pub fn width(&self) -> i32 {
        self.rows.first().map_or(0, |r| r.len() as i32)
    }

    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'#')
                .map(move |(dx, _)| (dx as i32, dy as i32))
        })
    }
}

pub trait Display {
    fn clear(&mut self);
    fn present(&mut self) -> io::Result<()>;
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, fill: Fill);
    fn draw_sprite(&mut self, x: i32, y: i32, sprite: &Sprite);
    // Text on the 14×6 character grid.
    fn draw_text(&mut self, text: &str, col: i32, row: i32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    X,
    Y,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::A, Button::B, Button::X, Button::Y];

    fn index(self) -> usize {
        match self {
            Button::A => 0,
            Button::B => 1,
            Button::X => 2,
            Button::Y => 3,
        }
    }
}

pub trait Input {
    /// True at most once per physical press.
    fn take(&mut self, button: Button) -> bool;
}

/// One-shot press flags. The producer (an interrupt, or a reader thread on
/// a host) sets; the frame loop consumes. A second press before the first
/// is consumed is lost.
#[derive(Debug, Default)]
pub struct ButtonLatch {
    flags: [AtomicBool; 4],
}

impl ButtonLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, button: Button) {
        self.flags[button.index()].store(true, Ordering::Release);
    }

    pub fn consume(&self, button: Button) -> bool {
        self.flags[button.index()].swap(false, Ordering::AcqRel)
    }
}

impl Input for ButtonLatch {
    fn take(&mut self, button: Button) -> bool {
        self.consume(button)
    }
}

impl Input for std::sync::Arc<ButtonLatch> {
    fn take(&mut self, button: Button) -> bool {
        self.consume(button)
    }
}
