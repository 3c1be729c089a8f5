//! Terminal stand-in for the LCD and the button pad.
//!
//! The 84×48 panel is packed into braille cells, two pixels across and four
//! down per cell, and diffed against the previous frame before anything is
//! written. Keys are read on their own thread and latched as button presses.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, BeginSynchronizedUpdate, EndSynchronizedUpdate},
};

use crate::geometry::{BOARD_H, BOARD_W};
use crate::hal::{Button, ButtonLatch, Display, Fill, Sprite};

// Terminal cells covered by the panel.
pub const CELLS_W: u16 = (BOARD_W / 2) as u16;
pub const CELLS_H: u16 = (BOARD_H / 4) as u16;

const GLYPH_W: i32 = 6;
const GLYPH_H: i32 = 8;

const LCD_FG: Color = Color::Rgb { r: 20, g: 40, b: 20 };
const LCD_BG: Color = Color::Rgb { r: 150, g: 190, b: 120 };

// 5×7 glyphs for ASCII 0x20..=0x7E, one byte per column, bit 0 at the top.
#[rustfmt::skip]
const FONT: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], [0x00, 0x00, 0x5f, 0x00, 0x00], [0x00, 0x07, 0x00, 0x07, 0x00],
    [0x14, 0x7f, 0x14, 0x7f, 0x14], [0x24, 0x2a, 0x7f, 0x2a, 0x12], [0x23, 0x13, 0x08, 0x64, 0x62],
    [0x36, 0x49, 0x55, 0x22, 0x50], [0x00, 0x05, 0x03, 0x00, 0x00], [0x00, 0x1c, 0x22, 0x41, 0x00],
    [0x00, 0x41, 0x22, 0x1c, 0x00], [0x14, 0x08, 0x3e, 0x08, 0x14], [0x08, 0x08, 0x3e, 0x08, 0x08],
    [0x00, 0x50, 0x30, 0x00, 0x00], [0x08, 0x08, 0x08, 0x08, 0x08], [0x00, 0x60, 0x60, 0x00, 0x00],
    [0x20, 0x10, 0x08, 0x04, 0x02], [0x3e, 0x51, 0x49, 0x45, 0x3e], [0x00, 0x42, 0x7f, 0x40, 0x00],
    [0x42, 0x61, 0x51, 0x49, 0x46], [0x21, 0x41, 0x45, 0x4b, 0x31], [0x18, 0x14, 0x12, 0x7f, 0x10],
    [0x27, 0x45, 0x45, 0x45, 0x39], [0x3c, 0x4a, 0x49, 0x49, 0x30], [0x01, 0x71, 0x09, 0x05, 0x03],
    [0x36, 0x49, 0x49, 0x49, 0x36], [0x06, 0x49, 0x49, 0x29, 0x1e], [0x00, 0x36, 0x36, 0x00, 0x00],
    [0x00, 0x56, 0x36, 0x00, 0x00], [0x08, 0x14, 0x22, 0x41, 0x00], [0x14, 0x14, 0x14, 0x14, 0x14],
    [0x00, 0x41, 0x22, 0x14, 0x08], [0x02, 0x01, 0x51, 0x09, 0x06], [0x32, 0x49, 0x79, 0x41, 0x3e],
    [0x7e, 0x11, 0x11, 0x11, 0x7e], [0x7f, 0x49, 0x49, 0x49, 0x36], [0x3e, 0x41, 0x41, 0x41, 0x22],
    [0x7f, 0x41, 0x41, 0x22, 0x1c], [0x7f, 0x49, 0x49, 0x49, 0x41], [0x7f, 0x09, 0x09, 0x09, 0x01],
    [0x3e, 0x41, 0x49, 0x49, 0x7a], [0x7f, 0x08, 0x08, 0x08, 0x7f], [0x00, 0x41, 0x7f, 0x41, 0x00],
    [0x20, 0x40, 0x41, 0x3f, 0x01], [0x7f, 0x08, 0x14, 0x22, 0x41], [0x7f, 0x40, 0x40, 0x40, 0x40],
    [0x7f, 0x02, 0x0c, 0x02, 0x7f], [0x7f, 0x04, 0x08, 0x10, 0x7f], [0x3e, 0x41, 0x41, 0x41, 0x3e],
    [0x7f, 0x09, 0x09, 0x09, 0x06], [0x3e, 0x41, 0x51, 0x21, 0x5e], [0x7f, 0x09, 0x19, 0x29, 0x46],
    [0x46, 0x49, 0x49, 0x49, 0x31], [0x01, 0x01, 0x7f, 0x01, 0x01], [0x3f, 0x40, 0x40, 0x40, 0x3f],
    [0x1f, 0x20, 0x40, 0x20, 0x1f], [0x3f, 0x40, 0x38, 0x40, 0x3f], [0x63, 0x14, 0x08, 0x14, 0x63],
    [0x07, 0x08, 0x70, 0x08, 0x07], [0x61, 0x51, 0x49, 0x45, 0x43], [0x00, 0x7f, 0x41, 0x41, 0x00],
    [0x02, 0x04, 0x08, 0x10, 0x20], [0x00, 0x41, 0x41, 0x7f, 0x00], [0x04, 0x02, 0x01, 0x02, 0x04],
    [0x40, 0x40, 0x40, 0x40, 0x40], [0x00, 0x01, 0x02, 0x04, 0x00], [0x20, 0x54, 0x54, 0x54, 0x78],
    [0x7f, 0x48, 0x44, 0x44, 0x38], [0x38, 0x44, 0x44, 0x44, 0x20], [0x38, 0x44, 0x44, 0x48, 0x7f],
    [0x38, 0x54, 0x54, 0x54, 0x18], [0x08, 0x7e, 0x09, 0x01, 0x02], [0x0c, 0x52, 0x52, 0x52, 0x3e],
    [0x7f, 0x08, 0x04, 0x04, 0x78], [0x00, 0x44, 0x7d, 0x40, 0x00], [0x20, 0x40, 0x44, 0x3d, 0x00],
    [0x7f, 0x10, 0x28, 0x44, 0x00], [0x00, 0x41, 0x7f, 0x40, 0x00], [0x7c, 0x04, 0x18, 0x04, 0x78],
    [0x7c, 0x08, 0x04, 0x04, 0x78], [0x38, 0x44, 0x44, 0x44, 0x38], [0x7c, 0x14, 0x14, 0x14, 0x08],
    [0x08, 0x14, 0x14, 0x18, 0x7c], [0x7c, 0x08, 0x04, 0x04, 0x08], [0x48, 0x54, 0x54, 0x54, 0x20],
    [0x04, 0x3f, 0x44, 0x40, 0x20], [0x3c, 0x40, 0x40, 0x20, 0x7c], [0x1c, 0x20, 0x40, 0x20, 0x1c],
    [0x3c, 0x40, 0x30, 0x40, 0x3c], [0x44, 0x28, 0x10, 0x28, 0x44], [0x0c, 0x50, 0x50, 0x50, 0x3c],
    [0x44, 0x64, 0x54, 0x4c, 0x44], [0x00, 0x08, 0x36, 0x41, 0x00], [0x00, 0x00, 0x7f, 0x00, 0x00],
    [0x00, 0x41, 0x36, 0x08, 0x00], [0x10, 0x08, 0x08, 0x10, 0x08],
];

fn glyph(ch: char) -> &'static [u8; 5] {
    let i = (ch as u32).wrapping_sub(0x20) as usize;
    FONT.get(i).unwrap_or(&FONT[('?' as u32 - 0x20) as usize])
}

fn braille_char(dots: u8) -> char {
    // U+2800 plus the dot bits
    char::from_u32(0x2800 + dots as u32).unwrap_or(' ')
}

fn braille_bit(dx: i32, dy: i32) -> u8 {
    // (0,0)=1 (0,1)=2 (0,2)=4 (1,0)=8 (1,1)=16 (1,2)=32 (0,3)=64 (1,3)=128
    match (dx, dy) {
        (0, 0) => 1,
        (0, 1) => 2,
        (0, 2) => 4,
        (1, 0) => 8,
        (1, 1) => 16,
        (1, 2) => 32,
        (0, 3) => 64,
        (1, 3) => 128,
        _ => 0,
    }
}

#[derive(Debug)]
pub struct TermSize(AtomicU32);

impl TermSize {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self(AtomicU32::new(pack(cols, rows)))
    }

    pub fn set(&self, cols: u16, rows: u16) {
        self.0.store(pack(cols, rows), Ordering::Release);
    }

    pub fn get(&self) -> (u16, u16) {
        let v = self.0.load(Ordering::Acquire);
        ((v >> 16) as u16, v as u16)
    }
}

fn pack(cols: u16, rows: u16) -> u32 {
    (cols as u32) << 16 | rows as u32
}

pub struct TermDisplay<W: Write> {
    out: W,
    size: Arc<TermSize>,
    pixels: Vec<bool>,
    cols: u16,
    rows: u16,
    prev: Vec<char>,
    cur: Vec<char>,
    full_redraw: bool,
}

impl<W: Write> TermDisplay<W> {
    pub fn new(out: W, size: Arc<TermSize>) -> Self {
        let (cols, rows) = size.get();
        let n = cols as usize * rows as usize;
        Self {
            out,
            size,
            pixels: vec![false; (BOARD_W * BOARD_H) as usize],
            cols,
            rows,
            prev: vec![' '; n],
            cur: vec![' '; n],
            full_redraw: true,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= BOARD_W || y >= BOARD_H {
            return false;
        }
        self.pixels[(y * BOARD_W + x) as usize]
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn set(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= BOARD_W || y >= BOARD_H {
            return;
        }
        self.pixels[(y * BOARD_W + x) as usize] = on;
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let n = cols as usize * rows as usize;
        self.prev = vec![' '; n];
        self.cur = vec![' '; n];
        self.full_redraw = true;
    }

    fn put(&mut self, x: u16, y: u16, ch: char) {
        if x >= self.cols || y >= self.rows {
            return;
        }
        let i = y as usize * self.cols as usize + x as usize;
        self.cur[i] = ch;
    }

    fn put_str(&mut self, x: u16, y: u16, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            self.put(x.saturating_add(i as u16), y, ch);
        }
    }

    // Rebuild the cell grid from the pixel buffer, centred.
    fn compose(&mut self) {
        self.cur.fill(' ');
        if self.cols < CELLS_W || self.rows < CELLS_H {
            self.put_str(0, 0, "Terminal too small.");
            self.put_str(0, 1, &format!("Need {CELLS_W}x{CELLS_H}."));
            return;
        }
        let ox = (self.cols - CELLS_W) / 2;
        let oy = (self.rows - CELLS_H) / 2;
        for cy in 0..CELLS_H as i32 {
            for cx in 0..CELLS_W as i32 {
                let mut dots = 0u8;
                for dy in 0..4 {
                    for dx in 0..2 {
                        if self.pixel(cx * 2 + dx, cy * 4 + dy) {
                            dots |= braille_bit(dx, dy);
                        }
                    }
                }
                self.put(ox + cx as u16, oy + cy as u16, braille_char(dots));
            }
        }
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        if self.full_redraw {
            queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        }
        queue!(self.out, SetForegroundColor(LCD_FG), SetBackgroundColor(LCD_BG))?;
        for y in 0..self.rows {
            let row_off = y as usize * self.cols as usize;
            for x in 0..self.cols {
                let i = row_off + x as usize;
                let ch = self.cur[i];
                if !self.full_redraw && ch == self.prev[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y), Print(ch))?;
            }
        }
        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.copy_from_slice(&self.cur);
        self.full_redraw = false;
        Ok(())
    }
}

impl<W: Write> Display for TermDisplay<W> {
    fn clear(&mut self) {
        self.pixels.fill(false);
    }

    fn present(&mut self) -> io::Result<()> {
        let (cols, rows) = self.size.get();
        if (cols, rows) != (self.cols, self.rows) {
            log::debug!("terminal resized to {cols}x{rows}");
            self.resize(cols, rows);
        }
        self.compose();
        self.flush_diff()
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, fill: Fill) {
        for yy in y..y + h {
            for xx in x..x + w {
                let edge = yy == y || yy == y + h - 1 || xx == x || xx == x + w - 1;
                match fill {
                    Fill::Transparent if edge => self.set(xx, yy, true),
                    Fill::Transparent => {}
                    Fill::Black => self.set(xx, yy, true),
                    Fill::White => self.set(xx, yy, false),
                }
            }
        }
    }

    fn draw_sprite(&mut self, x: i32, y: i32, sprite: &Sprite) {
        for (dx, dy) in sprite.pixels() {
            self.set(x + dx, y + dy, true);
        }
    }

    fn draw_text(&mut self, text: &str, col: i32, row: i32) {
        let y0 = row * GLYPH_H;
        for (i, ch) in text.chars().enumerate() {
            let x0 = (col + i as i32) * GLYPH_W;
            self.draw_rect(x0, y0, GLYPH_W, GLYPH_H, Fill::White);
            for (dx, &bits) in glyph(ch).iter().enumerate() {
                for dy in 0..7 {
                    if (bits >> dy) & 1 == 1 {
                        self.set(x0 + dx as i32, y0 + dy, true);
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Press(Button),
    Quit,
}

pub fn map_key(key: &KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyAction::Quit);
    }
    let action = match key.code {
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Press(Button::A),
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Press(Button::A),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Press(Button::X),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Press(Button::B),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Press(Button::Y),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Read terminal events until `quit` is raised, latching presses and
/// tracking the terminal size. Raises `quit` itself on the quit key or on
/// a read error.
pub fn spawn_key_reader(
    latch: Arc<ButtonLatch>,
    size: Arc<TermSize>,
    quit: Arc<AtomicBool>,
) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || {
        let res = read_keys(&latch, &size, &quit);
        quit.store(true, Ordering::Release);
        res
    })
}

fn read_keys(latch: &ButtonLatch, size: &TermSize, quit: &AtomicBool) -> io::Result<()> {
    while !quit.load(Ordering::Acquire) {
        if !event::poll(Duration::from_millis(20))? {
            continue;
        }
        match event::read()? {
            Event::Key(k) if k.kind == KeyEventKind::Press => match map_key(&k) {
                Some(KeyAction::Press(b)) => latch.press(b),
                Some(KeyAction::Quit) => {
                    log::info!("quit requested");
                    return Ok(());
                }
                None => {}
            },
            Event::Resize(w, h) => size.set(w, h),
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> TermDisplay<Vec<u8>> {
        TermDisplay::new(Vec::new(), Arc::new(TermSize::new(CELLS_W, CELLS_H)))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn braille_packing_covers_all_dots() {
        let mut all = 0u8;
        for dy in 0..4 {
            for dx in 0..2 {
                all |= braille_bit(dx, dy);
            }
        }
        assert_eq!(all, 0xff);
        assert_eq!(braille_char(0), '\u{2800}');
        assert_eq!(braille_char(0xff), '\u{28ff}');
    }

    #[test]
    fn sprite_sets_pixels_and_clips() {
        let mut d = display();
        const DOT: Sprite = Sprite::new(&["##", "#."]);
        d.draw_sprite(-1, 0, &DOT);
        assert!(d.pixel(0, 0));
        assert!(!d.pixel(0, 1));
        d.draw_sprite(BOARD_W - 1, BOARD_H - 1, &DOT);
        assert!(d.pixel(BOARD_W - 1, BOARD_H - 1));
        d.clear();
        assert!(!d.pixel(0, 0));
    }

    #[test]
    fn outline_rect_leaves_inside_alone() {
        let mut d = display();
        d.draw_rect(0, 0, 5, 5, Fill::Transparent);
        assert!(d.pixel(0, 0) && d.pixel(4, 4) && d.pixel(4, 0));
        assert!(!d.pixel(2, 2));
        d.draw_rect(0, 0, 5, 5, Fill::Black);
        assert!(d.pixel(2, 2));
        d.draw_rect(1, 1, 3, 3, Fill::White);
        assert!(!d.pixel(2, 2) && d.pixel(0, 0));
    }

    #[test]
    fn text_uses_six_by_eight_cells() {
        let mut d = display();
        d.draw_text("|", 1, 1);
        // '|' is a single column in the middle of the glyph
        for y in 8..15 {
            assert!(d.pixel(8, y));
        }
        assert!(!d.pixel(6, 8));
        assert!(!d.pixel(8, 15));
    }

    #[test]
    fn unknown_chars_fall_back() {
        assert_eq!(glyph('é'), glyph('?'));
        assert_eq!(glyph('A'), &[0x7e, 0x11, 0x11, 0x11, 0x7e]);
    }

    #[test]
    fn present_only_rewrites_changed_cells() {
        let mut d = display();
        d.draw_rect(0, 0, BOARD_W, BOARD_H, Fill::Black);
        d.present().unwrap();
        let first = d.writer().len();
        assert!(String::from_utf8_lossy(d.writer()).contains('\u{28ff}'));
        d.present().unwrap();
        let second = d.writer().len() - first;
        assert!(second < first / 4);
    }

    #[test]
    fn small_terminal_gets_a_message() {
        let size = Arc::new(TermSize::new(30, 3));
        let mut d = TermDisplay::new(Vec::new(), Arc::clone(&size));
        d.present().unwrap();
        let top: String = d.cur[..d.cols as usize].iter().collect();
        assert!(top.starts_with("Terminal too small."), "{top:?}");
        size.set(CELLS_W + 2, CELLS_H);
        d.draw_rect(0, 0, 2, 4, Fill::Black);
        d.present().unwrap();
        assert!(String::from_utf8_lossy(d.writer()).contains('\u{28ff}'));
    }

    #[test]
    fn key_map() {
        assert_eq!(map_key(&key(KeyCode::Right)), Some(KeyAction::Press(Button::A)));
        assert_eq!(map_key(&key(KeyCode::Up)), Some(KeyAction::Press(Button::X)));
        assert_eq!(map_key(&key(KeyCode::Char('s'))), Some(KeyAction::Press(Button::B)));
        assert_eq!(map_key(&key(KeyCode::Left)), Some(KeyAction::Press(Button::Y)));
        assert_eq!(map_key(&key(KeyCode::Enter)), Some(KeyAction::Press(Button::A)));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(map_key(&key(KeyCode::Tab)), None);
    }

    #[test]
    fn size_round_trips_through_the_atomic() {
        let s = TermSize::new(120, 40);
        assert_eq!(s.get(), (120, 40));
        s.set(80, 24);
        assert_eq!(s.get(), (80, 24));
    }
}
