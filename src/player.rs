use crate::geometry::{Rect, BOARD_H, BOARD_W, GRID, PLAYER_H, PLAYER_W};

pub const START_X: f32 = (BOARD_W / 2 - GRID / 2) as f32;
pub const START_Y: i32 = BOARD_H - GRID;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Up,
    Left,
    Right,
    Down,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub(crate) x: f32,
    pub(crate) y: i32,
    pub facing: Facing,
    pub on_log: bool,
    pub dead: bool,
    rect: Rect,
}

impl Default for Player {
    fn default() -> Self {
        let mut p = Self {
            x: START_X,
            y: START_Y,
            facing: Facing::Up,
            on_log: false,
            dead: false,
            rect: Rect::default(),
        };
        p.update_rect();
        p
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Place the token directly. Used by the host for debugging and by
    /// scenario tests.
    pub fn place(&mut self, x: f32, y: i32) {
        self.x = x;
        self.y = y;
        self.update_rect();
    }

    // One grid step. `dy = -1` is up the screen.
    pub fn step(&mut self, dx: i32, dy: i32) {
        debug_assert!(dx.abs() + dy.abs() == 1, "step must be a unit vector");
        self.x += (dx * GRID) as f32;
        self.y += dy * GRID;
        self.facing = match (dx, dy) {
            (1, _) => Facing::Right,
            (-1, _) => Facing::Left,
            (_, 1) => Facing::Down,
            _ => Facing::Up,
        };
        self.on_log = false;
        self.update_rect();
    }

    pub fn carry(&mut self, dx: f32) {
        self.x += dx;
        self.update_rect();
    }

    pub fn reset(&mut self) {
        *self = Player::default();
    }

    fn update_rect(&mut self) {
        self.rect = Rect::at(self.x, self.y as f32, PLAYER_W as f32, PLAYER_H as f32);
    }
}
