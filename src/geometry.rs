pub const BOARD_W: i32 = 84;
pub const BOARD_H: i32 = 48;
// Size of one grid step. Player moves and lane rows are multiples of it.
pub const GRID: i32 = 4;

pub const PLAYER_W: i32 = 6;
pub const PLAYER_H: i32 = 4;

// Rows at or above this y (smaller values) are river.
pub const WATER_LEVEL: i32 = BOARD_H - GRID * 6;

pub const GOAL_ROWS: [i32; 2] = [row_y(11), row_y(10)];

/// Top edge of lane `row`, counting rows up from the bottom of the board.
pub const fn row_y(row: i32) -> i32 {
    BOARD_H - GRID * row
}

pub fn in_water(y: i32) -> bool {
    y < WATER_LEVEL
}

pub fn on_goal_row(y: i32) -> bool {
    GOAL_ROWS.contains(&y)
}

// Axis-aligned rectangle in board units. `top < bottom`, y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn at(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            left: x,
            right: x + w,
            top: y,
            bottom: y + h,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.top >= other.bottom
            || self.right <= other.left
            || self.bottom <= other.top
            || self.left >= other.right)
    }
}
