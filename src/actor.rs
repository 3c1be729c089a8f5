//! Moving lane objects: vehicles, logs, turtle groups and bonus stars.

use crate::geometry::{row_y, Rect, BOARD_W};
use rand::Rng;

// An actor past the right edge (plus jitter) comes back in here.
pub const RESPAWN_LEFT_X: f32 = -2.0;
// An actor further left than this comes back at the right edge.
pub const LEFT_LIMIT_X: f32 = -8.0;
// Upper bound of the reappearance jitter, inclusive.
pub const MAX_JITTER: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    Slow,
    Medium,
    Fast,
    Ultra,
}

impl Speed {
    pub fn units(self) -> f32 {
        match self {
            Speed::Slow => 0.4,
            Speed::Medium => 0.6,
            Speed::Fast => 0.9,
            Speed::Ultra => 1.3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteTag {
    RacerRight,
    RacerLeft,
    CarRight,
    CarLeft,
    Bus,
    WoodLog,
    MediumLog,
    Turtles,
    Star,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Vehicle,
    WoodLog,
    MediumLog,
    TurtleGroup,
    BonusStar,
}

impl SpriteTag {
    pub fn category(self) -> Category {
        match self {
            SpriteTag::RacerRight
            | SpriteTag::RacerLeft
            | SpriteTag::CarRight
            | SpriteTag::CarLeft
            | SpriteTag::Bus => Category::Vehicle,
            SpriteTag::WoodLog => Category::WoodLog,
            SpriteTag::MediumLog => Category::MediumLog,
            SpriteTag::Turtles => Category::TurtleGroup,
            SpriteTag::Star => Category::BonusStar,
        }
    }

    // Hit box (width, height). Turtles draw wider than they collide.
    pub fn hit_size(self) -> (i32, i32) {
        match self {
            SpriteTag::RacerRight | SpriteTag::RacerLeft => (12, 4),
            SpriteTag::CarRight | SpriteTag::CarLeft => (10, 4),
            SpriteTag::Bus => (16, 4),
            SpriteTag::WoodLog => (20, 4),
            SpriteTag::MediumLog => (16, 4),
            SpriteTag::Turtles => (12, 4),
            SpriteTag::Star => (4, 12),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Actor {
    x: f32,
    y: i32,
    pub dir: Direction,
    pub speed: Speed,
    pub sprite: SpriteTag,
    category: Category,
    rect: Rect,
}

impl Actor {
    pub fn new(x: f32, row: i32, dir: Direction, speed: Speed, sprite: SpriteTag) -> Self {
        let mut a = Self {
            x,
            y: row_y(row),
            dir,
            speed,
            sprite,
            category: sprite.category(),
            rect: Rect::default(),
        };
        a.update_rect();
        a
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn velocity(&self) -> f32 {
        self.dir.sign() * self.speed.units()
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
        self.update_rect();
    }

    pub fn reseed(&mut self, x: f32, row: i32, dir: Direction, speed: Speed, sprite: SpriteTag) {
        *self = Actor::new(x, row, dir, speed, sprite);
    }

    pub fn advance(&mut self) {
        self.x += self.velocity();
        self.update_rect();
    }

    // Loops the lane. The right-edge threshold gets a random 1..=4 so
    // arrivals are harder to predict.
    pub fn wrap_if_out_of_bounds(&mut self, rng: &mut impl Rng) {
        let jitter = rng.gen_range(1..=MAX_JITTER);
        if self.x > (BOARD_W + jitter) as f32 {
            self.set_x(RESPAWN_LEFT_X);
        } else if self.x < LEFT_LIMIT_X {
            self.set_x(BOARD_W as f32);
        }
    }

    fn update_rect(&mut self) {
        let (w, h) = self.sprite.hit_size();
        self.rect = Rect::at(self.x, self.y as f32, w as f32, h as f32);
    }
}
