//! 1-bit bitmaps for the 84×48 panel.

use crate::actor::SpriteTag;
use crate::hal::Sprite;
use crate::player::Facing;
use crate::turtle::TurtlePhase;

pub const FROG_UP: Sprite = Sprite::new(&[
    "#.##.#", //
    ".####.",
    ".####.",
    "#....#",
]);

pub const FROG_DOWN: Sprite = Sprite::new(&[
    "#....#", //
    ".####.",
    ".####.",
    "#.##.#",
]);

pub const FROG_LEFT: Sprite = Sprite::new(&[
    "##..#.", //
    ".####.",
    ".#####",
    "##..#.",
]);

pub const FROG_RIGHT: Sprite = Sprite::new(&[
    ".#..##", //
    ".####.",
    "#####.",
    ".#..##",
]);

pub const CAR_RIGHT: Sprite = Sprite::new(&[
    "..#####...",
    "#########.",
    "##########",
    ".##....##.",
]);

pub const CAR_LEFT: Sprite = Sprite::new(&[
    "...#####..",
    ".#########",
    "##########",
    ".##....##.",
]);

pub const RACER_RIGHT: Sprite = Sprite::new(&[
    "##...###....",
    "###########.",
    "############",
    "##..##..##..",
]);

pub const RACER_LEFT: Sprite = Sprite::new(&[
    "....###...##",
    ".###########",
    "############",
    "..##..##..##",
]);

pub const BUS: Sprite = Sprite::new(&[
    "################",
    "#.##.##.##.##..#",
    "################",
    ".##..........##.",
]);

pub const LOG_BIG: Sprite = Sprite::new(&[
    ".##################.",
    "#..#......#.......##",
    "##......#.....#...##",
    ".##################.",
]);

pub const LOG_MEDIUM: Sprite = Sprite::new(&[
    ".##############.",
    "#..#.....#....##",
    "##....#.....#.##",
    ".##############.",
]);

pub const TURTLES_SURFACED: Sprite = Sprite::new(&[
    ".###...###...###....",
    "#####.#####.#####...",
    "#####.#####.#####...",
    "#.#.#.#.#.#.#.#.#...",
]);

pub const TURTLES_DIPPING: Sprite = Sprite::new(&[
    "....................",
    ".###...###...###....",
    "#####.#####.#####...",
    "#.#.#.#.#.#.#.#.#...",
]);

pub const TURTLES_UNDER: Sprite = Sprite::new(&[
    "....................",
    "....................",
    ".#.#...#.#...#.#....",
    "#.#.#.#.#.#.#.#.#...",
]);

pub const TURTLES_RISING: Sprite = Sprite::new(&[
    "....................",
    "..#.....#.....#.....",
    ".###...###...###....",
    "#.#.#.#.#.#.#.#.#...",
]);

pub const STAR: Sprite = Sprite::new(&[
    ".##.", //
    "####",
    ".##.",
    "#..#",
    ".##.",
    "####",
    ".##.",
    "#..#",
    ".##.",
    "####",
    ".##.",
    "#..#",
]);

pub const GOAL_POST: Sprite = Sprite::new(&[
    "##################",
    "#................#",
    "#..############..#",
    "#..#..........#..#",
    "#..#..........#..#",
    "#..#..........#..#",
    "#..#..........#..#",
    "####..........####",
]);

// One 4×4 tile of the grass safety lanes.
pub const GRASS: Sprite = Sprite::new(&[
    "#...", //
    "..#.",
    ".#..",
    "...#",
]);

// One 4×7 tile of the hatched danger zone along the far bank.
pub const HATCH: Sprite = Sprite::new(&[
    "#...", //
    ".#..",
    "..#.",
    "...#",
    "..#.",
    ".#..",
    "#...",
]);

pub const BIG_FROG: Sprite = Sprite::new(&[
    ".##......##.",
    "####....####",
    "############",
    ".##########.",
    "############",
    "#.########.#",
    "#..##..##..#",
    "##........##",
]);

pub fn frog(facing: Facing) -> &'static Sprite {
    match facing {
        Facing::Up => &FROG_UP,
        Facing::Down => &FROG_DOWN,
        Facing::Left => &FROG_LEFT,
        Facing::Right => &FROG_RIGHT,
    }
}

pub fn turtles(phase: TurtlePhase) -> &'static Sprite {
    match phase {
        TurtlePhase::Surfaced => &TURTLES_SURFACED,
        TurtlePhase::Dipping => &TURTLES_DIPPING,
        TurtlePhase::Under => &TURTLES_UNDER,
        TurtlePhase::Rising => &TURTLES_RISING,
    }
}

pub fn actor(tag: SpriteTag, turtle_phase: TurtlePhase) -> &'static Sprite {
    match tag {
        SpriteTag::RacerRight => &RACER_RIGHT,
        SpriteTag::RacerLeft => &RACER_LEFT,
        SpriteTag::CarRight => &CAR_RIGHT,
        SpriteTag::CarLeft => &CAR_LEFT,
        SpriteTag::Bus => &BUS,
        SpriteTag::WoodLog => &LOG_BIG,
        SpriteTag::MediumLog => &LOG_MEDIUM,
        SpriteTag::Turtles => turtles(turtle_phase),
        SpriteTag::Star => &STAR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmaps_are_rectangular() {
        let all = [
            FROG_UP, FROG_DOWN, FROG_LEFT, FROG_RIGHT, CAR_RIGHT, CAR_LEFT, RACER_RIGHT,
            RACER_LEFT, BUS, LOG_BIG, LOG_MEDIUM, TURTLES_SURFACED, TURTLES_DIPPING,
            TURTLES_UNDER, TURTLES_RISING, STAR, GOAL_POST, GRASS, HATCH, BIG_FROG,
        ];
        for s in all {
            let w = s.width();
            assert!(s.rows.iter().all(|r| r.len() as i32 == w), "{:?}", s.rows);
        }
    }

    #[test]
    fn vehicle_and_log_bitmaps_match_hit_boxes() {
        for tag in [
            SpriteTag::RacerRight,
            SpriteTag::RacerLeft,
            SpriteTag::CarRight,
            SpriteTag::CarLeft,
            SpriteTag::Bus,
            SpriteTag::WoodLog,
            SpriteTag::MediumLog,
            SpriteTag::Star,
        ] {
            let s = actor(tag, TurtlePhase::Surfaced);
            assert_eq!((s.width(), s.height()), tag.hit_size(), "{tag:?}");
        }
    }

    #[test]
    fn frog_bitmap_is_player_sized() {
        for f in [Facing::Up, Facing::Down, Facing::Left, Facing::Right] {
            assert_eq!((frog(f).width(), frog(f).height()), (6, 4));
        }
    }
}
