//! Static lane tables and the actor pools they seed.
//!
//! Each layout is a fixed list of lanes. A lane puts `count` actors on one
//! row; slot `i` starts at `spacing * 2^i`, so neighbours never start on top
//! of each other. Pools are built once and re-seeded in place whenever a
//! level is entered again.

use crate::actor::{Actor, Category, Direction, Speed, SpriteTag};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    LevelOne,
    LevelTwo,
    Bonus,
}

#[derive(Clone, Copy, Debug)]
pub struct LaneSpec {
    pub row: i32,
    pub count: usize,
    pub spacing: i32,
    pub dir: Direction,
    pub speed: Speed,
    pub sprite: SpriteTag,
}

const fn lane(
    row: i32,
    count: usize,
    spacing: i32,
    dir: Direction,
    speed: Speed,
    sprite: SpriteTag,
) -> LaneSpec {
    LaneSpec {
        row,
        count,
        spacing,
        dir,
        speed,
        sprite,
    }
}

use Direction::{Left, Right};
use Speed::{Fast, Medium, Slow, Ultra};

const LEVEL_ONE: [LaneSpec; 7] = [
    // road
    lane(2, 3, 20, Left, Slow, SpriteTag::CarLeft),
    lane(3, 2, 25, Right, Medium, SpriteTag::CarRight),
    lane(4, 3, 30, Left, Slow, SpriteTag::Bus),
    lane(5, 4, 25, Right, Medium, SpriteTag::RacerRight),
    // river
    lane(7, 3, 20, Right, Slow, SpriteTag::WoodLog),
    lane(8, 2, 30, Left, Medium, SpriteTag::MediumLog),
    lane(9, 3, 25, Right, Slow, SpriteTag::WoodLog),
];

const LEVEL_TWO: [LaneSpec; 7] = [
    lane(2, 4, 15, Right, Medium, SpriteTag::RacerRight),
    lane(3, 3, 20, Left, Medium, SpriteTag::RacerLeft),
    lane(4, 4, 25, Right, Fast, SpriteTag::CarRight),
    lane(5, 3, 25, Left, Fast, SpriteTag::CarLeft),
    lane(7, 2, 20, Right, Fast, SpriteTag::MediumLog),
    lane(8, 2, 30, Left, Medium, SpriteTag::Turtles),
    lane(9, 3, 25, Right, Fast, SpriteTag::WoodLog),
];

const BONUS: [LaneSpec; 5] = [
    lane(2, 4, 15, Left, Fast, SpriteTag::Star),
    lane(3, 3, 20, Right, Ultra, SpriteTag::Star),
    lane(4, 3, 25, Right, Ultra, SpriteTag::Star),
    lane(7, 2, 20, Left, Ultra, SpriteTag::Star),
    lane(9, 3, 25, Right, Fast, SpriteTag::Star),
];

impl Layout {
    pub fn specs(self) -> &'static [LaneSpec] {
        match self {
            Layout::LevelOne => &LEVEL_ONE,
            Layout::LevelTwo => &LEVEL_TWO,
            Layout::Bonus => &BONUS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Lane {
    pub row: i32,
    actors: Vec<Actor>,
}

impl Lane {
    fn from_spec(spec: &LaneSpec) -> Self {
        let actors = (0..spec.count)
            .map(|i| {
                Actor::new(
                    slot_offset(spec.spacing, i),
                    spec.row,
                    spec.dir,
                    spec.speed,
                    spec.sprite,
                )
            })
            .collect();
        Self {
            row: spec.row,
            actors,
        }
    }

    fn reseed(&mut self, spec: &LaneSpec) {
        debug_assert_eq!(self.actors.len(), spec.count, "lane {} capacity", spec.row);
        self.row = spec.row;
        for (i, a) in self.actors.iter_mut().enumerate() {
            a.reseed(
                slot_offset(spec.spacing, i),
                spec.row,
                spec.dir,
                spec.speed,
                spec.sprite,
            );
        }
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut [Actor] {
        &mut self.actors
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

fn slot_offset(spacing: i32, slot: usize) -> f32 {
    (spacing << slot) as f32
}

#[derive(Clone, Debug)]
pub struct LaneSet {
    layout: Layout,
    lanes: Vec<Lane>,
}

impl LaneSet {
    pub fn new(layout: Layout) -> Self {
        let lanes = layout.specs().iter().map(Lane::from_spec).collect();
        Self { layout, lanes }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn reseed(&mut self) {
        for (lane, spec) in self.lanes.iter_mut().zip(self.layout.specs()) {
            lane.reseed(spec);
        }
        log::debug!("seeded {:?}: {} lanes", self.layout, self.lanes.len());
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.lanes.iter().flat_map(|l| l.actors.iter())
    }

    pub fn has_turtles(&self) -> bool {
        self.actors()
            .any(|a| a.category() == Category::TurtleGroup)
    }
}
