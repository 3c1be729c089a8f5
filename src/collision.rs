//! Player versus actor interaction.
//!
//! Resolution never mutates anything: every overlapping actor is classified
//! against the player as it stood at the start of the pass, and the hits are
//! folded with a commutative rule. The engine applies the resulting
//! [`Outcome`] afterwards, so lane or slot order cannot change the result.

use crate::actor::{Actor, Category};
use crate::geometry::{in_water, on_goal_row, BOARD_W};
use crate::player::Player;
use crate::turtle::TurtleClock;

// Outside this band the bonus track is solid wall.
pub const BONUS_TRACK: (f32, f32) = (35.0, 55.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
    // Standing on something afloat; carries the player by this much.
    Ride(f32),
    Crash,
    Drown,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Clear,
    Ride { carry: f32 },
    Drown,
    Crash,
}

impl Outcome {
    fn merge(self, hit: Hit) -> Outcome {
        match (self, hit) {
            (Outcome::Crash, _) | (_, Hit::Crash) => Outcome::Crash,
            (Outcome::Drown, _) | (_, Hit::Drown) => Outcome::Drown,
            (Outcome::Ride { carry }, Hit::Ride(v)) => Outcome::Ride {
                carry: carry.max(v),
            },
            (Outcome::Clear, Hit::Ride(v)) => Outcome::Ride { carry: v },
        }
    }
}

pub fn classify(player: &Player, actor: &Actor, turtles_under: bool) -> Option<Hit> {
    if !player.rect().overlaps(actor.rect()) {
        return None;
    }
    let wet = in_water(player.y());
    match actor.category() {
        Category::Vehicle => Some(Hit::Crash),
        Category::TurtleGroup if turtles_under => Some(Hit::Drown),
        Category::WoodLog | Category::MediumLog | Category::TurtleGroup => {
            wet.then(|| Hit::Ride(actor.velocity()))
        }
        // stars float on the river and run you over on the road
        Category::BonusStar => Some(if wet {
            Hit::Ride(actor.velocity())
        } else {
            Hit::Crash
        }),
    }
}

pub fn resolve<'a, I>(player: &Player, actors: I, clock: &TurtleClock) -> Outcome
where
    I: IntoIterator<Item = &'a Actor>,
{
    let under = clock.submerged();
    actors
        .into_iter()
        .filter_map(|a| classify(player, a, under))
        .fold(Outcome::Clear, Outcome::merge)
}

// In the river with nothing underfoot. The goal rows and the goal-post
// slot are dry.
pub fn drowns_in_open_water(player: &Player, goal_slot_x: f32) -> bool {
    in_water(player.y())
        && !player.on_log
        && !on_goal_row(player.y())
        && player.x() != goal_slot_x
}

pub fn off_screen(player: &Player) -> bool {
    player.x() > BOARD_W as f32 || player.x() < 0.0
}

pub fn in_bonus_dead_zone(player: &Player) -> bool {
    player.x() < BONUS_TRACK.0 || player.x() > BONUS_TRACK.1
}
