use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::collision::{self, Outcome};
use crate::config::{ticks_for, Settings};
use crate::geometry::on_goal_row;
use crate::hal::{Button, Input};
use crate::lanes::{LaneSet, Layout};
use crate::mode::{move_selection, Level, Mode, TUTORIAL_PAGES};
use crate::player::{Player, START_Y};
use crate::turtle::TurtleClock;

// Where the goal post sits unless randomised.
pub const GOAL_POST_X: i32 = 36;
// Offset from the post's left edge to the dry slot in the river.
pub const GOAL_SLOT_OFFSET: i32 = 6;

const NOTICE_MS: u64 = 1000;
const CREDITS_MS: u64 = 2000;
const TITLE_MS: u64 = 3000;
const LEVEL_BANNER_MS: u64 = 1000;

pub fn random_goal_post_x(rng: &mut impl Rng) -> i32 {
    rng.gen_range(0..80) + 12
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Death {
    Crash,
    Drown,
    OffScreen,
    OffTrack,
}

impl Death {
    pub fn notice(self) -> &'static str {
        match self {
            Death::Crash => "SQUISHED",
            Death::Drown => "DROWNED",
            Death::OffScreen | Death::OffTrack => "LOSER!!!!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Credits,
    Title,
    Congrats,
    LoadingLevel(Level),
    CourseComplete,
}

#[derive(Clone, Copy, Debug)]
pub struct Banner {
    pub page: Page,
    ticks_left: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    ModeChanged(Mode),
    Died(Death),
    LevelComplete(Level),
    BonusComplete,
}

pub struct Game {
    mode: Mode,
    player: Player,
    level_one: LaneSet,
    level_two: LaneSet,
    bonus: LaneSet,
    clock: TurtleClock,
    rng: SmallRng,
    goal_post_x: i32,
    random_goal_post: bool,
    banners: VecDeque<Banner>,
    notice: Option<(Death, u32)>,
    pending_death: Option<Death>,
    ticks: u64,
    notice_ticks: u32,
    credits_ticks: u32,
    title_ticks: u32,
    level_banner_ticks: u32,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        let d = settings.frame_delay;
        let mut g = Self {
            mode: Mode::default(),
            player: Player::new(),
            level_one: LaneSet::new(Layout::LevelOne),
            level_two: LaneSet::new(Layout::LevelTwo),
            bonus: LaneSet::new(Layout::Bonus),
            clock: TurtleClock::new(),
            rng: SmallRng::seed_from_u64(settings.seed),
            goal_post_x: GOAL_POST_X,
            random_goal_post: settings.random_goal_post,
            banners: VecDeque::new(),
            notice: None,
            pending_death: None,
            ticks: 0,
            notice_ticks: ticks_for(NOTICE_MS, d),
            credits_ticks: ticks_for(CREDITS_MS, d),
            title_ticks: ticks_for(TITLE_MS, d),
            level_banner_ticks: ticks_for(LEVEL_BANNER_MS, d),
        };
        if settings.splash {
            g.push_banner(Page::Credits, g.credits_ticks);
            g.push_banner(Page::Title, g.title_ticks);
        }
        g
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn clock(&self) -> &TurtleClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut TurtleClock {
        &mut self.clock
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn goal_post_x(&self) -> i32 {
        self.goal_post_x
    }

    pub fn goal_slot_x(&self) -> f32 {
        (self.goal_post_x + GOAL_SLOT_OFFSET) as f32
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banners.front()
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice.map(|(d, _)| d.notice())
    }

    pub fn lanes(&self, layout: Layout) -> &LaneSet {
        match layout {
            Layout::LevelOne => &self.level_one,
            Layout::LevelTwo => &self.level_two,
            Layout::Bonus => &self.bonus,
        }
    }

    pub fn lanes_mut(&mut self, layout: Layout) -> &mut LaneSet {
        match layout {
            Layout::LevelOne => &mut self.level_one,
            Layout::LevelTwo => &mut self.level_two,
            Layout::Bonus => &mut self.bonus,
        }
    }

    pub fn active_lanes(&self) -> Option<&LaneSet> {
        self.mode.layout().map(|l| self.lanes(l))
    }

    /// Switch mode directly, seeding lanes and the player as a menu
    /// selection would.
    pub fn enter(&mut self, mode: Mode) {
        match mode {
            Mode::Playing { level } => {
                self.lanes_mut(level.layout()).reseed();
                self.player.reset();
                self.clock.reset();
                self.place_goal_post();
            }
            Mode::BonusRound => {
                self.bonus.reseed();
                self.player.reset();
                self.place_goal_post();
            }
            Mode::Menu { .. } | Mode::Tutorial { .. } => {}
        }
        if mode != self.mode {
            log::info!("mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn tick(&mut self, input: &mut impl Input) -> Vec<Event> {
        self.ticks += 1;
        let mut events = Vec::new();

        if let Some((_, left)) = self.notice.as_mut() {
            *left = left.saturating_sub(1);
            if *left == 0 {
                self.notice = None;
            }
        }

        if !self.banners.is_empty() {
            self.tick_banner(input);
            return events;
        }

        let before = self.mode;
        match self.mode {
            Mode::Menu { selection } => self.tick_menu(selection, input),
            Mode::Tutorial { page } => self.tick_tutorial(page, input),
            Mode::Playing { level } => self.tick_playing(level, input, &mut events),
            Mode::BonusRound => self.tick_bonus(input, &mut events),
        }
        if !before.in_game() && self.mode.in_game() {
            // presses left over from the menu must not move the frog
            for b in Button::ALL {
                input.take(b);
            }
        }
        if !self.mode.same_screen(before) {
            events.push(Event::ModeChanged(self.mode));
        }
        events
    }

    fn push_banner(&mut self, page: Page, ticks: u32) {
        self.banners.push_back(Banner {
            page,
            ticks_left: ticks,
        });
    }

    fn tick_banner(&mut self, input: &mut impl Input) {
        // presses made while a banner is up are not carried over
        let mut skip = false;
        for b in Button::ALL {
            if input.take(b) && b == Button::A {
                skip = true;
            }
        }
        let Some(front) = self.banners.front_mut() else {
            return;
        };
        front.ticks_left = front.ticks_left.saturating_sub(1);
        if skip || front.ticks_left == 0 {
            self.banners.pop_front();
        }
    }

    fn tick_menu(&mut self, selection: u8, input: &mut impl Input) {
        let mut selection = selection;
        if input.take(Button::B) {
            selection = move_selection(selection, 1);
        } else if input.take(Button::X) {
            selection = move_selection(selection, -1);
        }
        self.mode = Mode::Menu { selection };

        if input.take(Button::A) {
            match selection {
                0 => self.enter(Mode::Playing { level: Level::One }),
                1 => self.enter(Mode::Tutorial { page: 0 }),
                _ => self.enter(Mode::BonusRound),
            }
        }
    }

    fn tick_tutorial(&mut self, page: u8, input: &mut impl Input) {
        if !input.take(Button::A) {
            return;
        }
        let next = page + 1;
        if next >= TUTORIAL_PAGES {
            self.enter(Mode::Menu { selection: 0 });
        } else {
            self.mode = Mode::Tutorial { page: next };
        }
    }

    fn tick_playing(&mut self, level: Level, input: &mut impl Input, events: &mut Vec<Event>) {
        self.move_player(input);
        self.check_screen_bounds();

        let layout = level.layout();
        self.advance_lanes(layout);
        // the dive clock only runs on layouts that have turtles
        if self.lanes(layout).has_turtles() {
            self.clock.tick();
        }
        self.interact(layout);
        self.check_screen_bounds();

        if self.pending_death.is_none()
            && collision::drowns_in_open_water(&self.player, self.goal_slot_x())
        {
            self.kill(Death::Drown);
        }
        self.settle(events);

        if on_goal_row(self.player.y()) {
            events.push(Event::LevelComplete(level));
            match level {
                Level::One => {
                    self.push_banner(Page::Congrats, self.level_banner_ticks);
                    self.push_banner(Page::LoadingLevel(Level::Two), self.level_banner_ticks);
                    self.enter(Mode::Playing { level: Level::Two });
                }
                Level::Two => {
                    self.push_banner(Page::CourseComplete, self.level_banner_ticks);
                    self.player.reset();
                    self.level_one.reseed();
                    self.enter(Mode::Menu { selection: 0 });
                }
            }
        }
    }

    fn tick_bonus(&mut self, input: &mut impl Input, events: &mut Vec<Event>) {
        self.move_player(input);
        self.check_screen_bounds();

        // the track freezes while the frog stands on the far bank
        if !on_goal_row(self.player.y()) {
            self.advance_lanes(Layout::Bonus);
            self.interact(Layout::Bonus);
            self.check_screen_bounds();
        }

        if self.pending_death.is_none() && collision::in_bonus_dead_zone(&self.player) {
            self.kill(Death::OffTrack);
        }
        self.settle(events);

        if on_goal_row(self.player.y()) {
            events.push(Event::BonusComplete);
            self.player.reset();
            self.level_one.reseed();
            self.enter(Mode::Menu { selection: 0 });
        }
    }

    // First pressed button wins: A right, X up, B down, Y left.
    fn move_player(&mut self, input: &mut impl Input) {
        let step = if input.take(Button::A) {
            Some((1, 0))
        } else if input.take(Button::X) {
            Some((0, -1))
        } else if input.take(Button::B) {
            Some((0, 1))
        } else if input.take(Button::Y) {
            Some((-1, 0))
        } else {
            None
        };
        if let Some((dx, dy)) = step {
            // no row below the start bank
            if dy > 0 && self.player.y() >= START_Y {
                return;
            }
            self.player.step(dx, dy);
        }
    }

    fn advance_lanes(&mut self, layout: Layout) {
        let lanes = match layout {
            Layout::LevelOne => &mut self.level_one,
            Layout::LevelTwo => &mut self.level_two,
            Layout::Bonus => &mut self.bonus,
        };
        let rng = &mut self.rng;
        for lane in lanes.lanes_mut() {
            for actor in lane.actors_mut() {
                actor.advance();
                actor.wrap_if_out_of_bounds(rng);
            }
        }
    }

    fn interact(&mut self, layout: Layout) {
        let outcome = collision::resolve(&self.player, self.lanes(layout).actors(), &self.clock);
        match outcome {
            Outcome::Crash => self.kill(Death::Crash),
            Outcome::Drown => self.kill(Death::Drown),
            Outcome::Ride { carry } => {
                self.player.on_log = true;
                self.player.carry(carry);
            }
            Outcome::Clear => self.player.on_log = false,
        }
    }

    fn check_screen_bounds(&mut self) {
        if self.pending_death.is_none() && collision::off_screen(&self.player) {
            self.kill(Death::OffScreen);
        }
    }

    fn kill(&mut self, death: Death) {
        self.player.dead = true;
        self.pending_death.get_or_insert(death);
    }

    fn settle(&mut self, events: &mut Vec<Event>) {
        let Some(death) = self.pending_death.take() else {
            return;
        };
        log::debug!(
            "{:?} at ({:.1}, {}) in {:?}",
            death,
            self.player.x(),
            self.player.y(),
            self.mode
        );
        self.player.reset();
        self.notice = Some((death, self.notice_ticks));
        events.push(Event::Died(death));
    }

    fn place_goal_post(&mut self) {
        self.goal_post_x = if self.random_goal_post {
            random_goal_post_x(&mut self.rng)
        } else {
            GOAL_POST_X
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::row_y;
    use crate::hal::ButtonLatch;
    use crate::player::START_X;
    use rand::rngs::StdRng;

    fn game() -> Game {
        Game::new(&Settings {
            splash: false,
            ..Settings::default()
        })
    }

    fn idle() -> ButtonLatch {
        ButtonLatch::new()
    }

    #[test]
    fn splash_pages_run_before_menu() {
        let mut g = Game::new(&Settings::default());
        assert_eq!(g.banner().map(|b| b.page), Some(Page::Credits));
        let mut input = ButtonLatch::new();
        input.press(Button::A);
        g.tick(&mut input);
        assert_eq!(g.banner().map(|b| b.page), Some(Page::Title));
        for _ in 0..100 {
            g.tick(&mut input);
        }
        assert!(g.banner().is_none());
        assert_eq!(g.mode(), Mode::Menu { selection: 0 });
    }

    #[test]
    fn menu_pointer_moves_and_confirms() {
        let mut g = game();
        let mut input = idle();
        input.press(Button::B);
        g.tick(&mut input);
        input.press(Button::B);
        g.tick(&mut input);
        input.press(Button::B);
        g.tick(&mut input);
        assert_eq!(g.mode(), Mode::Menu { selection: 2 });
        input.press(Button::X);
        g.tick(&mut input);
        assert_eq!(g.mode(), Mode::Menu { selection: 1 });
        input.press(Button::A);
        let events = g.tick(&mut input);
        assert_eq!(g.mode(), Mode::Tutorial { page: 0 });
        assert_eq!(events, vec![Event::ModeChanged(Mode::Tutorial { page: 0 })]);
    }

    #[test]
    fn moving_the_pointer_is_not_a_mode_change() {
        let mut g = game();
        let mut input = idle();
        input.press(Button::B);
        let events = g.tick(&mut input);
        assert_eq!(g.mode(), Mode::Menu { selection: 1 });
        assert!(events.is_empty(), "{events:?}");
    }

    #[test]
    fn menu_presses_do_not_reach_the_frog() {
        let mut g = game();
        let mut input = idle();
        input.press(Button::Y);
        input.press(Button::A);
        g.tick(&mut input);
        assert_eq!(g.mode(), Mode::Playing { level: Level::One });
        g.tick(&mut input);
        assert_eq!((g.player().x(), g.player().y()), (START_X, START_Y));
    }

    #[test]
    fn tutorial_pages_then_menu() {
        let mut g = game();
        g.enter(Mode::Tutorial { page: 0 });
        let mut input = idle();
        g.tick(&mut input);
        assert_eq!(g.mode(), Mode::Tutorial { page: 0 });
        for expected in [
            Mode::Tutorial { page: 1 },
            Mode::Tutorial { page: 2 },
            Mode::Menu { selection: 0 },
        ] {
            input.press(Button::A);
            g.tick(&mut input);
            assert_eq!(g.mode(), expected);
        }
    }

    #[test]
    fn confirm_on_bonus_seeds_bonus_lanes() {
        let mut g = game();
        g.lanes_mut(Layout::Bonus).lanes_mut()[0].actors_mut()[0].set_x(70.0);
        g.enter(Mode::Menu { selection: 2 });
        let mut input = idle();
        input.press(Button::A);
        g.tick(&mut input);
        assert_eq!(g.mode(), Mode::BonusRound);
        assert_eq!(g.lanes(Layout::Bonus).lanes()[0].actors()[0].x(), 15.0);
    }

    #[test]
    fn one_move_per_tick_in_priority_order() {
        let mut g = game();
        g.enter(Mode::Playing { level: Level::One });
        let mut input = idle();
        input.press(Button::Y);
        input.press(Button::A);
        g.tick(&mut input);
        // A (right) outranks Y (left); Y stays latched for the next tick
        assert_eq!(g.player().x(), 44.0);
        assert_eq!(g.player().y(), START_Y);
        g.tick(&mut input);
        assert_eq!(g.player().x(), 40.0);
    }

    #[test]
    fn cannot_step_below_start_row() {
        let mut g = game();
        g.enter(Mode::Playing { level: Level::One });
        let mut input = idle();
        input.press(Button::B);
        g.tick(&mut input);
        assert_eq!(g.player().y(), START_Y);
    }

    #[test]
    fn walking_off_the_side_resets_with_notice() {
        let mut g = game();
        g.enter(Mode::Playing { level: Level::One });
        g.player_mut().place(82.0, row_y(1));
        let mut input = idle();
        input.press(Button::A);
        let events = g.tick(&mut input);
        assert!(events.contains(&Event::Died(Death::OffScreen)));
        assert_eq!(g.player().x(), crate::player::START_X);
        assert_eq!(g.notice(), Some("LOSER!!!!"));
    }

    #[test]
    fn open_water_drowns() {
        let mut g = game();
        g.enter(Mode::Playing { level: Level::One });
        // row 8 lane pushed away from the frog
        for a in g.lanes_mut(Layout::LevelOne).lanes_mut()[5].actors_mut() {
            a.set_x(-100.0);
        }
        g.player_mut().place(4.0, row_y(8));
        let events = g.tick(&mut idle());
        assert!(events.contains(&Event::Died(Death::Drown)));
        assert_eq!(g.player().y(), START_Y);
        assert!(!g.player().dead);
    }

    #[test]
    fn goal_slot_is_dry() {
        let mut g = game();
        g.enter(Mode::Playing { level: Level::One });
        for a in g.lanes_mut(Layout::LevelOne).lanes_mut()[6].actors_mut() {
            a.set_x(-100.0);
        }
        let slot = g.goal_slot_x();
        g.player_mut().place(slot, row_y(9));
        let events = g.tick(&mut idle());
        assert!(events.is_empty());
        assert_eq!(g.player().y(), row_y(9));
    }

    #[test]
    fn dive_clock_waits_for_turtles() {
        let mut g = game();
        g.enter(Mode::Playing { level: Level::One });
        let start = g.clock().count();
        for _ in 0..5 {
            g.tick(&mut idle());
        }
        assert_eq!(g.clock().count(), start);

        g.enter(Mode::Playing { level: Level::Two });
        let start = g.clock().count();
        for _ in 0..5 {
            g.tick(&mut idle());
        }
        assert_eq!(g.clock().count(), start + 5);
    }

    #[test]
    fn level_two_completion_returns_to_menu() {
        let mut g = game();
        g.enter(Mode::Playing { level: Level::Two });
        g.player_mut().place(40.0, row_y(11));
        let events = g.tick(&mut idle());
        assert!(events.contains(&Event::LevelComplete(Level::Two)));
        assert_eq!(g.mode(), Mode::Menu { selection: 0 });
        assert_eq!(g.banner().map(|b| b.page), Some(Page::CourseComplete));
    }

    #[test]
    fn level_banner_pauses_simulation() {
        let mut g = game();
        g.enter(Mode::Playing { level: Level::One });
        g.player_mut().place(40.0, row_y(10));
        g.tick(&mut idle());
        assert_eq!(g.banner().map(|b| b.page), Some(Page::Congrats));
        let x0 = g.lanes(Layout::LevelTwo).lanes()[0].actors()[0].x();
        g.tick(&mut idle());
        assert_eq!(g.lanes(Layout::LevelTwo).lanes()[0].actors()[0].x(), x0);
    }

    #[test]
    fn fixed_goal_post_unless_randomised() {
        let mut g = game();
        g.enter(Mode::Playing { level: Level::One });
        assert_eq!(g.goal_post_x(), GOAL_POST_X);
        assert_eq!(g.goal_slot_x(), 42.0);

        let mut r = Game::new(&Settings {
            splash: false,
            random_goal_post: true,
            ..Settings::default()
        });
        for _ in 0..20 {
            r.enter(Mode::Playing { level: Level::One });
            assert!((12..92).contains(&r.goal_post_x()));
        }
    }

    #[test]
    fn goal_post_roll_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let x = random_goal_post_x(&mut rng);
            assert!((12..=91).contains(&x));
        }
    }
}
