use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::engine::{Event, Game};
use crate::hal::{Display, Input};
use crate::scene;

pub struct FrameDriver<D, I> {
    game: Game,
    display: D,
    input: I,
    frame_delay: Duration,
}

impl<D: Display, I: Input> FrameDriver<D, I> {
    pub fn new(settings: &Settings, display: D, input: I) -> Self {
        Self {
            game: Game::new(settings),
            display,
            input,
            frame_delay: settings.frame_delay,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn frame(&mut self) -> io::Result<Vec<Event>> {
        let events = self.game.tick(&mut self.input);
        for e in &events {
            match e {
                Event::Died(death) => log::info!("frog lost: {death:?}"),
                Event::LevelComplete(level) => log::info!("level {} cleared", level.number()),
                Event::BonusComplete => log::info!("bonus round cleared"),
                Event::ModeChanged(mode) => log::debug!("now in {mode:?}"),
            }
        }
        scene::draw(&mut self.display, &self.game);
        self.display.present()?;
        Ok(events)
    }

    // Loop until `quit` is raised. Each frame is padded out to the
    // configured delay; a slow frame is not made up for.
    pub fn run(&mut self, quit: &AtomicBool) -> io::Result<()> {
        log::info!("frame loop started, {:?} per frame", self.frame_delay);
        while !quit.load(Ordering::Acquire) {
            let start = Instant::now();
            self.frame()?;
            if let Some(rest) = self.frame_delay.checked_sub(start.elapsed()) {
                thread::sleep(rest);
            }
        }
        log::info!("frame loop stopped after {} ticks", self.game.ticks());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{Button, ButtonLatch, Fill, Sprite};
    use crate::mode::Mode;
    use std::sync::Arc;

    #[derive(Default)]
    struct Counting {
        clears: usize,
        presents: usize,
    }

    impl Display for Counting {
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn present(&mut self) -> io::Result<()> {
            self.presents += 1;
            Ok(())
        }
        fn draw_rect(&mut self, _: i32, _: i32, _: i32, _: i32, _: Fill) {}
        fn draw_sprite(&mut self, _: i32, _: i32, _: &Sprite) {}
        fn draw_text(&mut self, _: &str, _: i32, _: i32) {}
    }

    fn quick() -> Settings {
        Settings {
            frame_delay: Duration::from_millis(1),
            splash: false,
            ..Settings::default()
        }
    }

    #[test]
    fn each_frame_draws_and_presents_once() {
        let mut d = FrameDriver::new(&quick(), Counting::default(), ButtonLatch::new());
        for _ in 0..3 {
            d.frame().unwrap();
        }
        assert_eq!(d.display().clears, 3);
        assert_eq!(d.display().presents, 3);
        assert_eq!(d.game().ticks(), 3);
    }

    #[test]
    fn presses_reach_the_game() {
        let latch = Arc::new(ButtonLatch::new());
        let mut d = FrameDriver::new(&quick(), Counting::default(), Arc::clone(&latch));
        latch.press(Button::A);
        let events = d.frame().unwrap();
        assert_eq!(d.game().mode(), Mode::Playing { level: crate::mode::Level::One });
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn run_stops_when_quit_is_raised() {
        let mut d = FrameDriver::new(&quick(), Counting::default(), ButtonLatch::new());
        let quit = AtomicBool::new(true);
        d.run(&quit).unwrap();
        assert_eq!(d.display().presents, 0);
    }

    #[test]
    fn run_from_another_thread_until_quit() {
        let quit = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&quit);
        let handle = thread::spawn(move || {
            let mut d = FrameDriver::new(&quick(), Counting::default(), ButtonLatch::new());
            d.run(&flag).map(|_| d.game().ticks())
        });
        thread::sleep(Duration::from_millis(30));
        quit.store(true, Ordering::Release);
        let ticks = handle.join().unwrap().unwrap();
        assert!(ticks > 0);
    }
}
