use std::path::PathBuf;
use std::time::Duration;

// Delay between frames on the handheld.
pub const FRAME_DELAY_MS: u64 = 85;
pub const DEFAULT_SEED: u64 = 0xC0FFEE_u64;

#[derive(Clone, Debug)]
pub struct Settings {
    pub frame_delay: Duration,
    pub seed: u64,
    /// Roll the goal post position on every level entry instead of using
    /// the fixed slot.
    pub random_goal_post: bool,
    pub splash: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(FRAME_DELAY_MS),
            seed: DEFAULT_SEED,
            random_goal_post: false,
            splash: true,
            log_file: None,
        }
    }
}

// Whole frames covering `ms` at the given frame delay, at least one.
pub fn ticks_for(ms: u64, frame_delay: Duration) -> u32 {
    let per = frame_delay.as_millis().max(1) as u64;
    ((ms + per - 1) / per).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_board() {
        let s = Settings::default();
        assert_eq!(s.frame_delay, Duration::from_millis(85));
        assert!(!s.random_goal_post);
    }

    #[test]
    fn ticks_round_up() {
        let d = Duration::from_millis(85);
        assert_eq!(ticks_for(1000, d), 12);
        assert_eq!(ticks_for(85, d), 1);
        assert_eq!(ticks_for(0, d), 1);
    }
}
