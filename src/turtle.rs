//! Periodic turtle dive cycle.
//!
//! One table drives both the sprite frame and the drown rule, so the two
//! cannot disagree about when the turtles are under water.

pub const CYCLE: u32 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurtlePhase {
    Surfaced,
    Dipping,
    Under,
    Rising,
}

#[derive(Clone, Copy, Debug)]
pub struct PhaseEntry {
    pub from: u32,
    pub phase: TurtlePhase,
    pub submerged: bool,
}

// Sorted by `from`; each entry runs until the next one starts.
pub const PHASES: [PhaseEntry; 4] = [
    PhaseEntry {
        from: 0,
        phase: TurtlePhase::Surfaced,
        submerged: false,
    },
    PhaseEntry {
        from: 2000,
        phase: TurtlePhase::Dipping,
        submerged: false,
    },
    PhaseEntry {
        from: 3000,
        phase: TurtlePhase::Under,
        submerged: true,
    },
    PhaseEntry {
        from: 4000,
        phase: TurtlePhase::Rising,
        submerged: true,
    },
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurtleClock {
    count: u32,
}

impl TurtleClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(count: u32) -> Self {
        Self {
            count: count % CYCLE,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn tick(&mut self) {
        self.count = (self.count + 1) % CYCLE;
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn entry(&self) -> &'static PhaseEntry {
        PHASES
            .iter()
            .rev()
            .find(|e| e.from <= self.count)
            .unwrap_or(&PHASES[0])
    }

    pub fn phase(&self) -> TurtlePhase {
        self.entry().phase
    }

    pub fn submerged(&self) -> bool {
        self.entry().submerged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_starts_at_zero() {
        assert_eq!(PHASES[0].from, 0);
        assert!(PHASES.windows(2).all(|w| w[0].from < w[1].from));
        assert!(PHASES.iter().all(|e| e.from < CYCLE));
    }

    #[test]
    fn boundaries_are_exact() {
        let at = |n| TurtleClock::starting_at(n);
        assert_eq!(at(0).phase(), TurtlePhase::Surfaced);
        assert_eq!(at(1999).phase(), TurtlePhase::Surfaced);
        assert_eq!(at(2000).phase(), TurtlePhase::Dipping);
        assert!(!at(2999).submerged());
        assert!(at(3000).submerged());
        assert_eq!(at(3999).phase(), TurtlePhase::Under);
        assert_eq!(at(4000).phase(), TurtlePhase::Rising);
        assert!(at(4999).submerged());
    }

    #[test]
    fn wraps_after_last_tick() {
        let mut c = TurtleClock::starting_at(CYCLE - 1);
        c.tick();
        assert_eq!(c.count(), 0);
        assert_eq!(c.phase(), TurtlePhase::Surfaced);
    }
}
