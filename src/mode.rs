use crate::lanes::Layout;

pub const MENU_ITEMS: [&str; 3] = ["Play", "Tutorial", "Bonus"];
pub const TUTORIAL_PAGES: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    One,
    Two,
}

impl Level {
    pub fn number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            Level::One => Layout::LevelOne,
            Level::Two => Layout::LevelTwo,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Menu { selection: u8 },
    Tutorial { page: u8 },
    Playing { level: Level },
    BonusRound,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Menu { selection: 0 }
    }
}

impl Mode {
    pub fn layout(self) -> Option<Layout> {
        match self {
            Mode::Playing { level } => Some(level.layout()),
            Mode::BonusRound => Some(Layout::Bonus),
            Mode::Menu { .. } | Mode::Tutorial { .. } => None,
        }
    }

    pub fn in_game(self) -> bool {
        self.layout().is_some()
    }

    // menu pointer and tutorial page are not screens of their own
    pub fn same_screen(self, other: Mode) -> bool {
        match (self, other) {
            (Mode::Menu { .. }, Mode::Menu { .. }) => true,
            (Mode::Tutorial { .. }, Mode::Tutorial { .. }) => true,
            _ => self == other,
        }
    }
}

// Menu pointer after a down (`+1`) or up (`-1`) press. Stops at the ends.
pub fn move_selection(selection: u8, delta: i8) -> u8 {
    let last = (MENU_ITEMS.len() - 1) as i8;
    (selection as i8 + delta).clamp(0, last) as u8
}
