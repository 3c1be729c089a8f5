use crate::engine::{Game, Page};
use crate::geometry::{row_y, BOARD_W, GRID};
use crate::hal::{Display, Fill};
use crate::mode::{Level, Mode, MENU_ITEMS};
use crate::sprites;

const TUTORIAL: [[&str; 6]; 3] = [
    [
        "Tutorial: (A) ",
        "Move the frog ",
        "X up   B down ",
        "A right       ",
        "Y left        ",
        "              ",
    ],
    [
        "Tutorial: (A) ",
        "Avoid cars and",
        "the water.    ",
        "Ride logs and ",
        "turtles. Reach",
        "the far bank! ",
    ],
    [
        "Tutorial: (A) ",
        "Turtles dive  ",
        "now and then. ",
        "Have fun :)   ",
        "Press A       ",
        "to play!      ",
    ],
];

const CREDITS: [&str; 6] = [
    "|------------|",
    "|   River    |",
    "|   Hopper   |",
    "|            |",
    "| 84x48 mono |",
    "|------------|",
];

const CONGRATS: [&str; 6] = [
    "|------------|",
    "|Congrats!   |",
    "|            |",
    "|            |",
    "|            |",
    "|------------|",
];

const COURSE_COMPLETE: [&str; 6] = [
    "|------------|",
    "|  Course    |",
    "|  complete! |",
    "|            |",
    "| Back to    |",
    "| the menu   |",
];

// Text row, outline box and pointer spot of each menu item, top to bottom.
const MENU: [(i32, (i32, i32, i32, i32), (i32, i32)); 3] = [
    (0, (-1, 0, 30, 11), (30, 0)),
    (2, (-1, 14, 55, 10), (55, 16)),
    (4, (-1, 30, 50, 10), (50, 32)),
];

// Left and right walls of the bonus track.
const BONUS_WALLS: [(i32, i32, i32, i32); 2] = [(0, 0, 35, 48), (55, 0, 35, 48)];

pub fn draw(d: &mut impl Display, game: &Game) {
    d.clear();
    if let Some(banner) = game.banner() {
        draw_page(d, banner.page);
        return;
    }
    match game.mode() {
        Mode::Menu { selection } => draw_menu(d, selection),
        Mode::Tutorial { page } => draw_lines(d, &TUTORIAL[page as usize]),
        Mode::Playing { .. } => draw_board(d, game),
        Mode::BonusRound => {
            draw_board(d, game);
            for (x, y, w, h) in BONUS_WALLS {
                d.draw_rect(x, y, w, h, Fill::Black);
            }
        }
    }
    if let Some(text) = game.notice() {
        d.draw_text(text, 1, 1);
    }
}

fn draw_lines(d: &mut impl Display, lines: &[&str]) {
    for (row, line) in lines.iter().enumerate() {
        d.draw_text(line, 0, row as i32);
    }
}

fn draw_page(d: &mut impl Display, page: Page) {
    match page {
        Page::Credits => draw_lines(d, &CREDITS),
        Page::Title => {
            d.draw_sprite(36, 8, &sprites::BIG_FROG);
            d.draw_text("|  FROGGER!  |", 0, 5);
        }
        Page::Congrats => draw_lines(d, &CONGRATS),
        Page::LoadingLevel(level) => {
            let label = format!("|  Level {}   |", level.number());
            draw_lines(
                d,
                &[
                    "|------------|",
                    "|  Loading   |",
                    "|            |",
                    label.as_str(),
                    "|            |",
                    "|------------|",
                ],
            );
        }
        Page::CourseComplete => draw_lines(d, &COURSE_COMPLETE),
    }
}

fn draw_menu(d: &mut impl Display, selection: u8) {
    for (label, (row, (x, y, w, h), _)) in MENU_ITEMS.iter().zip(MENU) {
        d.draw_text(label, 3, row);
        d.draw_rect(x, y, w, h, Fill::Transparent);
    }
    let (_, _, (px, py)) = MENU[selection as usize];
    d.draw_sprite(px, py, &sprites::BIG_FROG);
}

fn draw_board(d: &mut impl Display, game: &Game) {
    // hatched far bank, grass at the start and the middle
    for x in (0..BOARD_W).step_by(GRID as usize) {
        d.draw_sprite(x, row_y(11), &sprites::HATCH);
        d.draw_sprite(x, row_y(1), &sprites::GRASS);
        d.draw_sprite(x, row_y(6), &sprites::GRASS);
    }
    d.draw_sprite(game.goal_post_x(), row_y(11), &sprites::GOAL_POST);

    if let Some(lanes) = game.active_lanes() {
        let phase = game.clock().phase();
        for actor in lanes.actors() {
            let sprite = sprites::actor(actor.sprite, phase);
            d.draw_sprite(actor.x().round() as i32, actor.y(), sprite);
        }
    }

    let p = game.player();
    d.draw_sprite(p.x().round() as i32, p.y(), sprites::frog(p.facing));

    if let Mode::Playing { level: Level::Two } = game.mode() {
        d.draw_text("2", 13, 5);
    }
}
