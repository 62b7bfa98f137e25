//! Frame building for a display surface
//!
//! The core never draws. Once per state change it exposes a frame of cell
//! draw requests (terrain, then entities, blockers on top) plus plain-text
//! requests for the trailing log lines and the player HP readout. Any
//! surface that can put a colored glyph at a coordinate can render it.

use serde::{Deserialize, Serialize};

use crate::session::GameSession;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Stock palette
pub mod color {
    use super::Color;

    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const GREY: Color = Color::new(128, 128, 128);
    pub const DARK_RED: Color = Color::new(96, 16, 0);
    /// Sunlit wall
    pub const WALL: Color = Color::new(130, 110, 50);
    /// Sunlit floor
    pub const FLOOR: Color = Color::new(200, 180, 50);
}

/// One colored glyph at a map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDraw {
    pub x: i32,
    pub y: i32,
    pub symbol: char,
    pub fg: Color,
    pub bg: Color,
}

/// One plain-text run at a screen offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDraw {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// Everything a surface needs to draw one state of the session
#[derive(Debug, Default)]
pub struct Frame {
    pub cells: Vec<CellDraw>,
    pub texts: Vec<TextDraw>,
}

/// Build the draw requests for the session's current state.
pub fn build_frame(session: &GameSession) -> Frame {
    let grid = session.grid();
    let mut frame = Frame::default();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let bg = if grid.is_blocked(x, y) {
                color::WALL
            } else {
                color::FLOOR
            };
            frame.cells.push(CellDraw {
                x,
                y,
                symbol: ' ',
                fg: color::WHITE,
                bg,
            });
        }
    }

    // Non-blockers first so actors always sit on top of loot and corpses
    for blocking_pass in [false, true] {
        for (_, position, renderable) in session.store().renderables() {
            if renderable.blocks != blocking_pass {
                continue;
            }
            frame.cells.push(CellDraw {
                x: position.x,
                y: position.y,
                symbol: renderable.symbol,
                fg: renderable.fg,
                bg: renderable.bg,
            });
        }
    }

    for (i, line) in session.log_tail().iter().enumerate() {
        frame.texts.push(TextDraw {
            x: 0,
            y: grid.height() + i as i32,
            text: line.clone(),
        });
    }

    if let Some((hp, max_hp)) = session.player_hp() {
        frame.texts.push(TextDraw {
            x: 0,
            y: grid.height() + session.visible_log_lines() as i32,
            text: format!("HP: {hp}/{max_hp}"),
        });
    }

    frame
}
