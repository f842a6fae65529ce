//! Position text format
//!
//! ```text
//! 000000000/000000000/.../000000000 r 5
//! ```
//!
//! 81 cells (`0` empty, `1` red, `2` green) in cell order, nine chunks of
//! nine joined by `/`, then the side to move (`r` or `g`) and the round.

use std::fmt::Write;

use thiserror::Error;

use super::{Board, Color, BOARD_SIZE, TOTAL_CELLS};

/// Errors raised while reading a position string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// A character other than `0`, `1`, `2` or `/` inside the board section
    #[error("invalid board character {ch:?} at cell {cell}")]
    InvalidCell { ch: char, cell: usize },

    /// Input ended before all cells were read
    #[error("expected 81 cells, found {0}")]
    TooShort(usize),

    /// Round number does not fit
    #[error("round number overflows")]
    RoundOverflow,
}

/// Parsed contents of a position string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub turn: Color,
    pub round: u32,
}

/// Parse a position string.
///
/// After the 81 board cells only the turn character and digits are read;
/// anything else is ignored. A missing turn means Red, a missing round
/// means round 1.
pub fn parse(text: &str) -> Result<Position, PositionError> {
    let mut board = Board::empty();
    let mut chars = text.chars();
    let mut cell = 0usize;

    while cell < TOTAL_CELLS {
        let Some(ch) = chars.next() else {
            return Err(PositionError::TooShort(cell));
        };
        match ch {
            '0' => {}
            '1' => board.place(cell as u8, Color::Red),
            '2' => board.place(cell as u8, Color::Green),
            '/' => continue,
            _ => return Err(PositionError::InvalidCell { ch, cell }),
        }
        cell += 1;
    }

    let mut turn = Color::Red;
    let mut round: Option<u32> = None;
    for ch in chars {
        if ch == Color::Red.code() {
            turn = Color::Red;
        } else if ch == Color::Green.code() {
            turn = Color::Green;
        } else if let Some(digit) = ch.to_digit(10) {
            let value = round
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|r| r.checked_add(digit))
                .ok_or(PositionError::RoundOverflow)?;
            round = Some(value);
        }
    }

    Ok(Position {
        board,
        turn,
        round: round.unwrap_or(1),
    })
}

/// Render a position string
pub fn format(board: &Board, turn: Color, round: u32) -> String {
    let mut out = String::with_capacity(TOTAL_CELLS + BOARD_SIZE + 12);
    for cell in 0..TOTAL_CELLS as u8 {
        out.push(match board.get(cell) {
            Some(Color::Red) => '1',
            Some(Color::Green) => '2',
            None => '0',
        });
        if cell as usize % BOARD_SIZE == BOARD_SIZE - 1 && (cell as usize) < TOTAL_CELLS - 1 {
            out.push('/');
        }
    }
    // Writing to a String cannot fail
    let _ = write!(out, " {} {}", turn.code(), round);
    out
}
