#![cfg(feature = "std")]

//! Parsing of the interactive command language.

use std::string::{String, ToString};

use crate::{
    common::Coord,
    config::BOARD_SIZE,
    ship::{Orientation, ShipKind},
};

/// A command typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place {
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    },
    AutoPlace,
    Start,
    Target(Coord),
    Fire,
    Undo,
    Reset,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  place <cruiser|submarine> <coord> <right|down|diag-down|diag-up>
  auto                 place the rest of your fleet randomly
  start                start combat
  target <coord>       select or deselect a target cell
  fire                 fire at every selected target
  undo                 take back the last placement or round
  reset                start over
  show                 redraw the boards
  help                 this text
  quit                 leave
Coordinates are a column letter and a row number, e.g. A5.";

/// Parse `A5`-style coordinates into a zero-based [`Coord`].
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    if col >= BOARD_SIZE as usize {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE as usize {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coord::new(row - 1, col))
}

pub fn parse_kind(input: &str) -> Result<ShipKind, String> {
    match input.to_ascii_lowercase().as_str() {
        "cruiser" | "c" => Ok(ShipKind::Cruiser),
        "submarine" | "sub" | "s" => Ok(ShipKind::Submarine),
        other => Err(format!("Unknown ship '{}' - use cruiser or submarine", other)),
    }
}

pub fn parse_orientation(input: &str) -> Result<Orientation, String> {
    match input.to_ascii_lowercase().as_str() {
        "right" | "r" | "h" => Ok(Orientation::Right),
        "down" | "d" | "v" => Ok(Orientation::Down),
        "diag-down" | "dd" => Ok(Orientation::DiagonalDownRight),
        "diag-up" | "du" => Ok(Orientation::DiagonalUpRight),
        other => Err(format!(
            "Unknown orientation '{}' - use right, down, diag-down or diag-up",
            other
        )),
    }
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Err("Empty input".to_string());
    };
    let command = match (verb.to_ascii_lowercase().as_str(), args) {
        ("place" | "p", [kind, origin, orientation]) => Command::Place {
            kind: parse_kind(kind)?,
            origin: parse_coord(origin)?,
            orientation: parse_orientation(orientation)?,
        },
        ("place" | "p", _) => {
            return Err("Usage: place <kind> <coord> <orientation>".to_string())
        }
        ("auto", []) => Command::AutoPlace,
        ("start", []) => Command::Start,
        ("target" | "t", [coord]) => Command::Target(parse_coord(coord)?),
        ("fire" | "f", []) => Command::Fire,
        ("undo" | "u", []) => Command::Undo,
        ("reset", []) => Command::Reset,
        ("show", []) => Command::Show,
        ("help" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        (other, _) => return Err(format!("Unknown command '{}' - type help", other)),
    };
    Ok(command)
}
