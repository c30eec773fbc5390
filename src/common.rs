//! Common types for salvo: coordinates, shot outcomes and errors.

use core::fmt;

use crate::config::BOARD_SIZE;
use crate::game::Phase;
use crate::ship::{ShipId, ShipKind};

/// A grid position. Ordering is row-major, which is the order salvos are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE as usize && self.col < BOARD_SIZE as usize
    }

    /// Every coordinate of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        let n = BOARD_SIZE as usize;
        (0..n).flat_map(move |r| (0..n).map(move |c| Coord::new(r, c)))
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

/// Column letter followed by the 1-based row, e.g. `A1`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'A' + self.col as u8) as char;
        write!(f, "{}{}", col, self.row + 1)
    }
}

/// Which side of the table a board belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Opponent => f.write_str("opponent"),
        }
    }
}

/// Result of resolving a shot against a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Shot landed on water.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit(ShipKind),
    /// Shot hit the last intact cell of a ship.
    Sunk(ShipKind),
    /// The cell had already been shot; nothing changed.
    Repeated,
}

impl Outcome {
    /// `true` for hits and sinks.
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit(_) | Outcome::Sunk(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Miss => f.write_str("miss"),
            Outcome::Hit(kind) => write!(f, "hit {}", kind),
            Outcome::Sunk(kind) => write!(f, "sunk {}", kind),
            Outcome::Repeated => f.write_str("repeated"),
        }
    }
}

/// One entry of a shot log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotRecord {
    pub coord: Coord,
    pub outcome: Outcome,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Ship would leave the board or overlap another ship.
    CannotPlace,
    /// A cell refers to a ship the board does not know about.
    UnknownShip(ShipId),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "coordinate ({}, {}) is out of bounds", row, col)
            }
            BoardError::CannotPlace => write!(f, "ship is out of bounds or overlaps another ship"),
            BoardError::UnknownShip(id) => write!(f, "cell refers to unknown ship {}", id),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors returned by GameEngine commands. None of them mutate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Command is not valid in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// Combat cannot start with an empty player board.
    NoShipsPlaced,
    /// Coordinate lies outside the grid.
    OutOfBounds(Coord),
    /// Target cell was already shot.
    AlreadyShot(Coord),
    /// No shot slot is available.
    PoolExhausted,
    /// A salvo asked for more shots than the pool has available.
    SalvoTooLarge { requested: usize, available: usize },
    /// Board-level failure.
    Board(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase { expected, actual } => {
                write!(f, "command needs the {} phase, game is in {}", expected, actual)
            }
            GameError::NoShipsPlaced => write!(f, "place at least one ship before starting"),
            GameError::OutOfBounds(c) => {
                write!(f, "coordinate ({}, {}) is out of bounds", c.row, c.col)
            }
            GameError::AlreadyShot(c) => write!(f, "{} was already shot", c),
            GameError::PoolExhausted => write!(f, "no shots available"),
            GameError::SalvoTooLarge {
                requested,
                available,
            } => write!(
                f,
                "salvo of {} shots exceeds the {} available",
                requested, available
            ),
            GameError::Board(e) => write!(f, "board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Board(e) => Some(e),
            _ => None,
        }
    }
}
