//! Ship kinds, orientations and placed ship records.

use alloc::vec::Vec;
use core::fmt;

use crate::common::Coord;
use crate::config::BOARD_SIZE;

/// Identifier of a ship, unique per board and assigned in placement order.
pub type ShipId = u32;

/// Kind of ship, which fixes its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Cruiser,
    Submarine,
}

impl ShipKind {
    pub const ALL: [ShipKind; 2] = [ShipKind::Cruiser, ShipKind::Submarine];

    /// Number of cells the ship occupies.
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Cruiser => 2,
            ShipKind::Submarine => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Cruiser => "cruiser",
            ShipKind::Submarine => "submarine",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction a ship extends from its origin cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Right,
    Down,
    DiagonalDownRight,
    DiagonalUpRight,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Right,
        Orientation::Down,
        Orientation::DiagonalDownRight,
        Orientation::DiagonalUpRight,
    ];

    /// Step vector as (row delta, column delta).
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Orientation::Right => (0, 1),
            Orientation::Down => (1, 0),
            Orientation::DiagonalDownRight => (1, 1),
            Orientation::DiagonalUpRight => (-1, 1),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Orientation::Right => "right",
            Orientation::Down => "down",
            Orientation::DiagonalDownRight => "diag-down",
            Orientation::DiagonalUpRight => "diag-up",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Walk `length` cells from `origin` along `orientation`.
///
/// Returns `None` as soon as a step leaves the board; placement never wraps.
pub fn footprint(origin: Coord, orientation: Orientation, length: usize) -> Option<Vec<Coord>> {
    let (dr, dc) = orientation.delta();
    let size = BOARD_SIZE as isize;
    let mut cells = Vec::with_capacity(length);
    for i in 0..length as isize {
        let r = origin.row as isize + dr * i;
        let c = origin.col as isize + dc * i;
        if r < 0 || r >= size || c < 0 || c >= size {
            return None;
        }
        cells.push(Coord::new(r as usize, c as usize));
    }
    Some(cells)
}

/// A ship placed on a board. Its shape is fixed; only hits and the sunk flag change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    kind: ShipKind,
    cells: Vec<Coord>,
    hits: usize,
    sunk: bool,
}

impl Ship {
    pub(crate) fn new(id: ShipId, kind: ShipKind, cells: Vec<Coord>) -> Self {
        Self {
            id,
            kind,
            cells,
            hits: 0,
            sunk: false,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// Occupied cells in placement order, origin first.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Register one hit. Returns `true` when this hit sinks the ship.
    pub(crate) fn register_hit(&mut self) -> bool {
        debug_assert!(self.hits < self.cells.len(), "ship {} hit past its length", self.id);
        self.hits += 1;
        if self.hits >= self.cells.len() {
            self.sunk = true;
        }
        self.sunk
    }
}
