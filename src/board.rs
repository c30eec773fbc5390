//! Game board state: a 10×10 grid of cells, the ships placed on it and hit bookkeeping.
//!
//! A [`Board`] is a plain value. Cloning it yields an independent copy, which is
//! what snapshots rely on.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{BoardError, Coord, Outcome, Side};
use crate::config::{BOARD_SIZE, PLACEMENT_ATTEMPTS};
use crate::ship::{footprint, Orientation, Ship, ShipId, ShipKind};

const GRID: usize = BOARD_SIZE as usize;

/// Ship occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    pub kind: ShipKind,
    pub ship: ShipId,
}

/// One grid position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    occupant: Option<Occupant>,
    shot: bool,
}

impl Cell {
    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn is_shot(&self) -> bool {
        self.shot
    }
}

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    label: Side,
    grid: [[Cell; GRID]; GRID],
    ships: Vec<Ship>,
    next_id: ShipId,
    remaining: usize,
}

impl Board {
    /// Create an empty board (no ships placed, nothing shot).
    pub fn new(label: Side) -> Self {
        Board {
            label,
            grid: [[Cell::default(); GRID]; GRID],
            ships: Vec::new(),
            next_id: 1,
            remaining: 0,
        }
    }

    pub fn label(&self) -> Side {
        self.label
    }

    /// Cell at `coord`, or `None` outside the grid.
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.grid.get(coord.row).and_then(|row| row.get(coord.col))
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    /// Occupied cells that have not been shot yet.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_shot(&self, coord: Coord) -> bool {
        self.cell(coord).map_or(false, Cell::is_shot)
    }

    /// Returns `true` once at least one ship was placed and every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.remaining == 0
    }

    /// Cells not shot yet, row-major.
    pub fn unshot_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |c| !self.grid[c.row][c.col].shot)
    }

    /// Whether a ship of `kind` fits at `origin` without leaving the board or overlapping.
    pub fn can_place(&self, kind: ShipKind, origin: Coord, orientation: Orientation) -> bool {
        self.free_footprint(kind, origin, orientation).is_some()
    }

    fn free_footprint(
        &self,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    ) -> Option<Vec<Coord>> {
        let cells = footprint(origin, orientation, kind.length())?;
        if cells.iter().any(|c| self.grid[c.row][c.col].is_occupied()) {
            return None;
        }
        Some(cells)
    }

    /// Place a ship of `kind` at `origin`, returning its freshly assigned id.
    pub fn place(
        &mut self,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let cells = self
            .free_footprint(kind, origin, orientation)
            .ok_or(BoardError::CannotPlace)?;
        let id = self.next_id;
        self.next_id += 1;
        for c in &cells {
            self.grid[c.row][c.col].occupant = Some(Occupant { kind, ship: id });
        }
        self.remaining += cells.len();
        self.ships.push(Ship::new(id, kind, cells));
        Ok(id)
    }

    /// Uniform-random origin and orientation for `kind`, by rejection sampling.
    ///
    /// Gives up after [`PLACEMENT_ATTEMPTS`] tries.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Option<(Coord, Orientation)> {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let origin = Coord::new(rng.random_range(0..GRID), rng.random_range(0..GRID));
            let orientation = Orientation::ALL[rng.random_range(0..Orientation::ALL.len())];
            if self.can_place(kind, origin, orientation) {
                return Some((origin, orientation));
            }
        }
        None
    }

    /// Resolve a shot at `coord`.
    ///
    /// A cell that was already shot yields [`Outcome::Repeated`] and changes nothing.
    pub fn receive_shot(&mut self, coord: Coord) -> Result<Outcome, BoardError> {
        if !coord.in_bounds() {
            return Err(BoardError::OutOfBounds {
                row: coord.row,
                col: coord.col,
            });
        }
        let cell = self.grid[coord.row][coord.col];
        if cell.shot {
            return Ok(Outcome::Repeated);
        }
        let Some(occupant) = cell.occupant else {
            self.grid[coord.row][coord.col].shot = true;
            return Ok(Outcome::Miss);
        };
        let ship = self
            .ships
            .iter_mut()
            .find(|s| s.id() == occupant.ship)
            .ok_or(BoardError::UnknownShip(occupant.ship))?;
        self.grid[coord.row][coord.col].shot = true;
        self.remaining -= 1;
        if ship.register_hit() {
            Ok(Outcome::Sunk(ship.kind()))
        } else {
            Ok(Outcome::Hit(ship.kind()))
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  label: {:?},\n  remaining: {},\n  next_id: {},\n  ships: {:?}\n}}",
            self.label, self.remaining, self.next_id, self.ships
        )
    }
}
