#![cfg(feature = "std")]

//! Plain-text rendering of boards, the shot pool and shot logs.

use std::fmt::Write;
use std::string::String;

use crate::{
    board::Board,
    common::{Coord, ShotRecord},
    config::BOARD_SIZE,
    pool::PoolInfo,
};

/// Render a board grid.
///
/// With `reveal` set, intact ship cells show as `S`; otherwise the board is
/// drawn as seen by the shooter and `selected` cells show as `+`.
pub fn render_board(board: &Board, reveal: bool, selected: &[Coord]) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..BOARD_SIZE as usize {
        let ch = (b'A' + c as u8) as char;
        let _ = write!(out, " {}", ch);
    }
    out.push('\n');
    for r in 0..BOARD_SIZE as usize {
        let _ = write!(out, " {:2} ", r + 1);
        for c in 0..BOARD_SIZE as usize {
            let coord = Coord::new(r, c);
            let ch = match board.cell(coord) {
                Some(cell) if cell.is_shot() && cell.is_occupied() => 'X',
                Some(cell) if cell.is_shot() => 'o',
                Some(cell) if reveal && cell.is_occupied() => 'S',
                _ if selected.contains(&coord) => '+',
                _ => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    if reveal {
        out.push_str("    Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
        for ship in board.ships() {
            let status = if ship.is_sunk() { "SUNK" } else { "Active" };
            let _ = writeln!(
                out,
                "      #{} {} ({}/{} hit): {}",
                ship.id(),
                ship.kind(),
                ship.hits(),
                ship.cells().len(),
                status
            );
        }
    } else {
        out.push_str("    Legend: X=Hit  o=Miss  +=Selected  .=Unknown\n");
    }
    out
}

/// One-line summary of the shot pool.
pub fn render_pool(info: &PoolInfo) -> String {
    format!(
        "Shots: {} available / {} ceiling ({} in flight)",
        info.available, info.ceiling, info.in_use
    )
}

/// One line per shot, e.g. `B3 - hit cruiser`.
pub fn render_log(records: &[ShotRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "{} - {}", record.coord, record.outcome);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Side;
    use crate::ship::{Orientation, ShipKind};

    #[test]
    fn hides_ships_on_target_view() {
        let mut board = Board::new(Side::Opponent);
        board
            .place(ShipKind::Cruiser, Coord::new(0, 0), Orientation::Right)
            .unwrap();
        board.receive_shot(Coord::new(0, 0)).unwrap();
        board.receive_shot(Coord::new(5, 5)).unwrap();

        let hidden = render_board(&board, false, &[Coord::new(9, 9)]);
        let first_row = hidden.lines().nth(1).unwrap();
        assert!(first_row.contains('X'));
        assert!(!hidden.lines().take(11).any(|l| l.contains('S')));
        assert!(hidden.lines().nth(10).unwrap().ends_with('+'));

        let shown = render_board(&board, true, &[]);
        assert!(shown.lines().nth(1).unwrap().contains('S'));
        assert!(shown.lines().nth(6).unwrap().contains('o'));
    }
}
