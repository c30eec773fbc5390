use salvo::{Board, Coord, Orientation, ShipKind, Side, BOARD_SIZE};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn fleet_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(Side::Opponent);
    for kind in salvo::FLEET {
        let (origin, orientation) = board.random_placement(&mut rng, kind).unwrap();
        board.place(kind, origin, orientation).unwrap();
    }
    board
}

fn kind_strategy() -> impl Strategy<Value = ShipKind> {
    prop_oneof![Just(ShipKind::Cruiser), Just(ShipKind::Submarine)]
}

fn orientation_strategy() -> impl Strategy<Value = Orientation> {
    (0..Orientation::ALL.len()).prop_map(|i| Orientation::ALL[i])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn can_place_implies_place(
        seed in any::<u64>(),
        kind in kind_strategy(),
        row in 0..BOARD_SIZE as usize,
        col in 0..BOARD_SIZE as usize,
        orientation in orientation_strategy(),
    ) {
        let mut board = fleet_board(seed);
        let origin = Coord::new(row, col);
        let before = board.remaining();
        let occupied_before = Coord::all()
            .filter(|c| board.cell(*c).unwrap().is_occupied())
            .count();
        if board.can_place(kind, origin, orientation) {
            let id = board.place(kind, origin, orientation).unwrap();
            let ship = board.ship(id).unwrap();
            prop_assert_eq!(ship.cells().len(), kind.length());
            prop_assert_eq!(board.remaining(), before + kind.length());
            let occupied_after = Coord::all()
                .filter(|c| board.cell(*c).unwrap().is_occupied())
                .count();
            prop_assert_eq!(occupied_after, occupied_before + kind.length());
        } else {
            prop_assert!(board.place(kind, origin, orientation).is_err());
            prop_assert_eq!(board.remaining(), before);
        }
    }

    #[test]
    fn remaining_counts_unshot_ship_cells(
        seed in any::<u64>(),
        shots in prop::collection::vec((0..BOARD_SIZE as usize, 0..BOARD_SIZE as usize), 0..60),
    ) {
        let mut board = fleet_board(seed);
        let initial = board.remaining();
        let mut fresh_hits = 0;
        for (r, c) in shots {
            let coord = Coord::new(r, c);
            let cell = *board.cell(coord).unwrap();
            let outcome = board.receive_shot(coord).unwrap();
            if !cell.is_shot() && cell.is_occupied() {
                fresh_hits += 1;
                prop_assert!(outcome.is_hit());
            }
            prop_assert_eq!(board.remaining(), initial - fresh_hits);
        }
        let unshot_occupied = Coord::all()
            .filter(|c| {
                let cell = board.cell(*c).unwrap();
                cell.is_occupied() && !cell.is_shot()
            })
            .count();
        prop_assert_eq!(board.remaining(), unshot_occupied);
        for ship in board.ships() {
            prop_assert!(ship.hits() <= ship.cells().len());
            prop_assert_eq!(ship.is_sunk(), ship.hits() == ship.cells().len());
        }
    }

    #[test]
    fn repeated_shot_changes_nothing(seed in any::<u64>(), row in 0..BOARD_SIZE as usize, col in 0..BOARD_SIZE as usize) {
        let mut board = fleet_board(seed);
        let coord = Coord::new(row, col);
        board.receive_shot(coord).unwrap();
        let after_first = board.clone();
        prop_assert_eq!(board.receive_shot(coord).unwrap(), salvo::Outcome::Repeated);
        prop_assert_eq!(board, after_first);
    }
}
