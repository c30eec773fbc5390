use salvo::{Board, BoardError, Coord, Orientation, Outcome, ShipKind, Side, BOARD_SIZE};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_place_then_overlap_rejected() {
    let mut board = Board::new(Side::Player);
    let id = board
        .place(ShipKind::Cruiser, Coord::new(0, 0), Orientation::Right)
        .unwrap();
    assert_eq!(id, 1);
    assert_eq!(board.ship(id).unwrap().cells(), &[Coord::new(0, 0), Coord::new(0, 1)]);
    assert!(board.cell(Coord::new(0, 1)).unwrap().is_occupied());
    assert!(!board.can_place(ShipKind::Cruiser, Coord::new(0, 1), Orientation::Right));
    assert_eq!(
        board.place(ShipKind::Cruiser, Coord::new(0, 1), Orientation::Right),
        Err(BoardError::CannotPlace)
    );
    assert_eq!(board.remaining(), 2);
    assert_eq!(board.ships().len(), 1);
}

#[test]
fn test_placement_never_wraps() {
    let board = Board::new(Side::Player);
    let last = BOARD_SIZE as usize - 1;
    assert!(!board.can_place(ShipKind::Cruiser, Coord::new(0, last), Orientation::Right));
    assert!(!board.can_place(ShipKind::Submarine, Coord::new(last - 1, 0), Orientation::Down));
    assert!(!board.can_place(ShipKind::Cruiser, Coord::new(0, 0), Orientation::DiagonalUpRight));
    assert!(board.can_place(ShipKind::Cruiser, Coord::new(1, 0), Orientation::DiagonalUpRight));
    assert!(!board.can_place(
        ShipKind::Submarine,
        Coord::new(last - 1, 3),
        Orientation::DiagonalDownRight
    ));
    assert!(!board.can_place(ShipKind::Cruiser, Coord::new(last + 1, 0), Orientation::Right));
}

#[test]
fn test_diagonal_footprints() {
    let mut board = Board::new(Side::Player);
    let down = board
        .place(ShipKind::Submarine, Coord::new(2, 2), Orientation::DiagonalDownRight)
        .unwrap();
    let up = board
        .place(ShipKind::Submarine, Coord::new(6, 0), Orientation::DiagonalUpRight)
        .unwrap();
    assert_eq!(
        board.ship(down).unwrap().cells(),
        &[Coord::new(2, 2), Coord::new(3, 3), Coord::new(4, 4)]
    );
    assert_eq!(
        board.ship(up).unwrap().cells(),
        &[Coord::new(6, 0), Coord::new(5, 1), Coord::new(4, 2)]
    );
    assert_eq!(board.remaining(), 6);
}

#[test]
fn test_shots_hit_sink_and_repeat() {
    let mut board = Board::new(Side::Opponent);
    board
        .place(ShipKind::Cruiser, Coord::new(3, 3), Orientation::Down)
        .unwrap();

    assert_eq!(board.receive_shot(Coord::new(0, 0)), Ok(Outcome::Miss));
    assert_eq!(board.receive_shot(Coord::new(3, 3)), Ok(Outcome::Hit(ShipKind::Cruiser)));
    assert_eq!(board.remaining(), 1);
    assert_eq!(board.receive_shot(Coord::new(3, 3)), Ok(Outcome::Repeated));
    assert_eq!(board.remaining(), 1);
    assert_eq!(board.receive_shot(Coord::new(4, 3)), Ok(Outcome::Sunk(ShipKind::Cruiser)));
    assert_eq!(board.remaining(), 0);
    assert!(board.all_sunk());

    let ship = &board.ships()[0];
    assert!(ship.is_sunk());
    assert_eq!(ship.hits(), 2);
    assert_eq!(board.receive_shot(Coord::new(0, 0)), Ok(Outcome::Repeated));
}

#[test]
fn test_out_of_range_shot_is_an_error() {
    let mut board = Board::new(Side::Player);
    assert_eq!(
        board.receive_shot(Coord::new(10, 0)),
        Err(BoardError::OutOfBounds { row: 10, col: 0 })
    );
}

#[test]
fn test_random_placement_fits() {
    let mut board = Board::new(Side::Opponent);
    let mut rng = SmallRng::seed_from_u64(42);
    for kind in [ShipKind::Cruiser, ShipKind::Cruiser, ShipKind::Submarine] {
        let (origin, orientation) = board.random_placement(&mut rng, kind).unwrap();
        assert!(board.can_place(kind, origin, orientation));
        board.place(kind, origin, orientation).unwrap();
    }
    assert_eq!(board.remaining(), 7);
    let ids: Vec<_> = board.ships().iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_random_placement_gives_up_on_full_board() {
    let mut board = Board::new(Side::Opponent);
    for row in 0..BOARD_SIZE as usize {
        for col in (0..BOARD_SIZE as usize).step_by(2) {
            board
                .place(ShipKind::Cruiser, Coord::new(row, col), Orientation::Right)
                .unwrap();
        }
    }
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(board.random_placement(&mut rng, ShipKind::Cruiser), None);
}

#[test]
fn test_clone_is_independent() {
    let mut board = Board::new(Side::Player);
    board
        .place(ShipKind::Submarine, Coord::new(0, 0), Orientation::Right)
        .unwrap();
    let saved = board.clone();
    board.receive_shot(Coord::new(0, 0)).unwrap();
    assert!(!saved.is_shot(Coord::new(0, 0)));
    assert_eq!(saved.remaining(), 3);
    assert_eq!(saved.ships()[0].hits(), 0);
}
