use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    board::Board,
    common::{Coord, GameError, Outcome, ShotRecord, Side},
    config::FLEET,
    events::{EventSink, GameEvent},
    pool::{PoolInfo, ShotPool},
    ship::{Orientation, ShipId, ShipKind},
};

/// Phase of the game. Moves forward only, except for an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Placement,
    Combat,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Placement => f.write_str("placement"),
            Phase::Combat => f.write_str("combat"),
            Phase::Finished => f.write_str("finished"),
        }
    }
}

/// Current status of a game from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Placing,
    InProgress,
    Won,
    Lost,
}

/// Value copy of every piece of mutable engine state.
///
/// Holds no references into the live engine; later play never changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineSnapshot {
    pub player: Board,
    pub opponent: Board,
    pub phase: Phase,
    pub player_log: Vec<ShotRecord>,
    pub opponent_log: Vec<ShotRecord>,
    pub pool_ceiling: usize,
    pub pool_available: usize,
}

/// Core game logic: both boards, the player's shot pool and the phase machine.
pub struct GameEngine {
    player: Board,
    opponent: Board,
    pool: ShotPool,
    phase: Phase,
    player_log: Vec<ShotRecord>,
    opponent_log: Vec<ShotRecord>,
    sinks: Vec<Box<dyn EventSink + Send>>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Create an engine in the placement phase with two empty boards.
    pub fn new() -> Self {
        Self {
            player: Board::new(Side::Player),
            opponent: Board::new(Side::Opponent),
            pool: ShotPool::new(0),
            phase: Phase::Placement,
            player_log: Vec::new(),
            opponent_log: Vec::new(),
            sinks: Vec::new(),
        }
    }

    /// Register a sink. Sinks are notified in registration order.
    pub fn subscribe<S>(&mut self, sink: S)
    where
        S: EventSink + Send + 'static,
    {
        self.sinks.push(Box::new(sink));
    }

    fn emit(&mut self, event: GameEvent) {
        for sink in self.sinks.iter_mut() {
            sink.on_event(&event);
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only view of one board.
    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn board_mut(&mut self, side: Side) -> &mut Board {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn pool_info(&self) -> PoolInfo {
        self.pool.info()
    }

    /// Shots the player fired, in order.
    pub fn player_log(&self) -> &[ShotRecord] {
        &self.player_log
    }

    /// Shots the opponent fired, in order.
    pub fn opponent_log(&self) -> &[ShotRecord] {
        &self.opponent_log
    }

    /// The side whose opponent ran out of ship cells, once the game is finished.
    pub fn winner(&self) -> Option<Side> {
        if self.phase != Phase::Finished {
            return None;
        }
        if self.opponent.remaining() == 0 {
            Some(Side::Player)
        } else {
            Some(Side::Opponent)
        }
    }

    pub fn status(&self) -> GameStatus {
        match (self.phase, self.winner()) {
            (Phase::Placement, _) => GameStatus::Placing,
            (_, Some(Side::Player)) => GameStatus::Won,
            (_, Some(Side::Opponent)) => GameStatus::Lost,
            (_, None) => GameStatus::InProgress,
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Whether a player ship of `kind` fits at `origin`.
    pub fn can_place(&self, kind: ShipKind, origin: Coord, orientation: Orientation) -> bool {
        self.player.can_place(kind, origin, orientation)
    }

    /// Place a ship on the player board.
    pub fn place(
        &mut self,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<ShipId, GameError> {
        self.expect_phase(Phase::Placement)?;
        self.place_on(Side::Player, kind, origin, orientation)
    }

    fn place_on(
        &mut self,
        side: Side,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<ShipId, GameError> {
        let id = self.board_mut(side).place(kind, origin, orientation)?;
        log::debug!("{} placed {} #{} at {} {}", side, kind, id, origin, orientation);
        self.emit(GameEvent::ShipPlaced {
            side,
            id,
            kind,
            origin,
            orientation,
        });
        Ok(id)
    }

    /// Randomly fill the opponent board with the standard fleet.
    ///
    /// A ship that finds no free spot within the attempt budget is skipped.
    /// Returns the number of ships placed.
    pub fn auto_place_opponent<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut placed = 0;
        for kind in FLEET {
            match self.opponent.random_placement(rng, kind) {
                Some((origin, orientation)) => {
                    if self
                        .place_on(Side::Opponent, kind, origin, orientation)
                        .is_ok()
                    {
                        placed += 1;
                    }
                }
                None => log::warn!("no room left for opponent {}, skipping it", kind),
            }
        }
        placed
    }

    /// Leave placement: populate the opponent and size the pool to the player's ship cells.
    pub fn start_game<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.expect_phase(Phase::Placement)?;
        if self.player.ships().is_empty() {
            return Err(GameError::NoShipsPlaced);
        }
        self.auto_place_opponent(rng);
        self.pool = ShotPool::new(self.player.remaining());
        self.phase = Phase::Combat;
        log::info!(
            "combat started with {} shots against {} opponent ships",
            self.pool.ceiling(),
            self.opponent.ships().len()
        );
        self.emit(GameEvent::GameStarted);
        Ok(())
    }

    fn check_target(&self, side: Side, coord: Coord) -> Result<(), GameError> {
        if !coord.in_bounds() {
            return Err(GameError::OutOfBounds(coord));
        }
        if self.board(side).is_shot(coord) {
            return Err(GameError::AlreadyShot(coord));
        }
        Ok(())
    }

    /// Fire one player shot at the opponent board.
    ///
    /// The shot occupies a pool slot only while it resolves.
    pub fn fire(&mut self, coord: Coord) -> Result<Outcome, GameError> {
        self.expect_phase(Phase::Combat)?;
        self.check_target(Side::Opponent, coord)?;
        let token = self.pool.acquire().ok_or(GameError::PoolExhausted)?;
        let outcome = self.opponent.receive_shot(coord);
        self.pool.release(token);
        let outcome = outcome?;
        log::debug!("player fired at {}: {}", coord, outcome);
        self.player_log.push(ShotRecord { coord, outcome });
        self.emit(GameEvent::ShotResolved { coord, outcome });
        self.check_finished(Side::Opponent);
        Ok(outcome)
    }

    /// Fire a batch of player shots, applied in row-major order.
    ///
    /// The whole batch is validated before any shot lands. Shots after the one
    /// that ends the game are not fired.
    pub fn fire_salvo(&mut self, coords: &[Coord]) -> Result<Vec<ShotRecord>, GameError> {
        self.expect_phase(Phase::Combat)?;
        let ordered = ordered_targets(coords);
        let available = self.pool.available();
        if ordered.len() > available {
            return Err(GameError::SalvoTooLarge {
                requested: ordered.len(),
                available,
            });
        }
        for &coord in &ordered {
            self.check_target(Side::Opponent, coord)?;
        }
        self.apply_batch(&ordered, Self::fire)
    }

    /// Resolve one opponent shot against the player board.
    ///
    /// Every hit permanently costs the player one pool slot.
    pub fn receive_enemy_shot(&mut self, coord: Coord) -> Result<Outcome, GameError> {
        self.expect_phase(Phase::Combat)?;
        self.check_target(Side::Player, coord)?;
        let outcome = self.player.receive_shot(coord)?;
        if outcome.is_hit() {
            self.pool.shrink();
        }
        log::debug!("opponent fired at {}: {}", coord, outcome);
        self.opponent_log.push(ShotRecord { coord, outcome });
        self.emit(GameEvent::EnemyShotResolved { coord, outcome });
        self.check_finished(Side::Player);
        Ok(outcome)
    }

    /// Resolve a batch of opponent shots in row-major order.
    pub fn receive_enemy_salvo(&mut self, coords: &[Coord]) -> Result<Vec<ShotRecord>, GameError> {
        self.expect_phase(Phase::Combat)?;
        let ordered = ordered_targets(coords);
        for &coord in &ordered {
            self.check_target(Side::Player, coord)?;
        }
        self.apply_batch(&ordered, Self::receive_enemy_shot)
    }

    fn apply_batch(
        &mut self,
        ordered: &[Coord],
        shoot: fn(&mut Self, Coord) -> Result<Outcome, GameError>,
    ) -> Result<Vec<ShotRecord>, GameError> {
        let mut records = Vec::with_capacity(ordered.len());
        for &coord in ordered {
            if self.phase != Phase::Combat {
                break;
            }
            let outcome = shoot(self, coord)?;
            records.push(ShotRecord { coord, outcome });
        }
        Ok(records)
    }

    /// Targets for the opponent's volley: one shot per intact opponent ship cell,
    /// at uniformly random unshot player cells.
    pub fn opponent_targets<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Coord> {
        let mut candidates: Vec<Coord> = self.player.unshot_cells().collect();
        candidates.shuffle(rng);
        candidates.truncate(self.opponent.remaining());
        candidates
    }

    fn check_finished(&mut self, target: Side) {
        if self.phase == Phase::Combat && self.board(target).remaining() == 0 {
            self.phase = Phase::Finished;
            let winner = target.other();
            log::info!("game finished, {} wins", winner);
            self.emit(GameEvent::GameFinished { winner });
        }
    }

    /// Back to placement with two fresh empty boards and an empty pool.
    pub fn reset(&mut self) {
        self.player = Board::new(Side::Player);
        self.opponent = Board::new(Side::Opponent);
        self.pool = ShotPool::new(0);
        self.phase = Phase::Placement;
        self.player_log.clear();
        self.opponent_log.clear();
        log::info!("game reset");
        self.emit(GameEvent::GameReset);
    }

    /// Capture the full mutable state as a value.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            player: self.player.clone(),
            opponent: self.opponent.clone(),
            phase: self.phase,
            player_log: self.player_log.clone(),
            opponent_log: self.opponent_log.clone(),
            pool_ceiling: self.pool.ceiling(),
            pool_available: self.pool.available(),
        }
    }

    /// Replace the full mutable state with `snapshot`. Subscribed sinks are kept.
    pub fn restore(&mut self, snapshot: &EngineSnapshot) {
        self.player = snapshot.player.clone();
        self.opponent = snapshot.opponent.clone();
        self.phase = snapshot.phase;
        self.player_log = snapshot.player_log.clone();
        self.opponent_log = snapshot.opponent_log.clone();
        self.pool = ShotPool::with_usage(snapshot.pool_ceiling, snapshot.pool_available);
    }
}

/// Sort targets row-major and drop duplicates.
fn ordered_targets(coords: &[Coord]) -> Vec<Coord> {
    let mut ordered = coords.to_vec();
    ordered.sort_unstable();
    ordered.dedup();
    ordered
}
