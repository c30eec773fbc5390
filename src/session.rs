#![cfg(feature = "std")]

//! Orchestration layer between a front end and the [`GameEngine`].
//!
//! A [`Session`] enforces the fleet roster, keeps the multi-cell target
//! selection, runs the opponent's reply after a delay and records a checkpoint
//! after every state change so the player can undo. Round boundaries are
//! decided here: game start, every completed round and the end of the game.

use std::collections::BTreeSet;
use std::fmt;
use std::vec::Vec;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    board::Board,
    common::{Coord, GameError, ShotRecord, Side},
    config::{fleet_quota, SessionConfig},
    events::EventSink,
    game::{EngineSnapshot, GameEngine, GameStatus, Phase},
    history::History,
    pool::PoolInfo,
    ship::{Orientation, ShipId, ShipKind},
};

/// Ships placed so far, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct FleetTally {
    cruisers: usize,
    submarines: usize,
}

impl FleetTally {
    pub fn placed(&self, kind: ShipKind) -> usize {
        match kind {
            ShipKind::Cruiser => self.cruisers,
            ShipKind::Submarine => self.submarines,
        }
    }

    /// Ships of `kind` still to be placed.
    pub fn remaining(&self, kind: ShipKind) -> usize {
        fleet_quota(kind).saturating_sub(self.placed(kind))
    }

    pub fn total_remaining(&self) -> usize {
        ShipKind::ALL.iter().map(|k| self.remaining(*k)).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.total_remaining() == 0
    }

    fn record(&mut self, kind: ShipKind) {
        match kind {
            ShipKind::Cruiser => self.cruisers += 1,
            ShipKind::Submarine => self.submarines += 1,
        }
    }
}

/// Everything a checkpoint needs to bring a session back.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    pub engine: EngineSnapshot,
    pub fleet: FleetTally,
    pub enemy_turn: bool,
    /// Pending target selection, row-major.
    pub selection: Vec<Coord>,
}

/// Shots of one full round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub player: Vec<ShotRecord>,
    pub opponent: Vec<ShotRecord>,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Game(GameError),
    /// The opponent's reply is pending.
    Busy,
    /// No opponent reply is pending.
    NoPendingTurn,
    /// Every ship of this kind is already placed.
    FleetComplete(ShipKind),
    /// Ships still waiting to be placed.
    FleetIncomplete { remaining: usize },
    /// Firing needs at least one selected target.
    EmptySelection,
    /// Selection already uses every available shot.
    TargetLimit { available: usize },
}

impl From<GameError> for SessionError {
    fn from(err: GameError) -> Self {
        SessionError::Game(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Game(e) => write!(f, "{}", e),
            SessionError::Busy => write!(f, "wait for the opponent to finish its turn"),
            SessionError::NoPendingTurn => write!(f, "no opponent turn is pending"),
            SessionError::FleetComplete(kind) => write!(f, "all {}s are already placed", kind),
            SessionError::FleetIncomplete { remaining } => {
                write!(f, "{} ships still need to be placed", remaining)
            }
            SessionError::EmptySelection => write!(f, "select at least one target first"),
            SessionError::TargetLimit { available } => {
                write!(f, "only {} targets can be selected", available)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Game(e) => Some(e),
            _ => None,
        }
    }
}

pub struct Session {
    engine: GameEngine,
    history: History<SessionSnapshot>,
    rng: SmallRng,
    config: SessionConfig,
    fleet: FleetTally,
    selection: BTreeSet<Coord>,
    enemy_turn: bool,
}

impl Session {
    /// Fresh session in placement, with the initial state checkpointed.
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let mut session = Self {
            engine: GameEngine::new(),
            history: History::new(),
            rng,
            config,
            fleet: FleetTally::default(),
            selection: BTreeSet::new(),
            enemy_turn: false,
        };
        session.checkpoint(false);
        session
    }

    pub fn subscribe<S>(&mut self, sink: S)
    where
        S: EventSink + Send + 'static,
    {
        self.engine.subscribe(sink);
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn board(&self, side: Side) -> &Board {
        self.engine.board(side)
    }

    pub fn pool_info(&self) -> PoolInfo {
        self.engine.pool_info()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn fleet(&self) -> FleetTally {
        self.fleet
    }

    /// Selected targets, row-major.
    pub fn selection(&self) -> impl Iterator<Item = Coord> + '_ {
        self.selection.iter().copied()
    }

    /// `true` while the opponent's reply is pending.
    pub fn is_busy(&self) -> bool {
        self.enemy_turn
    }

    pub fn history(&self) -> &History<SessionSnapshot> {
        &self.history
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.enemy_turn {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), SessionError> {
        let actual = self.engine.phase();
        if actual == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase { expected, actual }.into())
        }
    }

    fn capture(&self) -> SessionSnapshot {
        SessionSnapshot {
            engine: self.engine.snapshot(),
            fleet: self.fleet,
            enemy_turn: self.enemy_turn,
            selection: self.selection.iter().copied().collect(),
        }
    }

    fn checkpoint(&mut self, round_boundary: bool) {
        let snapshot = self.capture();
        self.history.checkpoint(&snapshot, round_boundary);
    }

    fn apply(&mut self, snapshot: &SessionSnapshot) {
        self.engine.restore(&snapshot.engine);
        self.fleet = snapshot.fleet;
        self.enemy_turn = snapshot.enemy_turn;
        self.selection = snapshot.selection.iter().copied().collect();
    }

    /// Place one ship of the player's fleet.
    pub fn place_ship(
        &mut self,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<ShipId, SessionError> {
        self.ensure_idle()?;
        self.ensure_phase(Phase::Placement)?;
        if self.fleet.remaining(kind) == 0 {
            return Err(SessionError::FleetComplete(kind));
        }
        let id = self.engine.place(kind, origin, orientation)?;
        self.fleet.record(kind);
        self.checkpoint(false);
        Ok(id)
    }

    /// Randomly place every ship of the fleet that is still missing.
    ///
    /// Each placement is its own checkpoint. Returns how many ships were placed.
    pub fn auto_place_fleet(&mut self) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        self.ensure_phase(Phase::Placement)?;
        let mut placed = 0;
        for kind in ShipKind::ALL {
            for _ in 0..self.fleet.remaining(kind) {
                let Some((origin, orientation)) =
                    self.engine.board(Side::Player).random_placement(&mut self.rng, kind)
                else {
                    log::warn!("no room left for a {}", kind);
                    continue;
                };
                self.place_ship(kind, origin, orientation)?;
                placed += 1;
            }
        }
        Ok(placed)
    }

    /// Start combat once the whole fleet is placed.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.ensure_phase(Phase::Placement)?;
        if !self.fleet.is_complete() {
            return Err(SessionError::FleetIncomplete {
                remaining: self.fleet.total_remaining(),
            });
        }
        self.engine.start_game(&mut self.rng)?;
        self.checkpoint(true);
        Ok(())
    }

    /// Select or deselect an opponent cell. Returns `true` if it is now selected.
    pub fn toggle_target(&mut self, coord: Coord) -> Result<bool, SessionError> {
        self.ensure_idle()?;
        self.ensure_phase(Phase::Combat)?;
        if !coord.in_bounds() {
            return Err(GameError::OutOfBounds(coord).into());
        }
        if self.engine.board(Side::Opponent).is_shot(coord) {
            return Err(GameError::AlreadyShot(coord).into());
        }
        if self.selection.remove(&coord) {
            return Ok(false);
        }
        let available = self.engine.pool_info().available;
        if self.selection.len() >= available {
            return Err(SessionError::TargetLimit { available });
        }
        self.selection.insert(coord);
        Ok(true)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Fire every selected target.
    ///
    /// A winning volley ends the round right away; otherwise the session stays
    /// busy until [`resolve_enemy_turn`](Self::resolve_enemy_turn).
    pub fn fire_selection(&mut self) -> Result<Vec<ShotRecord>, SessionError> {
        self.ensure_idle()?;
        self.ensure_phase(Phase::Combat)?;
        if self.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        let targets: Vec<Coord> = self.selection.iter().copied().collect();
        let records = self.engine.fire_salvo(&targets)?;
        self.selection.clear();
        if self.engine.phase() == Phase::Finished {
            self.checkpoint(true);
        } else {
            self.enemy_turn = true;
        }
        Ok(records)
    }

    /// Let the opponent fire its volley and close the round.
    pub fn resolve_enemy_turn(&mut self) -> Result<Vec<ShotRecord>, SessionError> {
        if !self.enemy_turn {
            return Err(SessionError::NoPendingTurn);
        }
        let targets = self.engine.opponent_targets(&mut self.rng);
        let records = self.engine.receive_enemy_salvo(&targets)?;
        self.enemy_turn = false;
        let hits = records.iter().filter(|r| r.outcome.is_hit()).count();
        log::info!(
            "opponent fired {} shots, {} hits, {} shots left",
            records.len(),
            hits,
            self.engine.pool_info().ceiling
        );
        self.checkpoint(true);
        Ok(records)
    }

    /// Fire the selection, wait the configured delay, then play the opponent's reply.
    pub async fn play_round(&mut self) -> Result<RoundReport, SessionError> {
        let player = self.fire_selection()?;
        let opponent = if self.enemy_turn {
            if !self.config.enemy_delay.is_zero() {
                tokio::time::sleep(self.config.enemy_delay).await;
            }
            self.resolve_enemy_turn()?
        } else {
            Vec::new()
        };
        Ok(RoundReport {
            player,
            opponent,
            status: self.engine.status(),
        })
    }

    /// Roll back to the previous checkpoint worth returning to.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        self.ensure_idle()?;
        match self.history.undo().cloned() {
            Some(snapshot) => {
                self.apply(&snapshot);
                log::info!("undo: back in {} phase", self.engine.phase());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Start over from empty boards with a fresh history. Also cancels a pending enemy turn.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.fleet = FleetTally::default();
        self.selection.clear();
        self.enemy_turn = false;
        self.history.clear();
        self.checkpoint(false);
    }
}
