//! Discrete game events and the sinks that receive them.
//!
//! The engine calls every subscribed sink synchronously, in subscription order.

use crate::common::{Coord, Outcome, Side};
use crate::ship::{Orientation, ShipId, ShipKind};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// A ship was placed on a board.
    ShipPlaced {
        side: Side,
        id: ShipId,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    },
    /// Combat began.
    GameStarted,
    /// A player shot was resolved against the opponent board.
    ShotResolved { coord: Coord, outcome: Outcome },
    /// An opponent shot was resolved against the player board.
    EnemyShotResolved { coord: Coord, outcome: Outcome },
    /// One board ran out of intact ship cells.
    GameFinished { winner: Side },
    /// The game went back to placement with empty boards.
    GameReset,
}

/// Receiver of [`GameEvent`]s.
///
/// Sink failures are the sink's business; the engine does not catch them.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

#[cfg(feature = "std")]
impl EventSink for tokio::sync::mpsc::UnboundedSender<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        if self.send(event.clone()).is_err() {
            log::debug!("event receiver dropped, discarding {:?}", event);
        }
    }
}
