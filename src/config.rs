use core::time::Duration;

use crate::ship::ShipKind;

pub const BOARD_SIZE: u8 = 10;

/// Ships each side has to place before combat starts.
pub const FLEET: [ShipKind; 3] = [ShipKind::Cruiser, ShipKind::Cruiser, ShipKind::Submarine];

/// Rejection-sampling budget for one randomly placed ship.
pub const PLACEMENT_ATTEMPTS: usize = 200;

/// Pause between the player's volley and the opponent's reply.
pub const ENEMY_TURN_DELAY: Duration = Duration::from_millis(1000);

/// How many ships of `kind` the fleet contains.
pub fn fleet_quota(kind: ShipKind) -> usize {
    FLEET.iter().filter(|k| **k == kind).count()
}

/// Total number of occupied cells for a complete fleet.
pub fn fleet_cells() -> usize {
    FLEET.iter().map(|k| k.length()).sum()
}

/// Runtime knobs for a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Fixed RNG seed. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Delay before the opponent answers a volley.
    pub enemy_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            enemy_delay: ENEMY_TURN_DELAY,
        }
    }
}

impl SessionConfig {
    /// Reproducible configuration with no enemy delay, handy for tests and simulations.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            enemy_delay: Duration::ZERO,
        }
    }
}
