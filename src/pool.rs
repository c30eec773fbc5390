//! Bounded pool of reusable shot slots whose ceiling can only shrink.
//!
//! Slots are interchangeable tokens. The pool keeps explicit sets of them so the
//! caller can trace which slots are in flight, but only the counts matter for play:
//! `available` is the shot budget for the current round, `ceiling` the long-term
//! maximum, lowered permanently by every enemy hit.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

/// Handle for one shot slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShotToken(u32);

impl ShotToken {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Read-only counts of a [`ShotPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolInfo {
    pub available: usize,
    pub in_use: usize,
    pub ceiling: usize,
}

#[derive(Debug, Clone)]
pub struct ShotPool {
    ceiling: usize,
    available: Vec<ShotToken>,
    in_use: BTreeSet<ShotToken>,
}

impl ShotPool {
    /// Create a pool with `ceiling` available slots.
    pub fn new(ceiling: usize) -> Self {
        Self {
            ceiling,
            available: (0..ceiling as u32).map(ShotToken).collect(),
            in_use: BTreeSet::new(),
        }
    }

    /// Rebuild a pool from stored counts: a fresh pool at `ceiling` with
    /// `ceiling - available` slots provisionally taken.
    pub fn with_usage(ceiling: usize, available: usize) -> Self {
        let mut pool = Self::new(ceiling);
        for _ in 0..ceiling.saturating_sub(available) {
            pool.acquire();
        }
        pool
    }

    /// Take a slot, or `None` when none is available.
    pub fn acquire(&mut self) -> Option<ShotToken> {
        let token = self.available.pop()?;
        self.in_use.insert(token);
        Some(token)
    }

    /// Return a slot.
    ///
    /// The slot goes back to the available set only while the pool stays within
    /// its ceiling; otherwise it is discarded, so a shrink also reaches slots that
    /// were in flight. Returns `true` if the slot became available again. Tokens
    /// this pool does not hold as in use are ignored.
    pub fn release(&mut self, token: ShotToken) -> bool {
        if !self.in_use.remove(&token) {
            return false;
        }
        if self.available.len() + self.in_use.len() < self.ceiling {
            self.available.push(token);
            true
        } else {
            false
        }
    }

    /// Permanently lower the ceiling by one, saturating at zero.
    ///
    /// An available slot above the new ceiling is dropped right away; in-use
    /// slots above it are dropped when released.
    pub fn shrink(&mut self) {
        self.ceiling = self.ceiling.saturating_sub(1);
        if self.available.len() + self.in_use.len() > self.ceiling {
            self.available.pop();
        }
    }

    pub fn available(&self) -> usize {
        self.available.len()
    }

    pub fn in_use(&self) -> usize {
        self.in_use.len()
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn info(&self) -> PoolInfo {
        PoolInfo {
            available: self.available.len(),
            in_use: self.in_use.len(),
            ceiling: self.ceiling,
        }
    }

    /// Slots currently in flight.
    pub fn tokens_in_use(&self) -> impl Iterator<Item = ShotToken> + '_ {
        self.in_use.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_after_shrink_respects_ceiling() {
        let mut pool = ShotPool::new(3);
        let a = pool.acquire().unwrap();
        let _b = pool.acquire().unwrap();
        pool.shrink();
        assert_eq!(pool.ceiling(), 2);
        assert!(pool.release(a));
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.in_use(), 1);
    }

    #[test]
    fn shrink_saturates_at_zero() {
        let mut pool = ShotPool::new(1);
        pool.shrink();
        pool.shrink();
        assert_eq!(pool.info(), PoolInfo { available: 0, in_use: 0, ceiling: 0 });
        assert!(pool.acquire().is_none());
    }

    #[test]
    fn foreign_token_is_ignored() {
        let mut pool = ShotPool::new(2);
        let mut other = ShotPool::new(5);
        let stray = other.acquire().unwrap();
        assert!(!pool.release(stray));
        assert_eq!(pool.available(), 2);
    }
}
