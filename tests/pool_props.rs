use proptest::prelude::*;
use salvo::{PoolInfo, ShotPool, ShotToken};

#[derive(Debug, Clone)]
enum Op {
    Acquire,
    Release(usize),
    Shrink,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Acquire),
        (0..8usize).prop_map(Op::Release),
        Just(Op::Shrink),
    ]
}

#[test]
fn release_after_shrink_is_discarded_at_capacity() {
    let mut pool = ShotPool::new(3);
    let first = pool.acquire().unwrap();
    let second = pool.acquire().unwrap();
    pool.shrink();
    assert_eq!(pool.ceiling(), 2);
    assert!(pool.available() + pool.in_use() <= pool.ceiling());

    pool.release(first);
    assert_eq!(pool.info(), PoolInfo { available: 1, in_use: 1, ceiling: 2 });

    pool.release(second);
    assert_eq!(pool.info(), PoolInfo { available: 2, in_use: 0, ceiling: 2 });
}

#[test]
fn acquire_until_empty() {
    let mut pool = ShotPool::new(2);
    assert!(pool.acquire().is_some());
    assert!(pool.acquire().is_some());
    assert!(pool.acquire().is_none());
    assert_eq!(pool.tokens_in_use().count(), 2);
}

#[test]
fn with_usage_reproduces_split() {
    let pool = ShotPool::with_usage(5, 3);
    assert_eq!(pool.info(), PoolInfo { available: 3, in_use: 2, ceiling: 5 });
    let empty = ShotPool::with_usage(0, 0);
    assert_eq!(empty.info(), PoolInfo { available: 0, in_use: 0, ceiling: 0 });
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn pool_stays_within_ceiling(ceiling in 0..10usize, ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut pool = ShotPool::new(ceiling);
        let mut held: Vec<ShotToken> = Vec::new();
        let mut last_ceiling = pool.ceiling();
        for op in ops {
            match op {
                Op::Acquire => {
                    if let Some(token) = pool.acquire() {
                        held.push(token);
                    }
                }
                Op::Release(i) => {
                    if !held.is_empty() {
                        let token = held.remove(i % held.len());
                        pool.release(token);
                    }
                }
                Op::Shrink => pool.shrink(),
            }
            let info = pool.info();
            prop_assert!(info.ceiling <= last_ceiling);
            last_ceiling = info.ceiling;
            prop_assert_eq!(info.in_use, held.len());
            // Slots in flight above a shrunken ceiling are reclaimed on release,
            // so only the available side is bounded while they are out.
            if info.in_use <= info.ceiling {
                prop_assert!(info.available + info.in_use <= info.ceiling);
            } else {
                prop_assert_eq!(info.available, 0);
            }
        }
    }

    #[test]
    fn immediate_release_keeps_budget(ceiling in 1..20usize, shrinks in 0..20usize) {
        let mut pool = ShotPool::new(ceiling);
        for _ in 0..shrinks {
            pool.shrink();
        }
        let expected = ceiling.saturating_sub(shrinks);
        for _ in 0..expected {
            let token = pool.acquire().unwrap();
            pool.release(token);
        }
        prop_assert_eq!(pool.info(), PoolInfo { available: expected, in_use: 0, ceiling: expected });
    }
}
