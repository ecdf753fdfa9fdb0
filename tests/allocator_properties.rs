//! Property tests for the revenue allocator

use airline_demand::core::config::AllocatorConfig;
use airline_demand::core::types::OfferingId;
use airline_demand::revenue::{CapacityUnit, RevenueAllocator, RevenuePool, UnitId};
use proptest::prelude::*;

fn units_from(specs: &[(f64, f64)]) -> Vec<CapacityUnit> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(ceiling, reputation))| CapacityUnit {
            id: UnitId {
                offering: OfferingId(i as u32),
                rotation: 0,
            },
            origin: "ORG".into(),
            destination: "DST".into(),
            ceiling,
            reputation,
        })
        .collect()
}

const DESTINATIONS: [&str; 3] = ["AAA", "BBB", "CCC"];

/// Units flying to one of `DESTINATIONS`, picked by index
fn routed_units(specs: &[(f64, f64, usize)]) -> Vec<CapacityUnit> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(ceiling, reputation, destination))| CapacityUnit {
            id: UnitId {
                offering: OfferingId(i as u32),
                rotation: 0,
            },
            origin: "ORG".into(),
            destination: DESTINATIONS[destination % DESTINATIONS.len()].into(),
            ceiling,
            reputation,
        })
        .collect()
}

/// Pools open to one destination, or to any when the index is out of range
fn scoped_pools(specs: &[(f64, usize)]) -> Vec<RevenuePool> {
    specs
        .iter()
        .map(|&(amount, destination)| {
            let code = DESTINATIONS.get(destination).copied().unwrap_or("");
            RevenuePool::scoped(amount, "ORG", code)
        })
        .collect()
}

fn allocator() -> RevenueAllocator {
    RevenueAllocator::new(AllocatorConfig::default())
}

proptest! {
    #[test]
    fn no_unit_exceeds_its_ceiling(
        specs in prop::collection::vec((0.0f64..10_000.0, 0.0f64..4.0), 1..30),
        pool in 0.0f64..200_000.0,
    ) {
        let units = units_from(&specs);
        let outcome = allocator().allocate(&[RevenuePool::unrestricted(pool)], &units);
        for (allocation, unit) in outcome.allocations.iter().zip(&units) {
            prop_assert!(allocation.dollars >= 0.0);
            prop_assert!(allocation.dollars <= unit.ceiling);
        }
    }

    #[test]
    fn allocation_conserves_dollars(
        specs in prop::collection::vec((1.0f64..10_000.0, 1.0f64..4.0), 1..30),
        pool in 0.0f64..200_000.0,
    ) {
        let units = units_from(&specs);
        let capacity: f64 = units.iter().map(|u| u.ceiling).sum();
        let outcome = allocator().allocate(&[RevenuePool::unrestricted(pool)], &units);
        let allocated = outcome.total_allocated();
        let tolerance = 0.01 + 1e-9 * (pool + capacity);

        prop_assert!(allocated <= pool.min(capacity) + tolerance);
        if pool < capacity {
            prop_assert!((allocated - pool).abs() <= tolerance, "allocated {} of pool {}", allocated, pool);
        } else {
            prop_assert!((allocated - capacity).abs() <= tolerance, "allocated {} of capacity {}", allocated, capacity);
        }
        prop_assert!((allocated + outcome.unallocated() - pool).abs() <= tolerance);
    }

    #[test]
    fn equal_units_get_equal_shares(
        ceiling in 1.0f64..10_000.0,
        reputation in 0.0f64..4.0,
        fraction in 0.0f64..1.0,
    ) {
        let units = units_from(&[(ceiling, reputation), (ceiling, reputation)]);
        let pool = 2.0 * ceiling * fraction;
        let outcome = allocator().allocate(&[RevenuePool::unrestricted(pool)], &units);
        prop_assert_eq!(outcome.allocations[0].dollars, outcome.allocations[1].dollars);
    }

    #[test]
    fn allocation_is_deterministic(
        specs in prop::collection::vec((0.0f64..5_000.0, 0.0f64..4.0), 0..20),
        pools in prop::collection::vec(0.0f64..50_000.0, 0..4),
    ) {
        let units = units_from(&specs);
        let pools: Vec<_> = pools.into_iter().map(RevenuePool::unrestricted).collect();
        let first = allocator().allocate(&pools, &units);
        let second = allocator().allocate(&pools, &units);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn passes_stay_within_bound(
        specs in prop::collection::vec((0.0f64..5_000.0, 0.0f64..4.0), 0..30),
        pool in 0.0f64..100_000.0,
    ) {
        let units = units_from(&specs);
        let outcome = allocator().allocate(&[RevenuePool::unrestricted(pool)], &units);
        prop_assert!(outcome.iterations <= units.len() + 2);
    }

    #[test]
    fn allocation_ignores_input_order(
        specs in prop::collection::vec((0.0f64..5_000.0, 0.0f64..4.0, 0usize..3), 0..20),
        pools in prop::collection::vec((0.0f64..50_000.0, 0usize..4), 0..5),
    ) {
        let units = routed_units(&specs);
        let pools = scoped_pools(&pools);
        let mut reversed_units = units.clone();
        reversed_units.reverse();
        let mut reversed_pools = pools.clone();
        reversed_pools.reverse();

        let forward = allocator().allocate(&pools, &units).by_unit();
        let backward = allocator().allocate(&reversed_pools, &reversed_units).by_unit();

        prop_assert_eq!(forward.len(), backward.len());
        for (unit, dollars) in &forward {
            let other = backward.get(unit).copied().unwrap_or(f64::NAN);
            prop_assert!((dollars - other).abs() <= 1e-9, "{:?}: {} vs {}", unit, dollars, other);
        }
    }

    #[test]
    fn scoped_pools_drain_or_saturate(
        specs in prop::collection::vec((1.0f64..5_000.0, 0.0f64..4.0, 0usize..3), 1..20),
        pools in prop::collection::vec((0.0f64..30_000.0, 0usize..4), 1..5),
    ) {
        let units = routed_units(&specs);
        let pools = scoped_pools(&pools);
        let outcome = allocator().allocate(&pools, &units);

        let total: f64 = pools.iter().map(|p| p.amount).sum();
        let capacity: f64 = units.iter().map(|u| u.ceiling).sum();
        let tolerance = 0.01 * pools.len() as f64 + 1e-9 * (total + capacity);
        let accounted = outcome.total_allocated() + outcome.unallocated();
        prop_assert!((accounted - total).abs() <= tolerance, "accounted {} of {}", accounted, total);

        for (allocation, unit) in outcome.allocations.iter().zip(&units) {
            prop_assert!(allocation.dollars <= unit.ceiling);
        }

        // Money is only left behind when nobody who could take it has room
        for (pool, &left) in pools.iter().zip(&outcome.pool_leftovers) {
            if left <= 0.01 {
                continue;
            }
            for (allocation, unit) in outcome.allocations.iter().zip(&units) {
                if pool.matches(unit) {
                    prop_assert!(
                        allocation.dollars >= unit.ceiling - 1e-6,
                        "{:?} has room but {} is left in a pool it matches",
                        unit.id,
                        left
                    );
                }
            }
        }
    }
}
