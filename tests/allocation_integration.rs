//! Integration tests for the revenue allocator
//!
//! These tests pin down the allocation rules end to end:
//! - Reputation-weighted split of an under-supplied pool
//! - Saturation at each unit's ceiling with no overflow
//! - Scoped pools only reaching the units on their routes
//! - Pass counts staying within the safety bound

use airline_demand::core::config::AllocatorConfig;
use airline_demand::core::types::OfferingId;
use airline_demand::revenue::{AllocationOutcome, CapacityUnit, RevenueAllocator, RevenuePool, UnitId};

fn unit(offering: u32, rotation: u32, destination: &str, ceiling: f64, reputation: f64) -> CapacityUnit {
    CapacityUnit {
        id: UnitId {
            offering: OfferingId(offering),
            rotation,
        },
        origin: "ORG".into(),
        destination: destination.into(),
        ceiling,
        reputation,
    }
}

/// Route 1 flies two 300-dollar rotations at reputation 1, route 2 one 600-dollar rotation at reputation 2
fn reference_units() -> Vec<CapacityUnit> {
    vec![
        unit(1, 0, "DST", 300.0, 1.0),
        unit(1, 1, "DST", 300.0, 1.0),
        unit(2, 0, "DST", 600.0, 2.0),
    ]
}

fn route_totals(outcome: &AllocationOutcome) -> [f64; 2] {
    let mut totals = [0.0; 2];
    for allocation in &outcome.allocations {
        totals[allocation.unit.offering.0 as usize - 1] += allocation.dollars;
    }
    totals
}

fn allocate(pools: &[RevenuePool], units: &[CapacityUnit]) -> AllocationOutcome {
    RevenueAllocator::new(AllocatorConfig::default()).allocate(pools, units)
}

#[test]
fn test_reference_scenario_empty_pool() {
    let outcome = allocate(&[RevenuePool::unrestricted(0.0)], &reference_units());
    assert_eq!(route_totals(&outcome), [0.0, 0.0]);
    assert_eq!(outcome.iterations, 0);
}

#[test]
fn test_reference_scenario_under_supplied() {
    let outcome = allocate(&[RevenuePool::unrestricted(600.0)], &reference_units());
    let [first, second] = route_totals(&outcome);
    assert!((first - 300.0).abs() < 1e-9, "route 1 got {first}");
    assert!((second - 300.0).abs() < 1e-9, "route 2 got {second}");
    assert!(outcome.unallocated() < 0.005);
}

#[test]
fn test_reference_scenario_saturated() {
    let outcome = allocate(&[RevenuePool::unrestricted(10_000.0)], &reference_units());
    assert_eq!(route_totals(&outcome), [600.0, 600.0]);
    assert!(outcome.allocations.iter().all(|a| a.is_saturated()));
    assert!((outcome.unallocated() - 8_800.0).abs() < 1e-9);
}

#[test]
fn test_redistribution_after_saturation() {
    // The small unit fills up on the first pass; its leftover share goes to the big one
    let units = vec![unit(1, 0, "DST", 100.0, 1.0), unit(2, 0, "DST", 1_000.0, 1.0)];
    let outcome = allocate(&[RevenuePool::unrestricted(800.0)], &units);

    assert_eq!(outcome.allocations[0].dollars, 100.0);
    assert!((outcome.allocations[1].dollars - 700.0).abs() < 1e-9);
    assert!(outcome.iterations >= 2);
}

#[test]
fn test_scoped_pools_over_multi_airport_market() {
    // Shared pool open to both airports, plus one exclusive pool each
    let units = vec![unit(1, 0, "AAA", 10_000.0, 1.0), unit(2, 0, "BBB", 10_000.0, 3.0)];
    let pools = vec![
        RevenuePool::scoped(400.0, "ORG", ""),
        RevenuePool::scoped(100.0, "ORG", "AAA"),
        RevenuePool::scoped(50.0, "ORG", "BBB"),
    ];
    let outcome = allocate(&pools, &units);

    assert!((outcome.allocations[0].dollars - (100.0 + 100.0)).abs() < 1e-9);
    assert!((outcome.allocations[1].dollars - (300.0 + 50.0)).abs() < 1e-9);
    assert!(outcome.unallocated() < 0.005);
}

#[test]
fn test_pool_for_other_origin_is_untouched() {
    let units = reference_units();
    let outcome = allocate(&[RevenuePool::scoped(500.0, "XXX", "")], &units);
    assert_eq!(outcome.total_allocated(), 0.0);
    assert_eq!(outcome.pool_leftovers, vec![500.0]);
}

#[test]
fn test_repeated_runs_are_identical() {
    let units: Vec<_> = (0..40)
        .map(|i| unit(i, 0, "DST", 50.0 + f64::from(i * 37 % 11) * 25.0, 1.0 + f64::from(i % 5)))
        .collect();
    let pools = [RevenuePool::unrestricted(4_321.0), RevenuePool::scoped(987.0, "ORG", "DST")];

    let first = allocate(&pools, &units);
    let second = allocate(&pools, &units);
    assert_eq!(first, second);
}
