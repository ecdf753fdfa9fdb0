//! Reputation-weighted revenue allocation
//!
//! Distributes bounded revenue pools across flight capacity units, each
//! capped at its seat-dollar ceiling. Every pass offers each live pool's
//! remaining dollars to its unsaturated units in proportion to their
//! reputation. Units that cannot absorb their whole share are filled to
//! the ceiling, and the rest of that share stays in the pool for the next
//! pass. The loop ends when every pool is spent or every unit it may fund
//! is full; whatever is left is unallocated.
//!
//! State lives in flat index-addressed vectors, one slot per unit and
//! per pool, updated in place between passes.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::AllocatorConfig;
use crate::core::types::OfferingId;

/// Identifies one rotation of one offering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId {
    pub offering: OfferingId,
    pub rotation: u32,
}

/// Seat capacity, in dollars, competing for revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityUnit {
    pub id: UnitId,
    /// Origin IATA code
    pub origin: String,
    /// Destination IATA code
    pub destination: String,
    /// Seats x fare: the most this unit can ever receive
    pub ceiling: f64,
    /// Allocation weight
    pub reputation: f64,
}

/// Dollars available to units whose route matches the pool's scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePool {
    pub amount: f64,
    /// Origin IATA code the unit must fly from; empty matches any
    #[serde(default)]
    pub origin_restriction: String,
    /// Destination IATA code the unit must fly to; empty matches any
    #[serde(default)]
    pub destination_restriction: String,
}

impl RevenuePool {
    pub fn unrestricted(amount: f64) -> Self {
        Self {
            amount,
            origin_restriction: String::new(),
            destination_restriction: String::new(),
        }
    }

    pub fn scoped(amount: f64, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            amount,
            origin_restriction: origin.into(),
            destination_restriction: destination.into(),
        }
    }

    pub fn matches(&self, unit: &CapacityUnit) -> bool {
        (self.origin_restriction.is_empty() || self.origin_restriction == unit.origin)
            && (self.destination_restriction.is_empty() || self.destination_restriction == unit.destination)
    }
}

/// Revenue assigned to one unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub unit: UnitId,
    pub dollars: f64,
    pub ceiling: f64,
}

impl Allocation {
    pub fn is_saturated(&self) -> bool {
        self.dollars >= self.ceiling
    }

    /// Capacity left unsold, in dollars
    pub fn unsold(&self) -> f64 {
        (self.ceiling - self.dollars).max(0.0)
    }
}

/// Result of one allocation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// One entry per input unit, in input order
    pub allocations: Vec<Allocation>,
    /// Dollars left in each pool, in input order
    pub pool_leftovers: Vec<f64>,
    /// Passes the loop ran
    pub iterations: usize,
}

impl AllocationOutcome {
    pub fn total_allocated(&self) -> f64 {
        self.allocations.iter().map(|a| a.dollars).sum()
    }

    pub fn unallocated(&self) -> f64 {
        self.pool_leftovers.iter().sum()
    }

    pub fn get(&self, unit: UnitId) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.unit == unit)
    }

    /// Dollars per unit, keyed by id
    pub fn by_unit(&self) -> AHashMap<UnitId, f64> {
        self.allocations.iter().map(|a| (a.unit, a.dollars)).collect()
    }
}

/// Mutable per-unit state during allocation
#[derive(Debug, Clone, Copy)]
struct UnitSlot {
    remaining: f64,
    allocated: f64,
    weight: f64,
}

impl UnitSlot {
    fn is_saturated(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Whole cents, the resolution pools are tracked at
fn cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueAllocator {
    config: AllocatorConfig,
}

impl RevenueAllocator {
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn allocate(&self, pools: &[RevenuePool], units: &[CapacityUnit]) -> AllocationOutcome {
        let mut slots: Vec<UnitSlot> = units
            .iter()
            .map(|unit| UnitSlot {
                remaining: unit.ceiling.max(0.0),
                allocated: 0.0,
                weight: unit.reputation.max(0.0),
            })
            .collect();

        let mut pool_remaining: Vec<f64> = pools.iter().map(|p| p.amount.max(0.0)).collect();

        // Units each pool may fund, fixed for the whole run
        let eligible: Vec<Vec<usize>> = pools
            .iter()
            .map(|pool| {
                units
                    .iter()
                    .enumerate()
                    .filter(|(_, unit)| pool.matches(unit))
                    .map(|(index, _)| index)
                    .collect()
            })
            .collect();

        let max_iterations = self.config.max_iterations_factor.max(1) * (units.len() + pools.len() + 1);
        let mut iterations = 0;

        // (pool, unit, desired dollars) for the current pass
        let mut requests: Vec<(usize, usize, f64)> = Vec::new();
        let mut desired_total = vec![0.0_f64; units.len()];
        let mut live: Vec<usize> = Vec::new();

        loop {
            requests.clear();
            desired_total.iter_mut().for_each(|d| *d = 0.0);

            for (pool_index, members) in eligible.iter().enumerate() {
                let remaining = pool_remaining[pool_index];
                if cents(remaining) <= 0 {
                    continue;
                }

                live.clear();
                live.extend(members.iter().copied().filter(|&u| !slots[u].is_saturated()));
                if live.is_empty() {
                    continue;
                }

                let weight_sum: f64 = live.iter().map(|&u| slots[u].weight).sum();
                for &unit_index in &live {
                    let share = if weight_sum > 0.0 {
                        slots[unit_index].weight / weight_sum
                    } else {
                        // Nobody has any reputation: split evenly
                        1.0 / live.len() as f64
                    };
                    let desired = remaining * share;
                    requests.push((pool_index, unit_index, desired));
                    desired_total[unit_index] += desired;
                }
            }

            if requests.is_empty() {
                break;
            }
            if iterations >= max_iterations {
                tracing::warn!(
                    "Revenue allocation stopped after {} passes with {:.2} unallocated",
                    iterations,
                    pool_remaining.iter().sum::<f64>()
                );
                break;
            }
            iterations += 1;

            // A unit asked for more than it can hold takes the same fraction
            // of every pool's offer, so pools share its capacity pro rata.
            for &(pool_index, unit_index, desired) in &requests {
                let slot = &slots[unit_index];
                let wanted = desired_total[unit_index];
                let taken = if wanted > slot.remaining {
                    desired * (slot.remaining / wanted)
                } else {
                    desired
                };
                pool_remaining[pool_index] = (pool_remaining[pool_index] - taken).max(0.0);
            }

            for (slot, &wanted) in slots.iter_mut().zip(&desired_total) {
                if wanted <= 0.0 {
                    continue;
                }
                if wanted >= slot.remaining {
                    slot.allocated += slot.remaining;
                    slot.remaining = 0.0;
                } else {
                    slot.allocated += wanted;
                    slot.remaining -= wanted;
                }
            }

            tracing::trace!(
                "Allocation pass {}: {} offers, {:.2} left in pools, {} units saturated",
                iterations,
                requests.len(),
                pool_remaining.iter().sum::<f64>(),
                slots.iter().filter(|s| s.is_saturated()).count()
            );
        }

        let allocations = units
            .iter()
            .zip(&slots)
            .map(|(unit, slot)| Allocation {
                unit: unit.id,
                dollars: slot.allocated.min(unit.ceiling.max(0.0)),
                ceiling: unit.ceiling.max(0.0),
            })
            .collect();

        AllocationOutcome {
            allocations,
            pool_leftovers: pool_remaining,
            iterations,
        }
    }
}
