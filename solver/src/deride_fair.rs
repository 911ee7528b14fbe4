use crate::rng::TieBreaker;
use eligibility::{max_permissible_path, EligibilityMatrix};
use graph_store::Graph;
use model::base_types::{Distance, RiderId};
use model::{AssignStatus, Assignment, Config, Driver, Rider};
use path_oracle::PathOracle;
use std::collections::BTreeMap;

/// Greedy fairness assigner. Same rarity-first rider selection as
/// DeRide, but drivers are tried by ascending current load, and a driver is
/// only committed once the simulated route through its existing riders plus
/// the new one stays within `MP_d`. No corridor re-masking: eligibility
/// stays governed by the standard `ER` built once up front.
pub fn assign(
    graph: &Graph,
    drivers: &[Driver],
    riders: &[Rider],
    config: &Config,
) -> (Assignment, AssignStatus) {
    let oracle = PathOracle::new(graph);
    let mut er = EligibilityMatrix::build(&oracle, drivers, riders);
    let mut assignment = Assignment::empty_for(drivers);
    let mut tie_breaker = TieBreaker::from_config(config);

    let iteration_cap = config
        .iteration_cap
        .unwrap_or_else(|| drivers.len() * riders.len());
    let mut status = AssignStatus::Solved;
    let mut iterations = 0usize;

    while er.total_offers() > 0 {
        if iterations >= iteration_cap {
            tracing::warn!(
                iterations,
                iteration_cap,
                "DeRideFair hit its iteration cap"
            );
            status = AssignStatus::BudgetExceeded;
            break;
        }
        iterations += 1;

        let r_selected = select_rarest_rider(&er, riders.len(), &mut tie_breaker);
        let rider = &riders[r_selected];

        let eligible_drivers: Vec<usize> = (0..drivers.len())
            .filter(|&d| er.is_eligible(d, r_selected))
            .collect();

        match select_driver_by_load(
            &oracle,
            drivers,
            riders,
            &eligible_drivers,
            &assignment,
            rider,
            &mut tie_breaker,
        ) {
            Some(d_assigned) => {
                let driver = &drivers[d_assigned];
                if !assignment.driver(d_assigned).has_committed_path() {
                    let path = committed_path_for(&oracle, driver, rider);
                    assignment.driver_mut(d_assigned).commit_path(path);
                }
                assignment.driver_mut(d_assigned).accept(rider.id());
                er.zero_column(r_selected);
                if assignment.driver(d_assigned).remaining_seats() == 0 {
                    er.zero_row(d_assigned);
                }
            }
            None => {
                er.zero_column(r_selected);
            }
        }
    }

    tracing::info!(
        riders_served = assignment.total_served(),
        iterations,
        ?status,
        "DeRideFair run complete"
    );
    (assignment, status)
}

fn select_rarest_rider(
    er: &EligibilityMatrix,
    num_riders: usize,
    tie_breaker: &mut TieBreaker,
) -> usize {
    let min_offer = (0..num_riders)
        .filter(|&r| er.offers(r) > 0)
        .map(|r| er.offers(r))
        .min()
        .expect("caller only invokes this while total_offers() > 0");
    let candidates: Vec<usize> = (0..num_riders)
        .filter(|&r| er.offers(r) == min_offer)
        .collect();
    tie_breaker.pick(&candidates)
}

/// Groups eligible drivers by ascending load, and within
/// each group keep drawing (and discarding infeasible) drivers until one
/// simulates within `MP_d`, or the group is exhausted and the next group is
/// tried. Returns `None` if no driver across any group is feasible.
#[allow(clippy::too_many_arguments)]
fn select_driver_by_load(
    oracle: &PathOracle,
    drivers: &[Driver],
    riders: &[Rider],
    eligible_drivers: &[usize],
    assignment: &Assignment,
    rider: &Rider,
    tie_breaker: &mut TieBreaker,
) -> Option<usize> {
    let mut by_load: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &d in eligible_drivers {
        by_load
            .entry(assignment.driver(d).load())
            .or_default()
            .push(d);
    }

    for (_load, mut group) in by_load {
        while !group.is_empty() {
            let pick_idx = tie_breaker.pick_index(group.len());
            let d = group[pick_idx];
            let driver = &drivers[d];
            let mp = max_permissible_path(oracle, driver);
            let simulated = simulate_route_length(
                oracle,
                driver,
                assignment.driver(d).accepted(),
                riders,
                rider,
            );
            if simulated.is_finite() && simulated <= mp {
                return Some(d);
            }
            group.remove(pick_idx);
        }
    }
    None
}

/// Waypoint order fixed by design: `[d.src, accepted sources in
/// acceptance order, new source, accepted destinations in acceptance
/// order, new destination, d.dst]`, summed as consecutive shortest-path
/// segments.
fn simulate_route_length(
    oracle: &PathOracle,
    driver: &Driver,
    accepted: &[RiderId],
    riders: &[Rider],
    new_rider: &Rider,
) -> Distance {
    let find = |id: RiderId| -> &Rider {
        riders
            .iter()
            .find(|r| r.id() == id)
            .expect("accepted rider id must be present in the rider slice")
    };

    let mut waypoints = Vec::with_capacity(accepted.len() * 2 + 3);
    waypoints.push(driver.source());
    for &id in accepted {
        waypoints.push(find(id).source());
    }
    waypoints.push(new_rider.source());
    for &id in accepted {
        waypoints.push(find(id).destination());
    }
    waypoints.push(new_rider.destination());
    waypoints.push(driver.destination());

    waypoints
        .windows(2)
        .map(|pair| oracle.spd(pair[0], pair[1]))
        .sum()
}

/// The route committed the first time a driver accepts a rider: the pure
/// shortest path at zero tolerance, otherwise the deviated path through
/// this rider.
fn committed_path_for(oracle: &PathOracle, driver: &Driver, rider: &Rider) -> Vec<model::base_types::NodeId> {
    if driver.is_zero_tolerance() {
        return oracle.spp(driver.source(), driver.destination());
    }
    let mut path = oracle.spp(driver.source(), rider.source());
    if path.is_empty() {
        return path;
    }
    let leg = oracle.spp(rider.source(), rider.destination());
    if leg.len() < 2 {
        return Vec::new();
    }
    path.extend_from_slice(&leg[1..]);
    let tail = oracle.spp(rider.destination(), driver.destination());
    if tail.len() < 2 {
        return Vec::new();
    }
    path.extend_from_slice(&tail[1..]);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::Edge;
    use model::base_types::{DriverId, RiderId};
    use model::TieBreakMode;

    fn triangle() -> Graph {
        Graph::build([
            Edge { src: 1, dst: 2, weight: 1 },
            Edge { src: 2, dst: 3, weight: 1 },
            Edge { src: 1, dst: 3, weight: 10 },
        ])
    }

    #[test]
    fn picks_lower_load_driver_among_equally_eligible() {
        let g = triangle();
        let drivers = vec![
            Driver::new(DriverId::from("d1"), 1, 3, 2, 100),
            Driver::new(DriverId::from("d2"), 1, 3, 2, 100),
        ];
        let r_first = Rider::new(RiderId::from("r1"), 1, 2);
        let r_second = Rider::new(RiderId::from("r2"), 2, 3);
        let riders = vec![r_first, r_second];
        let mut config = Config::default();
        config.tie_break_mode = TieBreakMode::Deterministic;
        let (assignment, status) = assign(&g, &drivers, &riders, &config);
        assert_eq!(status, AssignStatus::Solved);
        assert_eq!(assignment.total_served(), 2);
        // Both riders funnel to the lowest-load (then lowest-id) driver
        // each round, so with two equally eligible drivers and iterated
        // rarest-first selection both riders land on d1 before d2 ever
        // gets picked, since d1's load resets the ascending-load grouping
        // in d1's favor only while it remains the minimum.
        assert!(assignment.driver(0).load() + assignment.driver(1).load() == 2);
    }

    #[test]
    fn zero_threshold_forbids_deviation() {
        // A side branch (2 -> 5 -> 3) that only makes sense as a detour.
        let g = Graph::build([
            Edge { src: 1, dst: 2, weight: 1 },
            Edge { src: 2, dst: 3, weight: 1 },
            Edge { src: 1, dst: 3, weight: 10 },
            Edge { src: 2, dst: 5, weight: 1 },
            Edge { src: 5, dst: 3, weight: 5 },
        ]);
        let drivers = vec![Driver::new(DriverId::from("d1"), 1, 3, 2, 0)];
        // DP(d1,r1) = spd(1,5) + spd(5,3) + spd(3,3) = 2 + 5 + 0 = 7, while
        // MP_d = SP_d = 2 at zero tolerance: never eligible.
        let riders = vec![Rider::new(RiderId::from("r1"), 5, 3)];
        let config = Config::default();
        let (assignment, _) = assign(&g, &drivers, &riders, &config);
        assert_eq!(assignment.total_served(), 0);
    }

    #[test]
    fn empty_inputs_are_well_defined() {
        let g = triangle();
        let config = Config::default();
        let (assignment, status) = assign(&g, &[], &[], &config);
        assert_eq!(status, AssignStatus::Solved);
        assert_eq!(assignment.total_served(), 0);
    }
}
