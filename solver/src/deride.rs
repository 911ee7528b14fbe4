use crate::rng::TieBreaker;
use eligibility::{Corridor, EligibilityMatrix};
use graph_store::Graph;
use model::base_types::NodeId;
use model::{AssignStatus, Assignment, Config, Driver, Rider};
use path_oracle::PathOracle;

/// Greedy efficiency assigner. Proceeds while `sum(offers) > 0`:
/// picks the rarest rider, hands it to the eligible driver with the most
/// remaining seats, commits that driver's route on first acceptance, and
/// from then on restricts the driver's eligibility to its corridor.
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
    let mut corridors: Vec<Option<Corridor>> = (0..drivers.len()).map(|_| None).collect();

    let iteration_cap = config
        .iteration_cap
        .unwrap_or_else(|| drivers.len() * riders.len());
    let mut status = AssignStatus::Solved;
    let mut iterations = 0usize;

    while er.total_offers() > 0 {
        if iterations >= iteration_cap {
            tracing::warn!(iterations, iteration_cap, "DeRide hit its iteration cap");
            status = AssignStatus::BudgetExceeded;
            break;
        }
        iterations += 1;

        let r_selected = select_rarest_rider(&er, riders.len(), &mut tie_breaker);

        let eligible_drivers: Vec<usize> = (0..drivers.len())
            .filter(|&d| er.is_eligible(d, r_selected))
            .collect();
        if eligible_drivers.is_empty() {
            er.zero_column(r_selected);
            continue;
        }

        let max_seats = eligible_drivers
            .iter()
            .map(|&d| assignment.driver(d).remaining_seats())
            .max()
            .unwrap();
        let tied: Vec<usize> = eligible_drivers
            .into_iter()
            .filter(|&d| assignment.driver(d).remaining_seats() == max_seats)
            .collect();
        let d_assigned = tie_breaker.pick(&tied);

        if assignment.driver(d_assigned).remaining_seats() == 0 {
            er.set(d_assigned, r_selected, false);
            continue;
        }

        let driver = &drivers[d_assigned];
        let rider = &riders[r_selected];

        if !assignment.driver(d_assigned).has_committed_path() {
            let path = if driver.is_zero_tolerance() {
                oracle.spp(driver.source(), driver.destination())
            } else {
                deviated_path_for_assignment(&oracle, driver, rider)
            };
            let corridor = Corridor::build(graph, &path, config.corridor_radius);
            assignment.driver_mut(d_assigned).commit_path(path);
            corridors[d_assigned] = Some(corridor);
        }

        assignment.driver_mut(d_assigned).accept(rider.id());

        if assignment.driver(d_assigned).remaining_seats() == 0 {
            er.zero_row(d_assigned);
        } else if let Some(corridor) = &corridors[d_assigned] {
            er.recompute_row(d_assigned, |rj| corridor.eligible(&riders[rj]));
        }
        er.zero_column(r_selected);
    }

    tracing::info!(
        riders_served = assignment.total_served(),
        iterations,
        ?status,
        "DeRide run complete"
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

/// The driver's committed route the first time a rider is accepted under
/// threshold > 0: `spp(d.src, r.src) ++ spp(r.src, r.dst)[1..] ++
/// spp(r.dst, d.dst)[1..]`, the deviated path through the triggering rider.
fn deviated_path_for_assignment(oracle: &PathOracle, driver: &Driver, rider: &Rider) -> Vec<NodeId> {
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

    fn triangle() -> Graph {
        Graph::build([
            Edge { src: 1, dst: 2, weight: 1 },
            Edge { src: 2, dst: 3, weight: 1 },
            Edge { src: 1, dst: 3, weight: 10 },
        ])
    }

    #[test]
    fn scenario_one_serves_both_riders() {
        let g = triangle();
        let drivers = vec![Driver::new(DriverId::from("d1"), 1, 3, 2, 50)];
        let riders = vec![
            Rider::new(RiderId::from("r1"), 1, 2),
            Rider::new(RiderId::from("r2"), 2, 3),
        ];
        let config = Config::default();
        let (assignment, status) = assign(&g, &drivers, &riders, &config);
        assert_eq!(status, AssignStatus::Solved);
        assert_eq!(assignment.total_served(), 2);
        assert_eq!(assignment.driver(0).remaining_seats(), 0);
        // Each rider appears exactly once: the just-assigned rider's column
        // must end the iteration at zero even when the corridor recompute
        // would otherwise re-admit it (its own source/destination sit on
        // the committed path).
        let accepted = assignment.driver(0).accepted();
        assert_eq!(accepted.len(), 2);
        assert_ne!(accepted[0], accepted[1]);
        assert!(accepted.contains(&RiderId::from("r1")));
        assert!(accepted.contains(&RiderId::from("r2")));
    }

    #[test]
    fn respects_seat_capacity() {
        let g = triangle();
        let drivers = vec![Driver::new(DriverId::from("d1"), 1, 3, 1, 50)];
        let riders = vec![
            Rider::new(RiderId::from("r1"), 1, 2),
            Rider::new(RiderId::from("r2"), 2, 3),
        ];
        let config = Config::default();
        let (assignment, _) = assign(&g, &drivers, &riders, &config);
        assert_eq!(assignment.total_served(), 1);
        assert_eq!(assignment.driver(0).remaining_seats(), 0);
    }

    #[test]
    fn no_drivers_or_riders_is_empty_without_error() {
        let g = triangle();
        let config = Config::default();
        let (assignment, status) = assign(&g, &[], &[], &config);
        assert_eq!(status, AssignStatus::Solved);
        assert_eq!(assignment.total_served(), 0);
    }

    #[test]
    fn unreachable_pair_yields_no_assignment() {
        let g = triangle();
        let drivers = vec![Driver::new(DriverId::from("d1"), 3, 1, 2, 100)];
        let riders = vec![Rider::new(RiderId::from("r1"), 3, 1)];
        let config = Config::default();
        let (assignment, _) = assign(&g, &drivers, &riders, &config);
        assert_eq!(assignment.total_served(), 0);
    }
}
