use good_lp::{constraint, variable, Solution, SolverModel};
use graph_store::Graph;
use model::{Assignment, Config, Driver, Rider};
use path_oracle::PathOracle;

use crate::error::SolverError;
use crate::ilp::base::{build, extract_assignment, with_base_constraints};

/// Variant (c): classical two-phase max-min. Phase 1 maximizes
/// `z = min_i load[i]`; phase 2 fixes `load[i] >= z*` for every driver and
/// maximizes total riders as a tie-breaker. Each phase rebuilds the model
/// from scratch, since good_lp ties the variable pool to the objective at
/// solve time — adding constraints and changing the objective is
/// satisfied by replaying the accumulated state into a fresh model rather
/// than mutating one in place.
pub fn assign(
    graph: &Graph,
    drivers: &[Driver],
    riders: &[Rider],
    _config: &Config,
) -> Result<Assignment, SolverError> {
    if drivers.is_empty() || riders.is_empty() {
        return Ok(Assignment::empty_for(drivers));
    }

    let oracle = PathOracle::new(graph);

    let z_star = {
        let (vars, base) = build(&oracle, drivers, riders);
        let mut vars = vars;
        let z = vars.add(variable().min(0.0).max(riders.len() as f64));
        let model = vars.maximise(z).using(good_lp::microlp);
        let mut model = with_base_constraints(model, &base, drivers);
        for i in 0..base.num_drivers() {
            model = model.with(constraint!(z <= base.load[i]));
        }
        let solution = model.solve()?;
        solution.value(z).round() as i64
    };
    tracing::info!(z_star, "ILP max-min phase 1 complete");

    let (vars, base) = build(&oracle, drivers, riders);
    let objective = base.total_riders_expr();
    let model = vars.maximise(objective).using(good_lp::microlp);
    let mut model = with_base_constraints(model, &base, drivers);
    for i in 0..base.num_drivers() {
        model = model.with(constraint!(base.load[i] >= z_star as f64));
    }
    let solution = model.solve()?;

    let assignment = extract_assignment(&oracle, &base, drivers, riders, &solution);
    debug_assert!(
        assignment
            .iter()
            .all(|d| d.load() as i64 >= z_star || base.num_drivers() == 0),
        "phase 2 must respect the phase-1 floor"
    );
    tracing::info!(
        riders_served = assignment.total_served(),
        z_star,
        "ILP max-min (two-phase) solved"
    );
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::Edge;
    use model::base_types::{DriverId, RiderId};

    #[test]
    fn two_drivers_capacity_two_each_share_three_riders() {
        let g = Graph::build([
            Edge { src: 1, dst: 2, weight: 1 },
            Edge { src: 2, dst: 3, weight: 1 },
            Edge { src: 1, dst: 3, weight: 2 },
        ]);
        let drivers = vec![
            Driver::new(DriverId::from("d1"), 1, 3, 2, 100),
            Driver::new(DriverId::from("d2"), 1, 3, 2, 100),
        ];
        let riders = vec![
            Rider::new(RiderId::from("r1"), 1, 2),
            Rider::new(RiderId::from("r2"), 1, 2),
            Rider::new(RiderId::from("r3"), 1, 2),
        ];
        let config = Config::default();
        let assignment = assign(&g, &drivers, &riders, &config).unwrap();
        let loads = assignment.loads();
        assert_eq!(loads.iter().sum::<usize>(), 3);
        assert!(*loads.iter().min().unwrap() >= 1);
    }

    #[test]
    fn empty_drivers_returns_empty_assignment() {
        let g = Graph::build([Edge { src: 1, dst: 2, weight: 1 }]);
        let riders = vec![Rider::new(RiderId::from("r1"), 1, 2)];
        let config = Config::default();
        let assignment = assign(&g, &[], &riders, &config).unwrap();
        assert!(assignment.is_empty());
    }

    #[test]
    fn empty_riders_returns_empty_assignment() {
        let g = Graph::build([Edge { src: 1, dst: 2, weight: 1 }]);
        let drivers = vec![Driver::new(DriverId::from("d1"), 1, 2, 2, 50)];
        let config = Config::default();
        let assignment = assign(&g, &drivers, &[], &config).unwrap();
        assert!(assignment.is_empty());
    }
}
