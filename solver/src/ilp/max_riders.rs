use good_lp::SolverModel;
use graph_store::Graph;
use model::{Assignment, Config, Driver, Rider};
use path_oracle::PathOracle;

use crate::error::SolverError;
use crate::ilp::base::{build, extract_assignment, with_base_constraints};

/// Variant (a): `max sum_{i,j} x[i,j]` subject only to the shared base
/// constraints.
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
    let (vars, base) = build(&oracle, drivers, riders);
    let objective = base.total_riders_expr();

    let model = vars.maximise(objective).using(good_lp::microlp);
    let model = with_base_constraints(model, &base, drivers);
    let solution = model.solve()?;

    let assignment = extract_assignment(&oracle, &base, drivers, riders, &solution);
    tracing::info!(
        riders_served = assignment.total_served(),
        "ILP max-riders solved"
    );
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::Edge;
    use model::base_types::{DriverId, RiderId};

    #[test]
    fn scenario_one_serves_both_riders() {
        let g = Graph::build([
            Edge { src: 1, dst: 2, weight: 1 },
            Edge { src: 2, dst: 3, weight: 1 },
            Edge { src: 1, dst: 3, weight: 10 },
        ]);
        let drivers = vec![Driver::new(DriverId::from("d1"), 1, 3, 2, 50)];
        let riders = vec![
            Rider::new(RiderId::from("r1"), 1, 2),
            Rider::new(RiderId::from("r2"), 2, 3),
        ];
        let config = Config::default();
        let assignment = assign(&g, &drivers, &riders, &config).unwrap();
        assert_eq!(assignment.total_served(), 2);
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
