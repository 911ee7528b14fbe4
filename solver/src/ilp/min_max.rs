use good_lp::{constraint, variable, Expression, Solution, SolverModel, Variable};
use graph_store::Graph;
use model::{Assignment, Config, Driver, Rider};
use path_oracle::PathOracle;

use crate::error::SolverError;
use crate::ilp::base::{build, extract_assignment, sum_vars, with_base_constraints};

/// Variant (b): min-max scalarization of (riders, variance).
/// `g1 = 1 - f1/f1_max` is total riders, inverted and normalized; `g2 =
/// f2/f2_max` is load variance, normalized against the variance of the
/// degenerate all-in-one-driver allocation. `z >= g1, z >= g2; minimize z`.
///
/// The variance term `f2 = (1/|D|) * sum_i (load_i - mu)^2` is quadratic in
/// decision variables (`mu` itself depends on `load`), so each `(load_i -
/// mu)^2` is replaced by its piecewise-linear upper envelope: the tangent
/// lines of `x^2` at every integer breakpoint `k` in `-|R|..=|R|` (a
/// piecewise-linear upper envelope over the integer domain 0..|R|,
/// extended to negative deviations since a driver's load can sit below the
/// mean). `deltaSq_i >= 2k*delta_i - k^2` for every breakpoint gives the
/// tightest valid lower bound at each integer `delta_i`, which is exact
/// since loads and `f1` are integral.
pub fn assign(
    graph: &Graph,
    drivers: &[Driver],
    riders: &[Rider],
    _config: &Config,
) -> Result<Assignment, SolverError> {
    let oracle = PathOracle::new(graph);
    let num_d = drivers.len();
    let num_r = riders.len();

    if num_d == 0 || num_r == 0 {
        return Ok(Assignment::empty_for(drivers));
    }

    let (mut vars, base) = build(&oracle, drivers, riders);

    let total_seats: f64 = drivers.iter().map(|d| d.initial_seats() as f64).sum();
    let f1_max = (num_r as f64).min(total_seats).max(1.0);

    let degenerate_mean = num_r as f64 / num_d as f64;
    let f2_max = (((num_r as f64 - degenerate_mean).powi(2)
        + (num_d as f64 - 1.0) * degenerate_mean.powi(2))
        / num_d as f64)
        .max(1e-9);

    let z: Variable = vars.add(variable().min(0.0));
    let delta_sq: Vec<Variable> = (0..num_d).map(|_| vars.add(variable().min(0.0))).collect();

    let model = vars.minimise(z).using(good_lp::microlp);
    let mut model = with_base_constraints(model, &base, drivers);

    let f1 = base.total_riders_expr();
    let g1_bound: Expression = z * f1_max + f1.clone();
    model = model.with(constraint!(g1_bound >= f1_max));

    let inv_d = 1.0 / num_d as f64;
    for i in 0..num_d {
        let delta: Expression = Expression::from(base.load[i]) - f1.clone() * inv_d;
        for k in -(num_r as i64)..=(num_r as i64) {
            let kf = k as f64;
            let envelope: Expression = delta.clone() * (2.0 * kf) - kf * kf;
            model = model.with(constraint!(delta_sq[i] >= envelope));
        }
    }
    let f2: Expression = sum_vars(&delta_sq) * inv_d;
    let g2_bound: Expression = Expression::from(z) * f2_max - f2;
    model = model.with(constraint!(g2_bound >= 0.0));

    let solution = model.solve()?;
    let assignment = extract_assignment(&oracle, &base, drivers, riders, &solution);
    tracing::info!(
        riders_served = assignment.total_served(),
        z = solution.value(z),
        "ILP min-max scalarization solved"
    );
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::Edge;
    use model::base_types::{DriverId, RiderId};

    #[test]
    fn spreads_load_across_two_drivers() {
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
}
