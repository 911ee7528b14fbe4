use good_lp::{constraint, variable, ProblemVariables, Solution, SolverModel, Variable};
use graph_store::Graph;
use model::{Assignment, Config, Driver, Rider};
use objective_framework::{BaseValue, Coefficient, Indicator, Level, Objective};
use path_oracle::PathOracle;

use crate::error::SolverError;
use crate::ilp::base::{build, extract_assignment, sum_vars, with_base_constraints, BaseModel};

/// Variant (d): lexicographic max-min over per-driver load. For
/// `t = 1..R` (`R = min(|riders|, max_i seats_i)`), introduces binaries
/// `y[i,t]` linked to `load[i]` by the big-M pair of constraints, solves
/// `max S_t = sum_i y[i,t]`, and fixes `sum_i y[i,t] = S_t*` before moving
/// to `t+1`. Each round rebuilds the model (as in the two-phase variant)
/// carrying forward every previously-fixed `S_t*` so the solve always sees
/// the full accumulated state. A final solve fixes every `S_t*` and
/// maximizes total riders as the last tie-breaker.
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
    let num_riders = riders.len();
    let max_seats = drivers.iter().map(|d| d.initial_seats()).max().unwrap_or(0);
    let r_bound = num_riders.min(max_seats as usize);
    let big_m = num_riders as f64;

    let mut fixed_sums: Vec<i64> = Vec::with_capacity(r_bound);

    for t in 1..=r_bound {
        let (mut vars, base) = build(&oracle, drivers, riders);
        let y_by_threshold = add_threshold_vars(&mut vars, &base, t);

        let objective = sum_vars(&y_by_threshold[t - 1]);
        let model = vars.maximise(objective).using(good_lp::microlp);
        let mut model = with_base_constraints(model, &base, drivers);
        for (idx, y) in y_by_threshold.iter().enumerate() {
            let threshold = (idx + 1) as f64;
            model = link_threshold(model, &base, y, threshold, big_m);
        }
        for (idx, &s_star) in fixed_sums.iter().enumerate() {
            model = model.with(constraint!(sum_vars(&y_by_threshold[idx]) == s_star as f64));
        }

        let solution = model.solve()?;
        let s_t_star: f64 = y_by_threshold[t - 1].iter().map(|&v| solution.value(v)).sum();
        fixed_sums.push(s_t_star.round() as i64);
        tracing::debug!(t, s_t_star = fixed_sums[t - 1], "lexicographic level solved");
    }

    let (mut vars, base) = build(&oracle, drivers, riders);
    let y_by_threshold = add_threshold_vars(&mut vars, &base, r_bound);
    let objective = base.total_riders_expr();
    let model = vars.maximise(objective).using(good_lp::microlp);
    let mut model = with_base_constraints(model, &base, drivers);
    for (idx, y) in y_by_threshold.iter().enumerate() {
        let threshold = (idx + 1) as f64;
        model = link_threshold(model, &base, y, threshold, big_m);
    }
    for (idx, &s_star) in fixed_sums.iter().enumerate() {
        model = model.with(constraint!(sum_vars(&y_by_threshold[idx]) == s_star as f64));
    }
    let solution = model.solve()?;

    let assignment = extract_assignment(&oracle, &base, drivers, riders, &solution);

    #[cfg(debug_assertions)]
    {
        let loads = assignment.loads();
        for (idx, &s_star) in fixed_sums.iter().enumerate() {
            let threshold = idx + 1;
            let observed = loads.iter().filter(|&&l| l >= threshold).count() as i64;
            debug_assert_eq!(
                observed, s_star,
                "lexicographic level {} must match its fixed optimum",
                threshold
            );
        }
    }

    let objective = lexicographic_objective(r_bound);
    let evaluated = objective.evaluate(assignment);
    tracing::info!(
        riders_served = evaluated.solution().total_served(),
        "ILP max-min (lexicographic) solved"
    );
    Ok(evaluated.into_solution())
}

fn add_threshold_vars(
    vars: &mut ProblemVariables,
    base: &BaseModel,
    up_to: usize,
) -> Vec<Vec<Variable>> {
    (1..=up_to)
        .map(|_| {
            (0..base.num_drivers())
                .map(|_| vars.add(variable().binary()))
                .collect()
        })
        .collect()
}

fn link_threshold<M: SolverModel>(
    mut model: M,
    base: &BaseModel,
    y: &[Variable],
    threshold: f64,
    big_m: f64,
) -> M {
    for i in 0..base.num_drivers() {
        model = model.with(constraint!(base.load[i] >= threshold * y[i]));
        model = model.with(constraint!(
            base.load[i] <= (threshold - 1.0) + big_m * y[i]
        ));
    }
    model
}

/// Count-of-drivers-at-or-above-threshold indicators, one level per
/// threshold (most important first), with total riders served as the
/// final tie-break level. Minimized by `objective_framework::Objective`,
/// so each level is the negative of the count/total it represents — used
/// here purely to phrase the solved assignment as an `EvaluatedSolution`
/// for consistent downstream comparison/reporting, not to drive the solve
/// itself (the ILP already found the lexicographically optimal loads).
fn lexicographic_objective(r_bound: usize) -> Objective<Assignment> {
    struct ThresholdCount(usize);
    impl Indicator<Assignment> for ThresholdCount {
        fn evaluate(&self, solution: &Assignment) -> BaseValue {
            let count = solution
                .loads()
                .into_iter()
                .filter(|&load| load >= self.0)
                .count();
            BaseValue::Integer(-(count as i64))
        }
        fn name(&self) -> String {
            format!("driversAtOrAboveLoad{}", self.0)
        }
    }
    struct TotalServed;
    impl Indicator<Assignment> for TotalServed {
        fn evaluate(&self, solution: &Assignment) -> BaseValue {
            BaseValue::Integer(-(solution.total_served() as i64))
        }
        fn name(&self) -> String {
            String::from("totalServed")
        }
    }

    let mut levels: Vec<Level<Assignment>> = (1..=r_bound)
        .map(|t| {
            Level::new(vec![(
                Coefficient::Integer(1),
                Box::new(ThresholdCount(t)) as Box<dyn Indicator<Assignment>>,
            )])
        })
        .collect();
    levels.push(Level::new(vec![(
        Coefficient::Integer(1),
        Box::new(TotalServed) as Box<dyn Indicator<Assignment>>,
    )]));
    Objective::new(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::Edge;
    use model::base_types::{DriverId, RiderId};

    #[test]
    fn prefers_two_and_one_over_three_and_zero() {
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
        let mut loads = assignment.loads();
        loads.sort_unstable();
        assert_eq!(loads, vec![1, 2]);
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
