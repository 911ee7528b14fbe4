use eligibility::{deviated_path_length, max_permissible_path};
use good_lp::{constraint, variable, Expression, ProblemVariables, Solution, SolverModel, Variable};
use model::base_types::NodeId;
use model::{Assignment, Driver, Rider};
use path_oracle::PathOracle;

/// The decision variables and static feasibility mask shared by every ILP
/// variant: binary `x[i][j]`, integer `load[i] = sum_j x[i][j]`, and
/// the precomputed `DP(i,j) <= MP_i` mask used to pin infeasible cells to
/// zero. Built fresh for every solve — cheap next to the solve itself, and
/// it keeps each variant's build/solve/rebuild cycle independent.
pub struct BaseModel {
    pub x: Vec<Vec<Variable>>,
    pub load: Vec<Variable>,
    pub feasible: Vec<Vec<bool>>,
}

impl BaseModel {
    pub fn num_drivers(&self) -> usize {
        self.x.len()
    }

    pub fn num_riders(&self) -> usize {
        self.x.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn load_expr(&self, driver: usize) -> Expression {
        sum_vars(&self.x[driver])
    }

    pub fn rider_assignment_expr(&self, rider: usize) -> Expression {
        let column: Vec<Variable> = self.x.iter().map(|row| row[rider]).collect();
        sum_vars(&column)
    }

    pub fn total_riders_expr(&self) -> Expression {
        sum_vars(&self.x.iter().flatten().copied().collect::<Vec<_>>())
    }
}

pub fn sum_vars(vars: &[Variable]) -> Expression {
    vars.iter()
        .fold(Expression::from(0.0), |acc, &v| acc + v)
}

/// Builds the variables and the static `DP <= MP` feasibility mask. Returns
/// the `ProblemVariables` separately from `BaseModel` so callers can add
/// variant-specific variables to the same pool before fixing the objective
/// (good_lp ties the variable pool to the objective at `.maximise`/
/// `.minimise` time).
pub fn build(oracle: &PathOracle, drivers: &[Driver], riders: &[Rider]) -> (ProblemVariables, BaseModel) {
    let mut vars = ProblemVariables::new();
    let num_d = drivers.len();
    let num_r = riders.len();

    let mut feasible = vec![vec![false; num_r]; num_d];
    let mut x = Vec::with_capacity(num_d);
    for (i, driver) in drivers.iter().enumerate() {
        let mp = max_permissible_path(oracle, driver);
        let mut row = Vec::with_capacity(num_r);
        for (j, rider) in riders.iter().enumerate() {
            let dp = deviated_path_length(oracle, driver, rider);
            feasible[i][j] = dp.is_finite() && dp <= mp;
            row.push(vars.add(variable().binary()));
        }
        x.push(row);
    }

    let load: Vec<Variable> = (0..num_d)
        .map(|_| vars.add(variable().integer().min(0.0).max(num_r as f64)))
        .collect();

    (vars, BaseModel { x, load, feasible })
}

/// Applies the constraints shared by every variant: pin infeasible
/// cells to zero, define `load[i]`, unique assignment per rider, and
/// per-driver seat capacity.
pub fn with_base_constraints<M: SolverModel>(mut model: M, base: &BaseModel, drivers: &[Driver]) -> M {
    for i in 0..base.num_drivers() {
        for j in 0..base.num_riders() {
            if !base.feasible[i][j] {
                model = model.with(constraint!(base.x[i][j] <= 0.0));
            }
        }
        model = model.with(constraint!(base.load[i] == base.load_expr(i)));
        model = model.with(constraint!(
            base.load[i] <= drivers[i].initial_seats() as f64
        ));
    }
    for j in 0..base.num_riders() {
        model = model.with(constraint!(base.rider_assignment_expr(j) <= 1.0));
    }
    model
}

/// Reconstructs an `Assignment` from a solved model: which riders each
/// driver serves, in ascending rider-index order, plus a representative
/// committed route through `[d.src, sources…, destinations…, d.dst]`
/// (the same fixed waypoint convention as DeRideFair's route simulation —
/// the shared base model only constrains pairwise `DP(i,j) <= MP_i`, not a
/// joint multi-rider route length, so this route is for reporting rather
/// than a constraint the solver itself enforced).
pub fn extract_assignment(
    oracle: &PathOracle,
    base: &BaseModel,
    drivers: &[Driver],
    riders: &[Rider],
    solution: &impl Solution,
) -> Assignment {
    let mut assignment = Assignment::empty_for(drivers);
    for i in 0..base.num_drivers() {
        let mut served: Vec<usize> = (0..base.num_riders())
            .filter(|&j| solution.value(base.x[i][j]) > 0.5)
            .collect();
        served.sort_unstable();
        if served.is_empty() {
            continue;
        }

        let mut waypoints: Vec<NodeId> = vec![drivers[i].source()];
        waypoints.extend(served.iter().map(|&j| riders[j].source()));
        waypoints.extend(served.iter().map(|&j| riders[j].destination()));
        waypoints.push(drivers[i].destination());

        let mut path = vec![waypoints[0]];
        for pair in waypoints.windows(2) {
            let segment = oracle.spp(pair[0], pair[1]);
            if segment.len() > 1 {
                path.extend_from_slice(&segment[1..]);
            }
        }
        assignment.driver_mut(i).commit_path(path);
        for &j in &served {
            assignment.driver_mut(i).accept(riders[j].id());
        }
    }
    assignment
}
