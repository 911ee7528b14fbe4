//! Turns a solved `Assignment` into summary metrics: riders
//! served, per-driver loads, dispersion, and fairness. Everything here is
//! exact arithmetic over the assignment's own counts — rounding is a
//! presentation concern that belongs to whatever renders a `Metrics`, not
//! to this crate.

use model::base_types::{DriverId, NodeId, RiderId};
use model::{Assignment, Driver};
use serde::Serialize;

/// Summary statistics over one solved `Assignment`. All fields are
/// full-precision `f64`; round only when displaying them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_riders_served: usize,
    pub per_driver_load: Vec<usize>,
    pub mean_load: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub gini: f64,
    pub seat_utilization: f64,
    pub zero_load_drivers: usize,
    pub load_spread: usize,
    pub fairness_ratio: f64,
}

/// One driver's full breakdown: committed route and the riders it carries,
/// in acceptance order. Supplements the scalar `Metrics` above with the
/// per-driver detail the original prototype's result dump printed so a
/// caller doesn't have to re-derive it from the raw `Assignment`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverLoad {
    pub driver_id: DriverId,
    pub load: usize,
    pub initial_seats: u32,
    pub remaining_seats: u32,
    pub committed_path: Vec<NodeId>,
    pub accepted_riders: Vec<RiderId>,
}

/// Per-driver breakdown for every driver in `assignment`, same order as
/// the input driver slice.
pub fn driver_loads(assignment: &Assignment) -> Vec<DriverLoad> {
    assignment
        .iter()
        .map(|d| DriverLoad {
            driver_id: d.driver_id(),
            load: d.load(),
            initial_seats: d.initial_seats(),
            remaining_seats: d.remaining_seats(),
            committed_path: d.committed_path().to_vec(),
            accepted_riders: d.accepted().to_vec(),
        })
        .collect()
}

/// Builds the summary metrics for `assignment`. `drivers` must be the same
/// slice (same order) the assignment was produced from, since seat
/// utilization needs each driver's `initial_seats`.
pub fn build(assignment: &Assignment, drivers: &[Driver]) -> Metrics {
    let per_driver_load = assignment.loads();
    let num_drivers = per_driver_load.len();
    let total_riders_served = assignment.total_served();

    let mean_load = if num_drivers == 0 {
        0.0
    } else {
        total_riders_served as f64 / num_drivers as f64
    };

    let variance = if num_drivers == 0 {
        0.0
    } else {
        per_driver_load
            .iter()
            .map(|&load| (load as f64 - mean_load).powi(2))
            .sum::<f64>()
            / num_drivers as f64
    };
    let std_dev = variance.sqrt();

    let gini = gini_coefficient(&per_driver_load);

    let total_seats: usize = drivers.iter().map(|d| d.initial_seats() as usize).sum();
    let seat_utilization = if total_seats == 0 {
        0.0
    } else {
        total_riders_served as f64 / total_seats as f64
    };

    let zero_load_drivers = per_driver_load.iter().filter(|&&load| load == 0).count();

    let max_load = per_driver_load.iter().copied().max().unwrap_or(0);
    let min_load = per_driver_load.iter().copied().min().unwrap_or(0);
    let load_spread = max_load.saturating_sub(min_load);
    let fairness_ratio = if max_load == 0 {
        1.0
    } else {
        min_load as f64 / max_load as f64
    };

    let metrics = Metrics {
        total_riders_served,
        per_driver_load,
        mean_load,
        variance,
        std_dev,
        gini,
        seat_utilization,
        zero_load_drivers,
        load_spread,
        fairness_ratio,
    };
    tracing::info!(
        total_riders_served = metrics.total_riders_served,
        gini = metrics.gini,
        fairness_ratio = metrics.fairness_ratio,
        "metrics computed"
    );
    metrics
}

/// `G = (2 * sum_i i*sorted_load_i) / (n * sum(load)) - (n+1)/n`, `1`-indexed
/// over ascending-sorted loads. `0` when every load is `0`.
fn gini_coefficient(loads: &[usize]) -> f64 {
    let n = loads.len();
    if n == 0 {
        return 0.0;
    }
    let total: usize = loads.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let mut sorted = loads.to_vec();
    sorted.sort_unstable();

    let weighted_sum: f64 = sorted
        .iter()
        .enumerate()
        .map(|(idx, &load)| (idx + 1) as f64 * load as f64)
        .sum();

    (2.0 * weighted_sum) / (n as f64 * total as f64) - (n as f64 + 1.0) / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::base_types::{DriverId, RiderId};

    fn drivers(seats: &[model::base_types::Seats]) -> Vec<Driver> {
        seats
            .iter()
            .enumerate()
            .map(|(i, &s)| Driver::new(DriverId::from(&format!("d{i}")), 1, 2, s, 100))
            .collect()
    }

    #[test]
    fn empty_assignment_is_well_defined() {
        let drivers = drivers(&[]);
        let assignment = Assignment::empty_for(&drivers);
        let metrics = build(&assignment, &drivers);
        assert_eq!(metrics.total_riders_served, 0);
        assert_eq!(metrics.variance, 0.0);
        assert_eq!(metrics.gini, 0.0);
        assert_eq!(metrics.fairness_ratio, 1.0);
    }

    #[test]
    fn perfectly_even_load_has_zero_gini_and_variance() {
        let drivers = drivers(&[2, 2]);
        let mut assignment = Assignment::empty_for(&drivers);
        assignment.driver_mut(0).accept(RiderId::from("r1"));
        assignment.driver_mut(1).accept(RiderId::from("r2"));
        let metrics = build(&assignment, &drivers);
        assert_eq!(metrics.total_riders_served, 2);
        assert_eq!(metrics.variance, 0.0);
        assert_eq!(metrics.gini, 0.0);
        assert_eq!(metrics.fairness_ratio, 1.0);
    }

    #[test]
    fn skewed_load_lowers_fairness_ratio() {
        let drivers = drivers(&[3, 3]);
        let mut assignment = Assignment::empty_for(&drivers);
        assignment.driver_mut(0).accept(RiderId::from("r1"));
        assignment.driver_mut(0).accept(RiderId::from("r2"));
        assignment.driver_mut(0).accept(RiderId::from("r3"));
        let metrics = build(&assignment, &drivers);
        assert_eq!(metrics.total_riders_served, 3);
        assert_eq!(metrics.zero_load_drivers, 1);
        assert_eq!(metrics.load_spread, 3);
        assert_eq!(metrics.fairness_ratio, 0.0);
        assert!(metrics.gini > 0.0);
    }

    #[test]
    fn driver_loads_reports_committed_path_and_riders() {
        let drivers = drivers(&[2]);
        let mut assignment = Assignment::empty_for(&drivers);
        assignment.driver_mut(0).commit_path(vec![1, 2, 3]);
        assignment.driver_mut(0).accept(RiderId::from("r1"));
        let loads = driver_loads(&assignment);
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].load, 1);
        assert_eq!(loads[0].remaining_seats, 1);
        assert_eq!(loads[0].committed_path, vec![1, 2, 3]);
        assert_eq!(loads[0].accepted_riders, vec![RiderId::from("r1")]);
    }
}
