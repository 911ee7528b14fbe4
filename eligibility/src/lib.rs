pub mod corridor;

pub use corridor::Corridor;

use model::base_types::Distance;
use model::{Driver, Rider};
use path_oracle::PathOracle;

/// `DP(d, r) = spd(d.src, r.src) + spd(r.src, r.dst) + spd(r.dst, d.dst)`.
/// `Distance::Infinity` propagates through addition, so an unreachable leg
/// yields an infinite (ineligible) deviated path with no special-casing.
pub fn deviated_path_length(oracle: &PathOracle, driver: &Driver, rider: &Rider) -> Distance {
    oracle.spd(driver.source(), rider.source())
        + oracle.spd(rider.source(), rider.destination())
        + oracle.spd(rider.destination(), driver.destination())
}

/// `MP_d = SP_d * (1 + t/100)`.
pub fn max_permissible_path(oracle: &PathOracle, driver: &Driver) -> Distance {
    oracle
        .spd(driver.source(), driver.destination())
        .scale_by_percent(driver.threshold())
}

/// Binary driver x rider eligibility matrix plus its column-sum `offers`
/// vector, which must be kept consistent with `er` after every mutation.
pub struct EligibilityMatrix {
    er: Vec<Vec<bool>>,
    offers: Vec<usize>,
}

impl EligibilityMatrix {
    /// Builds the initial matrix under the standard rule: `ER[d][r] = 1` iff
    /// `DP(d, r)` is finite and `DP(d, r) <= MP_d`. The finiteness check is
    /// explicit rather than left to the `Infinity <= Infinity` case of
    /// `Distance`'s ordering: an unreachable deviated path is never
    /// eligible, even for a driver whose own shortest path is itself
    /// unreachable. The corridor variant is applied
    /// later, per committed driver, by the greedy assigners.
    pub fn build(oracle: &PathOracle, drivers: &[Driver], riders: &[Rider]) -> EligibilityMatrix {
        let er: Vec<Vec<bool>> = drivers
            .iter()
            .map(|driver| {
                let mp = max_permissible_path(oracle, driver);
                riders
                    .iter()
                    .map(|rider| {
                        let dp = deviated_path_length(oracle, driver, rider);
                        dp.is_finite() && dp <= mp
                    })
                    .collect()
            })
            .collect();

        let offers = Self::column_sums(&er, riders.len());
        tracing::info!(
            drivers = drivers.len(),
            riders = riders.len(),
            total_offers = offers.iter().sum::<usize>(),
            "eligibility matrix built"
        );
        EligibilityMatrix { er, offers }
    }

    fn column_sums(er: &[Vec<bool>], rider_count: usize) -> Vec<usize> {
        let mut offers = vec![0usize; rider_count];
        for row in er {
            for (r, &eligible) in row.iter().enumerate() {
                if eligible {
                    offers[r] += 1;
                }
            }
        }
        offers
    }

    pub fn drivers(&self) -> usize {
        self.er.len()
    }

    pub fn riders(&self) -> usize {
        self.offers.len()
    }

    pub fn is_eligible(&self, driver: usize, rider: usize) -> bool {
        self.er[driver][rider]
    }

    pub fn offers(&self, rider: usize) -> usize {
        self.offers[rider]
    }

    pub fn total_offers(&self) -> usize {
        self.offers.iter().sum()
    }

    /// Overwrites `ER[driver][rider]` and keeps `offers` consistent.
    pub fn set(&mut self, driver: usize, rider: usize, eligible: bool) {
        let was = self.er[driver][rider];
        if was == eligible {
            return;
        }
        self.er[driver][rider] = eligible;
        if eligible {
            self.offers[rider] += 1;
        } else {
            self.offers[rider] -= 1;
        }
    }

    /// Zeroes an entire driver row, e.g. once seats are exhausted.
    pub fn zero_row(&mut self, driver: usize) {
        for rider in 0..self.riders() {
            self.set(driver, rider, false);
        }
    }

    /// Zeroes an entire rider column, e.g. once the rider has been assigned.
    pub fn zero_column(&mut self, rider: usize) {
        for driver in 0..self.drivers() {
            self.set(driver, rider, false);
        }
    }

    /// Replaces driver `driver`'s row with the outcome of `predicate` over
    /// every rider, used when a driver's eligibility switches to the
    /// corridor rule after committing a path.
    pub fn recompute_row<F>(&mut self, driver: usize, mut predicate: F)
    where
        F: FnMut(usize) -> bool,
    {
        for rider in 0..self.riders() {
            let eligible = predicate(rider);
            self.set(driver, rider, eligible);
        }
    }

    #[cfg(debug_assertions)]
    pub fn assert_offers_consistent(&self) {
        let recomputed = Self::column_sums(&self.er, self.riders());
        debug_assert_eq!(self.offers, recomputed, "offers drifted from column sums of ER");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::{Edge, Graph};
    use model::base_types::RiderId;

    fn triangle_oracle(graph: &Graph) -> PathOracle {
        PathOracle::new(graph)
    }

    #[test]
    fn standard_rule_matches_scenario_one() {
        // Triangle graph: (1,2,1),(2,3,1),(1,3,10).
        let graph = Graph::build([
            Edge {
                src: 1,
                dst: 2,
                weight: 1,
            },
            Edge {
                src: 2,
                dst: 3,
                weight: 1,
            },
            Edge {
                src: 1,
                dst: 3,
                weight: 10,
            },
        ]);
        let oracle = triangle_oracle(&graph);
        let driver = Driver::new(model::base_types::DriverId::from("d1"), 1, 3, 2, 50);
        let r1 = Rider::new(RiderId::from("r1"), 1, 2);
        let r2 = Rider::new(RiderId::from("r2"), 2, 3);

        let matrix = EligibilityMatrix::build(&oracle, &[driver], &[r1, r2]);
        assert!(matrix.is_eligible(0, 0));
        assert!(matrix.is_eligible(0, 1));
        assert_eq!(matrix.offers(0), 1);
        assert_eq!(matrix.offers(1), 1);
    }

    #[test]
    fn set_keeps_offers_consistent() {
        let graph = Graph::build([Edge {
            src: 1,
            dst: 2,
            weight: 1,
        }]);
        let oracle = triangle_oracle(&graph);
        let driver = Driver::new(model::base_types::DriverId::from("d1"), 1, 2, 1, 100);
        let rider = Rider::new(RiderId::from("r1"), 1, 2);
        let mut matrix = EligibilityMatrix::build(&oracle, &[driver], &[rider]);
        assert_eq!(matrix.offers(0), 1);
        matrix.zero_column(0);
        assert_eq!(matrix.offers(0), 0);
        matrix.assert_offers_consistent();
    }
}
