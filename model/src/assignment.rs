use crate::base_types::{DriverId, NodeId, RiderId, Seats};
use crate::driver::Driver;

/// One driver's mutable state during and after a run: the committed route
/// (empty until the driver's first rider is accepted) and the
/// ordered list of accepted riders. `remaining_seats` is the only mutable
/// field exposed outside of this structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverAssignment {
    driver_id: DriverId,
    initial_seats: Seats,
    remaining_seats: Seats,
    committed_path: Vec<NodeId>,
    accepted: Vec<RiderId>,
}

impl DriverAssignment {
    fn empty(driver: &Driver) -> DriverAssignment {
        DriverAssignment {
            driver_id: driver.id(),
            initial_seats: driver.initial_seats(),
            remaining_seats: driver.initial_seats(),
            committed_path: Vec::new(),
            accepted: Vec::new(),
        }
    }

    pub fn driver_id(&self) -> DriverId {
        self.driver_id
    }

    pub fn initial_seats(&self) -> Seats {
        self.initial_seats
    }

    pub fn remaining_seats(&self) -> Seats {
        self.remaining_seats
    }

    pub fn load(&self) -> usize {
        self.accepted.len()
    }

    pub fn accepted(&self) -> &[RiderId] {
        &self.accepted
    }

    pub fn committed_path(&self) -> &[NodeId] {
        &self.committed_path
    }

    pub fn has_committed_path(&self) -> bool {
        !self.committed_path.is_empty()
    }

    pub fn commit_path(&mut self, path: Vec<NodeId>) {
        debug_assert!(
            self.committed_path.is_empty(),
            "a driver's committed path is set exactly once, at first acceptance"
        );
        self.committed_path = path;
    }

    /// Appends `rider` and decrements `remaining_seats`. Panics if the
    /// driver has no remaining seats — callers must check `remaining_seats`
    /// before committing.
    pub fn accept(&mut self, rider: RiderId) {
        assert!(
            self.remaining_seats > 0,
            "attempted to over-commit driver {} beyond initial_seats",
            self.driver_id
        );
        self.accepted.push(rider);
        self.remaining_seats -= 1;
    }
}

/// The outcome of one assigner run: one `DriverAssignment` per driver, in
/// the same order as the input driver slice. Append-only per driver;
/// constructed once per run and owned exclusively by the assigner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    per_driver: Vec<DriverAssignment>,
}

impl Assignment {
    pub fn empty_for(drivers: &[Driver]) -> Assignment {
        Assignment {
            per_driver: drivers.iter().map(DriverAssignment::empty).collect(),
        }
    }

    pub fn driver(&self, index: usize) -> &DriverAssignment {
        &self.per_driver[index]
    }

    pub fn driver_mut(&mut self, index: usize) -> &mut DriverAssignment {
        &mut self.per_driver[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DriverAssignment> {
        self.per_driver.iter()
    }

    pub fn len(&self) -> usize {
        self.per_driver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_driver.is_empty()
    }

    /// Total riders served across all drivers: `sum_d |accepted(d)|`.
    pub fn total_served(&self) -> usize {
        self.per_driver.iter().map(DriverAssignment::load).sum()
    }

    pub fn loads(&self) -> Vec<usize> {
        self.per_driver.iter().map(DriverAssignment::load).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_types::{DriverId, RiderId};

    fn driver(seats: Seats) -> Driver {
        Driver::new(DriverId::from("d1"), 1, 2, seats, 10)
    }

    #[test]
    fn accept_decrements_remaining_seats() {
        let d = driver(2);
        let mut a = Assignment::empty_for(std::slice::from_ref(&d));
        a.driver_mut(0).accept(RiderId::from("r1"));
        assert_eq!(a.driver(0).remaining_seats(), 1);
        assert_eq!(a.total_served(), 1);
    }

    #[test]
    #[should_panic]
    fn accept_beyond_capacity_panics() {
        let d = driver(1);
        let mut a = Assignment::empty_for(std::slice::from_ref(&d));
        a.driver_mut(0).accept(RiderId::from("r1"));
        a.driver_mut(0).accept(RiderId::from("r2"));
    }
}
