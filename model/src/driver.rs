use crate::base_types::{DriverId, NodeId, Percent, Seats};

/// A driver willing to carry riders between `source` and `destination`,
/// subject to a seat limit and a route-deviation tolerance expressed as a
/// percentage of their own shortest-path length.
///
/// Constructed once from ingest and never mutated; assigners track the
/// mutable `remaining_seats` counter separately in `Assignment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    id: DriverId,
    source: NodeId,
    destination: NodeId,
    initial_seats: Seats,
    threshold: Percent,
}

impl Driver {
    pub fn new(
        id: DriverId,
        source: NodeId,
        destination: NodeId,
        initial_seats: Seats,
        threshold: Percent,
    ) -> Driver {
        Driver {
            id,
            source,
            destination,
            initial_seats,
            threshold,
        }
    }

    pub fn id(&self) -> DriverId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn initial_seats(&self) -> Seats {
        self.initial_seats
    }

    pub fn threshold(&self) -> Percent {
        self.threshold
    }

    /// Threshold `t = 0` means no deviation is tolerated at all: the driver's
    /// maximum permissible path equals their own shortest path.
    pub fn is_zero_tolerance(&self) -> bool {
        self.threshold == 0
    }
}
