//! Parses `graph.csv`, `drivers.csv`, and `riders.csv` into the
//! domain types the rest of the crate operates on. Takes `impl Read` rather
//! than paths: opening the file and deciding how to report that failure is
//! the CLI's job (`anyhow` lives at that boundary, not here) — everything
//! this crate can go wrong with is already covered by `model::InputError`.

use std::collections::HashSet;
use std::io::Read;

use graph_store::{Edge, Graph};
use model::base_types::{DriverId, NodeId, RiderId};
use model::error::InputError;
use model::{Driver, Rider};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GraphRow {
    source: NodeId,
    destination: NodeId,
    weight: u64,
}

#[derive(Debug, Deserialize)]
struct DriverRow {
    id: String,
    source: NodeId,
    destination: NodeId,
    seats: u32,
    threshold: u32,
}

#[derive(Debug, Deserialize)]
struct RiderRow {
    id: String,
    source: NodeId,
    destination: NodeId,
}

/// Builds a `Graph` from `graph.csv`'s `source,destination,weight` rows.
pub fn read_graph<R: Read>(reader: R) -> Result<Graph, InputError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut edges = Vec::new();
    for result in rdr.deserialize::<GraphRow>() {
        let row = result.map_err(|e| malformed("graph.csv", e))?;
        edges.push(Edge {
            src: row.source,
            dst: row.destination,
            weight: row.weight,
        });
    }
    let edge_count = edges.len();
    let graph = Graph::build(edges);
    tracing::info!(edges = edge_count, "graph ingested");
    Ok(graph)
}

/// Parses `drivers.csv`'s `id,source,destination,seats,threshold` rows.
/// Every `source`/`destination` must already be a node of `graph`, and
/// every `id` must be unique within the file.
pub fn read_drivers<R: Read>(reader: R, graph: &Graph) -> Result<Vec<Driver>, InputError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut drivers = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for result in rdr.deserialize::<DriverRow>() {
        let row = result.map_err(|e| malformed("drivers.csv", e))?;
        if !seen_ids.insert(row.id.clone()) {
            return Err(InputError::DuplicateId {
                file: "drivers.csv",
                id: row.id,
            });
        }
        require_node(graph, &row.id, row.source)?;
        require_node(graph, &row.id, row.destination)?;
        drivers.push(Driver::new(
            DriverId::from(&row.id),
            row.source,
            row.destination,
            row.seats,
            row.threshold,
        ));
    }
    tracing::info!(drivers = drivers.len(), "drivers ingested");
    Ok(drivers)
}

/// Parses `riders.csv`'s `id,source,destination` rows. Same node and
/// uniqueness requirements as `read_drivers`.
pub fn read_riders<R: Read>(reader: R, graph: &Graph) -> Result<Vec<Rider>, InputError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut riders = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for result in rdr.deserialize::<RiderRow>() {
        let row = result.map_err(|e| malformed("riders.csv", e))?;
        if !seen_ids.insert(row.id.clone()) {
            return Err(InputError::DuplicateId {
                file: "riders.csv",
                id: row.id,
            });
        }
        require_node(graph, &row.id, row.source)?;
        require_node(graph, &row.id, row.destination)?;
        riders.push(Rider::new(RiderId::from(&row.id), row.source, row.destination));
    }
    tracing::info!(riders = riders.len(), "riders ingested");
    Ok(riders)
}

fn malformed(file: &'static str, err: csv::Error) -> InputError {
    InputError::MalformedRow {
        file,
        reason: err.to_string(),
    }
}

fn require_node(graph: &Graph, entity: &str, node: NodeId) -> Result<(), InputError> {
    if graph.contains_node(node) {
        Ok(())
    } else {
        Err(InputError::UnknownNode {
            entity: entity.to_string(),
            node,
        })
    }
}
