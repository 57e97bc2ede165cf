//! Chart state: nodes, edges, and the connection rules between them.
//!
//! The [`Chart`] is the single authoritative store for a flow graph. All
//! mutation goes through its methods; presentation layers hold `&Chart`
//! and observe changes through the [`revision`](Chart::revision) counter
//! and the [`event_bus`](Chart::event_bus).
//!
//! # Connection semantics
//!
//! Quantities are resolved once, at connection time: a committed edge
//! carries `min(source headroom, target headroom)` and is never revisited
//! when later edges compete for the same port. Allocation is strictly
//! first-come-first-served.
//!
//! Removing an edge (or cascading one away with its node) does **not**
//! credit the committed quantity back to the surviving ports. Committed
//! usage is a one-way ratchet; re-drawing a deleted connection finds less
//! headroom than the original had. Known limitation, kept for parity with
//! the flow semantics this engine models.

use crate::catalog::Catalog;
use crate::event::{ChartEvent, EventBus};
use crate::fixed::Fixed64;
use crate::id::{EdgeKey, MaterialId, NodeId, RecipeId};
use crate::port::{Port, PortDirection, ports_for};
use crate::query::{EdgeSnapshot, NodeSnapshot, PortView};
use slotmap::SlotMap;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Error and outcome types
// ---------------------------------------------------------------------------

/// Errors that can occur during chart operations.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("recipe not found: {0:?}")]
    RecipeNotFound(RecipeId),
}

/// Why a proposed connection was refused.
///
/// Refusals are ordinary outcomes of [`Chart::connect`], not failures: the
/// chart is left untouched and the caller can surface the reason to the
/// user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The source node is not in the chart (e.g. deleted mid-gesture).
    #[error("source node does not exist")]
    SourceMissing,
    /// The target node is not in the chart.
    #[error("target node does not exist")]
    TargetMissing,
    /// The two handles carry different materials; no conversion is done.
    #[error("source and target ports carry different materials")]
    MaterialMismatch,
    /// An edge already exists for this (source, target, material) triple.
    #[error("these nodes are already connected for this material")]
    DuplicateEdge,
    /// The source port has no headroom left to commit.
    #[error("source port is fully committed")]
    SourceExhausted,
    /// The named material is not a port of the node's recipe. Reaching
    /// this is a caller bug: handles offered by a UI always name one of
    /// the recipe's ingredients.
    #[error("no matching port for the requested material")]
    PortNotFound,
}

/// A proposed connection from an output handle to an input handle.
/// Handles are identified by the material they carry, as on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub source: NodeId,
    pub source_material: MaterialId,
    pub target: NodeId,
    pub target_material: MaterialId,
}

/// A committed connection: the edge that was created and the quantity it
/// transfers per cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Committed {
    pub edge: EdgeKey,
    pub amount: Fixed64,
}

// ---------------------------------------------------------------------------
// Core data structures
// ---------------------------------------------------------------------------

/// 2-D canvas position of a node. Plain UI state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Pan/zoom state of the canvas. Plain UI state with no invariant
/// implications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Per-node data stored in the chart.
#[derive(Debug, Clone)]
pub struct Node {
    /// The recipe this node was created from.
    pub recipe: RecipeId,
    /// Canvas position.
    pub position: Position,
    /// Ports materialized from the recipe at creation time. Only
    /// `amount_used` changes afterwards.
    pub ports: Vec<Port>,
    /// Transient selection flag.
    pub selected: bool,
}

/// Per-edge data stored in the chart. The edge's identity (endpoints and
/// material) lives in its [`EdgeKey`].
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Quantity committed by this edge, fixed at creation time.
    pub amount: Fixed64,
    /// Transient selection flag.
    pub selected: bool,
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// The flow graph: nodes (placed recipe cards) and edges (committed
/// connections), with per-port committed-quantity bookkeeping.
///
/// Invariant maintained by every mutation path: for each port,
/// `amount_used` equals the sum of `amount` over all edges bound to that
/// (node, direction, material) port.
#[derive(Debug, Default)]
pub struct Chart {
    nodes: SlotMap<NodeId, Node>,
    edges: BTreeMap<EdgeKey, EdgeData>,
    viewport: Viewport,
    /// Bumped once per completed mutation. Observers compare revisions to
    /// detect change; a half-applied transition is never observable.
    revision: u64,
    /// Buffered change notifications, drained by the presentation layer
    /// after each gesture.
    pub event_bus: EventBus,
}

impl Chart {
    /// Create a new, empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // -----------------------------------------------------------------------
    // Node lifecycle
    // -----------------------------------------------------------------------

    /// Place a node for `recipe` at `position`.
    ///
    /// Ports are materialized from the recipe once, with nothing committed.
    /// Fails without touching the chart when the recipe id does not resolve
    /// in the catalog.
    pub fn add_node(
        &mut self,
        catalog: &Catalog,
        recipe: RecipeId,
        position: Position,
    ) -> Result<NodeId, ChartError> {
        let def = catalog
            .get_recipe(recipe)
            .ok_or(ChartError::RecipeNotFound(recipe))?;
        let node = self.nodes.insert(Node {
            recipe,
            position,
            ports: ports_for(def),
            selected: false,
        });
        self.touch();
        self.event_bus.emit(ChartEvent::NodeAdded { node, recipe });
        Ok(node)
    }

    /// Remove a node and every edge that references it as source or target.
    ///
    /// Quantity those edges committed on surviving endpoints stays
    /// committed (see the module docs). No-op for ids not in the chart.
    pub fn remove_node(&mut self, node: NodeId) {
        if self.nodes.remove(node).is_none() {
            return;
        }
        let stale: Vec<EdgeKey> = self
            .edges
            .keys()
            .filter(|key| key.from == node || key.to == node)
            .copied()
            .collect();
        for key in &stale {
            self.edges.remove(key);
        }
        self.touch();
        for key in stale {
            self.event_bus.emit(ChartEvent::EdgeRemoved { edge: key });
        }
        self.event_bus.emit(ChartEvent::NodeRemoved { node });
    }

    /// Remove a single edge. No cascading; the quantity it committed on
    /// both endpoint ports stays committed. No-op for unknown keys.
    pub fn remove_edge(&mut self, edge: EdgeKey) {
        if self.edges.remove(&edge).is_none() {
            return;
        }
        self.touch();
        self.event_bus.emit(ChartEvent::EdgeRemoved { edge });
    }

    /// Move a node. No-op for ids not in the chart.
    pub fn set_position(&mut self, node: NodeId, position: Position) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.position = position;
            self.touch();
        }
    }

    // -----------------------------------------------------------------------
    // Connection validation & commit
    // -----------------------------------------------------------------------

    /// Validate a proposed connection and, if legal, commit it.
    ///
    /// Checks run in order: endpoint existence, material match, duplicate
    /// edge, source headroom. The committed quantity is
    /// `min(source headroom, target headroom)`; a target that is already
    /// fully supplied elsewhere yields a zero-amount edge. On success the
    /// edge and both port increments are applied in the same transition;
    /// a refusal leaves the chart untouched.
    pub fn connect(&mut self, connection: Connection) -> Result<Committed, Rejection> {
        if !self.nodes.contains_key(connection.source) {
            return self.refuse(connection, Rejection::SourceMissing);
        }
        if !self.nodes.contains_key(connection.target) {
            return self.refuse(connection, Rejection::TargetMissing);
        }
        if connection.source_material != connection.target_material {
            return self.refuse(connection, Rejection::MaterialMismatch);
        }
        let material = connection.source_material;
        let key = EdgeKey {
            from: connection.source,
            to: connection.target,
            material,
        };
        if self.edges.contains_key(&key) {
            return self.refuse(connection, Rejection::DuplicateEdge);
        }

        let Some(source_port) =
            self.port_index(connection.source, PortDirection::Output, material)
        else {
            debug_assert!(false, "output handle names a material its recipe does not emit");
            return self.refuse(connection, Rejection::PortNotFound);
        };
        let Some(target_port) = self.port_index(connection.target, PortDirection::Input, material)
        else {
            debug_assert!(false, "input handle names a material its recipe does not accept");
            return self.refuse(connection, Rejection::PortNotFound);
        };

        let available = self.nodes[connection.source].ports[source_port].remaining();
        let required = self.nodes[connection.target].ports[target_port].remaining();
        if available <= Fixed64::ZERO {
            return self.refuse(connection, Rejection::SourceExhausted);
        }
        let amount = available.min(required);

        // Commit: edge plus both port increments settle before the event.
        self.nodes[connection.source].ports[source_port].amount_used += amount;
        self.nodes[connection.target].ports[target_port].amount_used += amount;
        self.edges.insert(
            key,
            EdgeData {
                amount,
                selected: false,
            },
        );
        self.touch();
        self.event_bus.emit(ChartEvent::EdgeAdded { edge: key, amount });
        Ok(Committed { edge: key, amount })
    }

    /// Record a refusal for observers and return it. Chart state is
    /// untouched.
    fn refuse(&mut self, connection: Connection, reason: Rejection) -> Result<Committed, Rejection> {
        self.event_bus
            .emit(ChartEvent::ConnectionRejected { connection, reason });
        Err(reason)
    }

    // -----------------------------------------------------------------------
    // Port lookup
    // -----------------------------------------------------------------------

    /// Find the first port on `node` matching (direction, material).
    ///
    /// Returns `None` when the node is absent or its recipe has no such
    /// port. A recipe that lists the same material twice on one side has
    /// two such ports; the first occurrence binds.
    pub fn find_port(
        &self,
        node: NodeId,
        direction: PortDirection,
        material: MaterialId,
    ) -> Option<&Port> {
        self.nodes
            .get(node)?
            .ports
            .iter()
            .find(|p| p.direction == direction && p.material == material)
    }

    fn port_index(
        &self,
        node: NodeId,
        direction: PortDirection,
        material: MaterialId,
    ) -> Option<usize> {
        self.nodes
            .get(node)?
            .ports
            .iter()
            .position(|p| p.direction == direction && p.material == material)
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Replace the node selection. Ids not in the chart are ignored, and
    /// deletion clears stale selections structurally (the flag lives on
    /// the element).
    pub fn set_selected_nodes(&mut self, selected: &[NodeId]) {
        for (id, node) in self.nodes.iter_mut() {
            node.selected = selected.contains(&id);
        }
        self.touch();
    }

    /// Replace the edge selection. Keys not in the chart are ignored.
    pub fn set_selected_edges(&mut self, selected: &[EdgeKey]) {
        for (key, edge) in self.edges.iter_mut() {
            edge.selected = selected.contains(key);
        }
        self.touch();
    }

    /// Delete the current selection: selected nodes first (cascading their
    /// edges), then any selected edges that survived the cascade.
    pub fn remove_selected(&mut self) {
        let nodes: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.selected)
            .map(|(id, _)| id)
            .collect();
        for node in nodes {
            self.remove_node(node);
        }
        let edges: Vec<EdgeKey> = self
            .edges
            .iter()
            .filter(|(_, edge)| edge.selected)
            .map(|(key, _)| *key)
            .collect();
        for edge in edges {
            self.remove_edge(edge);
        }
    }

    // -----------------------------------------------------------------------
    // Viewport
    // -----------------------------------------------------------------------

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.touch();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Get the node data for a given node ID.
    pub fn get_node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node)
    }

    /// Get the edge data for a given edge key.
    pub fn get_edge(&self, edge: EdgeKey) -> Option<&EdgeData> {
        self.edges.get(&edge)
    }

    /// Returns true if the node exists in the chart.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Returns true if the edge exists in the chart.
    pub fn contains_edge(&self, edge: EdgeKey) -> bool {
        self.edges.contains_key(&edge)
    }

    /// Total number of nodes in the chart.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges in the chart.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over all node IDs and their data.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Iterate over all edge keys and their data, in key order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &EdgeData)> {
        self.edges.iter().map(|(key, data)| (*key, data))
    }

    /// Current revision. Bumped once per completed mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Build an owned snapshot of one node for rendering or FFI.
    pub fn node_snapshot(&self, node: NodeId) -> Option<NodeSnapshot> {
        let data = self.nodes.get(node)?;
        Some(NodeSnapshot {
            id: node,
            recipe: data.recipe,
            position: data.position,
            selected: data.selected,
            ports: data
                .ports
                .iter()
                .map(|port| PortView {
                    direction: port.direction,
                    material: port.material,
                    amount_total: port.amount_total,
                    amount_used: port.amount_used,
                    remaining: port.remaining(),
                })
                .collect(),
            input_edges: self
                .edges
                .keys()
                .filter(|key| key.to == node)
                .copied()
                .collect(),
            output_edges: self
                .edges
                .keys()
                .filter(|key| key.from == node)
                .copied()
                .collect(),
        })
    }

    /// Owned snapshots of every edge, in key order.
    pub fn edge_snapshots(&self) -> Vec<EdgeSnapshot> {
        self.edges
            .iter()
            .map(|(key, data)| EdgeSnapshot {
                id: *key,
                from: key.from,
                to: key.to,
                material: key.material,
                amount: data.amount,
                selected: data.selected,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use crate::fixed::f64_to_fixed64 as fx;
    use crate::test_utils::*;

    /// Helper: chart with a pumpjack (oil out 60) feeding nothing yet,
    /// plus a generator (oil in 40) and a boiler (oil in 30).
    fn pump_generator_boiler() -> (Catalog, Chart, NodeId, NodeId, NodeId) {
        let catalog = oil_chain_catalog();
        let mut chart = Chart::new();
        let pump = add_recipe_node(&mut chart, &catalog, "oil_extraction");
        let generator = add_recipe_node(&mut chart, &catalog, "diesel_generator");
        let boiler = add_recipe_node(&mut chart, &catalog, "oil_boiler");
        (catalog, chart, pump, generator, boiler)
    }

    fn oil_link(catalog: &Catalog, from: NodeId, to: NodeId) -> Connection {
        let oil = catalog.material_id("oil").unwrap();
        Connection {
            source: from,
            source_material: oil,
            target: to,
            target_material: oil,
        }
    }

    // -----------------------------------------------------------------------
    // Node lifecycle
    // -----------------------------------------------------------------------

    #[test]
    fn add_node_materializes_ports() {
        let catalog = oil_chain_catalog();
        let mut chart = Chart::new();
        let pump = add_recipe_node(&mut chart, &catalog, "oil_extraction");

        let node = chart.get_node(pump).unwrap();
        assert_eq!(node.ports.len(), 1);
        assert_eq!(node.ports[0].direction, PortDirection::Output);
        assert_eq!(node.ports[0].amount_total, fx(60.0));
        assert_eq!(node.ports[0].amount_used, Fixed64::ZERO);
    }

    #[test]
    fn add_node_unknown_recipe_fails_without_mutation() {
        let catalog = oil_chain_catalog();
        let mut chart = Chart::new();
        let before = chart.revision();

        let result = chart.add_node(&catalog, RecipeId(999), Position::default());
        assert!(matches!(result, Err(ChartError::RecipeNotFound(_))));
        assert_eq!(chart.node_count(), 0);
        assert_eq!(chart.revision(), before);
    }

    #[test]
    fn remove_unknown_node_is_noop() {
        let (_catalog, mut chart, pump, _, _) = pump_generator_boiler();
        chart.remove_node(pump);
        let revision = chart.revision();
        chart.remove_node(pump);
        assert_eq!(chart.revision(), revision);
    }

    // -----------------------------------------------------------------------
    // Connection: success paths
    // -----------------------------------------------------------------------

    #[test]
    fn connect_commits_min_of_headrooms() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();

        let committed = chart.connect(oil_link(&catalog, pump, generator)).unwrap();
        assert_eq!(committed.amount, fx(40.0));

        let oil = catalog.material_id("oil").unwrap();
        let out = chart.find_port(pump, PortDirection::Output, oil).unwrap();
        let inp = chart
            .find_port(generator, PortDirection::Input, oil)
            .unwrap();
        assert_eq!(out.amount_used, fx(40.0));
        assert_eq!(inp.amount_used, fx(40.0));
        assert_eq!(chart.edge_count(), 1);
    }

    #[test]
    fn second_consumer_gets_leftover() {
        let (catalog, mut chart, pump, generator, boiler) = pump_generator_boiler();
        chart.connect(oil_link(&catalog, pump, generator)).unwrap();

        let committed = chart.connect(oil_link(&catalog, pump, boiler)).unwrap();
        // 60 total - 40 already committed leaves 20 of the 30 required.
        assert_eq!(committed.amount, fx(20.0));

        let oil = catalog.material_id("oil").unwrap();
        let out = chart.find_port(pump, PortDirection::Output, oil).unwrap();
        assert!(out.is_exhausted());
        let boiler_in = chart.find_port(boiler, PortDirection::Input, oil).unwrap();
        assert_eq!(boiler_in.amount_used, fx(20.0));
    }

    #[test]
    fn fully_supplied_target_yields_zero_amount_edge() {
        let catalog = oil_chain_catalog();
        let mut chart = Chart::new();
        let pump_a = add_recipe_node(&mut chart, &catalog, "oil_extraction");
        let pump_b = add_recipe_node(&mut chart, &catalog, "oil_extraction");
        let generator = add_recipe_node(&mut chart, &catalog, "diesel_generator");

        chart.connect(oil_link(&catalog, pump_a, generator)).unwrap();
        let committed = chart.connect(oil_link(&catalog, pump_b, generator)).unwrap();
        assert_eq!(committed.amount, Fixed64::ZERO);
        assert_eq!(chart.edge_count(), 2);
    }

    // -----------------------------------------------------------------------
    // Connection: rejection paths
    // -----------------------------------------------------------------------

    #[test]
    fn connect_missing_source_rejected() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        chart.remove_node(pump);

        let result = chart.connect(oil_link(&catalog, pump, generator));
        assert_eq!(result, Err(Rejection::SourceMissing));
        assert_eq!(chart.edge_count(), 0);
    }

    #[test]
    fn connect_missing_target_rejected() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        chart.remove_node(generator);

        let result = chart.connect(oil_link(&catalog, pump, generator));
        assert_eq!(result, Err(Rejection::TargetMissing));
    }

    #[test]
    fn connect_material_mismatch_rejected() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        let oil = catalog.material_id("oil").unwrap();
        let exhaust = catalog.material_id("exhaust").unwrap();

        let result = chart.connect(Connection {
            source: pump,
            source_material: oil,
            target: generator,
            target_material: exhaust,
        });
        assert_eq!(result, Err(Rejection::MaterialMismatch));
        assert_eq!(chart.edge_count(), 0);
    }

    #[test]
    fn connect_duplicate_rejected_and_state_unchanged() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        chart.connect(oil_link(&catalog, pump, generator)).unwrap();
        let revision = chart.revision();

        let result = chart.connect(oil_link(&catalog, pump, generator));
        assert_eq!(result, Err(Rejection::DuplicateEdge));
        assert_eq!(chart.edge_count(), 1);
        assert_eq!(chart.revision(), revision);

        let oil = catalog.material_id("oil").unwrap();
        let out = chart.find_port(pump, PortDirection::Output, oil).unwrap();
        assert_eq!(out.amount_used, fx(40.0));
    }

    #[test]
    fn connect_exhausted_source_rejected() {
        let catalog = oil_chain_catalog();
        let mut chart = Chart::new();
        let pump = add_recipe_node(&mut chart, &catalog, "oil_extraction");
        // Two generators drain the pump's 60 completely (40 + 20).
        let first = add_recipe_node(&mut chart, &catalog, "diesel_generator");
        let second = add_recipe_node(&mut chart, &catalog, "diesel_generator");
        chart.connect(oil_link(&catalog, pump, first)).unwrap();
        chart.connect(oil_link(&catalog, pump, second)).unwrap();

        let third = add_recipe_node(&mut chart, &catalog, "diesel_generator");
        let result = chart.connect(oil_link(&catalog, pump, third));
        assert_eq!(result, Err(Rejection::SourceExhausted));
        assert_eq!(chart.edge_count(), 2);
    }

    #[test]
    fn rejection_emits_event_but_keeps_revision() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        let oil = catalog.material_id("oil").unwrap();
        let exhaust = catalog.material_id("exhaust").unwrap();
        let revision = chart.revision();

        let _ = chart.connect(Connection {
            source: pump,
            source_material: oil,
            target: generator,
            target_material: exhaust,
        });

        assert_eq!(chart.revision(), revision);
        let events = chart.event_bus.drain(EventKind::ConnectionRejected);
        assert_eq!(events.len(), 1);
        match events[0] {
            ChartEvent::ConnectionRejected { reason, .. } => {
                assert_eq!(reason, Rejection::MaterialMismatch);
            }
            other => panic!("expected ConnectionRejected, got: {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Deletion
    // -----------------------------------------------------------------------

    #[test]
    fn remove_node_cascades_only_its_edges() {
        let (catalog, mut chart, pump, generator, boiler) = pump_generator_boiler();
        let second_pump = add_recipe_node(&mut chart, &catalog, "oil_extraction");
        chart.connect(oil_link(&catalog, pump, generator)).unwrap();
        chart.connect(oil_link(&catalog, pump, boiler)).unwrap();
        let survivor = chart
            .connect(oil_link(&catalog, second_pump, boiler))
            .unwrap();

        chart.remove_node(pump);

        assert!(!chart.contains_node(pump));
        assert_eq!(chart.edge_count(), 1);
        assert!(chart.contains_edge(survivor.edge));
        assert!(chart.contains_node(generator));
        assert!(chart.contains_node(boiler));
    }

    #[test]
    fn removal_does_not_credit_back_usage() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        let committed = chart.connect(oil_link(&catalog, pump, generator)).unwrap();
        let oil = catalog.material_id("oil").unwrap();

        chart.remove_edge(committed.edge);

        // Both ports keep their committed 40.
        let out = chart.find_port(pump, PortDirection::Output, oil).unwrap();
        let inp = chart
            .find_port(generator, PortDirection::Input, oil)
            .unwrap();
        assert_eq!(out.amount_used, fx(40.0));
        assert_eq!(inp.amount_used, fx(40.0));

        // Re-drawing the connection only finds the leftover headroom: the
        // source has 20 left, the target claims to need nothing more.
        let recommitted = chart.connect(oil_link(&catalog, pump, generator)).unwrap();
        assert_eq!(recommitted.amount, Fixed64::ZERO);
    }

    #[test]
    fn remove_unknown_edge_is_noop() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        let committed = chart.connect(oil_link(&catalog, pump, generator)).unwrap();
        chart.remove_edge(committed.edge);
        let revision = chart.revision();
        chart.remove_edge(committed.edge);
        assert_eq!(chart.revision(), revision);
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    #[test]
    fn remove_selected_deletes_nodes_then_edges() {
        let (catalog, mut chart, pump, generator, boiler) = pump_generator_boiler();
        let to_generator = chart.connect(oil_link(&catalog, pump, generator)).unwrap();
        let to_boiler = chart.connect(oil_link(&catalog, pump, boiler)).unwrap();

        // Select the generator node and the pump->boiler edge.
        chart.set_selected_nodes(&[generator]);
        chart.set_selected_edges(&[to_boiler.edge]);
        chart.remove_selected();

        assert!(!chart.contains_node(generator));
        assert!(!chart.contains_edge(to_generator.edge), "cascaded away");
        assert!(!chart.contains_edge(to_boiler.edge), "explicitly selected");
        assert!(chart.contains_node(pump));
        assert!(chart.contains_node(boiler));
    }

    #[test]
    fn selection_replaces_previous_selection() {
        let (_catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        chart.set_selected_nodes(&[pump]);
        chart.set_selected_nodes(&[generator]);
        assert!(!chart.get_node(pump).unwrap().selected);
        assert!(chart.get_node(generator).unwrap().selected);
    }

    // -----------------------------------------------------------------------
    // Events and snapshots
    // -----------------------------------------------------------------------

    #[test]
    fn mutations_emit_events_in_order() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        chart.event_bus.clear();

        let committed = chart.connect(oil_link(&catalog, pump, generator)).unwrap();
        chart.remove_node(pump);

        let added = chart.event_bus.drain(EventKind::EdgeAdded);
        assert_eq!(
            added,
            vec![ChartEvent::EdgeAdded {
                edge: committed.edge,
                amount: fx(40.0),
            }]
        );
        let removed = chart.event_bus.drain(EventKind::EdgeRemoved);
        assert_eq!(
            removed,
            vec![ChartEvent::EdgeRemoved {
                edge: committed.edge,
            }]
        );
        assert_eq!(
            chart.event_bus.drain(EventKind::NodeRemoved),
            vec![ChartEvent::NodeRemoved { node: pump }]
        );
    }

    #[test]
    fn node_snapshot_reflects_ports_and_edges() {
        let (catalog, mut chart, pump, generator, _) = pump_generator_boiler();
        let committed = chart.connect(oil_link(&catalog, pump, generator)).unwrap();

        let snapshot = chart.node_snapshot(generator).unwrap();
        assert_eq!(snapshot.input_edges, vec![committed.edge]);
        assert!(snapshot.output_edges.iter().all(|k| k.from == generator));
        let oil_in = snapshot
            .ports
            .iter()
            .find(|p| p.direction == PortDirection::Input)
            .unwrap();
        assert_eq!(oil_in.amount_used, fx(40.0));
        assert_eq!(oil_in.remaining, Fixed64::ZERO);
    }

    #[test]
    fn edge_snapshots_in_key_order() {
        let (catalog, mut chart, pump, generator, boiler) = pump_generator_boiler();
        chart.connect(oil_link(&catalog, pump, generator)).unwrap();
        chart.connect(oil_link(&catalog, pump, boiler)).unwrap();

        let snapshots = chart.edge_snapshots();
        assert_eq!(snapshots.len(), 2);
        assert!(snapshots.windows(2).all(|w| w[0].id < w[1].id));
    }

    // -----------------------------------------------------------------------
    // Viewport
    // -----------------------------------------------------------------------

    #[test]
    fn viewport_defaults_and_updates() {
        let mut chart = Chart::new();
        assert_eq!(chart.viewport().zoom, 1.0);

        chart.set_viewport(Viewport {
            x: 120.0,
            y: -40.0,
            zoom: 0.5,
        });
        assert_eq!(chart.viewport().x, 120.0);
        assert_eq!(chart.viewport().zoom, 0.5);
    }
}
