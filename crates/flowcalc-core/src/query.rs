//! Read-only query API for inspecting chart state.
//!
//! Provides snapshot types that aggregate chart state into convenient views
//! for rendering, UI, and FFI consumers. All types are owned copies -- no
//! references into internal chart storage.

use crate::chart::Position;
use crate::fixed::Fixed64;
use crate::id::{EdgeKey, MaterialId, NodeId, RecipeId};
use crate::port::PortDirection;

// ---------------------------------------------------------------------------
// Node snapshot
// ---------------------------------------------------------------------------

/// An aggregated, read-only view of a single port on a node.
#[derive(Debug, Clone, Copy)]
pub struct PortView {
    pub direction: PortDirection,
    pub material: MaterialId,
    pub amount_total: Fixed64,
    pub amount_used: Fixed64,
    /// `amount_total - amount_used`, precomputed for display.
    pub remaining: Fixed64,
}

/// An aggregated, read-only view of a single node in the chart.
#[derive(Debug, Clone)]
pub struct NodeSnapshot {
    /// The node's ID in the chart.
    pub id: NodeId,
    /// The recipe this node was created from.
    pub recipe: RecipeId,
    /// Canvas position.
    pub position: Position,
    /// Whether the node is currently selected.
    pub selected: bool,
    /// Port states in recipe order.
    pub ports: Vec<PortView>,
    /// Edges feeding into this node.
    pub input_edges: Vec<EdgeKey>,
    /// Edges leaving this node.
    pub output_edges: Vec<EdgeKey>,
}

// ---------------------------------------------------------------------------
// Edge snapshot
// ---------------------------------------------------------------------------

/// An aggregated, read-only view of a single edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeSnapshot {
    /// The edge's key (also its identity).
    pub id: EdgeKey,
    /// Source node.
    pub from: NodeId,
    /// Destination node.
    pub to: NodeId,
    /// The material flowing across the edge.
    pub material: MaterialId,
    /// Quantity committed by this edge.
    pub amount: Fixed64,
    /// Whether the edge is currently selected.
    pub selected: bool,
}
