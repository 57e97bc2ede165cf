use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a node (a placed recipe card) in a chart.
    pub struct NodeId;
}

/// Identifies a material in the catalog. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// Identifies a machine in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(pub u32);

/// Identifies a recipe in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub u32);

/// Identifies an edge by the connection it represents.
///
/// Edge identity is derived, not allocated: the same conceptual connection
/// (this output node, that input node, this material) always maps to the
/// same key, and a chart can hold at most one edge per key. The duplicate
/// check in `Chart::connect` is a key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    /// Node whose output port feeds this edge.
    pub from: NodeId,
    /// Node whose input port this edge supplies.
    pub to: NodeId,
    /// The material flowing across the edge.
    pub material: MaterialId,
}
