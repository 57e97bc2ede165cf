use crate::catalog::RecipeDef;
use crate::fixed::Fixed64;
use crate::id::MaterialId;

/// Which side of a node a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

/// A typed connection point on a node, bound to one material and one
/// direction.
///
/// `amount_total` is copied from the recipe ingredient when the node is
/// created and never changes. `amount_used` starts at zero and only grows
/// as connections commit quantity against the port; it never exceeds
/// `amount_total`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Port {
    pub direction: PortDirection,
    pub material: MaterialId,
    pub amount_total: Fixed64,
    pub amount_used: Fixed64,
}

impl Port {
    fn new(direction: PortDirection, material: MaterialId, amount_total: Fixed64) -> Self {
        Self {
            direction,
            material,
            amount_total,
            amount_used: Fixed64::ZERO,
        }
    }

    /// Headroom still available on this port.
    pub fn remaining(&self) -> Fixed64 {
        self.amount_total - self.amount_used
    }

    /// True once the full per-cycle quantity has been committed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() <= Fixed64::ZERO
    }
}

/// Materialize a node's port list from its recipe: one input port per
/// recipe input, one output port per recipe output, in recipe order.
///
/// Runs once at node-add time; only `amount_used` changes afterwards.
/// A recipe that lists the same material twice on one side produces two
/// ports; lookups by (direction, material) bind to the first.
pub fn ports_for(recipe: &RecipeDef) -> Vec<Port> {
    recipe
        .inputs
        .iter()
        .map(|entry| Port::new(PortDirection::Input, entry.material, entry.amount))
        .chain(
            recipe
                .outputs
                .iter()
                .map(|entry| Port::new(PortDirection::Output, entry.material, entry.amount)),
        )
        .collect()
}
