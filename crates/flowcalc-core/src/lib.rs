//! Flowcalc Core -- the flow-graph consistency engine behind a
//! production-chain calculator.
//!
//! Users place recipe nodes on a canvas and wire material outputs to
//! material inputs. This crate owns the rules that decide whether a
//! proposed connection is legal, how much quantity it commits, how that
//! commit updates the per-port bookkeeping on both endpoints, and how
//! deletion keeps the graph consistent. Rendering, drag mechanics, and
//! asset lookup belong to presentation layers built on top.
//!
//! # Connection Pipeline
//!
//! Each call to [`chart::Chart::connect`] runs the following checks in
//! order, refusing with a typed [`chart::Rejection`] and no state change
//! when one fails:
//!
//! 1. **Existence** -- both endpoint nodes must still be in the chart.
//! 2. **Material match** -- the output and input handles must carry the
//!    same material; no conversion is performed.
//! 3. **Duplicate** -- at most one edge per (source, target, material).
//! 4. **Capacity** -- an exhausted source refuses; otherwise the
//!    committed quantity is `min(source headroom, target headroom)`.
//! 5. **Commit** -- the edge and both port increments are applied in one
//!    transition, then an event is emitted.
//!
//! # Key Types
//!
//! - [`chart::Chart`] -- authoritative store of nodes and edges; owns
//!   every mutation entry point.
//! - [`catalog::Catalog`] -- immutable materials/machines/recipes,
//!   frozen at build time.
//! - [`port::Port`] -- a typed connection point tracking committed
//!   quantity against its per-cycle total.
//! - [`event::EventBus`] -- bounded, drop-oldest change notifications
//!   for observers.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for exact quantity
//!   arithmetic.

pub mod catalog;
pub mod chart;
pub mod event;
pub mod fixed;
pub mod id;
pub mod port;
pub mod query;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
