//! Change notifications for chart observers.
//!
//! The [`Chart`](crate::chart::Chart) emits a [`ChartEvent`] only after the
//! whole mutation has settled, so an observer draining the bus never sees an
//! edge without its port increments. Events are buffered per kind in bounded
//! drop-oldest rings; presentation layers drain them once per user gesture.
//!
//! Kinds an observer does not care about can be suppressed up front with
//! [`EventBus::suppress`]; suppressed kinds are never buffered and their
//! storage is released.

use crate::chart::{Connection, Rejection};
use crate::fixed::Fixed64;
use crate::id::*;
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A chart change notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    /// A node was placed.
    NodeAdded { node: NodeId, recipe: RecipeId },
    /// A node was removed (its edges are reported separately).
    NodeRemoved { node: NodeId },
    /// A connection was committed.
    EdgeAdded { edge: EdgeKey, amount: Fixed64 },
    /// An edge was removed, individually or by node-removal cascade.
    EdgeRemoved { edge: EdgeKey },
    /// A proposed connection was refused; the chart did not change.
    ConnectionRejected {
        connection: Connection,
        reason: Rejection,
    },
}

/// Discriminant of a [`ChartEvent`], used for buffer routing and
/// suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NodeAdded,
    NodeRemoved,
    EdgeAdded,
    EdgeRemoved,
    ConnectionRejected,
}

const EVENT_KIND_COUNT: usize = 5;

impl ChartEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ChartEvent::NodeAdded { .. } => EventKind::NodeAdded,
            ChartEvent::NodeRemoved { .. } => EventKind::NodeRemoved,
            ChartEvent::EdgeAdded { .. } => EventKind::EdgeAdded,
            ChartEvent::EdgeRemoved { .. } => EventKind::EdgeRemoved,
            ChartEvent::ConnectionRejected { .. } => EventKind::ConnectionRejected,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBuffer
// ---------------------------------------------------------------------------

/// A bounded event buffer. Holds at most `capacity` events; pushing into a
/// full buffer evicts the oldest entry. Eviction is counted, not silent, so
/// an observer that drained late can tell how much it missed.
#[derive(Debug)]
pub struct EventBuffer {
    ring: VecDeque<ChartEvent>,
    capacity: usize,
    emitted: u64,
    dropped: u64,
}

impl EventBuffer {
    /// A `capacity` of 0 is clamped to 1 so a buffer can always hold the
    /// most recent event.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ring: VecDeque::with_capacity(capacity),
            capacity,
            emitted: 0,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: ChartEvent) {
        if self.ring.len() == self.capacity {
            self.ring.pop_front();
            self.dropped += 1;
        }
        self.ring.push_back(event);
        self.emitted += 1;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Events pushed over the buffer's lifetime, evicted ones included.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Events evicted because the buffer was full when they arrived.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Buffered events, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ChartEvent> {
        self.ring.iter()
    }

    pub fn clear(&mut self) {
        self.ring.clear();
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// One [`EventBuffer`] per event kind, allocated on first emit of that
/// kind. Suppressing a kind frees its buffer and discards later emits.
#[derive(Debug)]
pub struct EventBus {
    buffers: [Option<EventBuffer>; EVENT_KIND_COUNT],
    suppressed: [bool; EVENT_KIND_COUNT],
    buffer_capacity: usize,
}

/// Roomy enough for the largest single gesture (a multi-select delete).
const DEFAULT_CAPACITY: usize = 64;

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(buffer_capacity: usize) -> Self {
        Self {
            buffers: Default::default(),
            suppressed: [false; EVENT_KIND_COUNT],
            buffer_capacity,
        }
    }

    /// Stop buffering a kind and release its storage. Emits of a
    /// suppressed kind cost nothing.
    pub fn suppress(&mut self, kind: EventKind) {
        self.suppressed[kind as usize] = true;
        self.buffers[kind as usize] = None;
    }

    pub fn is_suppressed(&self, kind: EventKind) -> bool {
        self.suppressed[kind as usize]
    }

    pub fn emit(&mut self, event: ChartEvent) {
        let slot = event.kind() as usize;
        if self.suppressed[slot] {
            return;
        }
        self.buffers[slot]
            .get_or_insert_with(|| EventBuffer::new(self.buffer_capacity))
            .push(event);
    }

    /// The buffer for `kind`, if that kind has ever been emitted.
    pub fn buffer(&self, kind: EventKind) -> Option<&EventBuffer> {
        self.buffers[kind as usize].as_ref()
    }

    pub fn buffered_count(&self, kind: EventKind) -> usize {
        self.buffer(kind).map_or(0, EventBuffer::len)
    }

    /// Lifetime emit count for `kind`, evicted events included.
    pub fn total_emitted(&self, kind: EventKind) -> u64 {
        self.buffer(kind).map_or(0, EventBuffer::emitted)
    }

    /// Take every buffered event of `kind`, oldest first, leaving the
    /// buffer empty.
    pub fn drain(&mut self, kind: EventKind) -> Vec<ChartEvent> {
        match self.buffers[kind as usize].as_mut() {
            Some(buffer) => {
                let events = buffer.iter().copied().collect();
                buffer.clear();
                events
            }
            None => Vec::new(),
        }
    }

    /// Empty every buffer. Suppression settings are kept.
    pub fn clear(&mut self) {
        for buffer in self.buffers.iter_mut().flatten() {
            buffer.clear();
        }
    }
}
