//! The shared sketch store.
//!
//! One instance lives on the server as the authoritative copy; every client
//! holds its own mirror and applies the same mutation lines to it. The store
//! itself is single-threaded -- whoever shares it across tasks wraps it in a
//! mutex and never holds that lock across socket I/O.

use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier-ordered map of shapes plus a running creation counter.
///
/// `shape_count` tracks shapes ever created, not the live population: `add`
/// overwrites it from the wire and `remove` never decrements it, so the map
/// may have holes below the current count. Ids increase monotonically, which
/// makes descending id order the natural "on top" stacking order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    shapes: BTreeMap<u32, Shape>,
    shape_count: u32,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `shape` under `id` and adopt the sender's running count.
    ///
    /// Overwrites silently if `id` is already present: ids are assigned
    /// client-side, so a collision between concurrent adds is resolved as
    /// last-write-wins in server arrival order.
    pub fn add(&mut self, id: u32, shape: Shape, count: u32) {
        self.shapes.insert(id, shape);
        self.shape_count = count;
    }

    /// Remove the shape under `id`; a no-op if it is absent.
    pub fn remove(&mut self, id: u32) -> Option<Shape> {
        self.shapes.remove(&id)
    }

    pub fn shape(&self, id: u32) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn shape_mut(&mut self, id: u32) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Number of shapes ever added, as echoed on `add` lines.
    pub fn shape_count(&self) -> u32 {
        self.shape_count
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Id of the topmost shape containing the point, scanning most recently
    /// added (highest id) first.
    pub fn topmost_at(&self, x: i32, y: i32) -> Option<u32> {
        self.shapes
            .iter()
            .rev()
            .find(|(_, shape)| shape.contains(x, y))
            .map(|(id, _)| *id)
    }

    /// All `(id, shape)` pairs in ascending id order (drawing order, and the
    /// order newcomer sync replays them in).
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Shape)> {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }
}
