//! The client-side sketch mirror.
//!
//! Holds a local [`Sketch`] kept eventually consistent with the server's
//! authoritative copy. Local edits are applied optimistically and returned
//! as protocol lines for the caller to send; every line received from the
//! server is applied as-is. The mirror is never authoritative -- whatever
//! the server relays wins.

use sketchsync_core::protocol::{Command, ProtocolError};
use sketchsync_core::shapes::{Rgb, Shape};
use sketchsync_core::sketch::Sketch;
use sketchsync_core::storage::{self, StorageResult};
use std::path::Path;

#[derive(Debug, Default)]
pub struct SketchMirror {
    sketch: Sketch,
    dirty: bool,
}

impl SketchMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for the rendering/input layer.
    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    /// True once since the last call if the mirror changed (redraw needed).
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Apply a line received from the server.
    pub fn apply_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        let command: Command = line.parse()?;
        command.apply(&mut self.sketch);
        self.dirty = true;
        Ok(())
    }

    /// Add a locally drawn shape, assigning the next client-side id
    /// (`shape_count + 1`, echoed as the new count on the wire).
    ///
    /// Returns the assigned id and the line to send to the server.
    pub fn add_shape(&mut self, shape: Shape) -> (u32, String) {
        let id = self.sketch.shape_count() + 1;
        let command = Command::Add {
            id,
            count: id,
            shape,
        };
        (id, self.mutate(command))
    }

    /// Translate shape `id`, returning the line to send.
    pub fn move_shape(&mut self, id: u32, dx: i32, dy: i32) -> String {
        self.mutate(Command::Move { id, dx, dy })
    }

    /// Recolor shape `id`, returning the line to send.
    pub fn recolor_shape(&mut self, id: u32, color: Rgb) -> String {
        self.mutate(Command::Recolor { id, color })
    }

    /// Delete shape `id`, returning the line to send.
    pub fn delete_shape(&mut self, id: u32) -> String {
        self.mutate(Command::Delete { id })
    }

    /// Id of the topmost shape under a pointer position, if any.
    pub fn topmost_at(&self, x: i32, y: i32) -> Option<u32> {
        self.sketch.topmost_at(x, y)
    }

    /// Save the current mirror as a local JSON snapshot.
    pub fn save(&self, path: &Path) -> StorageResult<()> {
        storage::save_sketch(path, &self.sketch)
    }

    /// Load a mirror from a snapshot written by [`SketchMirror::save`].
    pub fn load(path: &Path) -> StorageResult<Self> {
        Ok(Self {
            sketch: storage::load_sketch(path)?,
            dirty: true,
        })
    }

    fn mutate(&mut self, command: Command) -> String {
        command.apply(&mut self.sketch);
        self.dirty = true;
        command.to_string()
    }
}
