//! SketchSync Core Library
//!
//! Platform-agnostic shape, sketch-store, and wire-protocol types shared by
//! the relay server and editor clients.

pub mod protocol;
pub mod shapes;
pub mod sketch;
pub mod storage;

pub use protocol::{Command, ProtocolError};
pub use shapes::{Ellipse, Polyline, Rectangle, Rgb, Segment, Shape};
pub use sketch::Sketch;
