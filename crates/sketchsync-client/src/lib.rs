//! SketchSync client library.
//!
//! The two pieces an editor front end needs: a [`ServerLink`] carrying
//! protocol lines to and from the relay server, and a [`SketchMirror`]
//! holding the local, optimistically updated copy of the shared sketch.
//! The GUI layer polls the link, feeds received lines into the mirror, and
//! redraws when the mirror reports itself dirty.

pub mod link;
pub mod mirror;

pub use link::{LinkEvent, ServerLink};
pub use mirror::SketchMirror;
