//! Rendering boundary
//!
//! The engine hands out a [`RenderSnapshot`] per frame; drawing backends
//! live outside this crate.

pub mod snapshot;

pub use snapshot::{DrawKind, Drawable, Overlays, RenderSnapshot};
