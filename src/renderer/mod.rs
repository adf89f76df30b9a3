//! Field rendering
//!
//! Split so the geometry is testable without a browser: `palette` and
//! `links` are pure, `canvas` owns the wasm-only Canvas2D drawing.

pub mod links;
pub mod palette;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use links::{Link, PointerLink, link_alpha, particle_links, pointer_links};
