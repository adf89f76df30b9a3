//! Deterministic particle simulation
//!
//! All field logic lives here. This module must be pure and deterministic:
//! - One physics step per processed frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{FieldConfig, FieldState, Particle, Tint};
pub use tick::step;
