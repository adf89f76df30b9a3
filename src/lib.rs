//! Drift Field - ambient particle backdrop for the tournament site
//!
//! Core modules:
//! - `sim`: Deterministic particle simulation (spawn, attraction, drift)
//! - `renderer`: Palette, link geometry and Canvas2D drawing
//! - `app`: Browser host integration (events, frame loop, dispose)
//! - `platform`: Browser/native time and storage abstraction
//! - `session`: Squad registration state stored in LocalStorage
//! - `settings`: Persisted render quality preferences

#[cfg(target_arch = "wasm32")]
pub mod app;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::SquadSession;
pub use settings::{QualityPreset, Settings};

/// Field tuning constants
pub mod consts {
    /// Minimum wall-clock gap between processed frames (30 fps cap)
    pub const STEP_INTERVAL_MS: f64 = 1000.0 / 30.0;

    /// Viewport area (px²) per particle on regular displays
    pub const BASE_DENSITY: f32 = 15_000.0;
    /// Sparser density used below [`NARROW_VIEWPORT`]
    pub const NARROW_DENSITY: f32 = 24_000.0;
    /// Viewports narrower than this get the mobile density and half the cap
    pub const NARROW_VIEWPORT: f32 = 768.0;

    /// Pointer attraction reach in px
    pub const ATTRACT_RADIUS: f32 = 200.0;
    /// Attraction force scale at zero distance
    pub const ATTRACT_STRENGTH: f32 = 0.02;
    /// Per-frame velocity damping factor
    pub const DAMPING: f32 = 0.99;
    /// Initial per-axis drift speed range is +/- half of this
    pub const DRIFT_SPEED: f32 = 0.5;

    /// Particle radius range
    pub const MIN_SIZE: f32 = 1.0;
    pub const MAX_SIZE: f32 = 3.0;
    /// Particle opacity range
    pub const MIN_OPACITY: f32 = 0.2;
    pub const MAX_OPACITY: f32 = 0.7;

    /// Particle-to-particle link reach in px
    pub const LINK_RADIUS: f32 = 150.0;
    /// Particle-to-pointer link reach in px
    pub const POINTER_LINK_RADIUS: f32 = 200.0;
}

/// True for viewports that get the mobile density/cap treatment
#[inline]
pub fn is_narrow(width: f32) -> bool {
    width < consts::NARROW_VIEWPORT
}
