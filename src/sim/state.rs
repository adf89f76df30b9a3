//! Field state and core simulation types
//!
//! A field owns its particles, the last-known pointer and its RNG. Nothing
//! here is persisted; the whole set is regenerated on resize.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::is_narrow;
use crate::settings::Settings;

/// Palette slot carried per particle; the renderer maps it to a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    ToxicGreen,
    NeonCyan,
    CyberPurple,
}

impl Tint {
    /// Sample a tint with the site palette's weighting (green twice as likely)
    fn sample(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..4u8) {
            0 | 1 => Tint::ToxicGreen,
            2 => Tint::NeonCyan,
            _ => Tint::CyberPurple,
        }
    }
}

/// A single drifting point
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius in px, fixed at spawn
    pub size: f32,
    /// Fill opacity in [0, 1], fixed at spawn
    pub opacity: f32,
    pub tint: Tint,
}

impl Particle {
    fn spawn(rng: &mut Pcg32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..width),
                rng.random_range(0.0..height),
            ),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * DRIFT_SPEED,
                (rng.random::<f32>() - 0.5) * DRIFT_SPEED,
            ),
            size: rng.random_range(MIN_SIZE..MAX_SIZE),
            opacity: rng.random_range(MIN_OPACITY..MAX_OPACITY),
            tint: Tint::sample(rng),
        }
    }
}

/// Tuning derived from [`Settings`]; fixed for the lifetime of a field
#[derive(Debug, Clone, Copy)]
pub struct FieldConfig {
    /// Hard particle cap regardless of viewport area
    pub max_particles: usize,
    /// Viewport px² per particle
    pub density: f32,
    /// Draw connecting lines between nearby particles
    pub links: bool,
    /// Nudge particles toward the pointer
    pub attraction: bool,
}

impl FieldConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_particles: settings.quality.max_particles(),
            density: BASE_DENSITY,
            links: settings.effective_links(),
            attraction: settings.effective_attraction(),
        }
    }

    /// Density and cap adjusted for the current viewport width
    pub fn effective(&self, width: f32) -> (f32, usize) {
        if is_narrow(width) {
            (NARROW_DENSITY.max(self.density), self.max_particles / 2)
        } else {
            (self.density, self.max_particles)
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Complete field state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct FieldState {
    pub width: f32,
    pub height: f32,
    pub particles: Vec<Particle>,
    /// Last-known pointer position; `None` until the first move event
    pub pointer: Option<Vec2>,
    /// Hidden fields skip physics entirely
    pub visible: bool,
    /// Wall-clock time of the last processed frame (frame-rate gate)
    pub last_step_ms: Option<f64>,
    pub config: FieldConfig,
    /// Spawn seed, kept for logging/reproduction
    pub seed: u64,
    rng: Pcg32,
}

impl FieldState {
    /// Build a field for the given viewport. Non-positive dimensions produce
    /// an empty set rather than an error; the component is decorative and
    /// must never fail its host.
    pub fn new(width: f32, height: f32, seed: u64, config: FieldConfig) -> Self {
        let mut field = Self {
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: None,
            visible: true,
            last_step_ms: None,
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        field.rebuild(width, height);
        field
    }

    /// Particle budget for a viewport: `min(cap, floor(area / density))`
    pub fn target_count(width: f32, height: f32, config: &FieldConfig) -> usize {
        if width <= 0.0 || height <= 0.0 {
            return 0;
        }
        let (density, cap) = config.effective(width);
        let by_area = (width * height / density) as usize;
        by_area.min(cap)
    }

    /// Resize path: discard every particle and respawn for the new viewport.
    /// No interpolation of the old set into the new bounds.
    pub fn rebuild(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let count = Self::target_count(self.width, self.height, &self.config);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::spawn(&mut self.rng, self.width, self.height));
        }
    }

    /// Record the pointer position. Last write wins; events arriving between
    /// frames simply overwrite each other.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    /// Forget the pointer (it left the viewport); attraction stops
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Pause or resume physics. Particle state survives the pause untouched.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }
}
