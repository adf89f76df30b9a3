//! Per-frame field step
//!
//! Advances the field deterministically. Callers invoke [`step`] once per
//! host animation frame; frames arriving faster than the 30 fps gate (and
//! every frame while the page is hidden) leave the field untouched.

use glam::Vec2;

use super::state::{FieldState, Particle};
use crate::consts::*;

/// Advance the field by one frame if it is visible and the frame gate has
/// elapsed. Returns whether physics actually ran, so the caller knows if a
/// redraw is needed.
pub fn step(field: &mut FieldState, now_ms: f64) -> bool {
    if !field.visible {
        return false;
    }
    if let Some(last) = field.last_step_ms {
        if now_ms - last < STEP_INTERVAL_MS {
            return false;
        }
    }
    field.last_step_ms = Some(now_ms);

    let pointer = if field.config.attraction {
        field.pointer
    } else {
        None
    };

    let (width, height) = (field.width, field.height);
    for particle in &mut field.particles {
        if let Some(pointer) = pointer {
            attract(particle, pointer);
        }
        particle.pos += particle.vel;
        particle.vel *= DAMPING;
        particle.pos.x = wrap(particle.pos.x, width);
        particle.pos.y = wrap(particle.pos.y, height);
    }
    true
}

/// Nudge a particle toward the pointer. Force falls off linearly from
/// [`ATTRACT_STRENGTH`] at the pointer to zero at [`ATTRACT_RADIUS`].
fn attract(particle: &mut Particle, pointer: Vec2) {
    let delta = pointer - particle.pos;
    let dist = delta.length();
    // Coincident positions have no defined direction
    if dist <= f32::EPSILON || dist >= ATTRACT_RADIUS {
        return;
    }
    let force = (ATTRACT_RADIUS - dist) / ATTRACT_RADIUS * ATTRACT_STRENGTH;
    particle.vel += delta / dist * force;
}

/// Toroidal wrap onto `[0, extent)`
pub(crate) fn wrap(v: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    let wrapped = v.rem_euclid(extent);
    // rem_euclid can round up to the bound itself for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FieldConfig;

    fn field(width: f32, height: f32) -> FieldState {
        FieldState::new(width, height, 12345, FieldConfig::default())
    }

    /// Timestamps spaced one frame apart, always past the gate
    fn frame_time(n: u64) -> f64 {
        n as f64 * (STEP_INTERVAL_MS + 1.0)
    }

    #[test]
    fn test_step_moves_particles_within_bounds() {
        let mut f = field(1024.0, 768.0);
        let initial: Vec<_> = f.particles.iter().map(|p| p.pos).collect();

        for n in 1..=100 {
            assert!(step(&mut f, frame_time(n)));
        }

        let moved = f
            .particles
            .iter()
            .zip(&initial)
            .any(|(p, start)| p.pos != *start);
        assert!(moved);
        for p in &f.particles {
            assert!(p.pos.x >= 0.0 && p.pos.x < 1024.0, "x out of bounds: {}", p.pos.x);
            assert!(p.pos.y >= 0.0 && p.pos.y < 768.0, "y out of bounds: {}", p.pos.y);
        }
    }

    #[test]
    fn test_frame_gate_skips_fast_frames() {
        let mut f = field(1024.0, 768.0);
        assert!(step(&mut f, 1000.0));
        let frozen: Vec<_> = f.particles.iter().map(|p| p.pos).collect();

        // 5 ms later: far below the ~33 ms interval
        assert!(!step(&mut f, 1005.0));
        for (p, pos) in f.particles.iter().zip(&frozen) {
            assert_eq!(p.pos, *pos);
        }

        // Past the interval the next frame processes
        assert!(step(&mut f, 1000.0 + STEP_INTERVAL_MS));
    }

    #[test]
    fn test_gate_compares_against_last_processed_frame() {
        let mut f = field(1024.0, 768.0);
        assert!(step(&mut f, 1000.0));
        // A burst of gated frames must not push the gate forward
        assert!(!step(&mut f, 1010.0));
        assert!(!step(&mut f, 1020.0));
        assert!(step(&mut f, 1000.0 + STEP_INTERVAL_MS));
    }

    #[test]
    fn test_hidden_field_is_frozen() {
        let mut f = field(1024.0, 768.0);
        assert!(step(&mut f, frame_time(1)));
        let paused: Vec<_> = f.particles.iter().map(|p| p.pos).collect();

        f.set_visible(false);
        for n in 2..=20 {
            assert!(!step(&mut f, frame_time(n)));
        }
        for (p, pos) in f.particles.iter().zip(&paused) {
            assert_eq!(p.pos, *pos);
        }

        // Nothing was lost across the pause; physics resumes immediately
        f.set_visible(true);
        assert!(step(&mut f, frame_time(21)));
    }

    #[test]
    fn test_attraction_only_inside_radius() {
        let mut f = field(1024.0, 768.0);
        f.particles.clear();
        f.particles.push(Particle {
            pos: Vec2::new(500.0, 400.0),
            vel: Vec2::ZERO,
            size: 2.0,
            opacity: 0.5,
            tint: crate::sim::Tint::NeonCyan,
        });
        f.particles.push(Particle {
            pos: Vec2::new(50.0, 50.0), // well outside the 200 px radius
            vel: Vec2::ZERO,
            size: 2.0,
            opacity: 0.5,
            tint: crate::sim::Tint::NeonCyan,
        });
        f.set_pointer(550.0, 400.0);
        assert!(step(&mut f, frame_time(1)));

        let near = &f.particles[0];
        let far = &f.particles[1];
        // Velocity toward the pointer grew for the near particle only
        let toward = (Vec2::new(550.0, 400.0) - Vec2::new(500.0, 400.0)).normalize();
        assert!(near.vel.dot(toward) > 0.0);
        assert_eq!(far.vel, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_on_top_of_particle_is_safe() {
        let mut f = field(1024.0, 768.0);
        f.particles.clear();
        f.particles.push(Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            size: 2.0,
            opacity: 0.5,
            tint: crate::sim::Tint::ToxicGreen,
        });
        f.set_pointer(100.0, 100.0);
        assert!(step(&mut f, frame_time(1)));
        let p = &f.particles[0];
        assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
        assert!(p.vel.x.is_finite() && p.vel.y.is_finite());
    }

    #[test]
    fn test_no_attraction_before_first_pointer_event() {
        let mut f = field(1024.0, 768.0);
        f.particles.clear();
        f.particles.push(Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            size: 2.0,
            opacity: 0.5,
            tint: crate::sim::Tint::ToxicGreen,
        });
        assert!(step(&mut f, frame_time(1)));
        assert_eq!(f.particles[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_wrap_stays_below_extent() {
        assert_eq!(wrap(0.0, 100.0), 0.0);
        assert_eq!(wrap(100.0, 100.0), 0.0);
        assert!((wrap(-0.5, 100.0) - 99.5).abs() < 1e-4);
        assert!((wrap(100.5, 100.0) - 0.5).abs() < 1e-4);
        let w = wrap(-1e-7, 100.0);
        assert!((0.0..100.0).contains(&w));
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = field(1024.0, 768.0);
        let mut b = field(1024.0, 768.0);
        a.set_pointer(300.0, 300.0);
        b.set_pointer(300.0, 300.0);
        for n in 1..=50 {
            step(&mut a, frame_time(n));
            step(&mut b, frame_time(n));
        }
        for (pa, pb) in a.particles.iter().zip(&b.particles) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
        }
    }
}
