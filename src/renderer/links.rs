//! Link geometry
//!
//! Nearby particles are joined by faint lines whose alpha falls off
//! linearly with distance; the pointer gets its own brighter set. Pure
//! functions, so the falloff math has native unit tests. The pair scan is
//! O(n²) over a capped set, which is fine at background-field sizes.

use glam::Vec2;

use crate::consts::{LINK_RADIUS, POINTER_LINK_RADIUS};
use crate::sim::Particle;

/// Maximum alpha of a particle-to-particle link
const LINK_ALPHA: f32 = 0.2;
/// Maximum alpha of a particle-to-pointer link
const POINTER_LINK_ALPHA: f32 = 0.5;

/// A line between two particles, by index into the field's particle vec
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

/// A line from a particle to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerLink {
    pub particle: usize,
    pub alpha: f32,
}

/// Linear alpha falloff: full strength at distance zero, `None` at or
/// beyond `radius`
pub fn link_alpha(dist: f32, radius: f32, max_alpha: f32) -> Option<f32> {
    if dist >= radius {
        return None;
    }
    Some((1.0 - dist / radius) * max_alpha)
}

/// All particle pairs close enough to link, each pair reported once
pub fn particle_links(particles: &[Particle]) -> Vec<Link> {
    let mut links = Vec::new();
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let dist = particles[i].pos.distance(particles[j].pos);
            if let Some(alpha) = link_alpha(dist, LINK_RADIUS, LINK_ALPHA) {
                links.push(Link { a: i, b: j, alpha });
            }
        }
    }
    links
}

/// Links from particles to the pointer position
pub fn pointer_links(particles: &[Particle], pointer: Vec2) -> Vec<PointerLink> {
    particles
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let dist = p.pos.distance(pointer);
            link_alpha(dist, POINTER_LINK_RADIUS, POINTER_LINK_ALPHA)
                .map(|alpha| PointerLink { particle: i, alpha })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Tint;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: 2.0,
            opacity: 0.5,
            tint: Tint::ToxicGreen,
        }
    }

    #[test]
    fn test_alpha_falls_off_linearly() {
        assert_eq!(link_alpha(0.0, 150.0, 0.2), Some(0.2));
        let half = link_alpha(75.0, 150.0, 0.2).unwrap();
        assert!((half - 0.1).abs() < 1e-6);
        assert_eq!(link_alpha(150.0, 150.0, 0.2), None);
        assert_eq!(link_alpha(151.0, 150.0, 0.2), None);
    }

    #[test]
    fn test_pairs_reported_once_within_radius() {
        let particles = vec![
            particle_at(0.0, 0.0),
            particle_at(100.0, 0.0),  // links to both neighbours
            particle_at(1000.0, 0.0), // links to nothing
        ];
        let links = particle_links(&particles);
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
    }

    #[test]
    fn test_closer_pairs_are_brighter() {
        let particles = vec![
            particle_at(0.0, 0.0),
            particle_at(10.0, 0.0),
            particle_at(140.0, 0.0),
        ];
        let links = particle_links(&particles);
        let near = links
            .iter()
            .find(|l| (l.a, l.b) == (0, 1))
            .expect("near pair");
        let far = links
            .iter()
            .find(|l| (l.a, l.b) == (1, 2))
            .expect("far pair");
        assert!(near.alpha > far.alpha);
    }

    #[test]
    fn test_pointer_links_use_wider_radius() {
        let particles = vec![particle_at(0.0, 0.0)];
        // 180 px: outside particle links, inside pointer links
        let links = pointer_links(&particles, Vec2::new(180.0, 0.0));
        assert_eq!(links.len(), 1);
        assert!(links[0].alpha > 0.0);
        assert!(pointer_links(&particles, Vec2::new(250.0, 0.0)).is_empty());
    }
}
