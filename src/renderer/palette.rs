//! Site palette
//!
//! The backdrop uses the tournament site's neon scheme. Fill styles carry
//! their own base alpha; per-particle opacity is applied on top via the
//! context's global alpha.

use crate::sim::Tint;

/// Canvas fill style for a particle tint
pub fn fill_style(tint: Tint) -> &'static str {
    match tint {
        Tint::ToxicGreen => "rgba(0, 255, 157, 0.6)",
        Tint::NeonCyan => "rgba(0, 180, 216, 0.6)",
        Tint::CyberPurple => "rgba(123, 44, 191, 0.4)",
    }
}

/// Stroke color for particle-to-particle links (alpha set per link)
pub const LINK_STROKE: (u8, u8, u8) = (0, 255, 157);
/// Stroke color for particle-to-pointer links
pub const POINTER_LINK_STROKE: (u8, u8, u8) = (0, 180, 216);

/// Render an rgba() stroke style string for a link
pub fn stroke_style(rgb: (u8, u8, u8), alpha: f32) -> String {
    format!("rgba({}, {}, {}, {:.3})", rgb.0, rgb.1, rgb.2, alpha)
}
