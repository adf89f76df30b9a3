//! Canvas2D drawing
//!
//! The renderer only draws; it never mutates field state. A canvas whose 2d
//! context cannot be acquired yields no renderer at all and the backdrop
//! silently stays blank.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::links::{particle_links, pointer_links};
use super::palette;
use crate::sim::FieldState;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    dpr: f64,
}

impl CanvasRenderer {
    /// Acquire the 2d context. `None` means the host canvas can't draw;
    /// callers treat that as a blank backdrop, not a failure.
    pub fn new(canvas: &HtmlCanvasElement, dpr: f64) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx, dpr })
    }

    /// Match the backing store to the CSS size at the device pixel ratio and
    /// keep drawing in CSS pixel coordinates.
    pub fn resize(&self, canvas: &HtmlCanvasElement, css_width: f64, css_height: f64) {
        canvas.set_width((css_width * self.dpr) as u32);
        canvas.set_height((css_height * self.dpr) as u32);
        let _ = self
            .ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
    }

    /// Draw the current field: particles as filled circles, then links
    pub fn render(&self, field: &FieldState) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, field.width as f64, field.height as f64);

        for particle in &field.particles {
            ctx.begin_path();
            let _ = ctx.arc(
                particle.pos.x as f64,
                particle.pos.y as f64,
                particle.size as f64,
                0.0,
                TAU,
            );
            ctx.set_fill_style_str(palette::fill_style(particle.tint));
            ctx.set_global_alpha(particle.opacity as f64);
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);

        if field.config.links {
            self.render_links(field);
        }
    }

    fn render_links(&self, field: &FieldState) {
        let ctx = &self.ctx;

        ctx.set_line_width(0.5);
        for link in particle_links(&field.particles) {
            let a = field.particles[link.a].pos;
            let b = field.particles[link.b].pos;
            ctx.begin_path();
            ctx.move_to(a.x as f64, a.y as f64);
            ctx.line_to(b.x as f64, b.y as f64);
            ctx.set_stroke_style_str(&palette::stroke_style(palette::LINK_STROKE, link.alpha));
            ctx.stroke();
        }

        let Some(pointer) = field.pointer else {
            return;
        };
        ctx.set_line_width(1.0);
        for link in pointer_links(&field.particles, pointer) {
            let from = field.particles[link.particle].pos;
            ctx.begin_path();
            ctx.move_to(from.x as f64, from.y as f64);
            ctx.line_to(pointer.x as f64, pointer.y as f64);
            ctx.set_stroke_style_str(&palette::stroke_style(
                palette::POINTER_LINK_STROKE,
                link.alpha,
            ));
            ctx.stroke();
        }
    }
}
