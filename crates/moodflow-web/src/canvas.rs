use moodflow_core::{Dimensions, Rgba, Sprite, SpriteShape, Surface, VerticalGradient, WaveShape};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A canvas 2D context viewed as a [`Surface`].
///
/// Dimensions are read from the canvas on every call, so a resize between
/// frames is picked up without any cached state.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }

    fn trace_curve(&self, shape: &WaveShape) {
        for s in &shape.segments {
            self.ctx.quadratic_curve_to(
                s.control.x as f64,
                s.control.y as f64,
                s.to.x as f64,
                s.to.y as f64,
            );
        }
    }

    fn linear_gradient(&self, height: f64, g: &VerticalGradient) -> Option<web::CanvasGradient> {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
        gradient.add_color_stop(0.0, &g.top.css()).ok()?;
        gradient.add_color_stop(1.0, &g.bottom.css()).ok()?;
        Some(gradient)
    }
}

impl Surface for CanvasSurface {
    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn fade(&mut self, veil: Rgba) {
        self.ctx.set_fill_style_str(&veil.css());
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(sprite.alpha as f64);
        _ = ctx.translate(sprite.position.x as f64, sprite.position.y as f64);
        _ = ctx.rotate(sprite.rotation as f64);
        ctx.set_shadow_blur(sprite.glow_blur as f64);
        ctx.set_shadow_color(&sprite.glow.to_hex());
        match &sprite.shape {
            SpriteShape::Glyph { text, font_px } => {
                ctx.set_font(&format!("{font_px}px Arial"));
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                _ = ctx.fill_text(text, 0.0, 0.0);
            }
            SpriteShape::Disc { radius, fill } => {
                ctx.set_fill_style_str(&fill.to_hex());
                ctx.begin_path();
                _ = ctx.arc(0.0, 0.0, *radius as f64, 0.0, TAU);
                ctx.fill();
            }
        }
        ctx.restore();
    }

    fn fill_wave(&mut self, shape: &WaveShape, gradient: &VerticalGradient) {
        let Some(start) = shape.start else {
            return;
        };
        let left = shape.region_left();
        let right = shape.region_right();
        self.ctx.begin_path();
        self.ctx.move_to(left.x as f64, left.y as f64);
        self.ctx.line_to(start.x as f64, start.y as f64);
        self.trace_curve(shape);
        self.ctx.line_to(right.x as f64, right.y as f64);
        self.ctx.close_path();
        match self.linear_gradient(shape.height as f64, gradient) {
            Some(g) => self.ctx.set_fill_style_canvas_gradient(&g),
            None => self.ctx.set_fill_style_str(&gradient.bottom.css()),
        }
        self.ctx.fill();
    }

    fn stroke_wave(&mut self, shape: &WaveShape, color: Rgba, line_width: f32) {
        let Some(start) = shape.start else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(start.x as f64, start.y as f64);
        self.trace_curve(shape);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }
}
