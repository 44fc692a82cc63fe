//! Canvas 2D render pass for the globe.

use std::f64::consts::TAU;

use foundation::math::{LonLat, Orthographic, Vec2};
use foundation::time::Millis;
use layers::fluorescent::{FluorescentPoint, GLOW_STOPS};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::globe::GlobeModel;
use crate::layout::CanvasLayout;

const WHITE: &str = "#ffffff";

fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &JsValue) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str("fillStyle"), value);
}

fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

fn ctx_fill_color(ctx: &CanvasRenderingContext2d, value: &str) {
    ctx_set_fill_style(ctx, &JsValue::from_str(value));
}

/// True when `p` lies inside the CSS-pixel canvas rectangle.
fn on_canvas(p: Vec2, layout: &CanvasLayout) -> bool {
    p.x >= 0.0 && p.x <= layout.width && p.y >= 0.0 && p.y <= layout.height
}

/// Screen position of `p`, or `None` when it is on the far side or off canvas.
pub fn screen_position(proj: &Orthographic, p: LonLat, layout: &CanvasLayout) -> Option<Vec2> {
    proj.project(p).filter(|px| on_canvas(*px, layout))
}

fn stroke_polylines(
    ctx: &CanvasRenderingContext2d,
    proj: &Orthographic,
    lines: &[Vec<LonLat>],
) {
    ctx.begin_path();
    for line in lines {
        for run in proj.project_polyline(line) {
            let mut it = run.into_iter();
            if let Some(first) = it.next() {
                ctx.move_to(first.x, first.y);
                for p in it {
                    ctx.line_to(p.x, p.y);
                }
            }
        }
    }
    ctx.stroke();
}

fn draw_point(
    ctx: &CanvasRenderingContext2d,
    point: &FluorescentPoint,
    at: Vec2,
    now: Millis,
    scale_factor: f64,
) -> Result<(), JsValue> {
    let look = point.appearance(now, scale_factor);
    if look.radius <= 0.0 {
        return Ok(());
    }

    let glow = ctx.create_radial_gradient(at.x, at.y, 0.0, at.x, at.y, look.glow_radius)?;
    for (offset, alpha) in GLOW_STOPS {
        glow.add_color_stop(offset as f32, &point.color.rgba_css(alpha * look.fade))?;
    }
    ctx.begin_path();
    ctx.arc(at.x, at.y, look.glow_radius, 0.0, TAU)?;
    ctx_set_fill_style(ctx, glow.as_ref());
    ctx.fill();

    ctx.begin_path();
    ctx.arc(at.x, at.y, look.radius, 0.0, TAU)?;
    ctx_fill_color(ctx, &point.color.hex());
    ctx.set_global_alpha(look.core_alpha);
    ctx.fill();

    ctx.begin_path();
    ctx.arc(at.x, at.y, look.center_radius, 0.0, TAU)?;
    ctx_fill_color(ctx, WHITE);
    ctx.set_global_alpha(look.center_alpha);
    ctx.fill();
    ctx.set_global_alpha(1.0);
    Ok(())
}

/// Clears the canvas and draws one frame.
pub fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    globe: &GlobeModel,
    layout: &CanvasLayout,
    now: Millis,
) -> Result<(), JsValue> {
    let style = globe.style();
    let proj = globe.projection(layout);
    let scale_factor = proj.scale / layout.radius.max(f64::EPSILON);

    ctx.set_transform(layout.dpr, 0.0, 0.0, layout.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, layout.width, layout.height);
    ctx.set_global_alpha(1.0);

    ctx.begin_path();
    ctx.arc(proj.translate.x, proj.translate.y, proj.scale, 0.0, TAU)?;
    ctx_fill_color(ctx, style.ocean_fill);
    ctx.fill();
    ctx_set_stroke_style(ctx, style.outline);
    ctx.set_line_width(style.outline_width_px * scale_factor);
    ctx.stroke();

    let Some(loaded) = globe.loaded() else {
        return Ok(());
    };

    ctx_set_stroke_style(ctx, style.outline);
    ctx.set_line_width(style.land_width_px * scale_factor);
    ctx.set_global_alpha(style.graticule_alpha);
    stroke_polylines(ctx, &proj, globe.graticule());
    ctx.set_global_alpha(1.0);

    stroke_polylines(ctx, &proj, &loaded.outlines);

    ctx_fill_color(ctx, style.dot_color);
    let dot_radius = style.dot_radius_px * scale_factor;
    ctx.begin_path();
    for dot in &loaded.dots {
        if let Some(p) = screen_position(&proj, *dot, layout) {
            ctx.move_to(p.x + dot_radius, p.y);
            ctx.arc(p.x, p.y, dot_radius, 0.0, TAU)?;
        }
    }
    ctx.fill();

    for point in globe.layer().population().iter() {
        if let Some(at) = screen_position(&proj, point.position, layout) {
            draw_point(ctx, point, at, now, scale_factor)?;
        }
    }
    Ok(())
}
