use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{DiagramState, EdgeTier, flow_progress};

const FLOW_DOT_RADIUS: f64 = 3.0;
const FLOW_DOT_COLOR: &str = "rgba(0, 162, 255, 0.7)";

/// Redraw every edge with styling for its current tier. Edges whose
/// endpoints have no cached position yet are skipped for the frame.
pub fn draw_edges(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width(), state.height());

	for edge in state.diagram().edges {
		let Some(curve) = state.edge_curve(edge) else {
			continue;
		};

		ctx.begin_path();
		ctx.move_to(curve.from.x, curve.from.y);
		ctx.quadratic_curve_to(curve.ctrl.x, curve.ctrl.y, curve.to.x, curve.to.y);

		let tier = state.edge_tier(edge);
		match tier {
			EdgeTier::Dimmed => {
				ctx.set_stroke_style_str("rgba(30,41,59,0.3)");
				ctx.set_line_width(1.0);
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}
			EdgeTier::Highlighted => {
				ctx.set_stroke_style_str("rgba(0,120,212,0.6)");
				ctx.set_line_width(2.0);
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}
			EdgeTier::Neutral => {
				ctx.set_line_width(1.5);
				if edge.live {
					ctx.set_stroke_style_str("rgba(0,120,212,0.25)");
					let _ = ctx.set_line_dash(&js_sys::Array::new());
				} else {
					ctx.set_stroke_style_str("rgba(100,116,139,0.2)");
					let _ = ctx.set_line_dash(&js_sys::Array::of2(
						&JsValue::from_f64(4.0),
						&JsValue::from_f64(4.0),
					));
				}
			}
		}
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		if tier == EdgeTier::Highlighted {
			ctx.set_font("11px \"Segoe UI\", sans-serif");
			ctx.set_fill_style_str("#94a3b8");
			ctx.set_text_align("center");
			let _ = ctx.fill_text(edge.label, curve.ctrl.x, curve.ctrl.y - 6.0);
		}
	}
}

/// Paint the traveling dot on every live edge still eligible under the
/// current selection.
pub fn draw_flow_dots(state: &DiagramState, ctx: &CanvasRenderingContext2d, timestamp_ms: f64) {
	let progress = flow_progress(timestamp_ms);

	for edge in state.diagram().edges {
		if !state.flow_dot_visible(edge) {
			continue;
		}
		let Some(curve) = state.edge_curve(edge) else {
			continue;
		};
		let p = curve.point_at(progress);

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, FLOW_DOT_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(FLOW_DOT_COLOR);
		ctx.fill();
	}
}
