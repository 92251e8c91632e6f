use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{
	BACKGROUND, CONNECT_COLOR, EdgeShape, MUTED_TEXT, NODE_BORDER, NODE_FILL, NodeShape, Scene,
	TEXT_COLOR,
};

pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
	for edge in &scene.edges {
		draw_edge(edge, ctx);
	}
	if let Some((from, to)) = scene.preview {
		ctx.set_stroke_style_str(CONNECT_COLOR);
		ctx.set_line_width(1.5);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(6.0),
			&JsValue::from_f64(4.0),
		));
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
	for node in &scene.nodes {
		draw_node(node, ctx);
	}
}

fn draw_edge(edge: &EdgeShape, ctx: &CanvasRenderingContext2d) {
	let (color, width) = edge.stroke();
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(edge.from.x, edge.from.y);
	ctx.line_to(edge.to.x, edge.to.y);
	ctx.stroke();

	let [tip, left, right] = edge.arrow;
	ctx.set_fill_style_str(color);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(left.x, left.y);
	ctx.line_to(right.x, right.y);
	ctx.close_path();
	ctx.fill();

	ctx.set_fill_style_str(TEXT_COLOR);
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("alphabetic");
	let _ = ctx.fill_text(&edge.label, edge.label_at.x, edge.label_at.y);
}

fn draw_node(node: &NodeShape, ctx: &CanvasRenderingContext2d) {
	let (x, y) = (node.origin.x, node.origin.y);
	ctx.set_fill_style_str(NODE_FILL);
	ctx.fill_rect(x, y, node.width, node.height);

	let (border, border_width) = node.border();
	ctx.set_stroke_style_str(border);
	ctx.set_line_width(border_width);
	ctx.stroke_rect(x, y, node.width, node.height);

	ctx.set_fill_style_str(TEXT_COLOR);
	ctx.set_font("bold 14px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text_with_max_width(
		&node.label,
		x + node.width / 2.0,
		y + node.header_height / 2.0,
		node.width - 2.0 * node.padding,
	);

	if node.rows.is_empty() {
		return;
	}

	ctx.set_stroke_style_str(NODE_BORDER);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(x, y + node.header_height);
	ctx.line_to(x + node.width, y + node.header_height);
	ctx.stroke();

	ctx.set_fill_style_str(MUTED_TEXT);
	ctx.set_font("12px monospace");
	ctx.set_text_align("left");
	for (i, row) in node.rows.iter().enumerate() {
		let row_y =
			y + node.header_height + node.padding / 2.0 + (i as f64 + 0.5) * node.row_height;
		let _ = ctx.fill_text_with_max_width(
			row,
			x + node.padding,
			row_y,
			node.width - 2.0 * node.padding,
		);
	}
}
