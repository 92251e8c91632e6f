use super::state::{EditorState, Interaction};
use super::types::Point;

pub(crate) const BACKGROUND: &str = "#1a1a2e";
pub(crate) const EDGE_COLOR: &str = "#4a9eff";
pub(crate) const ACCENT_COLOR: &str = "#ffd700";
pub(crate) const CONNECT_COLOR: &str = "#4caf50";
pub(crate) const NODE_FILL: &str = "#252540";
pub(crate) const NODE_BORDER: &str = "#3a3a5c";
pub(crate) const TEXT_COLOR: &str = "#ffffff";
pub(crate) const MUTED_TEXT: &str = "#b0b0c8";

const ARROW_LENGTH: f64 = 10.0;
const ARROW_WIDTH: f64 = 6.0;
const LABEL_RISE: f64 = 8.0;

/// Border treatment of a node box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStyle {
	/// Plain border.
	Normal,
	/// The selected node.
	Selected,
	/// Source of a pending connection.
	ConnectSource,
}

/// One edge, from centre to centre.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeShape {
	/// Source node centre.
	pub from: Point,
	/// Target node centre.
	pub to: Point,
	/// Tip first, then the two back corners.
	pub arrow: [Point; 3],
	/// Relationship name.
	pub label: String,
	/// Label anchor, just above the midpoint.
	pub label_at: Point,
	/// Drawn highlighted.
	pub selected: bool,
}

impl EdgeShape {
	/// Stroke colour and line width.
	pub fn stroke(&self) -> (&'static str, f64) {
		if self.selected {
			(ACCENT_COLOR, 3.0)
		} else {
			(EDGE_COLOR, 2.0)
		}
	}
}

/// One node box with its label and property rows.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape {
	/// Top-left corner.
	pub origin: Point,
	/// Box width.
	pub width: f64,
	/// Box height.
	pub height: f64,
	/// Label band height.
	pub header_height: f64,
	/// Height of one property row.
	pub row_height: f64,
	/// Inner padding.
	pub padding: f64,
	/// Node label.
	pub label: String,
	/// `key: type` lines.
	pub rows: Vec<String>,
	/// Border treatment.
	pub style: NodeStyle,
}

impl NodeShape {
	/// Border colour and line width.
	pub fn border(&self) -> (&'static str, f64) {
		match self.style {
			NodeStyle::Normal => (NODE_BORDER, 1.0),
			NodeStyle::Selected => (ACCENT_COLOR, 2.0),
			NodeStyle::ConnectSource => (CONNECT_COLOR, 2.0),
		}
	}
}

/// Everything the painter needs, already in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	/// Canvas width.
	pub width: f64,
	/// Canvas height.
	pub height: f64,
	/// Drawn first, beneath the nodes.
	pub edges: Vec<EdgeShape>,
	/// Back to front.
	pub nodes: Vec<NodeShape>,
	/// Dashed line from the connect source to the pointer.
	pub preview: Option<(Point, Point)>,
}

/// Lays out the current state for painting. Does not touch the canvas.
pub fn build_scene(state: &EditorState) -> Scene {
	let (model, view, cfg) = (&state.model, &state.view, &state.config);
	let half = cfg.half_extent();
	let selection = model.selection();
	let connect_source = match &state.interaction {
		Interaction::Connecting { source } => Some(source.as_str()),
		_ => None,
	};

	let edges = model
		.edges()
		.iter()
		.filter_map(|edge| {
			let src = model.node(&edge.source)?;
			let tgt = model.node(&edge.target)?;
			let from = view.to_screen(cfg.node_center(src));
			let to = view.to_screen(cfg.node_center(tgt));
			Some(EdgeShape {
				from,
				to,
				arrow: arrow_head(from, to, half),
				label: edge.label.clone(),
				label_at: Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0 - LABEL_RISE),
				selected: selection.edge() == Some(edge.id.as_str()),
			})
		})
		.collect();

	let nodes = model
		.nodes()
		.iter()
		.map(|node| {
			let style = if connect_source == Some(node.id.as_str()) {
				NodeStyle::ConnectSource
			} else if selection.node() == Some(node.id.as_str()) {
				NodeStyle::Selected
			} else {
				NodeStyle::Normal
			};
			NodeShape {
				origin: view.to_screen(node.position()),
				width: cfg.node_width,
				height: cfg.node_height(node),
				header_height: cfg.header_height,
				row_height: cfg.row_height,
				padding: cfg.padding,
				label: node.label.clone(),
				rows: node
					.properties
					.iter()
					.map(|p| format!("{}: {}", p.key, p.ty))
					.collect(),
				style,
			}
		})
		.collect();

	let preview = connect_source
		.and_then(|id| model.node(id))
		.zip(view.pointer)
		.map(|(node, pointer)| (view.to_screen(cfg.node_center(node)), pointer));

	Scene {
		width: view.width,
		height: view.height,
		edges,
		nodes,
		preview,
	}
}

// The tip sits where the segment enters the target's half-extent box.
fn arrow_head(from: Point, to: Point, half: Point) -> [Point; 3] {
	let (dx, dy) = (to.x - from.x, to.y - from.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return [to; 3];
	}
	let (ux, uy) = (dx / dist, dy / dist);

	let reach = |extent: f64, u: f64| {
		if u.abs() > f64::EPSILON {
			extent / u.abs()
		} else {
			f64::INFINITY
		}
	};
	let inset = reach(half.x, ux).min(reach(half.y, uy)).min(dist);

	let tip = Point::new(to.x - ux * inset, to.y - uy * inset);
	let back = Point::new(tip.x - ux * ARROW_LENGTH, tip.y - uy * ARROW_LENGTH);
	let (px, py) = (-uy * ARROW_WIDTH / 2.0, ux * ARROW_WIDTH / 2.0);
	[
		tip,
		Point::new(back.x + px, back.y + py),
		Point::new(back.x - px, back.y - py),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::schema_editor::config::EditorConfig;
	use crate::components::schema_editor::state::PointerTarget;
	use crate::components::schema_editor::types::{Property, PropertyType};

	fn two_nodes() -> (EditorState, String, String) {
		let mut state = EditorState::new(EditorConfig::default(), 800.0, 600.0);
		let a = state.model.create_node(Point::new(0.0, 0.0));
		let b = state.model.create_node(Point::new(300.0, 0.0));
		(state, a, b)
	}

	#[test]
	fn nodes_and_edges_share_pan_translation() {
		let (mut state, a, b) = two_nodes();
		state.model.connect(&a, &b);
		state.view.pan = Point::new(10.0, 20.0);

		let scene = build_scene(&state);
		assert_eq!(scene.nodes[0].origin, Point::new(10.0, 20.0));
		assert_eq!(scene.edges[0].from, Point::new(85.0, 50.0));
		assert_eq!(scene.edges[0].to, Point::new(385.0, 50.0));
		assert_eq!(scene.edges[0].label, "RELATES_TO");
		assert_eq!(scene.edges[0].label_at, Point::new(235.0, 42.0));
	}

	#[test]
	fn arrow_tip_stops_at_target_box() {
		let (mut state, a, b) = two_nodes();
		state.model.connect(&a, &b);
		let scene = build_scene(&state);
		let tip = scene.edges[0].arrow[0];
		// Target centre is x = 375, half width 75.
		assert!((tip.x - 300.0).abs() < 1e-9);
		assert!((tip.y - 30.0).abs() < 1e-9);
	}

	#[test]
	fn property_rows_grow_the_node() {
		let (mut state, a, _) = two_nodes();
		for key in ["name", "age", "email"] {
			let i = state.model.add_node_property(&a).unwrap();
			state
				.model
				.update_node_property(&a, i, Property::new(key, PropertyType::String));
		}
		let scene = build_scene(&state);
		assert_eq!(scene.nodes[0].rows, ["name: string", "age: string", "email: string"]);
		assert_eq!(scene.nodes[0].height, 30.0 + 60.0 + 8.0);
		assert_eq!(scene.nodes[1].height, 60.0);
	}

	#[test]
	fn selection_and_connect_source_are_styled() {
		let (mut state, a, b) = two_nodes();
		let edge = state.model.connect(&a, &b).unwrap();
		state.model.select_edge(&edge);
		state.press(PointerTarget::Node(b.clone()), Point::new(310.0, 10.0), true);

		let scene = build_scene(&state);
		assert!(scene.edges[0].selected);
		assert_eq!(scene.edges[0].stroke(), (ACCENT_COLOR, 3.0));
		assert_eq!(scene.nodes[0].style, NodeStyle::Normal);
		assert_eq!(scene.nodes[1].style, NodeStyle::ConnectSource);
		assert_eq!(scene.preview, Some((Point::new(375.0, 30.0), Point::new(310.0, 10.0))));
	}
}
