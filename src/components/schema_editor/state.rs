use log::debug;

use super::config::EditorConfig;
use super::io::{self, SchemaError};
use super::model::SchemaModel;
use super::types::Point;

/// What a pointer press landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget {
	/// A node box, by id.
	Node(String),
	/// An edge segment, by id.
	Edge(String),
	/// Empty background.
	Canvas,
}

/// What the pointer is currently doing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	/// No gesture in progress.
	#[default]
	Idle,
	/// Moving a node with the pointer held down.
	Dragging {
		/// Node being moved.
		node_id: String,
		/// Pointer minus node position at press time.
		offset: Point,
	},
	/// Moving the view with the pointer held down.
	Panning {
		/// Pointer minus pan offset at press time.
		anchor: Point,
	},
	/// Waiting for a modifier-press on a second node.
	Connecting {
		/// Node the new edge will leave from.
		source: String,
	},
}

/// Transient, non-persisted view state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
	/// Screen position of the logical origin.
	pub pan: Point,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Last known pointer position in screen space.
	pub pointer: Option<Point>,
}

impl ViewState {
	/// Screen to logical coordinates.
	pub fn to_logical(&self, screen: Point) -> Point {
		screen - self.pan
	}

	/// Logical to screen coordinates.
	pub fn to_screen(&self, logical: Point) -> Point {
		logical + self.pan
	}
}

/// The single owner of model and view state for one editor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorState {
	/// Persisted nodes and edges plus the selection.
	pub model: SchemaModel,
	/// Pan, size and pointer.
	pub view: ViewState,
	/// Gesture in progress.
	pub interaction: Interaction,
	/// Geometry and file settings.
	pub config: EditorConfig,
}

impl EditorState {
	/// Empty editor with a `width` by `height` canvas.
	pub fn new(config: EditorConfig, width: f64, height: f64) -> Self {
		Self {
			config,
			view: ViewState {
				width,
				height,
				..ViewState::default()
			},
			..Self::default()
		}
	}

	/// Records a new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.view.width = width;
		self.view.height = height;
	}

	/// Source node while in connect mode.
	pub fn connect_source(&self) -> Option<&str> {
		match &self.interaction {
			Interaction::Connecting { source } => Some(source),
			_ => None,
		}
	}

	/// Adds a node centred in the visible area and selects it.
	pub fn add_node(&mut self) -> String {
		let center = Point::new(self.view.width / 2.0, self.view.height / 2.0);
		let position = self.view.to_logical(center) - self.config.half_extent();
		let id = self.model.create_node(position);
		self.model.select_node(&id);
		id
	}

	/// Top-most node under a screen point, else the nearest edge within tolerance.
	pub fn target_at(&self, screen: Point) -> PointerTarget {
		let p = self.view.to_logical(screen);
		let cfg = &self.config;

		let node = self.model.nodes().iter().rev().find(|n| {
			let inside_x = p.x >= n.x && p.x <= n.x + cfg.node_width;
			inside_x && p.y >= n.y && p.y <= n.y + cfg.node_height(n)
		});
		if let Some(node) = node {
			return PointerTarget::Node(node.id.clone());
		}

		let mut best: Option<(f64, &str)> = None;
		for edge in self.model.edges() {
			let src = self.model.node(&edge.source);
			let tgt = self.model.node(&edge.target);
			let (Some(src), Some(tgt)) = (src, tgt) else {
				continue;
			};
			let d = distance_to_segment(p, cfg.node_center(src), cfg.node_center(tgt));
			if d <= cfg.edge_hit_tolerance && best.is_none_or(|(bd, _)| d < bd) {
				best = Some((d, &edge.id));
			}
		}
		match best {
			Some((_, id)) => PointerTarget::Edge(id.to_string()),
			None => PointerTarget::Canvas,
		}
	}

	/// Press at a screen point; the target is found by hit testing.
	pub fn pointer_down(&mut self, screen: Point, modifier: bool) {
		let target = self.target_at(screen);
		self.press(target, screen, modifier);
	}

	/// Applies a press on a known target.
	pub fn press(&mut self, target: PointerTarget, screen: Point, modifier: bool) {
		self.view.pointer = Some(screen);
		let connecting = self.connect_source().map(str::to_owned);

		match target {
			PointerTarget::Node(id) if modifier => match connecting {
				None => {
					debug!("connect mode from {id}");
					self.interaction = Interaction::Connecting { source: id };
				}
				Some(source) => {
					if source != id {
						self.model.connect(&source, &id);
					}
					self.interaction = Interaction::Idle;
				}
			},
			// Connect mode survives a plain press; the node is only selected.
			PointerTarget::Node(id) if connecting.is_some() => {
				self.model.select_node(&id);
			}
			PointerTarget::Node(id) => {
				let Some(node) = self.model.node(&id) else {
					return;
				};
				let offset = screen - node.position();
				self.model.select_node(&id);
				self.interaction = Interaction::Dragging { node_id: id, offset };
			}
			PointerTarget::Edge(id) => {
				self.model.select_edge(&id);
				self.interaction = Interaction::Idle;
			}
			PointerTarget::Canvas if connecting.is_some() => {
				debug!("connect mode cancelled");
				self.interaction = Interaction::Idle;
			}
			PointerTarget::Canvas => {
				self.model.clear_selection();
				self.interaction = Interaction::Panning {
					anchor: screen - self.view.pan,
				};
			}
		}
	}

	/// Returns whether anything visible changed.
	pub fn pointer_move(&mut self, screen: Point) -> bool {
		self.view.pointer = Some(screen);
		match &self.interaction {
			Interaction::Dragging { node_id, offset } => {
				let position = screen - *offset;
				let node_id = node_id.clone();
				self.model.move_node(&node_id, position)
			}
			Interaction::Panning { anchor } => {
				self.view.pan = screen - *anchor;
				true
			}
			// The connection preview follows the pointer.
			Interaction::Connecting { .. } => true,
			Interaction::Idle => false,
		}
	}

	/// Pointer release or leaving the canvas.
	pub fn pointer_up(&mut self) {
		if matches!(
			self.interaction,
			Interaction::Dragging { .. } | Interaction::Panning { .. }
		) {
			self.interaction = Interaction::Idle;
		}
	}

	/// Leaves connect mode; returns whether it was active.
	pub fn cancel_connect(&mut self) -> bool {
		if self.connect_source().is_some() {
			self.interaction = Interaction::Idle;
			true
		} else {
			false
		}
	}

	/// Drops transient state that may refer to ids no longer in the model.
	pub fn reset_interaction(&mut self) {
		self.interaction = Interaction::Idle;
	}

	/// Replaces the model from a schema document. On error nothing changes.
	pub fn import(&mut self, text: &str) -> Result<(), SchemaError> {
		io::import_schema(&mut self.model, text)?;
		self.reset_interaction();
		Ok(())
	}

	/// The model as a pretty-printed document.
	pub fn export(&self) -> Result<String, SchemaError> {
		io::export_schema(&self.model)
	}

	/// Deletes the selection and drops any gesture that referred to it.
	pub fn delete_selected(&mut self) -> bool {
		let deleted = self.model.delete_selected();
		if deleted {
			let stale = match &self.interaction {
				Interaction::Dragging { node_id: id, .. }
				| Interaction::Connecting { source: id } => self.model.node(id).is_none(),
				_ => false,
			};
			if stale {
				self.reset_interaction();
			}
		}
		deleted
	}
}

pub(crate) fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < f64::EPSILON {
		0.0
	} else {
		(((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.x + t * dx, a.y + t * dy);
	((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}
