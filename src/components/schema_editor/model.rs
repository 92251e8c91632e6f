use std::collections::HashSet;

use log::{debug, warn};
use uuid::Uuid;

use super::types::{DEFAULT_EDGE_LABEL, Edge, Node, Point, Property, Schema};

/// At most one node or one edge is selected, never both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	/// Nothing selected.
	#[default]
	None,
	/// The node with this id.
	Node(String),
	/// The edge with this id.
	Edge(String),
}

impl Selection {
	/// Id of the selected node, if a node is selected.
	pub fn node(&self) -> Option<&str> {
		match self {
			Selection::Node(id) => Some(id),
			_ => None,
		}
	}

	/// Id of the selected edge, if an edge is selected.
	pub fn edge(&self) -> Option<&str> {
		match self {
			Selection::Edge(id) => Some(id),
			_ => None,
		}
	}

	/// Whether nothing is selected.
	pub fn is_none(&self) -> bool {
		matches!(self, Selection::None)
	}
}

trait HasProperties {
	fn properties_mut(&mut self) -> &mut Vec<Property>;
}

impl HasProperties for Node {
	fn properties_mut(&mut self) -> &mut Vec<Property> {
		&mut self.properties
	}
}

impl HasProperties for Edge {
	fn properties_mut(&mut self) -> &mut Vec<Property> {
		&mut self.properties
	}
}

fn push_property(item: &mut impl HasProperties) -> usize {
	let properties = item.properties_mut();
	properties.push(Property::default());
	properties.len() - 1
}

fn replace_property(item: &mut impl HasProperties, index: usize, property: Property) -> bool {
	match item.properties_mut().get_mut(index) {
		Some(slot) => {
			*slot = property;
			true
		}
		None => false,
	}
}

fn drop_property(item: &mut impl HasProperties, index: usize) -> bool {
	let properties = item.properties_mut();
	if index < properties.len() {
		properties.remove(index);
		true
	} else {
		false
	}
}

fn fresh_id(prefix: &str) -> String {
	format!("{prefix}-{}", Uuid::new_v4())
}

/// Nodes, edges and the current selection.
///
/// Every operation is infallible: targeting an unknown id or an out of range
/// property index leaves the model untouched and reports `false`/`None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaModel {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	selection: Selection,
}

impl SchemaModel {
	/// Empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Nodes in creation order; later ones draw on top.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in creation order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Current selection.
	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Edge by id.
	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	fn edge_mut(&mut self, id: &str) -> Option<&mut Edge> {
		self.edges.iter_mut().find(|e| e.id == id)
	}

	/// Adds a node at `position` and returns its id.
	pub fn create_node(&mut self, position: Point) -> String {
		let id = fresh_id("node");
		let label = format!("Node {}", self.nodes.len() + 1);
		debug!("create node {id} ({label}) at ({}, {})", position.x, position.y);
		self.nodes.push(Node {
			id: id.clone(),
			label,
			x: position.x,
			y: position.y,
			properties: Vec::new(),
		});
		id
	}

	/// Removes the node and every edge touching it.
	pub fn delete_node(&mut self, id: &str) -> bool {
		let before = self.nodes.len();
		self.nodes.retain(|n| n.id != id);
		if self.nodes.len() == before {
			return false;
		}

		let edges_before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		debug!(
			"delete node {id}, cascading {} edge(s)",
			edges_before - self.edges.len()
		);

		let selection_gone = match &self.selection {
			Selection::Node(sel) => sel == id,
			Selection::Edge(sel) => self.edge(sel).is_none(),
			Selection::None => false,
		};
		if selection_gone {
			self.selection = Selection::None;
		}
		true
	}

	/// Renames a node.
	pub fn set_node_label(&mut self, id: &str, label: impl Into<String>) -> bool {
		self.node_mut(id)
			.map(|n| n.label = label.into())
			.is_some()
	}

	/// Moves a node's top-left corner to `position`.
	pub fn move_node(&mut self, id: &str, position: Point) -> bool {
		self.node_mut(id)
			.map(|n| {
				n.x = position.x;
				n.y = position.y;
			})
			.is_some()
	}

	/// Appends an empty `string` property and returns its index.
	pub fn add_node_property(&mut self, id: &str) -> Option<usize> {
		self.node_mut(id).map(|n| push_property(n))
	}

	/// Overwrites the property at `index`.
	pub fn update_node_property(&mut self, id: &str, index: usize, property: Property) -> bool {
		self.node_mut(id)
			.is_some_and(|n| replace_property(n, index, property))
	}

	/// Removes the property at `index`; later ones shift up.
	pub fn remove_node_property(&mut self, id: &str, index: usize) -> bool {
		self.node_mut(id).is_some_and(|n| drop_property(n, index))
	}

	/// Creates an edge `source -> target` labelled [`DEFAULT_EDGE_LABEL`].
	///
	/// Self-loops and unknown endpoints are ignored.
	pub fn connect(&mut self, source: &str, target: &str) -> Option<String> {
		if source == target {
			debug!("ignoring self-loop on {source}");
			return None;
		}
		if self.node(source).is_none() || self.node(target).is_none() {
			warn!("cannot connect {source} -> {target}: unknown node");
			return None;
		}
		let id = fresh_id("edge");
		debug!("connect {source} -> {target} as {id}");
		self.edges.push(Edge {
			id: id.clone(),
			source: source.to_string(),
			target: target.to_string(),
			label: DEFAULT_EDGE_LABEL.to_string(),
			properties: Vec::new(),
		});
		Some(id)
	}

	/// Removes an edge, clearing the selection if it was selected.
	pub fn delete_edge(&mut self, id: &str) -> bool {
		let before = self.edges.len();
		self.edges.retain(|e| e.id != id);
		if self.edges.len() == before {
			return false;
		}
		debug!("delete edge {id}");
		if self.selection.edge() == Some(id) {
			self.selection = Selection::None;
		}
		true
	}

	/// Renames an edge.
	pub fn set_edge_label(&mut self, id: &str, label: impl Into<String>) -> bool {
		self.edge_mut(id)
			.map(|e| e.label = label.into())
			.is_some()
	}

	/// Appends an empty `string` property and returns its index.
	pub fn add_edge_property(&mut self, id: &str) -> Option<usize> {
		self.edge_mut(id).map(|n| push_property(n))
	}

	/// Overwrites the property at `index`.
	pub fn update_edge_property(&mut self, id: &str, index: usize, property: Property) -> bool {
		self.edge_mut(id)
			.is_some_and(|e| replace_property(e, index, property))
	}

	/// Removes the property at `index`; later ones shift up.
	pub fn remove_edge_property(&mut self, id: &str, index: usize) -> bool {
		self.edge_mut(id).is_some_and(|e| drop_property(e, index))
	}

	/// Selects a node, replacing any previous selection.
	pub fn select_node(&mut self, id: &str) -> bool {
		if self.node(id).is_none() {
			return false;
		}
		self.selection = Selection::Node(id.to_string());
		true
	}

	/// Selects an edge, replacing any previous selection.
	pub fn select_edge(&mut self, id: &str) -> bool {
		if self.edge(id).is_none() {
			return false;
		}
		self.selection = Selection::Edge(id.to_string());
		true
	}

	/// Selects nothing.
	pub fn clear_selection(&mut self) {
		self.selection = Selection::None;
	}

	/// Deletes whichever node or edge is selected.
	pub fn delete_selected(&mut self) -> bool {
		match self.selection.clone() {
			Selection::Node(id) => self.delete_node(&id),
			Selection::Edge(id) => self.delete_edge(&id),
			Selection::None => false,
		}
	}

	/// Snapshot of the persisted fields.
	pub fn to_schema(&self) -> Schema {
		Schema {
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
		}
	}

	/// Replaces both collections and clears the selection.
	///
	/// Edges whose endpoints are not in `schema.nodes` are dropped.
	pub fn replace(&mut self, schema: Schema) {
		let Schema { nodes, edges } = schema;
		let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let (edges, dangling): (Vec<Edge>, Vec<Edge>) = edges
			.into_iter()
			.partition(|e| known.contains(e.source.as_str()) && known.contains(e.target.as_str()));
		for edge in &dangling {
			warn!(
				"dropping edge {} ({} -> {}): endpoint missing",
				edge.id, edge.source, edge.target
			);
		}
		self.nodes = nodes;
		self.edges = edges;
		self.selection = Selection::None;
	}
}
