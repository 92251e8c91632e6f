use super::types::{Node, Point};

/// Geometry and file settings for the editor.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	/// Width of every node box.
	pub node_width: f64,
	/// Height of a node with no properties. Together with `node_width` this is
	/// the fixed extent edges are anchored to.
	pub node_min_height: f64,
	/// Band holding the node label.
	pub header_height: f64,
	/// One `key: type` line.
	pub row_height: f64,
	/// Space below the last property row.
	pub padding: f64,
	/// Max distance in pixels between the pointer and an edge segment for a hit.
	pub edge_hit_tolerance: f64,
	/// Suggested name of the downloaded export.
	pub export_file_name: String,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			node_width: 150.0,
			node_min_height: 60.0,
			header_height: 30.0,
			row_height: 20.0,
			padding: 8.0,
			edge_hit_tolerance: 6.0,
			export_file_name: "graph-schema.json".into(),
		}
	}
}

impl EditorConfig {
	/// Half the fixed node extent.
	pub fn half_extent(&self) -> Point {
		Point::new(self.node_width / 2.0, self.node_min_height / 2.0)
	}

	/// Edge anchor of a node, in logical coordinates.
	pub fn node_center(&self, node: &Node) -> Point {
		node.position() + self.half_extent()
	}

	/// Drawn height, growing with the property count.
	pub fn node_height(&self, node: &Node) -> f64 {
		let rows = node.properties.len() as f64 * self.row_height;
		let padding = if node.properties.is_empty() { 0.0 } else { self.padding };
		(self.header_height + rows + padding).max(self.node_min_height)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::schema_editor::types::{Property, PropertyType};

	#[test]
	fn default_geometry() {
		let cfg = EditorConfig::default();
		let mut node = Node {
			id: "n".into(),
			label: "N".into(),
			x: 10.0,
			y: 20.0,
			properties: Vec::new(),
		};
		assert_eq!(cfg.half_extent(), Point::new(75.0, 30.0));
		assert_eq!(cfg.node_center(&node), Point::new(85.0, 50.0));
		assert_eq!(cfg.node_height(&node), 60.0);

		node.properties = vec![Property::new("a", PropertyType::String); 3];
		assert_eq!(cfg.node_height(&node), 30.0 + 60.0 + 8.0);
		// Edge anchors ignore the grown height.
		assert_eq!(cfg.node_center(&node), Point::new(85.0, 50.0));
		assert_eq!(cfg.export_file_name, "graph-schema.json");
	}
}
