#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use graph_schema_designer::{
		EditorConfig, EditorState, Point, build_scene, export_schema, import_schema,
	};
	use wasm_bindgen_test::*;

	#[wasm_bindgen_test]
	fn test_connect_and_render_scene() {
		let mut state = EditorState::new(EditorConfig::default(), 800.0, 600.0);
		let a = state.model.create_node(Point::new(0.0, 0.0));
		let b = state.model.create_node(Point::new(300.0, 200.0));
		state.model.connect(&a, &b).expect("Failed to connect nodes");

		let scene = build_scene(&state);
		assert_eq!(scene.nodes.len(), 2);
		assert_eq!(scene.edges.len(), 1);
		assert_eq!(scene.edges[0].label, "RELATES_TO");
	}

	#[wasm_bindgen_test]
	fn test_round_trip() {
		let mut state = EditorState::new(EditorConfig::default(), 800.0, 600.0);
		state.add_node();
		state.add_node();

		let text = export_schema(&state.model).expect("Failed to export schema");
		let mut restored = state.model.clone();
		import_schema(&mut restored, &text).expect("Failed to import schema");
		assert_eq!(restored.nodes(), state.model.nodes());
	}
}
