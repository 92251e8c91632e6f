use anyhow::Result;
use graph_schema_designer::{
	EditorConfig, EditorState, Point, Property, PropertyType, SchemaError, SchemaModel,
	export_schema, import_schema,
};
use serde_json::{Value, json};

fn sample_model() -> SchemaModel {
	let mut model = SchemaModel::new();
	let a = model.create_node(Point::new(0.0, 0.0));
	let b = model.create_node(Point::new(100.5, -40.25));
	model.set_node_label(&a, "Person");
	model.add_node_property(&a);
	model.update_node_property(&a, 0, Property::new("name", PropertyType::String));
	let edge = model.connect(&a, &b).expect("a -> b");
	model.add_edge_property(&edge);
	model.update_edge_property(&edge, 0, Property::new("since", PropertyType::Date));
	model
}

#[test]
fn export_contains_only_persisted_fields() -> Result<()> {
	let model = sample_model();
	let json: Value = serde_json::from_str(&export_schema(&model)?)?;

	let node = &json["nodes"][0];
	assert_eq!(node["label"], "Person");
	assert_eq!(node["properties"], json!([{"key": "name", "type": "string"}]));
	let keys: Vec<&str> = node
		.as_object()
		.expect("node is an object")
		.keys()
		.map(String::as_str)
		.collect();
	assert_eq!(keys.len(), 5);
	for key in ["id", "label", "x", "y", "properties"] {
		assert!(keys.contains(&key), "missing {key}");
	}

	let edge = &json["edges"][0];
	assert_eq!(edge["label"], "RELATES_TO");
	assert_eq!(edge["source"], node["id"]);
	assert_eq!(edge["properties"], json!([{"key": "since", "type": "date"}]));
	Ok(())
}

#[test]
fn export_is_pretty_printed() -> Result<()> {
	let text = export_schema(&sample_model())?;
	assert!(text.contains("\n  \"nodes\": ["));
	Ok(())
}

#[test]
fn export_then_import_preserves_persisted_fields() -> Result<()> {
	let model = sample_model();
	let text = export_schema(&model)?;

	let mut restored = SchemaModel::new();
	restored.create_node(Point::new(9.0, 9.0));
	import_schema(&mut restored, &text)?;

	assert_eq!(restored.nodes(), model.nodes());
	assert_eq!(restored.edges(), model.edges());
	Ok(())
}

#[test]
fn missing_collections_import_as_empty() -> Result<()> {
	let mut model = sample_model();
	import_schema(
		&mut model,
		r#"{"nodes": [{"id": "n1", "label": "Solo", "x": 1, "y": 2, "properties": []}]}"#,
	)?;
	assert_eq!(model.nodes().len(), 1);
	assert!(model.edges().is_empty());

	import_schema(&mut model, "{}")?;
	assert!(model.nodes().is_empty());
	assert!(model.edges().is_empty());
	Ok(())
}

#[test]
fn invalid_text_leaves_model_untouched() {
	let mut state = EditorState::new(EditorConfig::default(), 800.0, 600.0);
	state.model = sample_model();
	let first = state.model.nodes()[0].id.clone();
	state.model.select_node(&first);
	let before = state.model.clone();

	let err = state.import("{ this is not json").unwrap_err();
	assert!(matches!(err, SchemaError::Parse(_)));
	assert!(err.to_string().contains("invalid schema file"));
	assert_eq!(state.model, before);
}

#[test]
fn top_level_arrays_are_rejected() {
	let mut state = EditorState::new(EditorConfig::default(), 800.0, 600.0);
	state.add_node();
	let before = state.model.clone();

	for text in ["[]", r#"[[{"id": "x", "label": "X", "x": 0, "y": 0}], []]"#] {
		let err = state.import(text).unwrap_err();
		assert!(matches!(err, SchemaError::Parse(_)), "{text}");
		assert!(err.to_string().starts_with("invalid schema file"));
		assert_eq!(state.model, before);
	}
}

#[test]
fn import_clears_selection_and_connect_mode() -> Result<()> {
	let mut state = EditorState::new(EditorConfig::default(), 800.0, 600.0);
	let a = state.add_node();
	state.pointer_down(Point::new(400.0, 300.0), true);
	assert_eq!(state.connect_source(), Some(a.as_str()));

	state.import(&export_schema(&sample_model())?)?;
	assert!(state.model.selection().is_none());
	assert_eq!(state.connect_source(), None);
	assert_eq!(state.model.nodes().len(), 2);
	Ok(())
}

#[test]
fn imported_ids_do_not_collide_with_new_nodes() -> Result<()> {
	let mut model = SchemaModel::new();
	import_schema(
		&mut model,
		r#"{"nodes": [{"id": "node-1", "label": "A", "x": 0, "y": 0}], "edges": []}"#,
	)?;
	let fresh = model.create_node(Point::default());
	assert_ne!(fresh, "node-1");
	assert_eq!(model.nodes()[1].label, "Node 2");
	Ok(())
}
