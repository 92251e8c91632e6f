//! JSON export and import of the schema document.

use std::collections::HashSet;

use log::info;
use serde::de::Error as _;
use serde_json::Value;
use thiserror::Error;

use super::model::SchemaModel;
use super::types::Schema;

/// Failure to read, parse or write a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
	/// Not JSON, not an object, or fields of the wrong shape.
	#[error("invalid schema file: {0}")]
	Parse(#[source] serde_json::Error),
	/// Export could not be encoded.
	#[error("could not serialize schema: {0}")]
	Serialize(#[source] serde_json::Error),
	/// Two nodes share an id.
	#[error("invalid schema file: duplicate node id `{0}`")]
	DuplicateNodeId(String),
	/// Two edges share an id.
	#[error("invalid schema file: duplicate edge id `{0}`")]
	DuplicateEdgeId(String),
	/// The browser could not hand over the file contents.
	#[error("could not read file: {0}")]
	Read(String),
}

/// Pretty-printed document with the persisted fields of every node and edge.
pub fn export_schema(model: &SchemaModel) -> Result<String, SchemaError> {
	let json = serde_json::to_string_pretty(&model.to_schema()).map_err(SchemaError::Serialize)?;
	info!(
		"exported {} node(s), {} edge(s)",
		model.nodes().len(),
		model.edges().len()
	);
	Ok(json)
}

/// Parses a document. Missing or `null` collections read as empty.
pub fn parse_schema(text: &str) -> Result<Schema, SchemaError> {
	let value: Value = serde_json::from_str(text).map_err(SchemaError::Parse)?;
	// A derived struct also reads JSON arrays positionally; only objects are documents.
	if !value.is_object() {
		return Err(SchemaError::Parse(serde_json::Error::custom(
			"expected a JSON object with `nodes` and `edges`",
		)));
	}
	let schema: Schema = serde_json::from_value(value).map_err(SchemaError::Parse)?;

	let mut seen = HashSet::new();
	if let Some(node) = schema.nodes.iter().find(|n| !seen.insert(n.id.as_str())) {
		return Err(SchemaError::DuplicateNodeId(node.id.clone()));
	}
	let mut seen = HashSet::new();
	if let Some(edge) = schema.edges.iter().find(|e| !seen.insert(e.id.as_str())) {
		return Err(SchemaError::DuplicateEdgeId(edge.id.clone()));
	}
	Ok(schema)
}

/// Replaces the model with the parsed document, or leaves it untouched on error.
pub fn import_schema(model: &mut SchemaModel, text: &str) -> Result<(), SchemaError> {
	let schema = parse_schema(text)?;
	info!(
		"imported {} node(s), {} edge(s)",
		schema.nodes.len(),
		schema.edges.len()
	);
	model.replace(schema);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::super::types::Point;
	use super::*;

	#[test]
	fn null_collections_read_as_empty() {
		let schema = parse_schema(r#"{"nodes": null, "edges": null}"#).unwrap();
		assert_eq!(schema, Schema::default());
	}

	#[test]
	fn missing_optional_fields_get_defaults() {
		let schema = parse_schema(
			r#"{
				"nodes": [
					{"id": "a", "label": "A", "x": 0, "y": 0},
					{"id": "b", "label": "B", "x": 1.5, "y": -2}
				],
				"edges": [{"id": "e", "source": "a", "target": "b"}]
			}"#,
		)
		.unwrap();
		assert!(schema.nodes[0].properties.is_empty());
		assert_eq!(schema.nodes[1].x, 1.5);
		assert_eq!(schema.edges[0].label, "RELATES_TO");
	}

	#[test]
	fn unknown_property_type_is_malformed() {
		let err = parse_schema(
			r#"{"nodes": [{"id": "a", "label": "A", "x": 0, "y": 0,
				"properties": [{"key": "k", "type": "text"}]}]}"#,
		)
		.unwrap_err();
		assert!(matches!(err, SchemaError::Parse(_)));
	}

	#[test]
	fn non_object_documents_are_malformed() {
		assert!(matches!(parse_schema("[]"), Err(SchemaError::Parse(_))));
		assert!(matches!(parse_schema("42"), Err(SchemaError::Parse(_))));
		assert!(matches!(parse_schema("null"), Err(SchemaError::Parse(_))));
		assert!(matches!(
			parse_schema(r#"[[{"id": "x", "label": "X", "x": 0, "y": 0}]]"#),
			Err(SchemaError::Parse(_))
		));
	}

	#[test]
	fn array_document_leaves_model_untouched() {
		let mut model = SchemaModel::new();
		model.create_node(Point::new(1.0, 2.0));
		let before = model.clone();

		let positional = r#"[[{"id": "x", "label": "X", "x": 0, "y": 0}]]"#;
		assert!(import_schema(&mut model, "[]").is_err());
		assert!(import_schema(&mut model, positional).is_err());
		assert_eq!(model, before);
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let err = parse_schema(
			r#"{"nodes": [
				{"id": "a", "label": "A", "x": 0, "y": 0},
				{"id": "a", "label": "B", "x": 0, "y": 0}
			]}"#,
		)
		.unwrap_err();
		assert!(matches!(err, SchemaError::DuplicateNodeId(id) if id == "a"));

		let err = parse_schema(
			r#"{"nodes": [
				{"id": "a", "label": "A", "x": 0, "y": 0},
				{"id": "b", "label": "B", "x": 0, "y": 0}
			], "edges": [
				{"id": "e", "source": "a", "target": "b", "label": "X"},
				{"id": "e", "source": "b", "target": "a", "label": "Y"}
			]}"#,
		)
		.unwrap_err();
		assert!(matches!(err, SchemaError::DuplicateEdgeId(id) if id == "e"));
	}

	#[test]
	fn parse_error_message_is_user_facing() {
		let err = parse_schema("{not json").unwrap_err();
		assert!(err.to_string().starts_with("invalid schema file"));
	}
}
