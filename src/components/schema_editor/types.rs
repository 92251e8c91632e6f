use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Deserializer, Serialize};

/// Label given to every newly connected edge.
pub const DEFAULT_EDGE_LABEL: &str = "RELATES_TO";

/// A point in the logical canvas plane (or in screen space, depending on context).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal, growing rightwards.
	pub x: f64,
	/// Vertical, growing downwards.
	pub y: f64,
}

impl Point {
	/// Point at (`x`, `y`).
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// Value type of a schema property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
	/// Text. New properties start as this.
	#[default]
	String,
	/// Whole number.
	Integer,
	/// Floating-point number.
	Float,
	/// `true` or `false`.
	Boolean,
	/// Calendar date.
	Date,
}

impl PropertyType {
	/// Every type, in dropdown order.
	pub const ALL: [PropertyType; 5] = [
		PropertyType::String,
		PropertyType::Integer,
		PropertyType::Float,
		PropertyType::Boolean,
		PropertyType::Date,
	];

	/// Lower-case name used in files and in the type dropdown.
	pub fn as_str(self) -> &'static str {
		match self {
			PropertyType::String => "string",
			PropertyType::Integer => "integer",
			PropertyType::Float => "float",
			PropertyType::Boolean => "boolean",
			PropertyType::Date => "date",
		}
	}

	/// Inverse of [`PropertyType::as_str`].
	pub fn parse(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|ty| ty.as_str() == value)
	}
}

impl fmt::Display for PropertyType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A typed key on a node or edge. The key may be empty while it is being edited.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
	/// Property name.
	pub key: String,
	/// Stored as `type` in files.
	#[serde(rename = "type")]
	pub ty: PropertyType,
}

impl Property {
	/// Property `key` of type `ty`.
	pub fn new(key: impl Into<String>, ty: PropertyType) -> Self {
		Self { key: key.into(), ty }
	}
}

/// A node type, drawn as a box whose top-left corner is (`x`, `y`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Unique among nodes.
	pub id: String,
	/// Display name.
	pub label: String,
	/// Left edge in logical coordinates.
	pub x: f64,
	/// Top edge in logical coordinates.
	pub y: f64,
	/// Typed keys, in display order.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub properties: Vec<Property>,
}

impl Node {
	/// Top-left corner.
	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}
}

/// A directed relationship between two distinct nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Unique among edges.
	pub id: String,
	/// Id of the node the edge leaves.
	pub source: String,
	/// Id of the node the arrow points at.
	pub target: String,
	/// Relationship name, [`DEFAULT_EDGE_LABEL`] when absent.
	#[serde(default = "default_edge_label")]
	pub label: String,
	/// Typed keys, in display order.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub properties: Vec<Property>,
}

impl Edge {
	/// Whether `node_id` is either endpoint.
	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

/// The exported document: the persisted half of the model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
	/// All nodes.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub nodes: Vec<Node>,
	/// All edges.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub edges: Vec<Edge>,
}

fn default_edge_label() -> String {
	DEFAULT_EDGE_LABEL.to_string()
}

// `null` collections read the same as absent ones.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
