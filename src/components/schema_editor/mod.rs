mod component;
mod config;
mod files;
mod inspector;
mod io;
mod model;
mod render;
mod scene;
mod state;
mod toolbar;
mod types;

pub use component::SchemaEditor;
pub use config::EditorConfig;
pub use io::{SchemaError, export_schema, import_schema, parse_schema};
pub use model::{SchemaModel, Selection};
pub use scene::{Scene, build_scene};
pub use state::{EditorState, Interaction, PointerTarget, ViewState};
pub use types::{DEFAULT_EDGE_LABEL, Edge, Node, Point, Property, PropertyType, Schema};
