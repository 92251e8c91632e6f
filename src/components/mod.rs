pub mod schema_editor;
