//! Configuration module for vSQL.
//!
//! Handles render settings and schema files, both TOML.

mod schema;
mod settings;

pub use schema::{FieldDef, GroupDef, Schema, SchemaError, SchemaFile};
pub use settings::{expand_env_vars, RenderSettings, Settings, SettingsError};
