//! Loading schema metadata from TOML.
//!
//! Example schema:
//! ```toml
//! [groups.person]
//! tablesql = "person"
//!
//! [groups.person.fields.name]
//! type = "STR"
//! sql = "{a}.per_name"
//!
//! [groups.person.fields.boss]
//! type = "STR"
//! sql = "{a}.per_boss_id"
//! join = "{m}.per_boss_id = {d}.per_id"
//! ref = "person"
//!
//! [vars.p]
//! type = "STR"
//! ref = "person"
//! ```
//!
//! Groups are created before any field is added, so `ref` can name any group
//! in the file, including the one the field belongs to.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::query::Query;
use crate::schema::{Field, Group, Vars};
use crate::types::DataType;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read schema file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse schema file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Field '{field}' has unknown type '{datatype}'")]
    UnknownType { field: String, datatype: String },

    #[error("Field '{field}' references unknown group '{group}'")]
    UnknownGroup { field: String, group: String },

    #[error("Field '{0}' has a join condition but doesn't reference a group")]
    JoinWithoutRef(String),
}

// ============================================================================
// File format
// ============================================================================

/// The schema file as written.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaFile {
    pub groups: IndexMap<String, GroupDef>,
    pub vars: IndexMap<String, FieldDef>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupDef {
    /// Table SQL; a group without one (request parameters) can't be joined.
    pub tablesql: Option<String>,
    pub fields: IndexMap<String, FieldDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    #[serde(rename = "type")]
    pub datatype: String,
    #[serde(default)]
    pub sql: Option<String>,
    #[serde(default)]
    pub join: Option<String>,
    #[serde(default, rename = "ref")]
    pub refgroup: Option<String>,
}

// ============================================================================
// Loaded schema
// ============================================================================

/// Groups and root variables loaded from a schema file.
///
/// Fields only hold weak references to the groups they point to, so the
/// schema has to outlive every query built from its variables.
#[derive(Debug, Default)]
pub struct Schema {
    groups: IndexMap<String, Arc<Group>>,
    vars: Vars,
}

impl Schema {
    /// Load a schema from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SchemaError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let schema: Schema = content.parse()?;
        debug!(
            path = %path.display(),
            groups = schema.groups.len(),
            vars = schema.vars.len(),
            "loaded schema"
        );
        Ok(schema)
    }

    /// Build the schema from its file representation.
    pub fn from_file(file: &SchemaFile) -> Result<Self, SchemaError> {
        // Pass 1: every group exists before any field refers to one
        let groups: IndexMap<String, Arc<Group>> = file
            .groups
            .iter()
            .map(|(name, def)| {
                let group = match &def.tablesql {
                    Some(tablesql) => Group::new(tablesql.clone()),
                    None => Group::virtual_group(),
                };
                (name.clone(), group)
            })
            .collect();

        // Pass 2: fields
        for (name, def) in &file.groups {
            let group = &groups[name];
            for (identifier, field) in &def.fields {
                let qualified = format!("{name}.{identifier}");
                group.add(build_field(identifier, &qualified, field, &groups)?);
            }
        }

        let mut vars = Vars::new();
        for (identifier, field) in &file.vars {
            let field = build_field(identifier, identifier, field, &groups)?;
            vars.insert(identifier.clone(), Arc::new(field));
        }

        Ok(Self { groups, vars })
    }

    pub fn group(&self, name: &str) -> Option<&Arc<Group>> {
        self.groups.get(name)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &Arc<Group>)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// An empty query with the schema's variables in scope.
    pub fn query(&self) -> Query {
        Query::new().with_vars(self.vars.clone())
    }
}

impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let file: SchemaFile = toml::from_str(content)?;
        Self::from_file(&file)
    }
}

fn build_field(
    identifier: &str,
    qualified: &str,
    def: &FieldDef,
    groups: &IndexMap<String, Arc<Group>>,
) -> Result<Field, SchemaError> {
    let datatype = DataType::from_name(&def.datatype).ok_or_else(|| SchemaError::UnknownType {
        field: qualified.to_string(),
        datatype: def.datatype.clone(),
    })?;

    let mut field = Field::root(identifier, datatype);
    if let Some(sql) = &def.sql {
        field = field.with_fieldsql(sql.clone());
    }

    match (&def.refgroup, &def.join) {
        (Some(name), join) => {
            let group = groups.get(name).ok_or_else(|| SchemaError::UnknownGroup {
                field: qualified.to_string(),
                group: name.clone(),
            })?;
            field = field.with_refgroup(group);
            if let Some(join) = join {
                field = field.with_joinsql(join.clone());
            }
        }
        (None, Some(_)) => return Err(SchemaError::JoinWithoutRef(qualified.to_string())),
        (None, None) => {}
    }

    Ok(field)
}
