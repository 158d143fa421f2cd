//! Schema metadata: the fields a vSQL expression can reference.
//!
//! A [`Group`] describes one table (or view) as a set of [`Field`]s. A field
//! that is a foreign key carries a join condition and a non-owning reference
//! to the group it points to, so expressions like `p.company.name` can walk
//! from one table to the next.
//!
//! SQL templates use these placeholders:
//!
//! - `{a}` in [`Field::fieldsql`]: the table alias of the group the field
//!   belongs to.
//! - `{m}` / `{d}` in [`Field::joinsql`]: the alias of the master table (the
//!   one containing the field) and of the detail table (the referenced group).

use std::sync::{Arc, RwLock, Weak};

use indexmap::IndexMap;

use crate::types::DataType;

/// Identifier of the fallback field of a group.
pub const WILDCARD: &str = "*";

/// Root variables an expression can reference, by name.
pub type Vars = IndexMap<String, Arc<Field>>;

// ============================================================================
// Field
// ============================================================================

/// One queryable value.
#[derive(Debug, Clone)]
pub struct Field {
    pub identifier: String,
    pub datatype: DataType,
    pub fieldsql: Option<String>,
    pub joinsql: Option<String>,
    refgroup: Option<Weak<Group>>,
}

impl Field {
    pub fn new(identifier: impl Into<String>, datatype: DataType, fieldsql: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            datatype,
            fieldsql: Some(fieldsql.into()),
            joinsql: None,
            refgroup: None,
        }
    }

    /// A field without SQL of its own, e.g. a root variable that only
    /// serves as the entry point to a table.
    pub fn root(identifier: impl Into<String>, datatype: DataType) -> Self {
        Self {
            identifier: identifier.into(),
            datatype,
            fieldsql: None,
            joinsql: None,
            refgroup: None,
        }
    }

    pub fn with_fieldsql(mut self, fieldsql: impl Into<String>) -> Self {
        self.fieldsql = Some(fieldsql.into());
        self
    }

    pub fn with_joinsql(mut self, joinsql: impl Into<String>) -> Self {
        self.joinsql = Some(joinsql.into());
        self
    }

    pub fn with_refgroup(mut self, group: &Arc<Group>) -> Self {
        self.refgroup = Some(Arc::downgrade(group));
        self
    }

    /// The group this field references, if it is a foreign key and the
    /// group is still alive.
    pub fn refgroup(&self) -> Option<Arc<Group>> {
        self.refgroup.as_ref().and_then(Weak::upgrade)
    }
}

// ============================================================================
// Group
// ============================================================================

/// A table (or view) as a set of fields keyed by identifier.
///
/// Fields are added through a shared reference, so groups can reference
/// themselves (a `parent` column) or each other before all fields exist.
#[derive(Debug, Default)]
pub struct Group {
    pub tablesql: Option<String>,
    fields: RwLock<IndexMap<String, Arc<Field>>>,
}

impl Group {
    pub fn new(tablesql: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            tablesql: Some(tablesql.into()),
            fields: RwLock::default(),
        })
    }

    /// A group that isn't backed by a table (e.g. request parameters).
    pub fn virtual_group() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add(&self, field: Field) -> Arc<Field> {
        let field = Arc::new(field);
        self.fields
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(field.identifier.clone(), Arc::clone(&field));
        field
    }

    /// Shorthand for adding a plain column.
    pub fn add_field(
        &self,
        identifier: &str,
        datatype: DataType,
        fieldsql: &str,
    ) -> Arc<Field> {
        self.add(Field::new(identifier, datatype, fieldsql))
    }

    /// Shorthand for adding a foreign key column.
    pub fn add_ref(
        &self,
        identifier: &str,
        datatype: DataType,
        fieldsql: &str,
        joinsql: &str,
        refgroup: &Arc<Group>,
    ) -> Arc<Field> {
        self.add(
            Field::new(identifier, datatype, fieldsql)
                .with_joinsql(joinsql)
                .with_refgroup(refgroup),
        )
    }

    /// Look up `identifier`, falling back to the wildcard field.
    pub fn get(&self, identifier: &str) -> Option<Arc<Field>> {
        let fields = self
            .fields
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        fields
            .get(identifier)
            .or_else(|| fields.get(WILDCARD))
            .cloned()
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_fallback() {
        let params = Group::virtual_group();
        params.add(Field::new("*", DataType::Str, "ignored"));
        params.add_field("lang", DataType::Str, "{a}.lang");

        assert_eq!(params.get("lang").unwrap().identifier, "lang");
        assert_eq!(params.get("whatever").unwrap().identifier, "*");
        assert!(params.tablesql.is_none());
    }

    #[test]
    fn test_self_reference() {
        let fields = Group::new("vsql_field");
        fields.add_field("id", DataType::Str, "{a}.fld_id");
        fields.add_ref(
            "parent",
            DataType::Str,
            "{a}.fld_id_super",
            "{m}.fld_id_super = {d}.fld_id",
            &fields,
        );

        let parent = fields.get("parent").unwrap();
        let target = parent.refgroup().unwrap();
        assert!(Arc::ptr_eq(&target, &fields));
        assert_eq!(target.field_names(), vec!["id", "parent"]);
    }
}
