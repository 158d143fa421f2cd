//! # vSQL
//!
//! A small, type-checked expression language that compiles to Oracle SQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                vSQL source expression                    │
//! │        (p.name.upper() + ' ' + str(p.age))               │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [syntax]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Expression tree with spans                  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [ingest + schema]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Ast (typed by the rule registry, validated)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [query]
//! ┌─────────────────────────────────────────────────────────┐
//! │     SQL query (select, joins, where, order by, paging)   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ```
//! use vsql::prelude::*;
//!
//! let person = Group::new("person");
//! person.add_field("name", DataType::Str, "{a}.per_name");
//! let mut query = Query::new().var("p", Arc::new(Field::root("p", DataType::Str).with_refgroup(&person)));
//! query.select_vsql("p.name", None, None)?;
//! assert_eq!(
//!     query.sqlsource_with_indent(""),
//!     "select t1.per_name /* p.name */ from person t1 /* p */"
//! );
//! # Ok::<(), vsql::query::QueryError>(())
//! ```

pub mod ast;
pub mod compile;
pub mod config;
pub mod error;
pub mod ingest;
pub mod query;
pub mod rules;
pub mod schema;
pub mod syntax;
pub mod types;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use std::sync::Arc;

    pub use crate::ast::{Ast, AstKind, BinaryOp, UnaryOp};
    pub use crate::compile::{compile, compile_typed, compile_valid, CompileError};
    pub use crate::error::{ErrorKind, VsqlError};
    pub use crate::query::{NullsOrder, Query, QueryError, SortDir};
    pub use crate::schema::{Field, Group, Vars};
    pub use crate::types::{Aggregate, Color, DataType, NodeType};
}

pub use ast::Ast;
pub use compile::{compile, compile_typed, compile_valid, CompileError};
pub use error::{ErrorKind, VsqlError};
pub use query::Query;
pub use types::DataType;
