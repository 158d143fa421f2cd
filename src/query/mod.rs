//! Assembling SQL queries from vSQL expressions.
//!
//! A [`Query`] collects select, where and order by expressions. Compiling a
//! vSQL expression registers every field reference in it: each table reached
//! through a reference chain (`p.company.name` reaches the person table and
//! the company table) is added to the `from` list under a fresh alias, and
//! the join condition leading to it is added to the `where` clause. Tables
//! are registered once per reference path, so expressions sharing a path
//! share the alias.
//!
//! ```
//! use vsql::query::Query;
//!
//! let mut query = Query::new();
//! query.select_vsql("now() + years(3)", None, None).unwrap();
//! assert_eq!(
//!     query.sqlsource(),
//!     "select\n\tvsqlimpl_pkg.add_datetime_months(sysdate, (12 * 3)) /* now() + years(3) */\nfrom\n\tdual"
//! );
//! ```

mod render;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::trace;

use crate::ast::{Ast, AstKind};
use crate::compile::{compile_valid, CompileError};
use crate::error::VsqlError;
use crate::schema::{Field, Vars};
use crate::types::{Aggregate, DataType};
use render::TokenStream;

/// Default indentation of [`Query::sqlsource`].
pub const DEFAULT_INDENT: &str = "\t";

/// Errors from building a query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Invalid(#[from] VsqlError),

    #[error("Can't mix aggregated and non-aggregated select expressions")]
    MixedAggregation,

    #[error("Can't aggregate expression '{expr}' of type {datatype} using aggregation {aggregate}")]
    Aggregate {
        expr: String,
        datatype: DataType,
        aggregate: &'static str,
    },

    #[error("duplicate table alias '{0}'")]
    DuplicateAlias(String),

    #[error("Unknown field '{0}'!")]
    UnknownField(String),

    #[error("Unknown aggregate '{0}'")]
    UnknownAggregate(String),
}

/// SQL comment containing `text`; a `*/` inside `text` can't end it early.
pub(crate) fn comment(text: &str) -> String {
    format!("/* {} */", text.replace("/*", "/ *").replace("*/", "* /"))
}

/// Append `/* text */` unless `sql` already ends with exactly that comment.
fn with_comment(sql: String, text: Option<&str>) -> String {
    match text {
        Some(text) => {
            let comment = comment(text);
            if sql.ends_with(&comment) {
                sql
            } else {
                format!("{sql} {comment}")
            }
        }
        None => sql,
    }
}

// ============================================================================
// Order by
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

impl FromStr for SortDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            _ => Err(format!("unknown sort direction '{s}'")),
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            NullsOrder::First => "first",
            NullsOrder::Last => "last",
        }
    }
}

impl FromStr for NullsOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(NullsOrder::First),
            "last" => Ok(NullsOrder::Last),
            _ => Err(format!("unknown nulls order '{s}'")),
        }
    }
}

// ============================================================================
// Clause entries
// ============================================================================

#[derive(Debug, Clone)]
struct SelectEntry {
    /// SQL including its trailing comment.
    sql: String,
    alias: Option<String>,
    aggregate: Option<Aggregate>,
}

impl SelectEntry {
    fn render(&self, with_alias: bool) -> String {
        let mut sql = match self.aggregate {
            Some(Aggregate::Count) => "count(*)".to_string(),
            Some(Aggregate::Group) | None => self.sql.clone(),
            Some(aggregate) => format!("{}({})", aggregate.as_str(), self.sql),
        };
        if let (true, Some(alias)) = (with_alias, &self.alias) {
            sql.push_str(" as ");
            sql.push_str(alias);
        }
        sql
    }
}

#[derive(Debug, Clone)]
struct FromEntry {
    table: String,
    comment: Option<String>,
    alias: Option<String>,
}

impl FromEntry {
    fn render(&self) -> String {
        let table = match &self.alias {
            Some(alias) => format!("{} {alias}", self.table),
            None => self.table.clone(),
        };
        with_comment(table, self.comment.as_deref())
    }
}

// ============================================================================
// Query
// ============================================================================

/// An SQL query under construction.
#[derive(Debug, Clone, Default)]
pub struct Query {
    comment: Option<String>,
    vars: Vars,
    /// Keyed by rendered SQL.
    fields: IndexMap<String, SelectEntry>,
    aggregated_fields: IndexMap<String, SelectEntry>,
    /// Keyed by `"table alias"`.
    from: IndexMap<String, FromEntry>,
    /// Rendered conditions, keyed by their SQL without comment.
    wheres: IndexMap<String, String>,
    orderby: Vec<String>,
    offset: Option<u64>,
    limit: Option<u64>,
    /// Alias per registered reference path; `None` for paths into groups
    /// without a table.
    aliases: HashMap<String, Option<String>>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Make the root variable `name` available to expressions.
    pub fn var(mut self, name: impl Into<String>, field: Arc<Field>) -> Self {
        self.vars.insert(name.into(), field);
        self
    }

    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.vars.extend(vars);
        self
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register the tables needed to access the field `fieldref` refers to
    /// and return the alias of the table containing it.
    ///
    /// Returns `None` for invalid references, root variables and fields of
    /// groups without a table.
    pub fn register(&mut self, fieldref: &Ast) -> Option<String> {
        if fieldref.error.is_some() {
            return None;
        }
        let AstKind::FieldRef {
            parent: Some(parent),
            ..
        } = &fieldref.kind
        else {
            return None;
        };
        let identifier = parent.full_identifier()?;
        if let Some(alias) = self.aliases.get(&identifier) {
            return alias.clone();
        }

        let master = self.register(parent);
        let AstKind::FieldRef {
            field: Some(field), ..
        } = &parent.kind
        else {
            return None;
        };
        let source = parent.source();
        let alias = format!("t{}", self.from.len() + 1);

        if let Some(joinsql) = &field.joinsql {
            let mut joincond = joinsql.clone();
            if let Some(master) = &master {
                joincond = joincond.replace("{m}", master);
            }
            let joincond = joincond.replace("{d}", &alias);
            self.add_join(joincond, &source);
        }

        let tablesql = field.refgroup().and_then(|group| group.tablesql.clone());
        let Some(tablesql) = tablesql else {
            self.aliases.insert(identifier, None);
            return None;
        };
        trace!(path = %identifier, alias = %alias, table = %tablesql, "registered table");
        self.aliases.insert(identifier, Some(alias.clone()));
        self.from.insert(
            format!("{tablesql} {alias}"),
            FromEntry {
                table: tablesql,
                comment: Some(source),
                alias: Some(alias.clone()),
            },
        );
        Some(alias)
    }

    fn add_join(&mut self, joincond: String, source: &str) {
        if !self.wheres.contains_key(&joincond) {
            trace!(condition = %joincond, "added join condition");
            let rendered = with_comment(joincond.clone(), Some(source));
            self.wheres.insert(joincond, rendered);
        }
    }

    /// Add the table of the root variable `identifier` to the `from` list,
    /// even if no expression references it.
    pub fn register_vsql(&mut self, identifier: &str) -> Result<Option<String>, QueryError> {
        let field = self
            .vars
            .get(identifier)
            .cloned()
            .ok_or_else(|| QueryError::UnknownField(identifier.to_string()))?;
        if let Some(alias) = self.aliases.get(identifier) {
            return Ok(alias.clone());
        }
        let alias = format!("t{}", self.from.len() + 1);
        if let Some(joinsql) = &field.joinsql {
            self.add_join(joinsql.replace("{d}", &alias), identifier);
        }
        let tablesql = field.refgroup().and_then(|group| group.tablesql.clone());
        let Some(tablesql) = tablesql else {
            self.aliases.insert(identifier.to_string(), None);
            return Ok(None);
        };
        trace!(path = %identifier, alias = %alias, table = %tablesql, "registered table");
        self.aliases
            .insert(identifier.to_string(), Some(alias.clone()));
        self.from.insert(
            format!("{tablesql} {alias}"),
            FromEntry {
                table: tablesql,
                comment: Some(identifier.to_string()),
                alias: Some(alias.clone()),
            },
        );
        Ok(Some(alias))
    }

    /// Compile `source`, check it and register its field references.
    fn vsql(&mut self, source: &str, context: &str) -> Result<Ast, QueryError> {
        let ast = compile_valid(source, &self.vars, Some(context))?;
        for fieldref in ast.fieldrefs() {
            self.register(fieldref);
        }
        Ok(ast)
    }

    /// SQL of a compiled expression, followed by its vSQL source as a comment.
    fn vsql_sql(&mut self, ast: &Ast, context: &str) -> Result<String, QueryError> {
        let sql = ast.sqlsource_with_context(self, Some(context))?;
        Ok(with_comment(sql, Some(&ast.source())))
    }

    // ========================================================================
    // Select
    // ========================================================================

    /// Add a vSQL expression to the select list.
    ///
    /// With an `aggregate` the expression is aggregated; aggregated and plain
    /// expressions can't be mixed. For [`Aggregate::Count`] `expr` is ignored.
    pub fn select_vsql(
        &mut self,
        expr: &str,
        alias: Option<&str>,
        aggregate: Option<Aggregate>,
    ) -> Result<&mut Self, QueryError> {
        match aggregate {
            Some(aggregate) => {
                if !self.fields.is_empty() {
                    return Err(QueryError::MixedAggregation);
                }
                let sql = if aggregate == Aggregate::Count {
                    String::new()
                } else {
                    let ast = self.vsql(expr, "select")?;
                    let datatype = ast.datatype.unwrap_or(DataType::Null);
                    if !datatype.supports(aggregate) {
                        return Err(QueryError::Aggregate {
                            expr: ast.source(),
                            datatype,
                            aggregate: aggregate.name(),
                        });
                    }
                    self.vsql_sql(&ast, "select")?
                };
                let entry = SelectEntry {
                    sql,
                    alias: alias.map(str::to_string),
                    aggregate: Some(aggregate),
                };
                self.aggregated_fields.entry(entry.render(true)).or_insert(entry);
            }
            None => {
                if !self.aggregated_fields.is_empty() {
                    return Err(QueryError::MixedAggregation);
                }
                let ast = self.vsql(expr, "select")?;
                let entry = SelectEntry {
                    sql: self.vsql_sql(&ast, "select")?,
                    alias: alias.map(str::to_string),
                    aggregate: None,
                };
                self.fields.entry(entry.render(true)).or_insert(entry);
            }
        }
        Ok(self)
    }

    /// Add raw SQL to the select list.
    pub fn select_sql(
        &mut self,
        sql: &str,
        comment: Option<&str>,
        alias: Option<&str>,
    ) -> Result<&mut Self, QueryError> {
        if !self.aggregated_fields.is_empty() {
            return Err(QueryError::MixedAggregation);
        }
        if !self.fields.contains_key(sql) {
            let entry = SelectEntry {
                sql: with_comment(sql.to_string(), comment),
                alias: alias.map(str::to_string),
                aggregate: None,
            };
            self.fields.insert(sql.to_string(), entry);
        }
        Ok(self)
    }

    // ========================================================================
    // From
    // ========================================================================

    /// Add a raw table to the `from` list.
    pub fn from_sql(
        &mut self,
        table: &str,
        comment: Option<&str>,
        alias: Option<&str>,
    ) -> Result<&mut Self, QueryError> {
        if let Some(alias) = alias {
            if self
                .from
                .values()
                .any(|entry| entry.alias.as_deref() == Some(alias))
            {
                return Err(QueryError::DuplicateAlias(alias.to_string()));
            }
        }
        let key = match alias {
            Some(alias) => format!("{table} {alias}"),
            None => table.to_string(),
        };
        self.from.insert(
            key,
            FromEntry {
                table: table.to_string(),
                comment: comment.map(str::to_string),
                alias: alias.map(str::to_string),
            },
        );
        Ok(self)
    }

    // ========================================================================
    // Where
    // ========================================================================

    /// Add a vSQL condition. Non-`BOOL` expressions are converted with
    /// `bool()`.
    pub fn where_vsql(&mut self, expr: &str) -> Result<&mut Self, QueryError> {
        let ast = self.vsql(expr, "where")?;
        let source = ast.source();
        let ast = if ast.datatype == Some(DataType::Bool) {
            ast
        } else {
            Ast::make_func("bool", vec![ast])
        };
        let sql = format!("{} = 1", ast.sqlsource_with_context(self, Some("where"))?);
        if !self.wheres.contains_key(&sql) {
            let rendered = with_comment(sql.clone(), Some(&source));
            self.wheres.insert(sql, rendered);
        }
        Ok(self)
    }

    /// Add a raw SQL condition.
    pub fn where_sql(&mut self, sql: &str, comment: Option<&str>) -> &mut Self {
        if !self.wheres.contains_key(sql) {
            self.wheres
                .insert(sql.to_string(), with_comment(sql.to_string(), comment));
        }
        self
    }

    // ========================================================================
    // Order by
    // ========================================================================

    pub fn orderby_vsql(
        &mut self,
        expr: &str,
        dir: Option<SortDir>,
        nulls: Option<NullsOrder>,
    ) -> Result<&mut Self, QueryError> {
        let ast = self.vsql(expr, "orderby")?;
        let sql = self.vsql_sql(&ast, "orderby")?;
        self.orderby.push(orderby(sql, dir, nulls));
        Ok(self)
    }

    pub fn orderby_sql(
        &mut self,
        sql: &str,
        dir: Option<SortDir>,
        nulls: Option<NullsOrder>,
    ) -> &mut Self {
        self.orderby.push(orderby(sql.to_string(), dir, nulls));
        self
    }

    /// Number of records to skip.
    pub fn offset(&mut self, offset: Option<u64>) -> &mut Self {
        self.offset = offset;
        self
    }

    /// Maximum number of records to return.
    pub fn limit(&mut self, limit: Option<u64>) -> &mut Self {
        self.limit = limit;
        self
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// The query as SQL, indented with tabs.
    pub fn sqlsource(&self) -> String {
        self.sqlsource_with_indent(DEFAULT_INDENT)
    }

    /// The query as SQL. An empty `indent` puts everything on one line.
    pub fn sqlsource_with_indent(&self, indent: &str) -> String {
        let mut ts = TokenStream::new();

        if let Some(text) = &self.comment {
            ts.text(comment(text)).newline();
        }

        let selects: Vec<String> = self
            .fields
            .values()
            .chain(self.aggregated_fields.values())
            .map(|entry| entry.render(true))
            .collect();
        if selects.is_empty() {
            ts.clause("select", ["42"], ",");
        } else {
            ts.clause("select", selects, ",");
        }

        if self.from.is_empty() {
            ts.clause("from", ["dual"], ",");
        } else {
            ts.clause("from", self.from.values().map(FromEntry::render), ",");
        }

        if !self.wheres.is_empty() {
            ts.clause("where", self.wheres.values().cloned(), " and");
        }

        let groups: Vec<String> = self
            .aggregated_fields
            .values()
            .filter(|entry| entry.aggregate == Some(Aggregate::Group))
            .map(|entry| entry.render(false))
            .collect();
        if !groups.is_empty() {
            ts.clause("group by", groups, ",");
        }

        if !self.orderby.is_empty() {
            ts.clause("order by", self.orderby.iter().cloned(), ",");
        }

        if let Some(offset) = self.offset {
            ts.text(format!("offset {offset} rows")).newline();
        }
        if let Some(limit) = self.limit {
            ts.text(format!("fetch next {limit} rows only")).newline();
        }

        ts.serialize(indent)
    }
}

fn orderby(mut sql: String, dir: Option<SortDir>, nulls: Option<NullsOrder>) -> String {
    if let Some(dir) = dir {
        sql.push(' ');
        sql.push_str(dir.as_str());
    }
    if let Some(nulls) = nulls {
        sql.push_str(" nulls ");
        sql.push_str(nulls.as_str());
    }
    sql
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sqlsource())
    }
}
