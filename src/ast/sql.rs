//! SQL emission.
//!
//! Every node with a rule expands the rule's template; `{s<i>}` parts are
//! replaced by the SQL of the i-th operand (see [`Ast::children`]).
//! Constants, collections and field references emit SQL of their own.

use tracing::warn;

use super::{Ast, AstKind};
use crate::error::{ErrorKind, VsqlError};
use crate::query::{comment, Query};
use crate::rules::Part;
use crate::types::DataType;

/// Prefix and suffix wrapped around the items of a typed list or set.
fn collection_affixes(datatype: DataType) -> Option<(&'static str, &'static str)> {
    let affixes = match datatype {
        DataType::IntList => ("integers(", ")"),
        DataType::NumberList => ("numbers(", ")"),
        DataType::StrList => ("varchars(", ")"),
        DataType::ClobList => ("clobs(", ")"),
        DataType::DateList | DataType::DateTimeList => ("dates(", ")"),
        DataType::IntSet => ("vsqlimpl_pkg.set_intlist(integers(", "))"),
        DataType::NumberSet => ("vsqlimpl_pkg.set_numberlist(numbers(", "))"),
        DataType::StrSet => ("vsqlimpl_pkg.set_strlist(varchars(", "))"),
        DataType::DateSet | DataType::DateTimeSet => ("vsqlimpl_pkg.set_datetimelist(dates(", "))"),
        _ => return None,
    };
    Some(affixes)
}

fn quote(value: &str) -> String {
    if value.is_empty() {
        "null".to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}

impl Ast {
    /// Compile the expression to SQL, registering the tables it references
    /// in `query`.
    pub fn sqlsource(&self, query: &mut Query) -> Result<String, VsqlError> {
        self.sqlsource_with_context(query, None)
    }

    /// Like [`Ast::sqlsource`], with errors naming the query clause
    /// (`"select"`, `"where"`, ...) the expression is used in.
    pub fn sqlsource_with_context(
        &self,
        query: &mut Query,
        context: Option<&str>,
    ) -> Result<String, VsqlError> {
        self.check_valid(context)?;
        let mut out = String::new();
        self.write_sql(query, &mut out).map_err(|node| {
            warn!(node = %node, "valid node without a rule");
            VsqlError::new(ErrorKind::NodeType, self, node, context)
        })?;
        Ok(out)
    }

    /// Assumes a valid tree. Fails with the first node that has no rule.
    fn write_sql<'a>(&'a self, query: &mut Query, out: &mut String) -> Result<(), &'a Ast> {
        match &self.kind {
            AstKind::FieldRef {
                parent,
                identifier,
                field,
            } => {
                let alias = query.register(self);
                let is_param = self
                    .full_identifier()
                    .is_some_and(|id| id.starts_with("params."));
                match parent {
                    Some(parent) if is_param => {
                        let kind = parent.full_identifier().unwrap_or_default();
                        let kind = kind.rsplit('.').next().unwrap_or_default();
                        out.push_str(&format!(
                            "livingapi_pkg.reqparam_{kind}('{identifier}') {}",
                            comment(&self.source())
                        ));
                    }
                    _ => {
                        let fieldsql = field
                            .as_ref()
                            .and_then(|field| field.fieldsql.as_deref())
                            .unwrap_or("null");
                        let fieldsql = match &alias {
                            Some(alias) => fieldsql.replace("{a}", alias),
                            None => fieldsql.to_string(),
                        };
                        out.push_str(&fieldsql);
                        out.push(' ');
                        out.push_str(&comment(&self.source()));
                    }
                }
            }
            AstKind::Null => out.push_str("null"),
            AstKind::Bool(value) => out.push_str(if *value { "1" } else { "0" }),
            AstKind::Int(value) => out.push_str(&value.to_string()),
            AstKind::Number(value) => out.push_str(&super::make::number_repr(*value)),
            AstKind::Str(value) | AstKind::Clob(value) => out.push_str(&quote(value)),
            AstKind::Color(color) => out.push_str(&color.packed().to_string()),
            AstKind::Date(date) => {
                out.push_str(&format!("to_date('{}', 'YYYY-MM-DD')", date.format("%Y-%m-%d")))
            }
            AstKind::DateTime(datetime) => out.push_str(&format!(
                "to_date('{}', 'YYYY-MM-DD HH24:MI:SS')",
                datetime.format("%Y-%m-%d %H:%M:%S")
            )),
            AstKind::List(items) | AstKind::Set(items) => {
                match self.datatype.and_then(collection_affixes) {
                    Some((prefix, suffix)) => {
                        out.push_str(prefix);
                        for (i, item) in items.iter().enumerate() {
                            if i > 0 {
                                out.push_str(", ");
                            }
                            item.write_sql(query, out)?;
                        }
                        out.push_str(suffix);
                    }
                    // NULLLIST and NULLSET: only the item count is known
                    None => out.push_str(&items.len().to_string()),
                }
            }
            _ => return self.write_rule_sql(query, out),
        }
        Ok(())
    }

    fn write_rule_sql<'a>(&'a self, query: &mut Query, out: &mut String) -> Result<(), &'a Ast> {
        let Some(rule) = self.rule() else {
            return Err(self);
        };
        let operands: Vec<&Ast> = self.children().collect();
        for part in &rule.template {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Child(index) => {
                    if let Some(operand) = index.checked_sub(1).and_then(|i| operands.get(i)) {
                        operand.write_sql(query, out)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::types::Color;
    use chrono::NaiveDate;

    fn sql(ast: &Ast) -> String {
        ast.sqlsource(&mut Query::new()).unwrap()
    }

    #[test]
    fn test_constants() {
        assert_eq!(sql(&Ast::make_none()), "null");
        assert_eq!(sql(&Ast::make_bool(false)), "0");
        assert_eq!(sql(&Ast::make_str("")), "null");
        assert_eq!(sql(&Ast::make_str("it's")), "'it''s'");
        assert_eq!(sql(&Ast::make_color(Color::new(0, 0, 1, 0xff))), "511");
        let date = NaiveDate::from_ymd_opt(2000, 2, 29).unwrap();
        assert_eq!(sql(&Ast::make_date(date)), "to_date('2000-02-29', 'YYYY-MM-DD')");
    }

    #[test]
    fn test_collections() {
        let list = Ast::make_list(vec![Ast::make_int(1), Ast::make_int(2)]);
        assert_eq!(sql(&list), "integers(1, 2)");
        let set = Ast::make_set(vec![Ast::make_str("a")]);
        assert_eq!(sql(&set), "vsqlimpl_pkg.set_strlist(varchars('a'))");
        let nulls = Ast::make_list(vec![Ast::make_none(), Ast::make_none()]);
        assert_eq!(sql(&nulls), "2");
    }

    #[test]
    fn test_rule_templates() {
        let ast = Ast::make_binary(BinaryOp::Add, Ast::make_int(1), Ast::make_int(2));
        assert_eq!(sql(&ast), "(1 + 2)");

        let ast = Ast::make_meth(Ast::make_str("x"), "upper", vec![]);
        assert_eq!(sql(&ast), "upper('x')");
    }

    #[test]
    fn test_invalid_tree_fails() {
        let ast = Ast::make_func("frobnicate", vec![]);
        assert!(ast.sqlsource(&mut Query::new()).is_err());

        let err = ast
            .sqlsource_with_context(&mut Query::new(), Some("where"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Name);
        assert_eq!(err.context.as_deref(), Some("where"));
        assert!(err.to_string().starts_with("Error in `where` expression `frobnicate()`"));
    }

    #[test]
    fn test_node_without_rule_fails() {
        let mut ast = Ast::make_func("frobnicate", vec![]);
        ast.error = None;
        ast.datatype = Some(DataType::Int);

        let err = ast
            .sqlsource_with_context(&mut Query::new(), Some("select"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NodeType);
        assert_eq!(err.cause, "frobnicate()");
        assert_eq!(err.context.as_deref(), Some("select"));
    }
}
