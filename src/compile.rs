//! End-to-end compilation from vSQL source to a typed AST.
//!
//! ```text
//! vSQL Source → Lex → Parse → Ingest → Ast (typed, possibly invalid)
//! ```
//!
//! # Example
//!
//! ```
//! use vsql::compile::compile_valid;
//! use vsql::schema::Vars;
//! use vsql::types::DataType;
//!
//! let ast = compile_valid("now() + years(3)", &Vars::new(), None)?;
//! assert_eq!(ast.datatype, Some(DataType::DateTime));
//! # Ok::<(), vsql::compile::CompileError>(())
//! ```

use tracing::debug;

use crate::ast::Ast;
use crate::error::VsqlError;
use crate::ingest::{self, IngestError};
use crate::schema::Vars;
use crate::syntax::{self, SyntaxError};
use crate::types::DataType;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during compilation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("Syntax error: {}", first_message(.0))]
    Syntax(Vec<SyntaxError>),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Invalid(#[from] VsqlError),
}

fn first_message(errors: &[SyntaxError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("unknown")
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Entry points
// ============================================================================

/// Parse and ingest `source`.
///
/// The result may be an invalid tree; use [`compile_valid`] to reject those.
pub fn compile(source: &str, vars: &Vars) -> CompileResult<Ast> {
    let expr = syntax::parse(source).map_err(CompileError::Syntax)?;
    let ast = ingest::ingest(&expr, source, vars)?;
    debug!(source, datatype = ?ast.datatype, error = ?ast.error, "compiled vSQL expression");
    Ok(ast)
}

/// Compile `source` and fail on the most specific error in the tree.
///
/// `context` names the query clause the expression is used in and only
/// affects the error message.
pub fn compile_valid(source: &str, vars: &Vars, context: Option<&str>) -> CompileResult<Ast> {
    let ast = compile(source, vars)?;
    ast.check_valid(context)?;
    Ok(ast)
}

/// Compile a valid expression that can be used where `required` is expected.
pub fn compile_typed(source: &str, vars: &Vars, required: DataType) -> CompileResult<Ast> {
    let ast = compile_valid(source, vars, None)?;
    // A valid tree always has a type
    let given = ast.datatype.unwrap_or(DataType::Null);
    if let Err(kind) = DataType::compatible_to(given, Some(required)) {
        return Err(VsqlError::new(kind, &ast, &ast, None).into());
    }
    Ok(ast)
}
