//! Classified vSQL errors.
//!
//! Invalid AST nodes don't fail on construction. Each node records an
//! [`ErrorKind`] instead, so partially invalid trees can still be inspected.
//! [`Ast::check_valid`](crate::ast::Ast::check_valid) turns the most specific
//! of those into a [`VsqlError`].

use std::fmt;

use serde::{Serialize, Serializer};

use crate::ast::{Ast, AstKind};
use crate::types::DataType;

// ============================================================================
// Error kinds
// ============================================================================

/// The reasons an AST node can be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Some child node is invalid; carries no information of its own.
    SubnodeError,
    NodeType,
    Arity,
    /// No rule for this combination of child types.
    SubnodeTypes,
    /// Reference to an unknown field.
    Field,
    ConstBool,
    ConstInt,
    ConstNumber,
    ConstDate,
    ConstDateTime,
    ConstTimestamp,
    ConstColor,
    /// Unknown function, method or attribute.
    Name,
    ListUnsupportedTypes,
    SetMixedTypes,
    SetUnsupportedTypes,
    /// The expression should have had the given type.
    Datatype(DataType),
}

impl ErrorKind {
    pub fn name(&self) -> String {
        let name = match self {
            ErrorKind::SubnodeError => "SUBNODEERROR",
            ErrorKind::NodeType => "NODETYPE",
            ErrorKind::Arity => "ARITY",
            ErrorKind::SubnodeTypes => "SUBNODETYPES",
            ErrorKind::Field => "FIELD",
            ErrorKind::ConstBool => "CONST_BOOL",
            ErrorKind::ConstInt => "CONST_INT",
            ErrorKind::ConstNumber => "CONST_NUMBER",
            ErrorKind::ConstDate => "CONST_DATE",
            ErrorKind::ConstDateTime => "CONST_DATETIME",
            ErrorKind::ConstTimestamp => "CONST_TIMESTAMP",
            ErrorKind::ConstColor => "CONST_COLOR",
            ErrorKind::Name => "NAME",
            ErrorKind::ListUnsupportedTypes => "LISTUNSUPPORTEDTYPES",
            ErrorKind::SetMixedTypes => "SETMIXEDTYPES",
            ErrorKind::SetUnsupportedTypes => "SETUNSUPPORTEDTYPES",
            ErrorKind::Datatype(dt) => return format!("DATATYPE_{}", dt.name()),
        };
        name.to_string()
    }

    pub fn is_malformed_constant(&self) -> bool {
        matches!(
            self,
            ErrorKind::ConstBool
                | ErrorKind::ConstInt
                | ErrorKind::ConstNumber
                | ErrorKind::ConstDate
                | ErrorKind::ConstDateTime
                | ErrorKind::ConstTimestamp
                | ErrorKind::ConstColor
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

// ============================================================================
// Surfaced error
// ============================================================================

/// An invalid vSQL expression, pointing at the subexpression that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct VsqlError {
    pub kind: ErrorKind,
    /// Source of the complete expression.
    pub root: String,
    /// Source of the failing subexpression.
    pub cause: String,
    /// Query clause the expression was used in (`"select"`, `"where"`, ...).
    pub context: Option<String>,
    /// Whether the failing node is the root itself.
    pub cause_is_root: bool,
    pub detail: String,
}

impl VsqlError {
    /// Build the error for `kind`, raised for `cause` inside `root`.
    pub fn new(kind: ErrorKind, root: &Ast, cause: &Ast, context: Option<&str>) -> Self {
        Self {
            kind,
            root: root.source(),
            cause: cause.source(),
            context: context.map(str::to_string),
            cause_is_root: std::ptr::eq(root, cause),
            detail: detail(kind, cause),
        }
    }

    fn prefix(&self) -> String {
        match (&self.context, self.cause_is_root) {
            (None, true) => format!("Error in vSQL expression `{}`", self.root),
            (Some(ctx), true) => format!("Error in `{ctx}` expression `{}`", self.root),
            (None, false) => format!(
                "Error in vSQL subexpression `{}` of `{}`",
                self.cause, self.root
            ),
            (Some(ctx), false) => format!(
                "Error in `{ctx}` subexpression `{}` of `{}`",
                self.cause, self.root
            ),
        }
    }
}

impl fmt::Display for VsqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.prefix(), self.detail)
    }
}

impl std::error::Error for VsqlError {}

fn detail(kind: ErrorKind, cause: &Ast) -> String {
    match kind {
        ErrorKind::SubnodeError => "AST subnodes are invalid (Internal vSQL error).".into(),
        ErrorKind::NodeType => "AST node has unknown type (Internal vSQL error).".into(),
        ErrorKind::Arity => "AST node has wrong arity (Internal vSQL error).".into(),
        ErrorKind::SubnodeTypes => {
            let types: Option<Vec<String>> = cause
                .children()
                .map(|child| child.datatype.map(|dt| format!("`{dt}`")))
                .collect();
            match types {
                Some(types) => format!("Type combination {} is not supported.", types.join(", ")),
                None => "Expression contains invalid sub expression.".into(),
            }
        }
        ErrorKind::Field => {
            let identifier = match &cause.kind {
                AstKind::FieldRef { identifier, .. } => identifier.as_str(),
                _ => "",
            };
            format!("Expression references the unknown field `{identifier}`.")
        }
        k if k.is_malformed_constant() => {
            format!("Constant `{}` is malformed.", cause.nodevalue().unwrap_or_default())
        }
        ErrorKind::Name => {
            let name = match &cause.kind {
                AstKind::Func { name, .. } => format!("function name `{name}`"),
                AstKind::Meth { name, .. } => format!("method name `{name}`"),
                AstKind::Attr { attrname, .. } => format!("attribute name `{attrname}`"),
                _ => "name".to_string(),
            };
            format!("The {name} is unknown.")
        }
        ErrorKind::ListUnsupportedTypes => {
            "List type can't be determined, since it contains unsupported or mixed types.".into()
        }
        ErrorKind::SetMixedTypes => {
            "Set type can't be determined, since it contains mixed types.".into()
        }
        ErrorKind::SetUnsupportedTypes => {
            "Set type can't be determined, since it contains unsupported or mixed types.".into()
        }
        ErrorKind::Datatype(required) => format!(
            "The expression should be of type `{required}` but is of type `{}`.",
            cause.datatype.map(|dt| dt.name()).unwrap_or("None")
        ),
        // Covered by the guard above.
        _ => String::new(),
    }
}
