//! Type inference and error classification.

use std::collections::BTreeSet;

use super::{Ast, AstKind};
use crate::error::{ErrorKind, VsqlError};
use crate::rules::{Rule, RuleRegistry};
use crate::types::DataType;

type Verdict = (Option<DataType>, Option<ErrorKind>);

fn valid(datatype: DataType) -> Verdict {
    (Some(datatype), None)
}

fn invalid(error: ErrorKind) -> Verdict {
    (None, Some(error))
}

impl Ast {
    pub(super) fn validate(&mut self) {
        let (datatype, error) = self.infer();
        self.datatype = datatype;
        self.error = error;
    }

    fn infer(&self) -> Verdict {
        match &self.kind {
            AstKind::FieldRef { field, .. } => match field {
                Some(field) => valid(field.datatype),
                None => invalid(ErrorKind::Field),
            },
            AstKind::Null => valid(DataType::Null),
            AstKind::Bool(_) => valid(DataType::Bool),
            AstKind::Int(_) => valid(DataType::Int),
            AstKind::Number(_) => valid(DataType::Number),
            AstKind::Str(_) => valid(DataType::Str),
            AstKind::Clob(_) => valid(DataType::Clob),
            AstKind::Color(_) => valid(DataType::Color),
            AstKind::Date(_) => valid(DataType::Date),
            AstKind::DateTime(_) => valid(DataType::DateTime),
            AstKind::List(_) => match self.item_types() {
                Some(types) => list_type(&types),
                None => invalid(ErrorKind::SubnodeError),
            },
            AstKind::Set(_) => match self.item_types() {
                Some(types) => set_type(&types),
                None => invalid(ErrorKind::SubnodeError),
            },
            _ => self.infer_from_rules(),
        }
    }

    /// Distinct non-`NULL` item types, `None` if some item is invalid.
    fn item_types(&self) -> Option<BTreeSet<DataType>> {
        let mut types = BTreeSet::new();
        for child in self.children() {
            if child.error.is_some() {
                return None;
            }
            match child.datatype {
                Some(DataType::Null) => {}
                Some(datatype) => {
                    types.insert(datatype);
                }
                None => return None,
            }
        }
        Some(types)
    }

    /// Datatypes of all children, `None` if any child is invalid.
    pub(super) fn signature(&self) -> Option<Vec<DataType>> {
        self.children()
            .map(|child| match child.error {
                Some(_) => None,
                None => child.datatype,
            })
            .collect()
    }

    /// Function, method or attribute name that is part of the rule key.
    pub(super) fn rule_name(&self) -> Option<&str> {
        match &self.kind {
            AstKind::Attr { attrname, .. } => Some(attrname.as_str()),
            AstKind::Func { name, .. } | AstKind::Meth { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// The rule this node resolves to in the standard registry.
    pub fn rule(&self) -> Option<&'static Rule> {
        let signature = self.signature()?;
        RuleRegistry::global().lookup(self.nodetype(), self.rule_name(), &signature)
    }

    fn infer_from_rules(&self) -> Verdict {
        let Some(signature) = self.signature() else {
            return invalid(ErrorKind::SubnodeError);
        };
        let registry = RuleRegistry::global();
        if let Some(rule) = registry.lookup(self.nodetype(), self.rule_name(), &signature) {
            return valid(rule.result);
        }

        let error = match &self.kind {
            AstKind::Attr { .. } => ErrorKind::Name,
            AstKind::Func { name, args } => match registry.function_arities(name) {
                None => ErrorKind::Name,
                Some(arities) if !arities.contains(&args.len()) => ErrorKind::Arity,
                Some(_) => ErrorKind::SubnodeTypes,
            },
            AstKind::Meth { name, args, .. } => {
                // The receiver type is the first entry of the signature.
                let arities = signature
                    .first()
                    .and_then(|receiver| registry.method_arities(*receiver, name));
                match arities {
                    None => ErrorKind::Name,
                    Some(arities) if !arities.contains(&args.len()) => ErrorKind::Arity,
                    Some(_) => ErrorKind::SubnodeTypes,
                }
            }
            _ => ErrorKind::SubnodeTypes,
        };
        invalid(error)
    }

    /// Fail with the most specific error in the tree, if there is one.
    ///
    /// A `SUBNODEERROR` only says that something below went wrong, so the
    /// first descendant (in pre-order) carrying any other error is reported
    /// instead. `context` names the query clause the expression is used in.
    pub fn check_valid(&self, context: Option<&str>) -> Result<(), VsqlError> {
        let Some(error) = self.error else {
            return Ok(());
        };
        for node in self.walknodes() {
            match node.error {
                Some(ErrorKind::SubnodeError) | None => {}
                Some(kind) => return Err(VsqlError::new(kind, self, node, context)),
            }
        }
        Err(VsqlError::new(error, self, self, context))
    }
}

fn list_type(types: &BTreeSet<DataType>) -> Verdict {
    use DataType::*;

    let types: Vec<DataType> = types.iter().copied().collect();
    match types.as_slice() {
        [] => valid(NullList),
        [Int] => valid(IntList),
        [Number] => valid(NumberList),
        [Str] => valid(StrList),
        [Clob] => valid(ClobList),
        [Date] => valid(DateList),
        [DateTime] => valid(DateTimeList),
        [Int, Number] => valid(NumberList),
        [Str, Clob] => valid(ClobList),
        _ => invalid(ErrorKind::ListUnsupportedTypes),
    }
}

fn set_type(types: &BTreeSet<DataType>) -> Verdict {
    use DataType::*;

    let types: Vec<DataType> = types.iter().copied().collect();
    match types.as_slice() {
        [] => valid(NullSet),
        [Int] => valid(IntSet),
        [Number] => valid(NumberSet),
        [Str] => valid(StrSet),
        [Date] => valid(DateSet),
        [DateTime] => valid(DateTimeSet),
        [_] => invalid(ErrorKind::SetUnsupportedTypes),
        _ => invalid(ErrorKind::SetMixedTypes),
    }
}
