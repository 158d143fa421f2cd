//! The vSQL grammar: which operand types each operator, function, method
//! and attribute accepts, what it returns, and which SQL it generates.
//!
//! Rules are registered from compact spec strings:
//!
//! ```text
//! INT <- BOOL_INT + BOOL_INT        four rules (BOOL+BOOL, BOOL+INT, ...)
//! T1 <- STR_CLOB.lower()            T1 = "same type as position 1"
//! DATE <- date(INT, INT, INT)       lower case words are names
//! ```
//!
//! Upper case words are types, `_` joins union members and `T<k>` refers
//! back to the type chosen at position `k` (position 0 is the result). Every
//! combination of union members becomes one concrete [`Rule`]; a key that is
//! already registered keeps its first rule.
//!
//! The SQL template uses `{s<i>}` for the SQL of operand `i` and `{t<i>}` for
//! its type name (lower case, with SQL-level aliases such as `bool` → `int`).

mod table;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, error, trace};

use crate::types::{DataType, NodeType};

pub use table::STANDARD_RULES;

static SPECIALS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([st])(\d)\}").unwrap());
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());
static TYPE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z_0-9]+\b").unwrap());

static GLOBAL: LazyLock<RuleRegistry> = LazyLock::new(RuleRegistry::standard);

/// Build the process-wide registry now instead of on first use.
pub fn init() {
    LazyLock::force(&GLOBAL);
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleSpecError {
    #[error("Unknown datatype `{0}` in rule spec")]
    UnknownType(String),

    #[error("Rule spec `{0}` has no result type")]
    MissingResult(String),

    #[error("Type reference T{0} refers to another type reference")]
    TyperefToTyperef(usize),

    #[error("Type reference T{0} is out of range")]
    TyperefOutOfRange(usize),

    #[error("Placeholder {{{kind}{index}}} is out of range for a signature of length {len}")]
    PlaceholderOutOfRange { kind: char, index: usize, len: usize },
}

// ============================================================================
// Rule
// ============================================================================

/// A piece of an SQL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Literal(String),
    /// 1-based operand index.
    Child(usize),
}

/// One concrete grammar rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub nodetype: NodeType,
    pub result: DataType,
    /// Function, method or attribute name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub signature: Vec<DataType>,
    pub template: Vec<Part>,
    /// The rule in spec notation with concrete types, e.g. `BOOL <- DATE > DATETIME`.
    pub vsqlsource: String,
}

impl Rule {
    /// The template as a string with `{s<i>}` placeholders.
    pub fn template_source(&self) -> String {
        self.template
            .iter()
            .map(|part| match part {
                Part::Literal(s) => s.clone(),
                Part::Child(i) => format!("{{s{i}}}"),
            })
            .collect()
    }

    pub fn str_signature(&self) -> String {
        let names: Vec<_> = self.signature.iter().map(|dt| dt.name()).collect();
        format!("({})", names.join(", "))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.vsqlsource)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RuleKey {
    nodetype: NodeType,
    name: Option<String>,
    signature: Vec<DataType>,
}

// ============================================================================
// Spec parsing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum TypeRef {
    Type(DataType),
    Ref(usize),
}

#[derive(Debug, Clone, PartialEq)]
enum SpecItem<'a> {
    Type(TypeRef),
    Name(&'a str),
}

/// `str::isupper` semantics: at least one cased character, none lower case.
fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn typeref(word: &str) -> Option<usize> {
    let digits = word.strip_prefix('T')?;
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

fn parse_spec(spec: &str) -> Result<Vec<Vec<SpecItem<'_>>>, RuleSpecError> {
    SEPARATOR
        .split(spec)
        .filter(|word| !word.is_empty())
        .map(|word| {
            if is_upper(word) {
                word.split('_')
                    .map(|member| match typeref(member) {
                        Some(k) => Ok(SpecItem::Type(TypeRef::Ref(k))),
                        None => DataType::ALL
                            .iter()
                            .find(|dt| dt.name() == member)
                            .map(|dt| SpecItem::Type(TypeRef::Type(*dt)))
                            .ok_or_else(|| RuleSpecError::UnknownType(member.to_string())),
                    })
                    .collect()
            } else {
                Ok(vec![SpecItem::Name(word)])
            }
        })
        .collect()
}

/// Cartesian product of the union groups.
fn product<'a>(groups: &[Vec<SpecItem<'a>>]) -> Vec<Vec<SpecItem<'a>>> {
    groups.iter().fold(vec![Vec::new()], |acc, group| {
        acc.into_iter()
            .flat_map(|prefix| {
                group.iter().map(move |item| {
                    let mut combo = prefix.clone();
                    combo.push(item.clone());
                    combo
                })
            })
            .collect()
    })
}

enum Resolved<'a> {
    Type(DataType),
    Name(&'a str),
}

fn resolve<'a>(
    combo: &[SpecItem<'a>],
    namepos: Option<usize>,
) -> Result<Vec<Resolved<'a>>, RuleSpecError> {
    combo
        .iter()
        .map(|item| match item {
            SpecItem::Name(name) => Ok(Resolved::Name(name)),
            SpecItem::Type(TypeRef::Type(dt)) => Ok(Resolved::Type(*dt)),
            SpecItem::Type(TypeRef::Ref(k)) => {
                // Positions after a name are shifted by one.
                let index = match namepos {
                    Some(pos) if pos > 0 && *k >= pos => k + 1,
                    _ => *k,
                };
                match combo.get(index) {
                    Some(SpecItem::Type(TypeRef::Type(dt))) => Ok(Resolved::Type(*dt)),
                    Some(SpecItem::Type(TypeRef::Ref(_))) => Err(RuleSpecError::TyperefToTyperef(*k)),
                    _ => Err(RuleSpecError::TyperefOutOfRange(*k)),
                }
            }
        })
        .collect()
}

fn sql_type_name(datatype: DataType) -> &'static str {
    match datatype {
        DataType::Bool => "int",
        DataType::Date => "datetime",
        DataType::DateList => "datetimelist",
        DataType::IntSet => "intlist",
        DataType::NumberSet => "numberlist",
        DataType::StrSet => "strlist",
        DataType::DateSet | DataType::DateTimeSet => "datetimelist",
        DataType::Null => "null",
        DataType::Int => "int",
        DataType::Number => "number",
        DataType::Str => "str",
        DataType::Clob => "clob",
        DataType::Color => "color",
        DataType::Geo => "geo",
        DataType::DateTime => "datetime",
        DataType::DateDelta => "datedelta",
        DataType::DateTimeDelta => "datetimedelta",
        DataType::MonthDelta => "monthdelta",
        DataType::NullList => "nulllist",
        DataType::IntList => "intlist",
        DataType::NumberList => "numberlist",
        DataType::StrList => "strlist",
        DataType::ClobList => "cloblist",
        DataType::DateTimeList => "datetimelist",
        DataType::NullSet => "nullset",
    }
}

/// Append literal text, merging it with a preceding literal.
fn append(parts: &mut Vec<Part>, text: &str) {
    if let Some(Part::Literal(last)) = parts.last_mut() {
        last.push_str(text);
    } else if !text.is_empty() {
        parts.push(Part::Literal(text.to_string()));
    }
}

fn parse_template(template: &str, signature: &[DataType]) -> Result<Vec<Part>, RuleSpecError> {
    let mut parts: Vec<Part> = Vec::new();
    let mut pos = 0;
    for caps in SPECIALS.captures_iter(template) {
        let (Some(whole), Some(kind), Some(index)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        append(&mut parts, &template[pos..whole.start()]);
        let kind = kind.as_str().chars().next().unwrap_or('s');
        let index: usize = index.as_str().parse().unwrap_or(0);
        if index == 0 || index > signature.len() {
            return Err(RuleSpecError::PlaceholderOutOfRange {
                kind,
                index,
                len: signature.len(),
            });
        }
        if kind == 's' {
            parts.push(Part::Child(index));
        } else {
            append(&mut parts, sql_type_name(signature[index - 1]));
        }
        pos = whole.end();
    }
    append(&mut parts, &template[pos..]);
    Ok(parts)
}

/// The spec rewritten with concrete types, keywords restored for the
/// operators a spec can't spell (`and`, `in`, `if`...).
fn vsqlsource(nodetype: NodeType, spec: &str, result: DataType, signature: &[DataType]) -> String {
    let rhs = match spec.split_once("<-") {
        Some((_, rhs)) => rhs,
        None => "",
    };
    let mut types = signature.iter();
    let rhs = TYPE_WORD.replace_all(rhs, |caps: &regex::Captures<'_>| match types.next() {
        Some(dt) => dt.name().to_string(),
        None => caps[0].to_string(),
    });
    let mut keywords = nodetype.spec_keywords().iter();
    let mut restored = String::with_capacity(rhs.len());
    for c in rhs.chars() {
        match (c, keywords.len()) {
            ('?', n) if n > 0 => restored.push_str(keywords.next().copied().unwrap_or("?")),
            _ => restored.push(c),
        }
    }
    let restored = restored.trim();
    if restored.is_empty() {
        result.name().to_string()
    } else {
        format!("{} <- {}", result, restored)
    }
}

// ============================================================================
// Registry
// ============================================================================

/// All registered rules, keyed by node type, name and operand types.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: IndexMap<RuleKey, Rule>,
    function_arities: HashMap<String, BTreeSet<usize>>,
    method_arities: HashMap<(DataType, String), BTreeSet<usize>>,
    duplicates: usize,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry containing the complete standard vSQL grammar.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (nodetype, spec, template) in STANDARD_RULES {
            if let Err(err) = registry.add_rules(*nodetype, spec, template) {
                error!(%nodetype, spec, %err, "invalid rule spec");
            }
        }
        debug!(
            rules = registry.len(),
            duplicates = registry.duplicates,
            "built vSQL rule registry"
        );
        registry
    }

    /// The process-wide standard registry.
    pub fn global() -> &'static RuleRegistry {
        &GLOBAL
    }

    /// Expand `spec` and register every resulting rule that isn't known yet.
    ///
    /// Returns the number of newly registered rules.
    pub fn add_rules(
        &mut self,
        nodetype: NodeType,
        spec: &str,
        template: &str,
    ) -> Result<usize, RuleSpecError> {
        let groups = parse_spec(spec)?;
        let namepos = groups
            .iter()
            .position(|group| matches!(group.as_slice(), [SpecItem::Name(_)]));

        let mut added = 0;
        for combo in product(&groups) {
            let resolved = resolve(&combo, namepos)?;
            let mut items = resolved.into_iter();
            let result = match items.next() {
                Some(Resolved::Type(dt)) => dt,
                _ => return Err(RuleSpecError::MissingResult(spec.to_string())),
            };
            let mut name = None;
            let mut signature = Vec::new();
            for item in items {
                match item {
                    Resolved::Type(dt) => signature.push(dt),
                    Resolved::Name(n) => name = Some(n.to_string()),
                }
            }

            let key = RuleKey {
                nodetype,
                name: name.clone(),
                signature: signature.clone(),
            };
            if self.rules.contains_key(&key) {
                self.duplicates += 1;
                trace!(%nodetype, ?name, ?signature, "rule already registered, keeping first");
                continue;
            }

            let template = parse_template(template, &signature)?;
            let vsqlsource = vsqlsource(nodetype, spec, result, &signature);
            if let Some(name) = &name {
                match nodetype {
                    NodeType::Func => {
                        self.function_arities
                            .entry(name.clone())
                            .or_default()
                            .insert(signature.len());
                    }
                    NodeType::Meth => {
                        if let Some(receiver) = signature.first() {
                            self.method_arities
                                .entry((*receiver, name.clone()))
                                .or_default()
                                .insert(signature.len() - 1);
                        }
                    }
                    _ => {}
                }
            }
            self.rules.insert(
                key,
                Rule {
                    nodetype,
                    result,
                    name,
                    signature,
                    template,
                    vsqlsource,
                },
            );
            added += 1;
        }
        Ok(added)
    }

    pub fn lookup(
        &self,
        nodetype: NodeType,
        name: Option<&str>,
        signature: &[DataType],
    ) -> Option<&Rule> {
        self.rules.get(&RuleKey {
            nodetype,
            name: name.map(str::to_string),
            signature: signature.to_vec(),
        })
    }

    /// Argument counts for which some rule of function `name` exists.
    pub fn function_arities(&self, name: &str) -> Option<&BTreeSet<usize>> {
        self.function_arities.get(name)
    }

    /// Argument counts (receiver excluded) for which some rule of method
    /// `name` on `receiver` exists.
    pub fn method_arities(&self, receiver: DataType, name: &str) -> Option<&BTreeSet<usize>> {
        self.method_arities.get(&(receiver, name.to_string()))
    }

    /// All rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn rules_for(&self, nodetype: NodeType) -> impl Iterator<Item = &Rule> {
        self.rules.values().filter(move |rule| rule.nodetype == nodetype)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// How many expanded rules were dropped because their key was taken.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_expansion() {
        let mut registry = RuleRegistry::new();
        let added = registry
            .add_rules(NodeType::Add, "INT <- BOOL_INT + BOOL_INT", "({s1} + {s2})")
            .unwrap();
        assert_eq!(added, 4);

        // BOOL+BOOL etc. are taken, only the NUMBER combinations are new.
        let added = registry
            .add_rules(
                NodeType::Add,
                "NUMBER <- BOOL_INT_NUMBER + BOOL_INT_NUMBER",
                "({s1} + {s2})",
            )
            .unwrap();
        assert_eq!(added, 5);
        assert_eq!(registry.duplicates(), 4);

        let rule = registry
            .lookup(NodeType::Add, None, &[DataType::Bool, DataType::Bool])
            .unwrap();
        assert_eq!(rule.result, DataType::Int);
    }

    #[test]
    fn test_typeref_after_name() {
        let mut registry = RuleRegistry::new();
        registry
            .add_rules(NodeType::Func, "T1 <- list(INTLIST_STRLIST)", "{s1}")
            .unwrap();
        let rule = registry
            .lookup(NodeType::Func, Some("list"), &[DataType::StrList])
            .unwrap();
        assert_eq!(rule.result, DataType::StrList);
        assert_eq!(rule.vsqlsource, "STRLIST <- list(STRLIST)");
    }

    #[test]
    fn test_typeref_before_name() {
        let mut registry = RuleRegistry::new();
        registry
            .add_rules(NodeType::Meth, "T1 <- STR_CLOB.lower()", "lower({s1})")
            .unwrap();
        let rule = registry
            .lookup(NodeType::Meth, Some("lower"), &[DataType::Clob])
            .unwrap();
        assert_eq!(rule.result, DataType::Clob);
        assert_eq!(registry.method_arities(DataType::Clob, "lower").unwrap().len(), 1);
    }

    #[test]
    fn test_template_type_aliases() {
        let mut registry = RuleRegistry::new();
        registry
            .add_rules(
                NodeType::CmpEq,
                "BOOL <- DATE_DATETIME == T1",
                "vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2})",
            )
            .unwrap();
        let rule = registry
            .lookup(NodeType::CmpEq, None, &[DataType::Date, DataType::Date])
            .unwrap();
        assert_eq!(
            rule.template,
            vec![
                Part::Literal("vsqlimpl_pkg.eq_datetime_datetime(".into()),
                Part::Child(1),
                Part::Literal(", ".into()),
                Part::Child(2),
                Part::Literal(")".into()),
            ]
        );
        assert!(registry
            .lookup(NodeType::CmpEq, None, &[DataType::Date, DataType::DateTime])
            .is_none());
    }

    #[test]
    fn test_keywords_restored() {
        let mut registry = RuleRegistry::new();
        registry
            .add_rules(NodeType::And, "BOOL <- BOOL ? BOOL", "x")
            .unwrap();
        let rule = registry.rules().next().unwrap();
        assert_eq!(rule.vsqlsource, "BOOL <- BOOL and BOOL");
    }

    #[test]
    fn test_bad_specs() {
        let mut registry = RuleRegistry::new();
        assert_eq!(
            registry.add_rules(NodeType::Add, "INT <- FOO + INT", ""),
            Err(RuleSpecError::UnknownType("FOO".into()))
        );
        assert!(matches!(
            registry.add_rules(NodeType::Add, "INT <- INT + INT", "{s3}"),
            Err(RuleSpecError::PlaceholderOutOfRange { index: 3, .. })
        ));
        assert_eq!(
            registry.add_rules(NodeType::Add, "T2 <- INT + T1", ""),
            Err(RuleSpecError::TyperefToTyperef(2))
        );
    }

    #[test]
    fn test_standard_table_is_valid() {
        let mut registry = RuleRegistry::new();
        for (nodetype, spec, template) in STANDARD_RULES {
            registry
                .add_rules(*nodetype, spec, template)
                .unwrap_or_else(|err| panic!("{spec}: {err}"));
        }
        assert!(registry.len() > 1000);
    }
}
