//! Store-agnostic filter expressions.
//!
//! A [`Filter`] is a conjunction of per-field [`Condition`]s. Stores translate
//! it into their native query language (see `MongoDocumentStore`) or compile
//! it into a [`CompiledFilter`] evaluated against JSON documents (see
//! `InMemoryDocumentStore`).

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use serde_json::Value;

/// A stored document as seen by the domain layer.
pub type Document = serde_json::Map<String, Value>;

/// Field holding the store-assigned identifier.
pub const INTERNAL_ID_FIELD: &str = "_id";

/// A single constraint on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Regular-expression match against a text field.
    Pattern {
        pattern: String,
        case_insensitive: bool,
    },
    /// Inclusive numeric bounds; either side may be open.
    Range { gte: Option<f64>, lte: Option<f64> },
}

/// Conjunction of field conditions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Condition)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition on `field`. A later condition on the same field replaces
    /// the earlier one.
    pub fn with(mut self, field: impl Into<String>, condition: Condition) -> Self {
        let field = field.into();
        self.clauses.retain(|(existing, _)| *existing != field);
        self.clauses.push((field, condition));
        self
    }

    pub fn clauses(&self) -> &[(String, Condition)] {
        &self.clauses
    }

    pub fn condition(&self, field: &str) -> Option<&Condition> {
        self.clauses
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, condition)| condition)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Build the regular expressions once so the filter can be evaluated
    /// against many documents.
    pub fn compile(&self) -> Result<CompiledFilter, regex::Error> {
        let clauses = self
            .clauses
            .iter()
            .map(|(field, condition)| {
                let matcher = match condition {
                    Condition::Pattern {
                        pattern,
                        case_insensitive,
                    } => Matcher::Pattern(
                        RegexBuilder::new(pattern)
                            .case_insensitive(*case_insensitive)
                            .build()?,
                    ),
                    Condition::Range { gte, lte } => Matcher::Range {
                        gte: *gte,
                        lte: *lte,
                    },
                };
                Ok((field.clone(), matcher))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(CompiledFilter { clauses })
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Pattern(Regex),
    Range { gte: Option<f64>, lte: Option<f64> },
}

impl Matcher {
    /// Missing fields and values of the wrong type never match.
    fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Matcher::Pattern(regex) => value
                .and_then(Value::as_str)
                .is_some_and(|text| regex.is_match(text)),
            Matcher::Range { gte, lte } => {
                let Some(number) = value.and_then(Value::as_f64) else {
                    return false;
                };
                gte.map_or(true, |min| number >= min) && lte.map_or(true, |max| number <= max)
            }
        }
    }
}

/// A [`Filter`] with its patterns compiled, ready for in-process evaluation.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    clauses: Vec<(String, Matcher)>,
}

impl CompiledFilter {
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, matcher)| matcher.matches(document.get(field)))
    }
}

/// One group produced by a grouped count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCount {
    /// Grouping key; `Value::Null` when the field is missing or null.
    pub key: Value,
    pub count: u64,
}
