//! Guess a field type from its name when no `:type` is given.
//!
//! Priority: exact name dictionary > ordered prefix/suffix rules > `string`.
//! The result is a type token that still goes through the normal type table.

use std::collections::HashMap;

/// Type token used when nothing matches
pub const DEFAULT_TYPE: &str = "string";

const DICTIONARY: &[(&str, &str)] = &[
    // strings
    ("name", "string"),
    ("title", "string"),
    ("email", "string"),
    ("username", "string"),
    ("first_name", "string"),
    ("last_name", "string"),
    ("slug", "string"),
    ("url", "string"),
    ("website", "string"),
    ("phone", "string"),
    ("address", "string"),
    ("city", "string"),
    ("country", "string"),
    ("status", "string"),
    ("category", "string"),
    // long text
    ("description", "text"),
    ("content", "text"),
    ("body", "text"),
    ("bio", "text"),
    ("notes", "text"),
    ("summary", "text"),
    // integers
    ("age", "int"),
    ("count", "int"),
    ("quantity", "int"),
    ("views", "int"),
    ("stock", "int"),
    ("position", "int"),
    ("year", "int"),
    // floats
    ("price", "float"),
    ("amount", "float"),
    ("total", "float"),
    ("rating", "float"),
    ("score", "float"),
    ("latitude", "float"),
    ("longitude", "float"),
    // booleans
    ("published", "bool"),
    ("active", "bool"),
    ("enabled", "bool"),
    ("verified", "bool"),
    ("completed", "bool"),
    ("done", "bool"),
    ("archived", "bool"),
    // timestamps
    ("created_at", "datetime"),
    ("updated_at", "datetime"),
    ("deleted_at", "datetime"),
    ("published_at", "datetime"),
    ("birthday", "datetime"),
    ("date", "datetime"),
];

/// How an [`InferenceRule`] pattern is compared with a field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Exact,
    Prefix,
    Suffix,
}

/// One name heuristic, e.g. "names ending in `_at` are datetimes"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRule {
    pub matcher: Matcher,
    pub pattern: String,
    pub type_token: String,
}

impl InferenceRule {
    pub fn new(
        matcher: Matcher,
        pattern: impl Into<String>,
        type_token: impl Into<String>,
    ) -> Self {
        Self {
            matcher,
            pattern: pattern.into(),
            type_token: type_token.into(),
        }
    }

    pub fn prefix(pattern: &str, type_token: &str) -> Self {
        Self::new(Matcher::Prefix, pattern, type_token)
    }

    pub fn suffix(pattern: &str, type_token: &str) -> Self {
        Self::new(Matcher::Suffix, pattern, type_token)
    }

    pub fn exact(pattern: &str, type_token: &str) -> Self {
        Self::new(Matcher::Exact, pattern, type_token)
    }

    /// `name` must already be lower-cased
    pub fn matches(&self, name: &str) -> bool {
        match self.matcher {
            Matcher::Exact => name == self.pattern,
            Matcher::Prefix => name.starts_with(&self.pattern),
            Matcher::Suffix => name.ends_with(&self.pattern),
        }
    }
}

/// Name-based type guesser. Extend with [`with_name`](Self::with_name) and
/// [`with_rule`](Self::with_rule); rules are tried in insertion order.
#[derive(Debug, Clone)]
pub struct TypeInferrer {
    names: HashMap<String, String>,
    rules: Vec<InferenceRule>,
}

impl Default for TypeInferrer {
    fn default() -> Self {
        let names = DICTIONARY
            .iter()
            .map(|&(name, typ)| (name.to_string(), typ.to_string()))
            .collect();

        let mut rules = Vec::new();
        for suffix in ["_at", "_date", "_time"] {
            rules.push(InferenceRule::suffix(suffix, "datetime"));
        }
        for prefix in ["is_", "has_", "can_", "should_"] {
            rules.push(InferenceRule::prefix(prefix, "bool"));
        }
        rules.push(InferenceRule::exact("id", "int"));
        rules.push(InferenceRule::suffix("_id", "int"));
        for suffix in ["_price", "_amount", "_total"] {
            rules.push(InferenceRule::suffix(suffix, "float"));
        }

        Self { names, rules }
    }
}

impl TypeInferrer {
    /// An inferrer with no dictionary and no rules; everything is `string`
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str, type_token: &str) -> Self {
        self.names.insert(name.to_lowercase(), type_token.to_string());
        self
    }

    pub fn with_rule(mut self, rule: InferenceRule) -> Self {
        self.rules.push(InferenceRule {
            pattern: rule.pattern.to_lowercase(),
            ..rule
        });
        self
    }

    pub fn rules(&self) -> &[InferenceRule] {
        &self.rules
    }

    /// Type token for `name`. Never fails.
    pub fn infer(&self, name: &str) -> &str {
        let name = name.trim().to_lowercase();

        if let Some(typ) = self.names.get(&name) {
            return typ;
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(&name))
            .map(|rule| rule.type_token.as_str())
            .unwrap_or(DEFAULT_TYPE)
    }
}

/// Infer with the built-in dictionary and rules
pub fn infer_type(name: &str) -> String {
    TypeInferrer::default().infer(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{SqlType, map_type};

    #[test]
    fn documented_cases() {
        assert_eq!(infer_type("email"), "string");
        assert_eq!(infer_type("published_at"), "datetime");
        assert_eq!(infer_type("is_active"), "bool");
        assert_eq!(infer_type("unknown_xyz"), "string");
    }

    #[test]
    fn dictionary_before_rules() {
        assert_eq!(infer_type("price"), "float");
        assert_eq!(infer_type("published"), "bool");
        assert_eq!(infer_type("created_at"), "datetime");
        assert_eq!(infer_type("Content"), "text");
    }

    #[test]
    fn suffix_and_prefix_rules() {
        assert_eq!(infer_type("due_date"), "datetime");
        assert_eq!(infer_type("start_time"), "datetime");
        assert_eq!(infer_type("has_children"), "bool");
        assert_eq!(infer_type("can_edit"), "bool");
        assert_eq!(infer_type("should_notify"), "bool");
        assert_eq!(infer_type("id"), "int");
        assert_eq!(infer_type("user_id"), "int");
        assert_eq!(infer_type("unit_price"), "float");
        assert_eq!(infer_type("order_total"), "float");
    }

    #[test]
    fn every_inferred_token_maps() {
        let inferrer = TypeInferrer::default();
        for name in ["email", "views", "is_x", "x_at", "x_id", "x_amount", "bio", "nothing"] {
            assert!(map_type(inferrer.infer(name)).is_some(), "{name}");
        }
        assert_eq!(map_type(inferrer.infer("x_at")).map(|t| t.1), Some(SqlType::Datetime));
    }

    #[test]
    fn extensible() {
        let inferrer = TypeInferrer::default()
            .with_name("Karma", "int")
            .with_rule(InferenceRule::suffix("_FLAG", "bool"));
        assert_eq!(inferrer.infer("karma"), "int");
        assert_eq!(inferrer.infer("beta_flag"), "bool");

        let empty = TypeInferrer::empty();
        assert_eq!(empty.infer("created_at"), DEFAULT_TYPE);
    }
}
