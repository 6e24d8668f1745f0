//! Type-safe enumerations for rule metadata.
//!
//! Rule tables carry these concepts as free-text cells; parsing them once at
//! load time keeps the matching and arbitration code free of string
//! comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// How a rule's value pattern is compared against a supplier value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Case-insensitive, trimmed equality. An empty pattern matches any
    /// non-empty value.
    Exact,
    /// Case-insensitive substring test.
    Contains,
    /// Unanchored, case-insensitive regular expression search with
    /// `$n` capture substitution in the templates.
    Regex,
}

impl PatternType {
    /// Returns the canonical name as it appears in rule tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Exact => "exact",
            PatternType::Contains => "contains",
            PatternType::Regex => "regex",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PatternType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(PatternType::Exact),
            "contains" => Ok(PatternType::Contains),
            "regex" => Ok(PatternType::Regex),
            _ => Err(ModelError::UnknownPatternType(s.to_string())),
        }
    }
}

/// Precedence semantics of a rule.
///
/// - **Extract** / **Normalize**: compete by priority (lower number wins).
/// - **Derive**: logical inference; only fills gaps or beats another derive.
/// - **Fallback**: only used when no value exists yet.
/// - **Skip**: discards every candidate produced for the supplier attribute.
/// - **Supplier**: raw supplier attributes entering a pass merge. Never
///   produced by a rule.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    #[default]
    Extract,
    Normalize,
    Derive,
    Fallback,
    Skip,
    Supplier,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Extract => "extract",
            RuleKind::Normalize => "normalize",
            RuleKind::Derive => "derive",
            RuleKind::Fallback => "fallback",
            RuleKind::Skip => "skip",
            RuleKind::Supplier => "supplier",
        }
    }

    /// Returns true for kinds that compete purely on priority.
    pub fn is_priority_ranked(&self) -> bool {
        matches!(
            self,
            RuleKind::Extract | RuleKind::Normalize | RuleKind::Supplier
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "extract" => Ok(RuleKind::Extract),
            "normalize" => Ok(RuleKind::Normalize),
            "derive" => Ok(RuleKind::Derive),
            "fallback" => Ok(RuleKind::Fallback),
            "skip" => Ok(RuleKind::Skip),
            "supplier" => Ok(RuleKind::Supplier),
            _ => Err(ModelError::UnknownRuleKind(s.to_string())),
        }
    }
}

/// Category restriction of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryScope {
    /// Applies to every product.
    #[default]
    Global,
    /// Applies only when the product category id equals this value.
    Category(String),
}

impl CategoryScope {
    /// Parses a category cell. Empty cells and `global` (any case) are
    /// [`CategoryScope::Global`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("global") {
            CategoryScope::Global
        } else {
            CategoryScope::Category(trimmed.to_string())
        }
    }

    /// Returns true when a rule with this scope applies to `category_id`.
    pub fn applies_to(&self, category_id: &str) -> bool {
        match self {
            CategoryScope::Global => true,
            CategoryScope::Category(id) => id == category_id.trim(),
        }
    }

    /// Label used in load summaries.
    pub fn label(&self) -> &str {
        match self {
            CategoryScope::Global => "global",
            CategoryScope::Category(id) => id,
        }
    }
}

impl fmt::Display for CategoryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
