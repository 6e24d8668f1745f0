//! Validated, compiled mapping rules.

use attrmap_model::{CategoryScope, PatternType, RawRuleRow, RuleKind};
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::RowError;

/// Priority used when a row leaves the priority cell blank.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Target names that turn a rule into a skip rule, compared lowercase.
pub const SKIP_SENTINELS: [&str; 2] = ["skip", "пропустити"];

/// One active rule, ready for matching.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Source row, for diagnostics.
    pub line: usize,
    /// Lowercased substring required in the supplier attribute name.
    /// Empty matches every name.
    pub name_pattern: String,
    /// Compiled title regex. Only present on regex-typed rules.
    pub title_regex: Option<Regex>,
    pub value_pattern: String,
    /// Compiled value regex. Only present on regex-typed rules with a
    /// non-empty value pattern.
    pub value_regex: Option<Regex>,
    pub pattern_type: PatternType,
    /// Canonical attribute name.
    pub target: String,
    pub value_template: String,
    pub unit_template: String,
    pub priority: i32,
    pub scope: CategoryScope,
    pub kind: RuleKind,
    pub notes: String,
}

impl Rule {
    /// Validates and compiles one active row.
    pub fn from_row(row: &RawRuleRow) -> Result<Self, RowError> {
        let target = required(row.target_attribute.as_deref(), "target_attribute")?;
        let pattern_type: PatternType =
            required(row.pattern_type.as_deref(), "pattern_type")?.parse()?;

        let mut kind = match row.rule_kind.as_deref().map(str::trim) {
            None | Some("") => RuleKind::default(),
            Some(raw) => raw.parse()?,
        };
        if kind == RuleKind::Supplier {
            return Err(RowError::ReservedKind);
        }
        if is_skip_sentinel(&target) {
            kind = RuleKind::Skip;
        }

        let priority = parse_priority(row.priority.as_deref())?;

        let value_pattern = row.value_pattern.trim().to_string();
        let value_regex = if pattern_type == PatternType::Regex && !value_pattern.is_empty() {
            Some(compile_pattern(&value_pattern, "value")?)
        } else {
            None
        };

        let title_pattern = row.title_regex.trim();
        let title_regex = match (title_pattern.is_empty(), pattern_type) {
            (true, _) => None,
            (false, PatternType::Regex) => Some(compile_pattern(title_pattern, "title")?),
            (false, other) => {
                debug!(
                    line = row.line,
                    pattern_type = %other,
                    "ignoring title pattern on non-regex rule"
                );
                None
            }
        };

        Ok(Self {
            line: row.line,
            name_pattern: row.name_pattern.trim().to_lowercase(),
            title_regex,
            value_pattern,
            value_regex,
            pattern_type,
            target,
            value_template: row.value_template.trim().to_string(),
            unit_template: row.unit_template.trim().to_string(),
            priority,
            scope: CategoryScope::parse(&row.category_id),
            kind,
            notes: row.notes.trim().to_string(),
        })
    }

    pub fn is_skip(&self) -> bool {
        self.kind == RuleKind::Skip
    }

    pub fn is_title_rule(&self) -> bool {
        self.title_regex.is_some()
    }
}

/// Returns true when an `is_active` cell enables its row.
///
/// A table without the column treats every row as active. When the column
/// exists, only `true` (any case) enables a row; blank cells disable it.
pub fn is_active(raw: Option<&str>) -> bool {
    raw.is_none_or(|value| value.trim().eq_ignore_ascii_case("true"))
}

pub fn is_skip_sentinel(target: &str) -> bool {
    let normalized = target.trim().to_lowercase();
    SKIP_SENTINELS.contains(&normalized.as_str())
}

/// Compiles a pattern with case-insensitive, Unicode-aware semantics.
///
/// Patterns use `regex` crate syntax, which has no lookaround or
/// backreferences; rows relying on them fail with [`RowError::InvalidRegex`].
pub fn compile_pattern(pattern: &str, field: &'static str) -> Result<Regex, RowError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(true)
        .build()
        .map_err(|error| RowError::InvalidRegex {
            field,
            pattern: pattern.to_string(),
            message: error.to_string(),
        })
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, RowError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(RowError::MissingField { field })
}

fn parse_priority(raw: Option<&str>) -> Result<i32, RowError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PRIORITY),
        Some(value) => value.parse().map_err(|_| RowError::InvalidPriority {
            value: value.to_string(),
        }),
    }
}
