//! Immutable, priority-ordered rule store.
//!
//! The store is built once from raw rows and then only read. Bad rows never
//! abort a load: they are logged, recorded as [`RejectedRule`] diagnostics,
//! and left out of the store.

use std::collections::BTreeMap;

use attrmap_model::{RawRuleRow, RuleKind};
use tracing::{info, warn};

use crate::error::RowError;
use crate::rule::{Rule, is_active};

/// A row that was excluded while building a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRule {
    pub line: usize,
    pub error: RowError,
}

/// Counts describing a loaded rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSetSummary {
    pub loaded: usize,
    pub inactive: usize,
    pub rejected: usize,
    pub by_kind: BTreeMap<RuleKind, usize>,
    pub by_scope: BTreeMap<String, usize>,
    pub title_rules: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
    rejected: Vec<RejectedRule>,
    inactive: usize,
}

impl RuleStore {
    /// Validates, compiles, and orders a sequence of raw rows.
    ///
    /// Inactive rows are dropped silently. Rows that fail validation are
    /// logged at `warn` and kept as diagnostics. The remaining rules are
    /// sorted by ascending priority; equal priorities keep row order.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRuleRow>,
    {
        let mut rules = Vec::new();
        let mut rejected = Vec::new();
        let mut inactive = 0usize;

        for row in rows {
            if !is_active(row.is_active.as_deref()) {
                inactive += 1;
                continue;
            }
            match Rule::from_row(&row) {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    warn!(line = row.line, %error, "rejected mapping rule");
                    rejected.push(RejectedRule {
                        line: row.line,
                        error,
                    });
                }
            }
        }

        rules.sort_by_key(|rule| rule.priority);

        let store = Self {
            rules,
            rejected,
            inactive,
        };
        let summary = store.summary();
        info!(
            loaded = summary.loaded,
            inactive = summary.inactive,
            rejected = summary.rejected,
            title_rules = summary.title_rules,
            by_kind = ?summary.by_kind,
            by_scope = ?summary.by_scope,
            "loaded mapping rules"
        );
        store
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules that carry a compiled title regex, in evaluation order.
    pub fn title_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| rule.is_title_rule())
    }

    pub fn rejected(&self) -> &[RejectedRule] {
        &self.rejected
    }

    pub fn inactive_count(&self) -> usize {
        self.inactive
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn summary(&self) -> RuleSetSummary {
        let mut summary = RuleSetSummary {
            loaded: self.rules.len(),
            inactive: self.inactive,
            rejected: self.rejected.len(),
            ..RuleSetSummary::default()
        };
        for rule in &self.rules {
            *summary.by_kind.entry(rule.kind).or_insert(0) += 1;
            *summary
                .by_scope
                .entry(rule.scope.label().to_string())
                .or_insert(0) += 1;
            if rule.is_title_rule() {
                summary.title_rules += 1;
            }
        }
        summary
    }
}
