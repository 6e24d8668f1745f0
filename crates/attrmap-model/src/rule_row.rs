//! String-typed rule rows as delivered by a table adapter.

use serde::{Deserialize, Serialize};

/// One row of a rule table before validation.
///
/// Every cell is kept as text. `None` means the column was absent from the
/// source; an empty string means the cell was present but blank. Validation
/// and compilation happen when the row enters a rule store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRuleRow {
    /// 1-based data row number in the source table.
    pub line: usize,
    /// Substring required in the supplier attribute name.
    pub name_pattern: String,
    /// Regex searched in the product title.
    pub title_regex: String,
    pub value_pattern: String,
    pub pattern_type: Option<String>,
    /// Canonical attribute name, or a skip sentinel.
    pub target_attribute: Option<String>,
    pub value_template: String,
    pub unit_template: String,
    pub priority: Option<String>,
    pub category_id: String,
    pub rule_kind: Option<String>,
    pub is_active: Option<String>,
    pub notes: String,
}
