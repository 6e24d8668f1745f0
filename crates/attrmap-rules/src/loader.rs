//! Rule table loader.
//!
//! Reads `;`-delimited rule tables into [`RawRuleRow`]s and builds a
//! [`RuleStore`] from them.
//!
//! # CSV Format
//!
//! Headers are matched case-insensitively; either spelling is accepted:
//!
//! | field            | headers                                          |
//! |------------------|--------------------------------------------------|
//! | name substring   | `attribute_name`, `supplier_attribute`           |
//! | title regex      | `title_regex`, `supplier_name_substring`         |
//! | value pattern    | `value_pattern`, `supplier_value_pattern`        |
//! | pattern type     | `pattern_type`                                   |
//! | target attribute | `target_attribute`, `prom_attribute`             |
//! | value template   | `value_template`, `prom_value_template`          |
//! | unit template    | `unit_template`, `prom_attribute_unit_template`  |
//! | priority         | `priority`                                       |
//! | category         | `category_id`                                    |
//! | rule kind        | `rule_kind`                                      |
//! | active flag      | `is_active`                                      |
//! | notes            | `notes`                                          |
//!
//! A row is active when the table has no `is_active` column or its cell reads
//! `true` in any case. Value and title patterns use `regex` crate syntax, so
//! lookaround and backreferences are reported as invalid rows.

use std::path::{Path, PathBuf};

use attrmap_model::RawRuleRow;
use tracing::debug;

use crate::csv_utils::{CsvRow, read_csv_rows};
use crate::error::RuleError;
use crate::store::RuleStore;

/// Environment variable naming the default rule table.
pub const RULES_ENV_VAR: &str = "ATTRMAP_RULES";

const NAME_PATTERN: &[&str] = &["attribute_name", "supplier_attribute"];
const TITLE_REGEX: &[&str] = &["title_regex", "supplier_name_substring"];
const VALUE_PATTERN: &[&str] = &["value_pattern", "supplier_value_pattern"];
const PATTERN_TYPE: &[&str] = &["pattern_type"];
const TARGET_ATTRIBUTE: &[&str] = &["target_attribute", "prom_attribute"];
const VALUE_TEMPLATE: &[&str] = &["value_template", "prom_value_template"];
const UNIT_TEMPLATE: &[&str] = &["unit_template", "prom_attribute_unit_template"];
const PRIORITY: &[&str] = &["priority"];
const CATEGORY_ID: &[&str] = &["category_id"];
const RULE_KIND: &[&str] = &["rule_kind"];
const IS_ACTIVE: &[&str] = &["is_active"];
const NOTES: &[&str] = &["notes"];

/// Options for reading delimited rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

/// Returns the rule table named by `ATTRMAP_RULES`, if set.
pub fn default_rules_path() -> Option<PathBuf> {
    std::env::var_os(RULES_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Reads a rule table file into raw rows.
pub fn read_rule_rows(path: &Path, options: &CsvOptions) -> Result<Vec<RawRuleRow>, RuleError> {
    let bytes = std::fs::read(path).map_err(|e| RuleError::io(path, e))?;
    parse_rule_table(&bytes, options, path)
}

/// Parses rule table contents into raw rows. Fully blank records are dropped.
pub fn parse_rule_table(
    contents: &[u8],
    options: &CsvOptions,
    source: &Path,
) -> Result<Vec<RawRuleRow>, RuleError> {
    let rows = read_csv_rows(contents, options.delimiter, source)?;
    let raw: Vec<RawRuleRow> = rows
        .iter()
        .filter(|row| !row.is_blank())
        .map(raw_rule_row)
        .collect();
    debug!(path = %source.display(), rows = raw.len(), "read rule table");
    Ok(raw)
}

/// Reads a rule table file and builds a store from it.
pub fn load_rule_store(path: &Path, options: &CsvOptions) -> Result<RuleStore, RuleError> {
    let rows = read_rule_rows(path, options)?;
    Ok(RuleStore::from_rows(rows))
}

fn raw_rule_row(row: &CsvRow) -> RawRuleRow {
    RawRuleRow {
        line: row.line,
        name_pattern: row.get_field(NAME_PATTERN),
        title_regex: row.get_field(TITLE_REGEX),
        value_pattern: row.get_field(VALUE_PATTERN),
        pattern_type: row.get_any(PATTERN_TYPE),
        target_attribute: row.get_any(TARGET_ATTRIBUTE),
        value_template: row.get_field(VALUE_TEMPLATE),
        unit_template: row.get_field(UNIT_TEMPLATE),
        priority: row.get_any(PRIORITY),
        category_id: row.get_field(CATEGORY_ID),
        rule_kind: row.get_any(RULE_KIND),
        is_active: row.get_any(IS_ACTIVE),
        notes: row.get_field(NOTES),
    }
}
