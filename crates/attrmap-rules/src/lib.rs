#![deny(unsafe_code)]

pub mod csv_utils;
pub mod error;
pub mod loader;
pub mod rule;
pub mod store;

pub use crate::error::{RowError, RuleError};
pub use crate::loader::{
    CsvOptions, RULES_ENV_VAR, default_rules_path, load_rule_store, parse_rule_table,
    read_rule_rows,
};
pub use crate::rule::{DEFAULT_PRIORITY, Rule, compile_pattern};
pub use crate::store::{RejectedRule, RuleSetSummary, RuleStore};
