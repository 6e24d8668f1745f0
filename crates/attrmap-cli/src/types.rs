use std::path::PathBuf;

use attrmap_cli::pipeline::RunTotals;
use attrmap_rules::{RejectedRule, RuleSetSummary};

#[derive(Debug)]
pub struct MapRunResult {
    pub rules_path: PathBuf,
    pub output: Option<PathBuf>,
    pub rules: RuleSetSummary,
    pub totals: RunTotals,
}

#[derive(Debug)]
pub struct RulesReport {
    pub rules_path: PathBuf,
    pub summary: RuleSetSummary,
    pub rejected: Vec<RejectedRule>,
}

impl RulesReport {
    pub fn has_errors(&self) -> bool {
        !self.rejected.is_empty()
    }
}
