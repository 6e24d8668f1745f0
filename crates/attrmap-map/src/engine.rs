//! Mapping engine implementation.

use attrmap_model::{
    CandidateMapping, MappingResult, ProductInput, ProductMapping, ResolvedAttribute,
    SupplierAttribute,
};
use attrmap_rules::{Rule, RuleStore};
use tracing::{debug, trace};

use crate::matcher::{MatchOutcome, match_title, match_value};
use crate::merge::merge_passes;
use crate::resolver::{Decision, ResolvedSet};

/// Applies a loaded [`RuleStore`] to supplier attributes and product titles.
///
/// The engine only borrows the store, so one store can back any number of
/// engines, including engines on other threads.
#[derive(Debug, Clone, Copy)]
pub struct MappingEngine<'a> {
    rules: &'a RuleStore,
}

impl<'a> MappingEngine<'a> {
    pub fn new(rules: &'a RuleStore) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a RuleStore {
        self.rules
    }

    /// Maps one supplier attribute into canonical attributes.
    ///
    /// Returns an empty list when the attribute is incomplete, when no rule
    /// matches, or when a skip rule matches.
    pub fn map_attribute(
        &self,
        attribute: &SupplierAttribute,
        category_id: &str,
    ) -> Vec<ResolvedAttribute> {
        let name = attribute.name.trim();
        let value = attribute.value.trim();
        if name.is_empty() || value.is_empty() {
            return Vec::new();
        }
        let normalized_name = name.to_lowercase();
        let supplier_unit = attribute.unit.trim();

        let mut seen = ResolvedSet::new();
        for rule in self.rules.rules() {
            if !rule.scope.applies_to(category_id) {
                continue;
            }
            if !rule.name_pattern.is_empty() && !normalized_name.contains(&rule.name_pattern) {
                continue;
            }
            let Some(outcome) = match_value(rule, value) else {
                continue;
            };
            if outcome.value.is_empty() {
                continue;
            }
            if rule.is_skip() {
                debug!(line = rule.line, attribute = name, "skip rule discarded attribute");
                return Vec::new();
            }
            let unit = if outcome.unit.is_empty() {
                supplier_unit.to_string()
            } else {
                outcome.unit
            };
            offer(&mut seen, rule, outcome.value, unit);
        }
        seen.into_vec()
    }

    /// Extracts canonical attributes from a product title.
    ///
    /// Only rules carrying a title regex take part. Candidates whose templated
    /// value is empty are dropped.
    pub fn map_title(&self, title: &str, category_id: &str) -> Vec<ResolvedAttribute> {
        if title.trim().is_empty() {
            return Vec::new();
        }
        let mut seen = ResolvedSet::new();
        for rule in self.rules.title_rules() {
            if !rule.scope.applies_to(category_id) {
                continue;
            }
            let Some(MatchOutcome { value, unit }) = match_title(rule, title) else {
                continue;
            };
            // A skip match empties the whole title pass, as in the attribute
            // pass, rather than passing over just this rule.
            if rule.is_skip() {
                debug!(line = rule.line, "skip rule discarded title mappings");
                return Vec::new();
            }
            if value.is_empty() {
                trace!(line = rule.line, "title match produced an empty value");
                continue;
            }
            offer(&mut seen, rule, value, unit);
        }
        seen.into_vec()
    }

    /// Maps every supplier attribute of one product.
    ///
    /// Complete attributes that produce no mapping, including those discarded
    /// by a skip rule, are reported as unmapped.
    pub fn map_attributes(
        &self,
        attributes: &[SupplierAttribute],
        category_id: &str,
    ) -> MappingResult {
        let mut result = MappingResult::default();
        for attribute in attributes {
            let mapped = self.map_attribute(attribute, category_id);
            if mapped.is_empty() {
                if attribute.is_complete() {
                    result.unmapped.push(attribute.clone());
                }
            } else {
                result.mapped.extend(mapped);
            }
        }
        debug!(
            category_id,
            mapped = result.mapped.len(),
            unmapped = result.unmapped.len(),
            "attribute pass complete"
        );
        result
    }

    /// Runs the attribute pass, the title pass, and their merge.
    pub fn map_product(&self, product: &ProductInput) -> ProductMapping {
        let category_id = product.category_id.trim();
        let attributes = self.map_attributes(&product.attributes, category_id);
        let title = self.map_title(&product.title, category_id);
        let merged = merge_passes(&product.attributes, &attributes.mapped, &title);
        ProductMapping {
            attributes,
            title,
            merged,
        }
    }
}

fn offer(seen: &mut ResolvedSet, rule: &Rule, value: String, unit: String) {
    let candidate = CandidateMapping {
        attribute: rule.target.clone(),
        value,
        unit,
        kind: rule.kind,
        priority: rule.priority,
    };
    let decision = seen.offer(candidate);
    debug!(
        line = rule.line,
        target = %rule.target,
        kind = %rule.kind,
        priority = rule.priority,
        replaced = decision == Decision::Replace,
        "rule matched"
    );
}

#[cfg(test)]
mod tests {
    use attrmap_model::{RawRuleRow, RuleKind};

    use super::*;

    fn store(rows: Vec<RawRuleRow>) -> RuleStore {
        RuleStore::from_rows(rows)
    }

    fn row(line: usize, name: &str, pattern_type: &str, pattern: &str, target: &str) -> RawRuleRow {
        RawRuleRow {
            line,
            name_pattern: name.to_string(),
            value_pattern: pattern.to_string(),
            pattern_type: Some(pattern_type.to_string()),
            target_attribute: Some(target.to_string()),
            ..RawRuleRow::default()
        }
    }

    #[test]
    fn incomplete_attribute_maps_to_nothing() {
        let rules = store(vec![row(1, "", "exact", "", "Anything")]);
        let engine = MappingEngine::new(&rules);
        assert!(engine.map_attribute(&SupplierAttribute::new("  ", "x"), "").is_empty());
        assert!(engine.map_attribute(&SupplierAttribute::new("Колір", " "), "").is_empty());
    }

    #[test]
    fn name_filter_is_substring_of_lowercased_name() {
        let rules = store(vec![row(1, "Колір", "exact", "", "Color")]);
        let engine = MappingEngine::new(&rules);
        let mapped = engine.map_attribute(&SupplierAttribute::new("Колір корпусу", "Білий"), "");
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].value, "Білий");
        assert!(engine.map_attribute(&SupplierAttribute::new("Матеріал", "Пластик"), "").is_empty());
    }

    #[test]
    fn category_scope_restricts_rules() {
        let mut scoped = row(1, "", "exact", "", "Ємність");
        scoped.category_id = "301105".to_string();
        let rules = store(vec![scoped]);
        let engine = MappingEngine::new(&rules);
        let attribute = SupplierAttribute::new("Ємність", "2 ТБ");
        assert_eq!(engine.map_attribute(&attribute, "301105").len(), 1);
        assert!(engine.map_attribute(&attribute, "70704").is_empty());
    }

    #[test]
    fn supplier_unit_fills_empty_unit_template() {
        let mut with_unit = row(1, "вага", "exact", "", "Weight");
        with_unit.priority = Some("10".to_string());
        let rules = store(vec![with_unit]);
        let engine = MappingEngine::new(&rules);
        let mapped =
            engine.map_attribute(&SupplierAttribute::new("Вага", "250").with_unit("г"), "");
        assert_eq!(mapped[0].unit, "г");
        assert_eq!(mapped[0].kind, RuleKind::Extract);
        assert_eq!(mapped[0].priority, 10);
    }

    #[test]
    fn empty_title_maps_to_nothing() {
        let mut title = row(1, "", "regex", "", "FocalLength");
        title.title_regex = "(\\d+)mm".to_string();
        let rules = store(vec![title]);
        assert!(MappingEngine::new(&rules).map_title("   ", "").is_empty());
    }
}
