//! Attribute types flowing through a mapping pass.

use serde::{Deserialize, Serialize};

use crate::enums::RuleKind;

/// Priority assigned to raw supplier attributes during a pass merge.
pub const SUPPLIER_PRIORITY: i32 = i32::MAX;

/// Normalizes an attribute name into the key used for deduplication.
pub fn attribute_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A raw `{name, value, unit}` triple as scraped from a supplier page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierAttribute {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub unit: String,
}

impl SupplierAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: String::new(),
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// True when both name and value carry text after trimming.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.value.trim().is_empty()
    }
}

/// A value produced by one rule match, before arbitration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMapping {
    pub attribute: String,
    pub value: String,
    pub unit: String,
    pub kind: RuleKind,
    pub priority: i32,
}

impl CandidateMapping {
    pub fn key(&self) -> String {
        attribute_key(&self.attribute)
    }

    /// Wraps a raw supplier attribute as the weakest possible candidate.
    pub fn from_supplier(attribute: &SupplierAttribute) -> Self {
        Self {
            attribute: attribute.name.trim().to_string(),
            value: attribute.value.trim().to_string(),
            unit: attribute.unit.trim().to_string(),
            kind: RuleKind::Supplier,
            priority: SUPPLIER_PRIORITY,
        }
    }

    /// Re-enters an already resolved attribute into another arbitration.
    pub fn from_resolved(attribute: &ResolvedAttribute) -> Self {
        Self {
            attribute: attribute.attribute.clone(),
            value: attribute.value.clone(),
            unit: attribute.unit.clone(),
            kind: attribute.kind,
            priority: attribute.priority,
        }
    }
}

/// The current winner for one canonical attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAttribute {
    /// Canonical attribute name.
    pub attribute: String,
    pub value: String,
    #[serde(default)]
    pub unit: String,
    /// Kind of the rule that produced the winning value.
    pub kind: RuleKind,
    /// Priority of the rule that produced the winning value.
    pub priority: i32,
}

impl ResolvedAttribute {
    pub fn key(&self) -> String {
        attribute_key(&self.attribute)
    }
}

impl From<CandidateMapping> for ResolvedAttribute {
    fn from(candidate: CandidateMapping) -> Self {
        Self {
            attribute: candidate.attribute,
            value: candidate.value,
            unit: candidate.unit,
            kind: candidate.kind,
            priority: candidate.priority,
        }
    }
}

/// Outcome of mapping a supplier attribute list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingResult {
    /// Every resolved attribute, in the order the specs were evaluated.
    pub mapped: Vec<ResolvedAttribute>,
    /// Complete specs for which no rule produced a mapping.
    pub unmapped: Vec<SupplierAttribute>,
}

/// One product as supplied by the crawler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub attributes: Vec<SupplierAttribute>,
}

/// Attribute pass, title pass, and their merge for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMapping {
    pub attributes: MappingResult,
    pub title: Vec<ResolvedAttribute>,
    /// Raw attributes, attribute-pass results, and title-pass results merged
    /// with the same precedence rules used inside a pass.
    pub merged: Vec<ResolvedAttribute>,
}
