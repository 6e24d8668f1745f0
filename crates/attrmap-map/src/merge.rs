//! Merging raw supplier attributes with both mapping passes.

use attrmap_model::{CandidateMapping, ResolvedAttribute, SupplierAttribute};
use tracing::debug;

use crate::resolver::ResolvedSet;

/// Combines raw attributes, attribute-pass results, and title-pass results.
///
/// Raw attributes enter first as the weakest candidates, so the first raw
/// occurrence of a name wins among them and any mapped value can displace it.
/// Mapped and title results then go through the usual precedence check.
/// Output keeps the order in which each attribute key first appeared.
pub fn merge_passes(
    supplier: &[SupplierAttribute],
    mapped: &[ResolvedAttribute],
    title: &[ResolvedAttribute],
) -> Vec<ResolvedAttribute> {
    let mut merged = ResolvedSet::new();
    for attribute in supplier.iter().filter(|attribute| attribute.is_complete()) {
        merged.offer(CandidateMapping::from_supplier(attribute));
    }
    for resolved in mapped.iter().chain(title) {
        merged.offer(CandidateMapping::from_resolved(resolved));
    }
    debug!(
        supplier = supplier.len(),
        mapped = mapped.len(),
        title = title.len(),
        merged = merged.len(),
        "merged mapping passes"
    );
    merged.into_vec()
}

#[cfg(test)]
mod tests {
    use attrmap_model::{RuleKind, SUPPLIER_PRIORITY};

    use super::*;

    fn resolved(attribute: &str, value: &str, kind: RuleKind, priority: i32) -> ResolvedAttribute {
        ResolvedAttribute {
            attribute: attribute.to_string(),
            value: value.to_string(),
            unit: String::new(),
            kind,
            priority,
        }
    }

    #[test]
    fn first_raw_occurrence_wins() {
        let merged = merge_passes(
            &[
                SupplierAttribute::new("Колір", "Білий"),
                SupplierAttribute::new("колір ", "Чорний"),
                SupplierAttribute::new("Вага", ""),
            ],
            &[],
            &[],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].value, "Білий");
        assert_eq!(merged[0].kind, RuleKind::Supplier);
        assert_eq!(merged[0].priority, SUPPLIER_PRIORITY);
    }

    #[test]
    fn mapped_value_displaces_raw_value_in_place() {
        let merged = merge_passes(
            &[
                SupplierAttribute::new("Interface", "Serial ATA"),
                SupplierAttribute::new("Колір", "Білий"),
            ],
            &[resolved("interface", "SATA", RuleKind::Extract, 5)],
            &[],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].attribute, "interface");
        assert_eq!(merged[0].value, "SATA");
        assert_eq!(merged[1].attribute, "Колір");
    }

    #[test]
    fn title_result_fills_gaps_but_respects_priority() {
        let merged = merge_passes(
            &[],
            &[resolved("FocalLength", "4", RuleKind::Extract, 10)],
            &[
                resolved("FocalLength", "2.8", RuleKind::Extract, 20),
                resolved("Resolution", "5", RuleKind::Extract, 20),
            ],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].value, "4");
        assert_eq!(merged[1].attribute, "Resolution");
    }
}
