//! Tests for attrmap-model types.

use attrmap_model::{
    CandidateMapping, MappingResult, ResolvedAttribute, RuleKind, SupplierAttribute,
    attribute_key,
};

#[test]
fn attribute_key_trims_and_lowercases() {
    assert_eq!(attribute_key("  Інтерфейс "), "інтерфейс");
    assert_eq!(attribute_key("RotationSpeed"), "rotationspeed");
}

#[test]
fn resolved_attribute_serializes_kind_lowercase() {
    let resolved = ResolvedAttribute {
        attribute: "Interface".to_string(),
        value: "SATA".to_string(),
        unit: String::new(),
        kind: RuleKind::Normalize,
        priority: 5,
    };
    let json = serde_json::to_value(&resolved).expect("serialize resolved");
    assert_eq!(json["kind"], "normalize");
    assert_eq!(json["priority"], 5);
}

#[test]
fn candidate_converts_into_resolved() {
    let candidate = CandidateMapping {
        attribute: "Weight".to_string(),
        value: "250".to_string(),
        unit: "г".to_string(),
        kind: RuleKind::Extract,
        priority: 50,
    };
    let resolved = ResolvedAttribute::from(candidate.clone());
    assert_eq!(resolved.key(), candidate.key());
    assert_eq!(CandidateMapping::from_resolved(&resolved), candidate);
}

#[test]
fn mapping_result_deserializes_without_units() {
    let json = r#"{
        "mapped": [{"attribute":"FocalLength","value":"2.8","kind":"extract","priority":10}],
        "unmapped": [{"name":"Колір","value":"білий"}]
    }"#;
    let result: MappingResult = serde_json::from_str(json).expect("deserialize result");
    assert_eq!(result.mapped[0].unit, "");
    assert_eq!(result.unmapped, vec![SupplierAttribute::new("Колір", "білий")]);
}

#[test]
fn incomplete_supplier_attributes_are_detected() {
    assert!(SupplierAttribute::new("Тип", "UTP").is_complete());
    assert!(!SupplierAttribute::new("Тип", "   ").is_complete());
    assert!(!SupplierAttribute::new("", "UTP").is_complete());
}
