pub mod enums;
pub mod error;
pub mod mapping;
pub mod rule_row;

pub use enums::{CategoryScope, PatternType, RuleKind};
pub use error::ModelError;
pub use mapping::{
    CandidateMapping, MappingResult, ProductInput, ProductMapping, ResolvedAttribute,
    SUPPLIER_PRIORITY, SupplierAttribute, attribute_key,
};
pub use rule_row::RawRuleRow;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_candidate_is_weakest() {
        let raw = SupplierAttribute::new(" Вага ", " 250 г ").with_unit("г");
        let candidate = CandidateMapping::from_supplier(&raw);
        assert_eq!(candidate.attribute, "Вага");
        assert_eq!(candidate.value, "250 г");
        assert_eq!(candidate.kind, RuleKind::Supplier);
        assert_eq!(candidate.priority, SUPPLIER_PRIORITY);
        assert_eq!(candidate.key(), "вага");
    }

    #[test]
    fn product_input_deserializes_with_defaults() {
        let json = r#"{"title":"HDD 1TB","attributes":[{"name":"Об'єм","value":"1 ТБ"}]}"#;
        let product: ProductInput = serde_json::from_str(json).expect("deserialize product");
        assert_eq!(product.category_id, "");
        assert_eq!(product.attributes.len(), 1);
        assert_eq!(product.attributes[0].unit, "");
    }
}
