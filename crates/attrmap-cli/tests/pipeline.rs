//! Integration tests for the pipeline module.

use std::fs;
use std::path::PathBuf;

use attrmap_cli::pipeline::{map_products, read_products, write_reports};
use attrmap_map::MappingEngine;
use attrmap_rules::{CsvOptions, RuleStore, parse_rule_table};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "attrmap-cli-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const RULES: &str = "attribute_name;title_regex;value_pattern;pattern_type;target_attribute;value_template;unit_template;priority;category_id;rule_kind
швидкість;;(\\d{4,5});regex;RotationSpeed;$1;об/хв;10;;extract
;;no-index;contains;Пропустити;;;1;;
;(\\d+(?:\\.\\d+)?)\\s*mm;;regex;FocalLength;$1;мм;20;70704;extract
";

const PRODUCTS: &str = r#"[
  {
    "title": "WD Purple 4TB",
    "category_id": "301105",
    "attributes": [
      {"name": "Швидкість обертання", "value": "5400 об/хв"},
      {"name": "Примітка", "value": "no-index"},
      {"name": "Колір", "value": "Білий", "unit": ""}
    ]
  },
  {
    "title": "Hikvision DS-2CE16H0T-ITF(C) 5MP 2.8mm",
    "category_id": "70704",
    "attributes": []
  }
]"#;

fn store() -> RuleStore {
    let rows = parse_rule_table(
        RULES.as_bytes(),
        &CsvOptions::default(),
        std::path::Path::new("rules.csv"),
    )
    .expect("parse rules");
    RuleStore::from_rows(rows)
}

#[test]
fn reads_products_and_maps_them() {
    let dir = unique_temp_dir("map");
    let input = dir.join("products.json");
    fs::write(&input, PRODUCTS).unwrap();

    let products = read_products(&input).expect("read products");
    let rules = store();
    let (reports, totals) = map_products(&MappingEngine::new(&rules), &products);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].mapped.len(), 1);
    assert_eq!(reports[0].mapped[0].value, "5400");
    assert_eq!(reports[0].mapped[0].unit, "об/хв");
    assert_eq!(reports[0].unmapped.len(), 2);
    assert!(reports[0].title_mapped.is_empty());
    assert_eq!(reports[1].title_mapped[0].value, "2.8");

    insta::assert_json_snapshot!(totals, @r#"
    {
      "products": 2,
      "supplier_attributes": 3,
      "mapped": 1,
      "unmapped": 2,
      "title_mapped": 1,
      "merged": 5
    }
    "#);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn written_reports_use_output_field_names() {
    let products = vec![attrmap_model::ProductInput {
        title: "Camera 4mm".to_string(),
        category_id: "70704".to_string(),
        attributes: Vec::new(),
    }];
    let rules = store();
    let (reports, _) = map_products(&MappingEngine::new(&rules), &products);

    let mut buffer = Vec::new();
    write_reports(&mut buffer, &reports).expect("write reports");
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.ends_with("]\n"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let report = &value[0];
    for key in ["title", "category_id", "mapped", "unmapped", "title_mapped", "merged"] {
        assert!(report.get(key).is_some(), "missing {key}");
    }
    assert_eq!(report["title_mapped"][0]["attribute"], "FocalLength");
    assert_eq!(report["merged"][0]["kind"], "extract");
}

#[test]
fn unreadable_products_report_the_path() {
    let path = unique_temp_dir("missing").join("absent.json");
    let error = read_products(&path).unwrap_err();
    assert!(format!("{error:#}").contains("absent.json"));
}

#[test]
fn malformed_products_are_an_error() {
    let dir = unique_temp_dir("malformed");
    let input = dir.join("products.json");
    fs::write(&input, "{\"title\": 1}").unwrap();
    let error = read_products(&input).unwrap_err();
    assert!(error.to_string().contains("parse products"));
    fs::remove_dir_all(&dir).ok();
}
