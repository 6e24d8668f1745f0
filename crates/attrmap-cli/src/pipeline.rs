//! Product mapping pipeline: read products, map them, write reports.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use attrmap_map::MappingEngine;
use attrmap_model::{ProductInput, ResolvedAttribute, SupplierAttribute};
use serde::Serialize;
use tracing::debug;

/// Mapping output for one product, as written to the output JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductReport {
    pub title: String,
    pub category_id: String,
    pub mapped: Vec<ResolvedAttribute>,
    pub unmapped: Vec<SupplierAttribute>,
    pub title_mapped: Vec<ResolvedAttribute>,
    pub merged: Vec<ResolvedAttribute>,
}

/// Counts accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub products: usize,
    pub supplier_attributes: usize,
    pub mapped: usize,
    pub unmapped: usize,
    pub title_mapped: usize,
    pub merged: usize,
}

impl RunTotals {
    fn add(&mut self, product: &ProductInput, report: &ProductReport) {
        self.products += 1;
        self.supplier_attributes += product.attributes.len();
        self.mapped += report.mapped.len();
        self.unmapped += report.unmapped.len();
        self.title_mapped += report.title_mapped.len();
        self.merged += report.merged.len();
    }
}

/// Reads a JSON array of products.
pub fn read_products(path: &Path) -> Result<Vec<ProductInput>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let products: Vec<ProductInput> = serde_json::from_str(&contents)
        .with_context(|| format!("parse products from {}", path.display()))?;
    debug!(path = %path.display(), products = products.len(), "read products");
    Ok(products)
}

/// Maps every product and tallies the results.
pub fn map_products(
    engine: &MappingEngine<'_>,
    products: &[ProductInput],
) -> (Vec<ProductReport>, RunTotals) {
    let mut totals = RunTotals::default();
    let reports = products
        .iter()
        .map(|product| {
            let mapping = engine.map_product(product);
            let report = ProductReport {
                title: product.title.clone(),
                category_id: product.category_id.clone(),
                mapped: mapping.attributes.mapped,
                unmapped: mapping.attributes.unmapped,
                title_mapped: mapping.title,
                merged: mapping.merged,
            };
            totals.add(product, &report);
            report
        })
        .collect();
    (reports, totals)
}

/// Writes reports as pretty-printed JSON followed by a newline.
pub fn write_reports<W: Write>(mut writer: W, reports: &[ProductReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, reports).context("serialize mapping reports")?;
    writeln!(writer).context("write mapping reports")?;
    writer.flush().context("flush mapping reports")?;
    Ok(())
}
