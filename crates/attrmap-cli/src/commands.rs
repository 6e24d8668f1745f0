use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use attrmap_map::MappingEngine;
use attrmap_rules::{RULES_ENV_VAR, RuleStore, default_rules_path, load_rule_store};
use tracing::{info, info_span};

use attrmap_cli::pipeline::{map_products, read_products, write_reports};

use crate::cli::{MapArgs, RuleSourceArgs, RulesArgs};
use crate::types::{MapRunResult, RulesReport};

pub fn run_map(args: &MapArgs) -> Result<MapRunResult> {
    let span = info_span!("map", input = %args.input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let (rules_path, store) = load_rules(&args.source)?;
    let products = read_products(&args.input)?;
    let engine = MappingEngine::new(&store);
    let (reports, totals) = {
        let _map_guard = info_span!("map_products", products = products.len()).entered();
        map_products(&engine, &products)
    };

    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_reports(BufWriter::new(file), &reports)
                .with_context(|| format!("write {}", path.display()))?;
        }
        None => write_reports(io::stdout().lock(), &reports)?,
    }

    info!(
        products = totals.products,
        mapped = totals.mapped,
        unmapped = totals.unmapped,
        title_mapped = totals.title_mapped,
        merged = totals.merged,
        elapsed = ?started.elapsed(),
        "mapping run complete"
    );

    Ok(MapRunResult {
        rules_path,
        output: args.output.clone(),
        rules: store.summary(),
        totals,
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<RulesReport> {
    let span = info_span!("rules");
    let _guard = span.enter();
    let (rules_path, store) = load_rules(&args.source)?;
    Ok(RulesReport {
        rules_path,
        summary: store.summary(),
        rejected: store.rejected().to_vec(),
    })
}

fn load_rules(source: &RuleSourceArgs) -> Result<(PathBuf, RuleStore)> {
    let path = source
        .rules
        .clone()
        .or_else(default_rules_path)
        .ok_or_else(|| anyhow!("no rule table given: pass --rules or set {RULES_ENV_VAR}"))?;
    let options = source.csv_options().ok_or_else(|| {
        anyhow!(
            "delimiter {:?} is not a single ASCII character",
            source.delimiter
        )
    })?;
    let _guard = info_span!("load_rules", path = %path.display()).entered();
    let store = load_rule_store(&path, &options)
        .with_context(|| format!("load rules from {}", path.display()))?;
    Ok((path, store))
}
