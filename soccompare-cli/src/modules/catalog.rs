use anyhow::Context as _;
use serde::Serialize;
use soccompare::{
    catalog::Selector,
    scoring::{ComponentScores, ProcessorRecord},
};
use structopt::StructOpt;

use crate::{common::position, run_impl};

#[derive(StructOpt)]
pub struct List {
    /// Only show processors whose name or manufacturer contains this text
    #[structopt(long, short)]
    search: Option<String>,
}

run_impl!(List, self, ctx, out, {
    let catalog = ctx.catalog().await?;
    let query = self.search.as_deref().unwrap_or("");
    out.data(&catalog.search(query))?;
});

#[derive(StructOpt)]
pub struct Score {
    /// Catalog index or exact processor name
    processor: Selector,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport<'a> {
    index: usize,
    processor: &'a ProcessorRecord,
    scores: ComponentScores,
    performance_index: f64,
}

run_impl!(Score, self, ctx, out, {
    let catalog = ctx.catalog().await?;
    let index = position(&catalog, &self.processor)?;
    let processor = catalog
        .get(index)
        .with_context(|| format!("no processor at index {} (catalog has {})", index, catalog.len()))?;
    let scores = ComponentScores::of(processor);
    out.data(&ScoreReport {
        index,
        processor,
        scores,
        performance_index: scores.performance_index(),
    })?;
});
