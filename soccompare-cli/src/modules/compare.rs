use soccompare::{
    catalog::Selector,
    export::{to_csv, to_document, ExportFormat},
};
use structopt::StructOpt;
use tracing::info;

use crate::{common::position, run_impl};

#[derive(StructOpt)]
pub struct Compare {
    /// First processor: catalog index or exact name
    a: Selector,
    /// Second processor: catalog index or exact name
    b: Selector,
    /// Output format
    #[structopt(
        long,
        short,
        default_value = "json",
        possible_values = ExportFormat::VARIANTS,
        case_insensitive = true
    )]
    format: ExportFormat,
}

run_impl!(Compare, self, ctx, out, {
    let catalog = ctx.catalog().await?;
    let a = position(&catalog, &self.a)?;
    let b = position(&catalog, &self.b)?;
    let result = catalog.compare(Some(a), Some(b))?;

    info!(
        winner = %result.winner(),
        category_leader = %result.category_leader(),
        "{} vs {}",
        result.processor_a().name,
        result.processor_b().name
    );

    match self.format {
        ExportFormat::Json => out.data(&to_document(&result))?,
        ExportFormat::Csv => out.text(&to_csv(&result))?,
    }
});
