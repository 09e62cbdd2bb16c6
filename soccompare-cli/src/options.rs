use clap::AppSettings;
use soccompare::sources::Source;
use std::path::PathBuf;
use structopt::StructOpt;

use crate::{
    modules::{
        cache::Cache,
        catalog::{List, Score},
        compare::Compare,
    },
    run_impl, run_impl_struct,
};

#[derive(StructOpt)]
#[structopt(
    name = "soccompare",
    about = "Score processor (SoC) specifications and compare them head to head",
    global_settings = &[AppSettings::ColoredHelp]
)]
pub struct Options {
    /// TOML configuration file
    #[structopt(long, short, default_value = "soccompare.toml", parse(from_os_str))]
    pub config: PathBuf,

    /// Extra JSON source (URL or file), on top of the configured ones
    #[structopt(long = "source", short = "s", number_of_values = 1)]
    pub sources: Vec<Source>,

    /// Neither read nor write the record cache
    #[structopt(long)]
    pub no_cache: bool,

    #[structopt(subcommand)]
    command: Command,
}

run_impl_struct!(Options, command);

#[derive(StructOpt)]
enum Command {
    /// List the catalog with each processor's index
    List(List),
    /// Rank the whole catalog by performance index
    Rank,
    /// Component scores and performance index of one processor
    Score(Score),
    /// Compare two processors
    Compare(Compare),
    /// Manage the record cache
    Cache(Cache),
}

run_impl!(Command, self, ctx, out, {
    match self {
        Self::List(l) => l.run(ctx, out).await?,
        Self::Rank => {
            let catalog = ctx.catalog().await?;
            out.data(&catalog.ranked())?;
        }
        Self::Score(s) => s.run(ctx, out).await?,
        Self::Compare(c) => c.run(ctx, out).await?,
        Self::Cache(c) => c.run(ctx, out).await?,
    }
});
