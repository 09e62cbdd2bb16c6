pub(crate) mod common;
mod modules;
mod options;

use std::io::stdout;

use erased_serde::Serializer;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use crate::common::{Context, Out, Run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("soccompare=info".parse()?))
        .init();

    let opt = options::Options::from_args();
    let ctx = Context::new(&opt)?;

    let mut json = serde_json::Serializer::pretty(stdout());
    let mut serializer = <dyn Serializer>::erase(&mut json);
    let mut out = Out::new(&mut serializer);

    opt.run(&ctx, &mut out).await?;

    if out.wrote_data() {
        println!();
    }
    Ok(())
}
