use structopt::StructOpt;

use crate::{run_impl, run_impl_struct};

#[derive(StructOpt)]
pub struct Cache {
    #[structopt(subcommand)]
    action: Action,
}

run_impl_struct!(Cache, action);

#[derive(StructOpt)]
enum Action {
    /// Delete the cached catalog so the next run fetches every source again
    Clear,
}

run_impl!(Action, self, ctx, out, {
    match self {
        Self::Clear => {
            let cache = soccompare::cache::FileCache::new(
                &ctx.config.cache.path,
                ctx.config.cache.max_age(),
            );
            soccompare::cache::RecordCache::clear(&cache)?;
            out.data(&cache.path())?;
        }
    }
});
