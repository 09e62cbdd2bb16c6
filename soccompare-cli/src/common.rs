use async_trait::async_trait;
use erased_serde::Serializer;
use serde::Serialize;
use soccompare::{
    cache::{NoCache, RecordCache},
    catalog::{Catalog, Selector},
    common::Client,
    config::Config,
};
use std::io::Write;

use crate::options::Options;

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub config: Config,
    pub client: Client,
    pub cache: Box<dyn RecordCache>,
}

impl Context {
    pub fn new(options: &Options) -> anyhow::Result<Self> {
        let mut config = Config::load(&options.config);
        config.sources.extend(options.sources.iter().cloned());

        let client = Client::new(&config.http)?;
        let cache: Box<dyn RecordCache> = if options.no_cache {
            Box::new(NoCache)
        } else {
            config.cache.open()
        };

        Ok(Self {
            config,
            client,
            cache,
        })
    }

    pub async fn catalog(&self) -> anyhow::Result<Catalog> {
        Catalog::load(&self.config.sources, &self.client, self.cache.as_ref()).await
    }
}

/// Turn a selector into a catalog position. Indices are passed through unchecked so the
/// comparison itself reports out-of-range selections.
pub fn position(catalog: &Catalog, selector: &Selector) -> anyhow::Result<usize> {
    match selector {
        Selector::Index(index) => Ok(*index),
        Selector::Name(name) => catalog
            .resolve(selector)
            .ok_or_else(|| anyhow::anyhow!("no processor named {:?}", name)),
    }
}

/// Where command results go: structured data through the serializer, or plain text.
pub struct Out<'a> {
    serializer: &'a mut (dyn Serializer + Send),
    wrote_data: bool,
}

impl<'a> Out<'a> {
    pub fn new(serializer: &'a mut (dyn Serializer + Send)) -> Self {
        Self {
            serializer,
            wrote_data: false,
        }
    }

    pub fn data<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let serializer: &mut (dyn Serializer + Send) = &mut *self.serializer;
        erased_serde::serialize(value, serializer)?;
        self.wrote_data = true;
        Ok(())
    }

    pub fn text(&mut self, text: &str) -> anyhow::Result<()> {
        let mut stdout = std::io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    pub fn wrote_data(&self) -> bool {
        self.wrote_data
    }
}

#[async_trait]
pub trait Run {
    async fn run(&self, ctx: &Context, out: &mut Out<'_>) -> anyhow::Result<()>;
}

/// Implement [`Run`] for a command, struct or enum, with `$b` as the body.
#[macro_export]
macro_rules! run_impl {
    ($i:ident, $self:ident, $ctx:ident, $out:ident, $b:block) => {
        #[async_trait::async_trait]
        impl $crate::common::Run for $i {
            async fn run(
                &$self,
                $ctx: &$crate::common::Context,
                $out: &mut $crate::common::Out<'_>,
            ) -> anyhow::Result<()> {
                $b;

                Ok(())
            }
        }
    }
}

#[macro_export]
macro_rules! run_impl_struct {
    ($i:ident, $b:ident) => {
        #[async_trait::async_trait]
        impl $crate::common::Run for $i {
            async fn run(
                &self,
                ctx: &$crate::common::Context,
                out: &mut $crate::common::Out<'_>,
            ) -> anyhow::Result<()> {
                self.$b.run(ctx, out).await
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use erased_serde::Serializer;
    use soccompare::{cache::NoCache, common::Client, config::Config};

    use super::{Context, Out, Run};
    use crate::run_impl;

    struct Greet {
        name: String,
    }

    run_impl!(Greet, self, ctx, out, {
        out.data(&(self.name.as_str(), ctx.config.http.timeout_secs))?;
    });

    #[tokio::test]
    async fn test_run_impl_on_struct() {
        let config = Config::default();
        let ctx = Context {
            client: Client::new(&config.http).unwrap(),
            config,
            cache: Box::new(NoCache),
        };

        let mut json = serde_json::Serializer::new(Vec::new());
        {
            let mut serializer = <dyn Serializer>::erase(&mut json);
            let mut out = Out::new(&mut serializer);
            assert!(!out.wrote_data());
            Greet { name: "M2".into() }.run(&ctx, &mut out).await.unwrap();
            assert!(out.wrote_data());
        }
        assert_eq!(String::from_utf8(json.into_inner()).unwrap(), r#"["M2",30]"#);
    }
}
