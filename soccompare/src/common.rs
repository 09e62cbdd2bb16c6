use anyhow::Context;
use std::time::Duration;

use crate::config::HttpConfig;

/// A wrapped [`reqwest::Client`], built once per run from [`HttpConfig`]
/// and shared by every URL source.
#[derive(Clone)]
pub struct Client(pub reqwest::Client);

impl Client {
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("could not build the HTTP client")?;
        Ok(Self(client))
    }
}

/// Quote a CSV field if it holds a separator, a quote or a line break.
///
/// ## Example
/// ```txt
/// Apple M2          -> Apple M2
/// Dimensity 9000, 5 -> "Dimensity 9000, 5"
/// 5" die            -> "5"" die"
/// ```
pub(crate) fn csv_field<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    if s.contains(|c: char| c == ',' || c == '"' || c == '\n' || c == '\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
