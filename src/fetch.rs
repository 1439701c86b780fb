use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;

/// Retrieves the body of a remote document as text.
#[async_trait]
pub trait Fetch: fmt::Debug + Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let text = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}


#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::collections::HashMap;

    /// Serves canned bodies; unknown urls fail like an unreachable host.
    #[derive(Debug, Default)]
    pub struct StubFetcher {
        pages: HashMap<String, String>,
    }

    impl StubFetcher {
        pub fn with(mut self, url: &str, body: impl Into<String>) -> Self {
            self.pages.insert(url.to_owned(), body.into());
            self
        }
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no route to {}", url))
        }
    }
}
