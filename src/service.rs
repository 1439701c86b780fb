use crate::config::Config;
use crate::error::LookupError;
use crate::fetch::{Fetch, HttpFetcher};
use crate::problemset::{ProblemSelector, ProblemSelectorBuilder};
use crate::statement::{StatementExtractor, StatementExtractorBuilder};
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemPayload {
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct ProblemService {
    selector: ProblemSelector,
    extractor: StatementExtractor,
}

impl ProblemService {
    pub fn new(selector: ProblemSelector, extractor: StatementExtractor) -> Self {
        Self {
            selector,
            extractor,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetch> = Arc::new(HttpFetcher::new()?);
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn Fetch>) -> Result<Self> {
        let selector = ProblemSelectorBuilder::default()
            .fetcher(fetcher.clone())
            .listing_url(config.problemset_url.as_str())
            .problem_base_url(config.problem_base_url.as_str())
            .build()?;
        let extractor = StatementExtractorBuilder::default()
            .fetcher(fetcher)
            .build()?;
        Ok(Self::new(selector, extractor))
    }

    /// Picks a random problem and renders its statement.
    pub async fn random_problem(&self) -> Result<ProblemPayload, LookupError> {
        let problem = self
            .selector
            .select_random()
            .await
            .ok_or(LookupError::NotFound)?;
        let url = self.selector.problem_url(&problem);

        match self.extractor.extract(&url).await {
            Ok(description) => {
                info!("Serving {} ({})", url, problem.name);
                Ok(ProblemPayload { url, description })
            }
            Err(err) => {
                error!("Error scraping problem description from {}: {:#}", url, err);
                Err(LookupError::ExtractionFailed { url })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fetch::stub::StubFetcher;
    use crate::problemset::PROBLEMSET_URL;

    pub(crate) const LISTING: &str = r#"{"status":"OK","result":{"problems":[
        {"contestId":4,"index":"A","name":"Watermelon","type":"PROGRAMMING","rating":800,"tags":["math"]}
    ],"problemStatistics":[{"contestId":4,"index":"A","solvedCount":381733}]}}"#;
    pub(crate) const EMPTY_LISTING: &str =
        r#"{"status":"OK","result":{"problems":[],"problemStatistics":[]}}"#;
    pub(crate) const WATERMELON_URL: &str = "https://codeforces.com/problemset/problem/4/A";
    pub(crate) const WATERMELON_PAGE: &str = r#"<div class="problem-statement"><div class="header"><div class="title">A. Watermelon</div><div class="time-limit"><div class="property-title">time limit per test</div>1 second</div><div class="memory-limit"><div class="property-title">memory limit per test</div>256 megabytes</div><div class="input-file"><div class="property-title">input</div>standard input</div><div class="output-file"><div class="property-title">output</div>standard output</div></div><div><p>Divide the watermelon.</p></div></div>"#;

    pub(crate) fn service(fetcher: StubFetcher) -> ProblemService {
        ProblemService::with_fetcher(&Config::default(), Arc::new(fetcher)).unwrap()
    }

    #[tokio::test]
    async fn random_problem_should_work() {
        let service = service(
            StubFetcher::default()
                .with(PROBLEMSET_URL, LISTING)
                .with(WATERMELON_URL, WATERMELON_PAGE),
        );

        let payload = service.random_problem().await.unwrap();

        assert_eq!(payload.url, WATERMELON_URL);
        assert_eq!(
            payload.description,
            "**A. Watermelon**\n\
             time limit per test: 1 second\n\
             memory limit per test: 256 megabytes\n\
             input: standard input\n\
             output: standard output\n\
             \n\
             Divide the watermelon."
        );
    }

    #[tokio::test]
    async fn random_problem_should_be_not_found_for_empty_listing() {
        let service = service(StubFetcher::default().with(PROBLEMSET_URL, EMPTY_LISTING));

        assert_eq!(service.random_problem().await, Err(LookupError::NotFound));
    }

    #[tokio::test]
    async fn random_problem_should_fail_extraction_when_page_unreachable() {
        let service = service(StubFetcher::default().with(PROBLEMSET_URL, LISTING));

        assert_eq!(
            service.random_problem().await,
            Err(LookupError::ExtractionFailed {
                url: WATERMELON_URL.to_owned()
            })
        );
    }
}
