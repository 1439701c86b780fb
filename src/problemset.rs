use crate::fetch::Fetch;
use anyhow::{anyhow, Context, Result};
use derive_builder::Builder;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

pub const PROBLEMSET_URL: &str = "https://codeforces.com/api/problemset.problems";
pub const PROBLEM_BASE_URL: &str = "https://codeforces.com/problemset/problem";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemReference {
    pub contest_id: u32,
    pub index: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProblemListing {
    pub problems: Vec<ProblemReference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum ApiStatus {
    Ok,
    Failed,
}

/// Envelope every Codeforces API method answers with.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    status: ApiStatus,
    comment: Option<String>,
    result: Option<T>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T> {
        match (self.status, self.result) {
            (ApiStatus::Ok, Some(result)) => Ok(result),
            (ApiStatus::Ok, None) => Err(anyhow!("api answered OK without a result")),
            (ApiStatus::Failed, _) => Err(anyhow!(
                "api call failed: {}",
                self.comment.unwrap_or_default()
            )),
        }
    }
}

#[derive(Debug, Clone, Builder)]
pub struct ProblemSelector {
    fetcher: Arc<dyn Fetch>,
    #[builder(setter(into), default = "PROBLEMSET_URL.to_owned()")]
    listing_url: String,
    #[builder(setter(into), default = "PROBLEM_BASE_URL.to_owned()")]
    problem_base_url: String,
}

impl ProblemReference {
    pub fn url(&self, base: &str) -> String {
        format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            self.contest_id,
            self.index
        )
    }
}

impl ProblemListing {
    pub fn parse(body: &str) -> Result<Self> {
        let response: ApiResponse<ProblemListing> =
            serde_json::from_str(body).context("malformed problemset listing")?;
        response.into_result()
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ProblemReference> {
        self.problems.choose(rng)
    }
}

impl ProblemSelector {
    pub async fn fetch_listing(&self) -> Result<ProblemListing> {
        let body = self.fetcher.fetch_text(&self.listing_url).await?;
        ProblemListing::parse(&body)
    }

    /// Draws one problem from a freshly fetched listing. Fetch failures and
    /// empty listings both come back as `None`.
    pub async fn select_random(&self) -> Option<ProblemReference> {
        let listing = match self.fetch_listing().await {
            Ok(listing) => listing,
            Err(err) => {
                warn!("Failed to fetch problem listing from {}: {:#}", self.listing_url, err);
                return None;
            }
        };

        let problem = {
            let mut rng = rand::thread_rng();
            listing.pick(&mut rng).cloned()
        };
        match &problem {
            Some(p) => debug!(
                "Picked {}{} ({}) out of {} problems",
                p.contest_id,
                p.index,
                p.name,
                listing.problems.len()
            ),
            None => warn!("Problem listing from {} is empty", self.listing_url),
        }
        problem
    }

    pub fn problem_url(&self, problem: &ProblemReference) -> String {
        problem.url(&self.problem_base_url)
    }
}
