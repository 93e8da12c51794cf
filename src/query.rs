//! Search query construction.
//!
//! Queries are space-joined clauses in GitHub search syntax: `stars:>N`,
//! `created:>YYYY-MM-DD` and `language:<name>`.

use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{FinderError, Result};

/// Minimum star count required by an explicit search.
pub const MIN_STARS: u32 = 10;
/// Fixed page size for every request.
pub const PER_PAGE: u32 = 9;
/// Width of the creation-date window sampled by randomized discovery.
pub const DISCOVERY_WINDOW_DAYS: i64 = 365;

const SEARCH_PATH: &str = "/search/repositories";

/// Result ordering accepted by the search endpoint. Order is always descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Stars,
    Forks,
    Updated,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
            SortKey::Updated => "updated",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request against the repository search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    clauses: Vec<String>,
    sort: SortKey,
}

impl SearchRequest {
    /// Explicit search: repositories above the star threshold, optionally in one language.
    pub fn search(language: Option<&str>, sort: SortKey) -> Self {
        let mut clauses = vec![format!("stars:>{}", MIN_STARS)];
        if let Some(language) = normalize_language(language) {
            clauses.push(format!("language:{}", language));
        }
        Self { clauses, sort }
    }

    /// Randomized discovery: repositories created after `created_after`, most starred first.
    pub fn discover(language: Option<&str>, created_after: NaiveDate) -> Self {
        let mut clauses = vec![format!("created:>{}", created_after.format("%Y-%m-%d"))];
        if let Some(language) = normalize_language(language) {
            clauses.push(format!("language:{}", language));
        }
        Self {
            clauses,
            sort: SortKey::Stars,
        }
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn query_string(&self) -> String {
        self.clauses.join(" ")
    }

    /// Full request URL relative to an API base such as `https://api.github.com`.
    pub fn url(&self, api_base: &str) -> Result<Url> {
        let base = api_base.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, SEARCH_PATH))
            .map_err(|e| FinderError::InvalidArgument(format!("Invalid API URL {}: {}", api_base, e)))?;

        url.query_pairs_mut()
            .append_pair("q", &self.query_string())
            .append_pair("sort", self.sort.as_str())
            .append_pair("order", "desc")
            .append_pair("per_page", &PER_PAGE.to_string());

        Ok(url)
    }
}

/// Pick a creation-date lower bound uniformly from the last year.
pub fn random_created_after<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> NaiveDate {
    let offset = rng.gen_range(0..DISCOVERY_WINDOW_DAYS);
    today - Duration::days(offset)
}

fn normalize_language(language: Option<&str>) -> Option<&str> {
    language.map(str::trim).filter(|l| !l.is_empty())
}
