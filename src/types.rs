use serde::{Deserialize, Serialize};

// GitHub search API response structures
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<SearchRepo>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchRepo {
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
}
