//! View state and its rendered projection.
//!
//! `ViewState` is the only mutable UI state. `ViewState::render` projects it
//! into a `RenderedPage` that output writers and the page server consume.

use serde::Serialize;

use crate::types::SearchRepo;

/// Descriptions longer than this many characters are cut and suffixed with `...`.
pub const DESCRIPTION_LIMIT: usize = 100;
pub const NO_DESCRIPTION: &str = "No description provided";
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub no_results: bool,
    pub show_counts: bool,
    pub results: Vec<SearchRepo>,
    latest_request: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: false,
            no_results: false,
            show_counts: true,
            results: Vec::new(),
            latest_request: 0,
        }
    }
}

impl ViewState {
    pub fn new(show_counts: bool) -> Self {
        Self {
            show_counts,
            ..Default::default()
        }
    }

    /// Enter the loading state for a new request and return its sequence number.
    /// Prior results are cleared before the request is issued.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.loading = true;
        self.no_results = false;
        self.results.clear();
        self.latest_request
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    pub fn is_current(&self, request: u64) -> bool {
        request == self.latest_request
    }

    /// Apply a successful response. An empty item list shows the empty state.
    pub fn show_results(&mut self, items: Vec<SearchRepo>) {
        self.loading = false;
        self.no_results = items.is_empty();
        self.results = items;
    }

    /// A failed request looks exactly like an empty one.
    pub fn show_failure(&mut self) {
        self.loading = false;
        self.no_results = true;
        self.results.clear();
    }

    pub fn render(&self) -> RenderedPage {
        RenderedPage {
            loading_visible: self.loading,
            empty_visible: !self.loading && self.no_results,
            cards: self
                .results
                .iter()
                .map(|repo| RepoCard::from_repo(repo, self.show_counts))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedPage {
    pub loading_visible: bool,
    pub empty_visible: bool,
    pub cards: Vec<RepoCard>,
}

impl RenderedPage {
    /// Flip every rendered star and fork badge in place.
    pub fn set_counts_visible(&mut self, visible: bool) {
        for card in &mut self.cards {
            card.stars.hidden = !visible;
            card.forks.hidden = !visible;
        }
    }

    pub fn badges(&self) -> impl Iterator<Item = &CountBadge> {
        self.cards.iter().flat_map(|card| [&card.stars, &card.forks])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoCard {
    pub full_name: String,
    pub url: String,
    pub description: String,
    pub language: String,
    pub stars: CountBadge,
    pub forks: CountBadge,
}

impl RepoCard {
    pub fn from_repo(repo: &SearchRepo, show_counts: bool) -> Self {
        Self {
            full_name: repo.full_name.clone(),
            url: repo.html_url.clone(),
            description: display_description(repo.description.as_deref()),
            language: repo
                .language
                .clone()
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            stars: CountBadge::new(repo.stargazers_count, !show_counts),
            forks: CountBadge::new(repo.forks_count, !show_counts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountBadge {
    pub count: u64,
    pub label: String,
    pub hidden: bool,
}

impl CountBadge {
    fn new(count: u64, hidden: bool) -> Self {
        Self {
            count,
            label: format_count(count),
            hidden,
        }
    }
}

pub fn display_description(description: Option<&str>) -> String {
    match description {
        None => NO_DESCRIPTION.to_string(),
        Some(text) => truncate_description(text),
    }
}

pub fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Group digits in threes with `,`, e.g. `1234567` -> `1,234,567`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
