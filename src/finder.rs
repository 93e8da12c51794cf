//! The search/render controller.
//!
//! Both actions follow the same path: build the request, enter the loading
//! state, await the backend, then apply the outcome if no newer request has
//! been issued in the meantime.

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::github::SearchBackend;
use crate::query::{random_created_after, SearchRequest, SortKey};
use crate::view::{RenderedPage, ViewState};

/// What happened to a single user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Rendered(usize),
    Empty,
    Failed,
    /// A newer request was issued before this one completed; its response was dropped.
    Superseded,
}

struct Screen {
    state: ViewState,
    page: RenderedPage,
}

impl Screen {
    fn refresh(&mut self) {
        self.page = self.state.render();
    }
}

pub struct Finder<B> {
    backend: B,
    screen: Mutex<Screen>,
}

impl<B: SearchBackend> Finder<B> {
    pub fn new(backend: B, show_counts: bool) -> Self {
        let state = ViewState::new(show_counts);
        let page = state.render();
        Self {
            backend,
            screen: Mutex::new(Screen { state, page }),
        }
    }

    /// Explicit search by language and sort key.
    pub async fn search(&self, language: Option<&str>, sort: SortKey) -> RequestOutcome {
        self.run(SearchRequest::search(language, sort)).await
    }

    /// Randomized discovery using today's UTC date.
    pub async fn discover(&self, language: Option<&str>) -> RequestOutcome {
        let today = Utc::now().date_naive();
        let created_after = random_created_after(today, &mut rand::thread_rng());
        self.discover_since(language, created_after).await
    }

    pub async fn discover_since(
        &self,
        language: Option<&str>,
        created_after: NaiveDate,
    ) -> RequestOutcome {
        self.run(SearchRequest::discover(language, created_after)).await
    }

    /// Flip badge visibility on what is already rendered. No request is issued.
    pub async fn set_show_counts(&self, visible: bool) {
        let mut screen = self.screen.lock().await;
        screen.state.show_counts = visible;
        screen.page.set_counts_visible(visible);
    }

    pub async fn page(&self) -> RenderedPage {
        self.screen.lock().await.page.clone()
    }

    pub async fn state(&self) -> ViewState {
        self.screen.lock().await.state.clone()
    }

    async fn run(&self, request: SearchRequest) -> RequestOutcome {
        let sequence = {
            let mut screen = self.screen.lock().await;
            let sequence = screen.state.begin_request();
            screen.refresh();
            sequence
        };

        debug!(
            sequence,
            query = %request.query_string(),
            sort = %request.sort(),
            "Issuing search request"
        );

        let result = self.backend.search_repositories(&request).await;

        let mut screen = self.screen.lock().await;
        if !screen.state.is_current(sequence) {
            debug!(
                sequence,
                latest = screen.state.latest_request(),
                "Discarding response from superseded request"
            );
            return RequestOutcome::Superseded;
        }

        let outcome = match result {
            Ok(response) if !response.items.is_empty() => {
                let count = response.items.len();
                info!(sequence, count, total = response.total_count, "Rendering repositories");
                screen.state.show_results(response.items);
                RequestOutcome::Rendered(count)
            }
            Ok(_) => {
                warn!(sequence, query = %request.query_string(), "Search returned no repositories");
                screen.state.show_results(Vec::new());
                RequestOutcome::Empty
            }
            Err(e) => {
                error!(sequence, query = %request.query_string(), "Search request failed: {}", e);
                screen.state.show_failure();
                RequestOutcome::Failed
            }
        };
        screen.refresh();
        outcome
    }
}
