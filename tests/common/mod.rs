#![allow(dead_code)]

use async_trait::async_trait;
use github_repo_finder::error::{FinderError, Result};
use github_repo_finder::github::SearchBackend;
use github_repo_finder::query::SearchRequest;
use github_repo_finder::types::{SearchRepo, SearchResponse};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn repo(n: usize) -> SearchRepo {
    SearchRepo {
        full_name: format!("owner{}/repo{}", n, n),
        html_url: format!("https://github.com/owner{}/repo{}", n, n),
        description: Some(format!("Repository number {}", n)),
        language: Some("Rust".to_string()),
        stargazers_count: 1000 + n as u64,
        forks_count: 10 + n as u64,
    }
}

pub fn repos(count: usize) -> Vec<SearchRepo> {
    (1..=count).map(repo).collect()
}

pub fn response(items: Vec<SearchRepo>) -> SearchResponse {
    SearchResponse {
        total_count: items.len() as u64,
        incomplete_results: false,
        items,
    }
}

/// JSON body shaped like the real search endpoint's response.
pub fn search_body(count: usize) -> Value {
    let items: Vec<Value> = (1..=count)
        .map(|n| {
            json!({
                "id": n,
                "name": format!("repo{}", n),
                "full_name": format!("owner{}/repo{}", n, n),
                "html_url": format!("https://github.com/owner{}/repo{}", n, n),
                "description": if n % 2 == 0 { Value::Null } else { json!("A repository") },
                "language": if n % 3 == 0 { Value::Null } else { json!("Rust") },
                "stargazers_count": 12345 * n,
                "forks_count": 67 * n,
                "private": false
            })
        })
        .collect();

    json!({
        "total_count": count,
        "incomplete_results": false,
        "items": items
    })
}

pub enum Reply {
    Items(Vec<SearchRepo>),
    Fail,
}

/// Backend returning a fixed reply and recording every request it sees.
#[derive(Clone)]
pub struct StaticBackend {
    reply: Arc<Reply>,
    pub requests: Arc<Mutex<Vec<SearchRequest>>>,
}

impl StaticBackend {
    pub fn items(items: Vec<SearchRepo>) -> Self {
        Self::with_reply(Reply::Items(items))
    }

    pub fn failing() -> Self {
        Self::with_reply(Reply::Fail)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply: Arc::new(reply),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> SearchRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

#[async_trait]
impl SearchBackend for StaticBackend {
    async fn search_repositories(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.reply.as_ref() {
            Reply::Items(items) => Ok(response(items.clone())),
            Reply::Fail => Err(FinderError::ApiError("simulated network error".to_string())),
        }
    }
}

/// Backend that holds any query containing `language:Slow` until released.
#[derive(Clone, Default)]
pub struct GatedBackend {
    pub release: Arc<Notify>,
    started: Arc<AtomicUsize>,
}

impl GatedBackend {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchBackend for GatedBackend {
    async fn search_repositories(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.started.fetch_add(1, Ordering::SeqCst);
        if request.query_string().contains("language:Slow") {
            self.release.notified().await;
            Ok(response(repos(5)))
        } else {
            Ok(response(repos(2)))
        }
    }
}
