use crate::error::Result;
use crate::finder::Finder;
use crate::github::SearchBackend;
use crate::output::{render_html, Controls};
use crate::query::SortKey;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Page server state
#[derive(Clone)]
pub struct AppState<B> {
    pub backend: B,
}

/// Control values submitted by the page form
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub language: Option<String>,
    pub sort: Option<SortKey>,
    pub show_counts: Option<bool>,
    /// Set by the form; an unchecked checkbox is simply absent.
    pub submitted: Option<bool>,
}

impl PageParams {
    fn controls(&self) -> Controls {
        let show_counts = match (self.show_counts, self.submitted.unwrap_or(false)) {
            (Some(show), _) => show,
            (None, submitted) => !submitted,
        };
        Controls {
            language: self.language.clone().filter(|l| !l.trim().is_empty()),
            sort: self.sort.unwrap_or_default(),
            show_counts,
        }
    }
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
    pub version: String,
}

/// Create the page router
pub fn create_router<B>(backend: B) -> Router
where
    B: SearchBackend + Clone + 'static,
{
    Router::new()
        .route("/", get(random_page::<B>))
        .route("/search", get(search_page::<B>))
        .route("/random", get(random_page::<B>))
        .route("/livez", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { backend })
}

/// Start the page server
pub async fn start_server<B>(backend: B, port: u16) -> Result<()>
where
    B: SearchBackend + Clone + 'static,
{
    let app = create_router(backend);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Repo finder listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn search_page<B>(
    State(state): State<AppState<B>>,
    Query(params): Query<PageParams>,
) -> Response
where
    B: SearchBackend + Clone + 'static,
{
    let controls = params.controls();
    let finder = Finder::new(state.backend.clone(), controls.show_counts);
    finder
        .search(controls.language.as_deref(), controls.sort)
        .await;
    respond(&finder, &controls).await
}

async fn random_page<B>(
    State(state): State<AppState<B>>,
    Query(params): Query<PageParams>,
) -> Response
where
    B: SearchBackend + Clone + 'static,
{
    let controls = params.controls();
    let finder = Finder::new(state.backend.clone(), controls.show_counts);
    finder.discover(controls.language.as_deref()).await;
    respond(&finder, &controls).await
}

async fn respond<B: SearchBackend>(finder: &Finder<B>, controls: &Controls) -> Response {
    let page = finder.page().await;
    match render_html(&page, controls) {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// Liveness probe - just checks if the process is alive
async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
