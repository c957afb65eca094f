//! HTTP routes: the dashboard page, the JSON API, and a health check.

use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use energydash_core::constants::TABLE_PAGE_SIZE;
use energydash_core::dataset::TablePage;
use energydash_core::handlers::{
    calculate_anova, calculate_generalized_anova, update_graph, AnovaUpdate, GraphUpdate,
};

use crate::html::{render_dashboard, DashboardView};
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health))
        .route("/api/dataset", get(api_dataset))
        .route("/api/input-sizes", get(api_input_sizes))
        .route("/api/graph", get(api_graph))
        .route("/api/anova", get(api_anova))
        .route("/api/anova/general", get(api_general_anova))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    tracing::debug!(%method, %uri, status = response.status().as_u16(), "request");
    response
}

/// Query string of the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    /// Current zero-based table page.
    pub page: Option<usize>,
    /// Page requested by a pager button; wins over `page`.
    pub goto: Option<usize>,
    pub input_size: Option<String>,
    pub anova_input_size: Option<String>,
    pub group1: Option<String>,
    pub group2: Option<String>,
    pub group3: Option<String>,
    pub n_clicks: Option<u64>,
    /// Present when the calculate button submitted the form.
    pub calculate: Option<String>,
}

impl DashboardParams {
    fn table_page(&self) -> usize {
        self.goto.or(self.page).unwrap_or(0)
    }

    fn clicks(&self) -> u64 {
        self.n_clicks.unwrap_or(0) + u64::from(self.calculate.is_some())
    }
}

async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Html<String> {
    let dataset = &state.dataset;
    let input_size = state.input_size(params.input_size.as_deref()).to_string();
    let anova_input_size = state.input_size(params.anova_input_size.as_deref()).to_string();
    let n_clicks = params.clicks();
    let fields = [
        params.group1.as_deref(),
        params.group2.as_deref(),
        params.group3.as_deref(),
    ];

    let mut input_sizes: Vec<String> = dataset.input_sizes().into_iter().map(String::from).collect();
    if input_sizes.is_empty() {
        input_sizes.push(state.default_input_size.clone());
    }

    let view = DashboardView {
        table: dataset.page(params.table_page(), TABLE_PAGE_SIZE),
        graph: update_graph(dataset, &input_size),
        anova: calculate_anova(dataset, &anova_input_size),
        general: calculate_generalized_anova(n_clicks, &fields),
        fields: fields.map(|f| f.unwrap_or_default().to_string()),
        input_sizes,
        input_size,
        anova_input_size,
        n_clicks,
    };
    Html(render_dashboard(&view))
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

async fn api_dataset(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<TablePage> {
    Json(state.dataset.page(params.page.unwrap_or(0), TABLE_PAGE_SIZE))
}

#[derive(Debug, Serialize)]
pub struct InputSizes {
    pub input_sizes: Vec<String>,
    pub default: String,
}

async fn api_input_sizes(State(state): State<AppState>) -> Json<InputSizes> {
    Json(InputSizes {
        input_sizes: state.dataset.input_sizes().into_iter().map(String::from).collect(),
        default: state.default_input_size.clone(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SizeParams {
    pub input_size: Option<String>,
}

async fn api_graph(
    State(state): State<AppState>,
    Query(params): Query<SizeParams>,
) -> Json<GraphUpdate> {
    let input_size = state.input_size(params.input_size.as_deref());
    Json(update_graph(&state.dataset, input_size))
}

async fn api_anova(
    State(state): State<AppState>,
    Query(params): Query<SizeParams>,
) -> Json<AnovaUpdate> {
    let input_size = state.input_size(params.input_size.as_deref());
    Json(calculate_anova(&state.dataset, input_size))
}

#[derive(Debug, Deserialize)]
pub struct GeneralParams {
    pub n_clicks: Option<u64>,
    pub group1: Option<String>,
    pub group2: Option<String>,
    pub group3: Option<String>,
}

async fn api_general_anova(Query(params): Query<GeneralParams>) -> Json<AnovaUpdate> {
    let fields = [
        params.group1.as_deref(),
        params.group2.as_deref(),
        params.group3.as_deref(),
    ];
    Json(calculate_generalized_anova(params.n_clicks.unwrap_or(0), &fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goto_wins_over_page() {
        let params = DashboardParams {
            page: Some(3),
            goto: Some(4),
            ..DashboardParams::default()
        };
        assert_eq!(params.table_page(), 4);
        assert_eq!(DashboardParams::default().table_page(), 0);
    }

    #[test]
    fn calculate_adds_a_click() {
        let params = DashboardParams {
            n_clicks: Some(2),
            calculate: Some("1".to_string()),
            ..DashboardParams::default()
        };
        assert_eq!(params.clicks(), 3);
        assert_eq!(DashboardParams::default().clicks(), 0);
    }
}
