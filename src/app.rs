use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::controller::ChartUpdate;
use crate::dashboard::{Dashboard, PageLayout};
use crate::error::DashboardError;

pub type AppState = Arc<Dashboard>;

#[derive(Deserialize)]
struct SelectionUpdate {
    #[serde(default)]
    values: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::UnknownControl(_) => StatusCode::NOT_FOUND,
            DashboardError::UnknownOption { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }
        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Routes over an already built dashboard
pub fn router(dashboard: AppState) -> Router {
    Router::new()
        .route("/", get(serve_landing))
        .route("/about", get(serve_about))
        .route("/dashboard", get(serve_dashboard))
        .route("/api/layout", get(get_layout))
        .route("/api/initial", get(get_initial))
        .route("/api/control/:control_id", post(update_control))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(dashboard)
}

pub async fn run(config: Config, dashboard: Dashboard) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(Arc::new(dashboard));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_landing() -> Html<&'static str> {
    Html(include_str!("./static/index.html"))
}

async fn serve_about() -> Html<&'static str> {
    Html(include_str!("./static/about.html"))
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

async fn get_layout(State(dashboard): State<AppState>) -> Json<PageLayout> {
    Json(dashboard.page())
}

async fn get_initial(State(dashboard): State<AppState>) -> Result<Json<Vec<ChartUpdate>>, DashboardError> {
    Ok(Json(dashboard.initial_figures()?))
}

async fn update_control(
    Path(control_id): Path<String>,
    State(dashboard): State<AppState>,
    Json(payload): Json<SelectionUpdate>,
) -> Result<Json<ChartUpdate>, DashboardError> {
    Ok(Json(dashboard.on_filter_change(&control_id, &payload.values)?))
}
