use crate::error::LookupError;
use crate::service::{ProblemPayload, ProblemService};
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Serialize)]
struct ProblemResponse {
    problem: ProblemPayload,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

pub fn router(service: Arc<ProblemService>) -> Router {
    Router::new()
        .route("/problem", get(get_problem))
        .with_state(service)
}

pub async fn serve(addr: SocketAddr, service: Arc<ProblemService>) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("API server listening at http://{}", listener.local_addr()?);
    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn get_problem(State(service): State<Arc<ProblemService>>) -> Response {
    match service.random_problem().await {
        Ok(problem) => Json(ProblemResponse { problem }).into_response(),
        Err(err) => {
            let status = match err {
                LookupError::NotFound => StatusCode::NOT_FOUND,
                LookupError::ExtractionFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let body = MessageResponse {
                message: err.to_string(),
            };
            (status, Json(body)).into_response()
        }
    }
}
