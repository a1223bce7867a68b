use axum::{http::StatusCode, routing::post, Json, Router};
use log::info;
use std::net::SocketAddr;

use crate::data::{Instance, SolveRequest, SolveResponse, Strategy};
use crate::parser;
use crate::solver;

fn respond(instance: &Instance, strategies: &[Strategy]) -> SolveResponse {
    SolveResponse {
        equipment_count: instance.equipment_count,
        student_count: instance.student_count(),
        exercise_count: instance.exercise_count(),
        outcomes: solver::solve(instance, strategies),
    }
}

async fn solve_handler(
    Json(input): Json<SolveRequest>,
) -> Result<Json<SolveResponse>, (StatusCode, String)> {
    let strategies = input.strategies.unwrap_or_else(|| Strategy::ALL.to_vec());
    let instance = Instance::from_exercises(input.equipment_count, input.exercises)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let response = tokio::task::spawn_blocking(move || respond(&instance, &strategies))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(response))
}

async fn solve_text_handler(body: String) -> Result<Json<SolveResponse>, (StatusCode, String)> {
    let instance =
        parser::parse_instance(&body).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let response = tokio::task::spawn_blocking(move || respond(&instance, &Strategy::ALL))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(response))
}

pub fn router() -> Router {
    Router::new()
        .route("/v1/schedule/solve", post(solve_handler))
        .route("/v1/schedule/solve/text", post(solve_text_handler))
}

pub async fn run_server(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router()).await?;
    Ok(())
}
