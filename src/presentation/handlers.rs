// HTTP request handlers
use crate::domain::chart::{Chart, ChartPayload, ChartType, ParameterShape};
use crate::domain::defaults::ProjectContext;
use crate::domain::error::ChartError;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DefaultChartRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(flatten)]
    pub context: ProjectContext,
}

#[derive(Serialize)]
pub struct ChartTypeInfo {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub parameters: ParameterShape,
}

/// Unwrap a JSON body, turning extractor rejections into chart errors
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ChartError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ChartError::MalformedBody(rejection.body_text()))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Chart types and the parameter shape each one takes
pub async fn list_chart_types() -> Json<Vec<ChartTypeInfo>> {
    let types = ChartType::ALL
        .into_iter()
        .map(|chart_type| ChartTypeInfo {
            chart_type,
            parameters: chart_type.shape(),
        })
        .collect();
    Json(types)
}

pub async fn list_charts(
    Path(project): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Chart>>, ChartError> {
    let charts = state.chart_service.list_charts(&project).await?;
    Ok(Json(charts))
}

pub async fn get_chart(
    Path((project, id)): Path<(String, i64)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Chart>, ChartError> {
    let chart = state.chart_service.get_chart(&project, id).await?;
    Ok(Json(chart))
}

/// Add a chart from a full payload; the id in the payload is replaced
pub async fn add_chart(
    Path(project): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChartPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Chart>), ChartError> {
    let chart = Chart::try_from(json_body(payload)?)?;
    let chart = state.chart_service.add_chart(&project, chart).await?;
    Ok((StatusCode::CREATED, Json(chart)))
}

/// Add a chart with default parameters for the given slices, models and metrics
pub async fn create_default_chart(
    Path(project): Path<String>,
    State(state): State<Arc<AppState>>,
    request: Result<Json<DefaultChartRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Chart>), ChartError> {
    let request = json_body(request)?;
    let chart_type: ChartType = request.chart_type.parse()?;
    let chart = state
        .chart_service
        .create_default_chart(&project, &request.name, chart_type, &request.context)
        .await?;
    Ok((StatusCode::CREATED, Json(chart)))
}

pub async fn update_chart(
    Path((project, id)): Path<(String, i64)>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChartPayload>, JsonRejection>,
) -> Result<Json<Chart>, ChartError> {
    let mut payload = json_body(payload)?;
    payload.id = id;
    let chart = Chart::try_from(payload)?;
    let chart = state.chart_service.update_chart(&project, chart).await?;
    Ok(Json(chart))
}

pub async fn delete_chart(
    Path((project, id)): Path<(String, i64)>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ChartError> {
    state.chart_service.delete_chart(&project, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
