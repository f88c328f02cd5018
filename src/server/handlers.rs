use crate::error::Result;
use crate::models::{AggregateRow, PrecipitationByDate, TemperatureObservation};
use crate::server::AppState;
use axum::extract::{Path, State};
use axum::Json;

pub async fn precipitation(State(state): State<AppState>) -> Result<Json<PrecipitationByDate>> {
    Ok(Json(state.service.list_recent_precipitation().await?))
}

pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.service.list_stations().await?))
}

pub async fn tobs(State(state): State<AppState>) -> Result<Json<Vec<TemperatureObservation>>> {
    Ok(Json(
        state.service.list_recent_temperature_observations().await?,
    ))
}

pub async fn start(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<AggregateRow>>> {
    Ok(Json(state.service.aggregate_from(&start).await?))
}

pub async fn start_end(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<AggregateRow>>> {
    Ok(Json(state.service.aggregate_range(&start, &end).await?))
}
