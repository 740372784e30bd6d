//! MIP endpoints under `/api/mip-data`.

use crate::error::ApiError;
use crate::routes::RecordKey;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use efdash_core::model::mip::MipData;
use efdash_core::repo::mip_repo::SqliteMipRepository;
use efdash_core::MipService;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mip-data", get(list_mip_data))
        .route("/mip-data/country/{country}", get(mip_by_country))
        .route("/mip-data/{id}", get(get_mip_data))
}

async fn list_mip_data(State(state): State<AppState>) -> Result<Json<Vec<MipData>>, ApiError> {
    let rows = state
        .with_connection(|conn| MipService::new(SqliteMipRepository::new(conn)).list_mip_data())
        .await?;
    Ok(Json(rows))
}

async fn get_mip_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MipData>, ApiError> {
    let key = RecordKey::parse(&id)?;
    let row = state
        .with_connection(move |conn| {
            let service = MipService::new(SqliteMipRepository::new(conn));
            match key {
                RecordKey::Id(id) => service.get_mip_data(id),
                RecordKey::Guid(guid) => service.get_mip_data_by_guid(guid),
            }
        })
        .await?;
    Ok(Json(row))
}

async fn mip_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Vec<MipData>>, ApiError> {
    let rows = state
        .with_connection(move |conn| {
            MipService::new(SqliteMipRepository::new(conn)).list_mip_data_by_country(&country)
        })
        .await?;
    Ok(Json(rows))
}
