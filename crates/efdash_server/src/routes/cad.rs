//! CAD endpoints under `/api/cad-data`.

use crate::error::ApiError;
use crate::routes::{parse_number, RecordKey};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use efdash_core::model::cad::CadData;
use efdash_core::repo::cad_repo::SqliteCadRepository;
use efdash_core::CadService;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cad-data", get(list_cad_data))
        .route("/cad-data/category/{category}", get(cad_by_category))
        .route("/cad-data/department/{department}", get(cad_by_department))
        .route("/cad-data/{id}", get(get_cad_data))
}

async fn list_cad_data(State(state): State<AppState>) -> Result<Json<Vec<CadData>>, ApiError> {
    let rows = state
        .with_connection(|conn| CadService::new(SqliteCadRepository::new(conn)).list_cad_data())
        .await?;
    Ok(Json(rows))
}

async fn get_cad_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CadData>, ApiError> {
    let key = RecordKey::parse(&id)?;
    let row = state
        .with_connection(move |conn| {
            let service = CadService::new(SqliteCadRepository::new(conn));
            match key {
                RecordKey::Id(id) => service.get_cad_data(id),
                RecordKey::Guid(guid) => service.get_cad_data_by_guid(guid),
            }
        })
        .await?;
    Ok(Json(row))
}

async fn cad_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<CadData>>, ApiError> {
    let rows = state
        .with_connection(move |conn| {
            CadService::new(SqliteCadRepository::new(conn)).list_cad_data_by_category(&category)
        })
        .await?;
    Ok(Json(rows))
}

async fn cad_by_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Result<Json<Vec<CadData>>, ApiError> {
    let department: i64 = parse_number(&department, "department")?;
    let rows = state
        .with_connection(move |conn| {
            CadService::new(SqliteCadRepository::new(conn)).list_cad_data_by_department(department)
        })
        .await?;
    Ok(Json(rows))
}
