//! Project, lookup and chart endpoints under `/api/projects`.

use crate::error::ApiError;
use crate::routes::{parse_number, RecordKey};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use efdash_core::model::project::Project;
use efdash_core::repo::chart_repo::SqliteChartRepository;
use efdash_core::repo::funding_repo::SqliteFundingRepository;
use efdash_core::repo::project_repo::SqliteProjectRepository;
use efdash_core::{
    BreakdownService, ChartService, CountryChartsResponse, NormalizedCountryResponse,
    ProjectService, Section3ChartsResponse, Section3Filter, TopCad, TopDepartment, YearRange,
};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/countries", get(countries))
        .route("/projects/departments", get(departments))
        .route("/projects/cad-categories", get(cad_categories))
        .route("/projects/section3charts", get(section3_charts))
        .route("/projects/global-top-cad", get(global_top_cad))
        .route("/projects/global-top-departments", get(global_top_departments))
        .route("/projects/section2charts", get(section2_charts))
        .route(
            "/projects/section2charts-normalized/country/{country}",
            get(section2_normalized),
        )
        .route("/projects/country/{country}", get(projects_by_country))
        .route("/projects/year/{year}", get(projects_by_year))
        .route("/projects/{id}", get(get_project))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRangeQuery {
    pub year_range: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section3Query {
    pub year_range: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
}

/// Blank query values count as absent.
fn parse_year_range(value: Option<&str>) -> Result<Option<YearRange>, ApiError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<YearRange>()
            .map(Some)
            .map_err(|err| ApiError::BadRequest(err.to_string())),
    }
}

/// GET /api/projects
async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state
        .with_connection(|conn| {
            ProjectService::new(SqliteProjectRepository::new(conn)).list_projects()
        })
        .await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}, by numeric id or GUID
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let key = RecordKey::parse(&id)?;
    let project = state
        .with_connection(move |conn| {
            let service = ProjectService::new(SqliteProjectRepository::new(conn));
            match key {
                RecordKey::Id(id) => service.get_project(id),
                RecordKey::Guid(guid) => service.get_project_by_guid(guid),
            }
        })
        .await?;
    Ok(Json(project))
}

/// GET /api/projects/country/{country}
async fn projects_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state
        .with_connection(move |conn| {
            ProjectService::new(SqliteProjectRepository::new(conn))
                .list_projects_by_country(&country)
        })
        .await?;
    Ok(Json(projects))
}

/// GET /api/projects/year/{year}
async fn projects_by_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let year: i32 = parse_number(&year, "year")?;
    let projects = state
        .with_connection(move |conn| {
            ProjectService::new(SqliteProjectRepository::new(conn)).list_projects_by_year(year)
        })
        .await?;
    Ok(Json(projects))
}

/// GET /api/projects/countries
async fn countries(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let countries = state
        .countries(|conn| ChartService::new(SqliteChartRepository::new(conn)).distinct_countries())
        .await?;
    Ok(Json(countries.to_vec()))
}

/// GET /api/projects/departments
async fn departments(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let departments = state
        .with_connection(|conn| {
            ChartService::new(SqliteChartRepository::new(conn)).distinct_departments()
        })
        .await?;
    Ok(Json(departments))
}

/// GET /api/projects/cad-categories
async fn cad_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let categories = state
        .with_connection(|conn| {
            ChartService::new(SqliteChartRepository::new(conn)).distinct_cad_categories()
        })
        .await?;
    Ok(Json(categories))
}

/// GET /api/projects/section2charts
async fn section2_charts(
    State(state): State<AppState>,
) -> Result<Json<CountryChartsResponse>, ApiError> {
    let charts = state
        .with_connection(|conn| {
            BreakdownService::new(SqliteFundingRepository::new(conn)).all_countries()
        })
        .await?;
    Ok(Json(charts))
}

/// GET /api/projects/section2charts-normalized/country/{country}?yearRange=
async fn section2_normalized(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(query): Query<YearRangeQuery>,
) -> Result<Json<NormalizedCountryResponse>, ApiError> {
    let year_range = parse_year_range(query.year_range.as_deref())?;
    let response = state
        .with_connection(move |conn| {
            BreakdownService::new(SqliteFundingRepository::new(conn))
                .normalized_country(&country, year_range)
        })
        .await?;
    Ok(Json(response))
}

/// GET /api/projects/section3charts?yearRange=&category=&department=
async fn section3_charts(
    State(state): State<AppState>,
    Query(query): Query<Section3Query>,
) -> Result<Json<Section3ChartsResponse>, ApiError> {
    let department = query
        .department
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| parse_number::<i64>(value, "department"))
        .transpose()?;
    let filter = Section3Filter {
        year_range: parse_year_range(query.year_range.as_deref())?,
        category: query.category,
        department,
    };

    let charts = state
        .with_connection(move |conn| {
            ChartService::new(SqliteChartRepository::new(conn)).section3_charts(filter)
        })
        .await?;
    Ok(Json(charts))
}

/// GET /api/projects/global-top-cad
async fn global_top_cad(State(state): State<AppState>) -> Result<Json<Vec<TopCad>>, ApiError> {
    let ranking = state
        .with_connection(|conn| {
            ChartService::new(SqliteChartRepository::new(conn)).global_top_cad()
        })
        .await?;
    Ok(Json(ranking))
}

/// GET /api/projects/global-top-departments
async fn global_top_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopDepartment>>, ApiError> {
    let ranking = state
        .with_connection(|conn| {
            ChartService::new(SqliteChartRepository::new(conn)).global_top_departments()
        })
        .await?;
    Ok(Json(ranking))
}
