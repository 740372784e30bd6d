//! HTTP routes rooted at `/api`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::Request;
use axum::http::uri::PathAndQuery;
use axum::http::Uri;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use log::{info, warn};
use std::time::Instant;
use tower::util::MapRequest;
use uuid::Uuid;

pub mod cad;
pub mod health;
pub mod mip;
pub mod projects;

/// Application service: the router behind a path normalizer.
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Builds the full application service.
///
/// The `/api/{controller}` prefix is matched case-insensitively, so
/// `/api/Projects/countries` reaches the same handler as
/// `/api/projects/countries`. Path parameters keep their case.
pub fn app(state: AppState) -> App {
    let api = Router::new()
        .merge(projects::router())
        .merge(cad::router())
        .merge(mip::router());

    let router = Router::new()
        .nest("/api", api)
        .merge(health::router())
        .layer(middleware::from_fn(log_request))
        .with_state(state);

    // outside the router so the rewrite happens before route matching
    MapRequest::new(router, normalize_api_prefix as fn(Request) -> Request)
}

fn normalize_api_prefix(mut request: Request) -> Request {
    if let Some(uri) = lowercase_api_prefix(request.uri()) {
        *request.uri_mut() = uri;
    }
    request
}

/// Lowercases the `api` and controller segments; `None` when nothing changes.
fn lowercase_api_prefix(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    let mut segments = path.splitn(4, '/');
    let (Some(""), Some(api), Some(controller)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return None;
    };
    if !api.eq_ignore_ascii_case("api") {
        return None;
    }
    let has_upper = |segment: &str| segment.bytes().any(|byte| byte.is_ascii_uppercase());
    if !has_upper(api) && !has_upper(controller) {
        return None;
    }

    let mut rewritten = format!("/api/{}", controller.to_ascii_lowercase());
    if let Some(rest) = segments.next() {
        rewritten.push('/');
        rewritten.push_str(rest);
    }
    if let Some(query) = uri.query() {
        rewritten.push('?');
        rewritten.push_str(query);
    }

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(rewritten).ok()?);
    Uri::from_parts(parts).ok()
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();

    if status.is_server_error() || status.is_client_error() {
        warn!(
            "event=http_request module=server status=error \
             method={} path={} code={} duration_ms={}",
            method,
            path,
            status.as_u16(),
            elapsed_ms
        );
    } else {
        info!(
            "event=http_request module=server status=ok method={} path={} code={} duration_ms={}",
            method,
            path,
            status.as_u16(),
            elapsed_ms
        );
    }
    response
}

/// Path segment that addresses a record by numeric id or by GUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordKey {
    Id(i64),
    Guid(Uuid),
}

impl RecordKey {
    pub(crate) fn parse(value: &str) -> Result<Self, ApiError> {
        let value = value.trim();
        if let Ok(id) = value.parse::<i64>() {
            return Ok(Self::Id(id));
        }
        Uuid::parse_str(value)
            .map(Self::Guid)
            .map_err(|_| ApiError::BadRequest(format!("`{value}` is neither an id nor a GUID")))
    }
}

pub(crate) fn parse_number<T: std::str::FromStr>(value: &str, field: &str) -> Result<T, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("{field} must be a whole number, got `{value}`")))
}

#[cfg(test)]
mod tests {
    use super::{lowercase_api_prefix, parse_number, RecordKey};
    use axum::http::Uri;
    use uuid::Uuid;

    fn rewrite(uri: &str) -> Option<String> {
        lowercase_api_prefix(&uri.parse::<Uri>().unwrap()).map(|uri| uri.to_string())
    }

    #[test]
    fn api_prefix_is_lowercased_but_parameters_are_kept() {
        assert_eq!(
            rewrite("/api/Projects/section2charts-normalized/country/Kenya?yearRange=2021-2024")
                .as_deref(),
            Some("/api/projects/section2charts-normalized/country/Kenya?yearRange=2021-2024")
        );
        assert_eq!(rewrite("/API/Projects").as_deref(), Some("/api/projects"));
        assert_eq!(rewrite("/api/projects/country/Kenya"), None);
        assert_eq!(rewrite("/Health"), None);
        assert_eq!(rewrite("/apis/Projects"), None);
    }

    #[test]
    fn record_key_accepts_ids_and_guids() {
        assert_eq!(RecordKey::parse("42").unwrap(), RecordKey::Id(42));
        let guid = Uuid::new_v4();
        assert_eq!(
            RecordKey::parse(&guid.to_string()).unwrap(),
            RecordKey::Guid(guid)
        );
        assert!(RecordKey::parse("kenya").is_err());
    }

    #[test]
    fn parse_number_rejects_text() {
        assert_eq!(parse_number::<i32>(" 2024 ", "year").unwrap(), 2024);
        assert!(parse_number::<i32>("twenty", "year").is_err());
    }
}
