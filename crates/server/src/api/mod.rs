mod museums;
mod routing;
mod search;

pub use museums::*;
pub use routing::*;
pub use search::*;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use museo::{catalog, planner};
use serde::Serialize;
use tracing::{error, warn};

/// A failed request, rendered as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: &self.message,
            }),
        )
            .into_response()
    }
}

impl From<planner::Error> for ApiError {
    fn from(err: planner::Error) -> Self {
        warn!("Rejected route request: {err}");
        Self::bad_request(err.to_string())
    }
}

impl From<catalog::Error> for ApiError {
    fn from(err: catalog::Error) -> Self {
        match err {
            catalog::Error::UnknownMuseum(_) | catalog::Error::Planner(_) => {
                warn!("Rejected route request: {err}");
                Self::bad_request(err.to_string())
            }
            err => {
                error!("Catalog failure: {err}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal server error".into(),
                }
            }
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::extract::{Query, State};
    use museo::{
        catalog::{Catalog, Museum},
        shared::geo::Coordinate,
    };
    use std::{collections::HashMap, sync::Arc};

    pub(crate) fn state() -> State<Arc<AppState>> {
        let catalog = Catalog::with_museums(vec![
            Museum::new("tate", "Tate Modern", Coordinate::from((51.5076, -0.0994))),
            Museum::new("louvre", "Musée du Louvre", Coordinate::from((48.8606, 2.3376))),
            Museum::new("british", "British Museum", Coordinate::from((51.5194, -0.1270))),
            Museum::new("orsay", "Musée d'Orsay", Coordinate::from((48.8600, 2.3266))),
            Museum::new("pompidou", "Centre Pompidou", Coordinate::from((48.8607, 2.3522))),
        ]);
        State(Arc::new(AppState::new(catalog)))
    }

    pub(crate) fn query(pairs: &[(&str, &str)]) -> Query<HashMap<String, String>> {
        Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub(crate) async fn body(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Runs a handler result through the same rendering axum applies.
    pub(crate) async fn render(result: Result<Response, ApiError>) -> (StatusCode, serde_json::Value) {
        body(result.into_response()).await
    }

    pub(crate) fn ids(value: &serde_json::Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|museum| museum["id"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn error_renders_json_body() {
        let (status, value) = body(ApiError::bad_request("Invalid radius").into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value, serde_json::json!({ "error": "Invalid radius" }));
    }

    #[tokio::test]
    async fn catalog_failures_hide_details() {
        let err = ApiError::from(catalog::Error::MissingColumn("name"));
        let (status, value) = body(err.into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value["error"], "Internal server error");

        let err = ApiError::from(catalog::Error::UnknownMuseum("prado".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
