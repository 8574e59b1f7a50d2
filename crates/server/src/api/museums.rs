use std::{collections::HashMap, sync::Arc};

use crate::{api::ApiError, dto::MuseumDto, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use museo::shared::geo::{BoundingBox, Coordinate, Distance};

const DEFAULT_RADIUS: Distance = Distance::from_kilometers(5.0);
const MAX_RADIUS: Distance = Distance::from_kilometers(500.0);

/// Museums inside the map viewport, `?bbox=south,west,north,east`.
pub async fn in_bounds(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let bbox: BoundingBox = params
        .get("bbox")
        .ok_or_else(|| ApiError::bad_request("Missing query parameter bbox"))?
        .parse()
        .map_err(|err| ApiError::bad_request(format!("Invalid bbox: {err}")))?;
    let result: Vec<_> = state
        .catalog
        .museums_in_bounds(&bbox)
        .into_iter()
        .map(MuseumDto::from)
        .collect();
    Ok(Json(result).into_response())
}

/// Museums around `?at=lat,lon`, `radius` in meters, closest first.
pub async fn near(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let at: Coordinate = params
        .get("at")
        .ok_or_else(|| ApiError::bad_request("Missing query parameter at"))?
        .parse()
        .map_err(|err| ApiError::bad_request(format!("Invalid coordinate: {err}")))?;
    if !at.is_valid() {
        return Err(ApiError::bad_request(format!("Coordinate {at} is out of range")));
    }
    let radius = match params.get("radius") {
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|meters| meters.is_finite() && *meters >= 0.0)
            .map(Distance::from_meters)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid radius {value:?}")))?,
        None => DEFAULT_RADIUS,
    };
    if radius > MAX_RADIUS {
        return Err(ApiError::bad_request("Radius is larger than 500 km"));
    }
    let result: Vec<_> = state
        .catalog
        .museums_by_coordinate(&at, radius)
        .into_iter()
        .map(MuseumDto::from)
        .collect();
    Ok(Json(result).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{ids, query, render, state};
    use axum::http::StatusCode;

    const LOUVRE: &str = "48.8606,2.3376";

    #[tokio::test]
    async fn viewport_lists_museums_in_catalog_order() {
        let (status, value) =
            render(in_bounds(query(&[("bbox", "48.8,2.2,48.9,2.4")]), state()).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&value), vec!["louvre", "orsay", "pompidou"]);
    }

    #[tokio::test]
    async fn bad_viewport_is_bad_request() {
        for bbox in ["48.8,2.2,48.9", "a,b,c,d", "48.8,2.2,95,2.4"] {
            let (status, value) = render(in_bounds(query(&[("bbox", bbox)]), state()).await).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{bbox}");
            assert!(value["error"].as_str().unwrap().starts_with("Invalid bbox"));
        }
        let (status, _) = render(in_bounds(query(&[]), state()).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn near_defaults_to_five_kilometers() {
        let (status, value) = render(near(query(&[("at", LOUVRE)]), state()).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&value), vec!["louvre", "orsay", "pompidou"]);

        let (_, value) = render(near(query(&[("at", LOUVRE), ("radius", "100")]), state()).await).await;
        assert_eq!(ids(&value), vec!["louvre"]);
    }

    #[tokio::test]
    async fn near_caps_the_radius() {
        let (status, value) =
            render(near(query(&[("at", LOUVRE), ("radius", "500000")]), state()).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&value).len(), 5);

        let (status, value) =
            render(near(query(&[("at", LOUVRE), ("radius", "500001")]), state()).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"], "Radius is larger than 500 km");
    }

    #[tokio::test]
    async fn near_rejects_bad_input() {
        for radius in ["-1", "NaN", "inf", "wide"] {
            let (status, _) =
                render(near(query(&[("at", LOUVRE), ("radius", radius)]), state()).await).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{radius}");
        }
        for at in ["95,0", "0,181", "paris", "48.8"] {
            let (status, value) = render(near(query(&[("at", at)]), state()).await).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{at}");
            assert!(value["error"].is_string());
        }
        let (status, _) = render(near(query(&[]), state()).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
