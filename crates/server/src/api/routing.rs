use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use museo::{
    catalog::Catalog,
    planner::{self, Route, Waypoint},
};
use tracing::{info, warn};

use crate::{
    api::ApiError,
    dto::{RouteDto, RouteRequestDto},
    state::AppState,
};

pub async fn routing(
    State(state): State<Arc<AppState>>,
    request: Result<Json<RouteRequestDto>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = request.map_err(|rejection| {
        warn!("Rejected route request body: {rejection}");
        ApiError::bad_request(rejection.body_text())
    })?;
    let route = plan(&state.catalog, request)?;
    info!(
        "Planned route with {} stops over {:.1} km",
        route.len(),
        route.total_distance().as_kilometers()
    );
    Ok(Json(RouteDto::from(&route)).into_response())
}

/// Resolves the request's museums (or inline waypoints) and sequences them.
pub(crate) fn plan(catalog: &Catalog, request: RouteRequestDto) -> Result<Route, ApiError> {
    if let Some(ids) = request.museums {
        return Ok(catalog.route(&ids, request.start)?);
    }
    let waypoints: Vec<Waypoint> = request
        .waypoints
        .unwrap_or_default()
        .into_iter()
        .map(Waypoint::from)
        .collect();
    Ok(planner::generate_route(&waypoints, request.start)?)
}
