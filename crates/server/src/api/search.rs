use std::{collections::HashMap, sync::Arc};

use crate::{api::ApiError, dto::MuseumDto, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};

const DEFAULT_COUNT: usize = 5;

pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let query = params
        .get("q")
        .ok_or_else(|| ApiError::bad_request("Missing query parameter q"))?;
    let count: usize = match params.get("count") {
        Some(value) => value
            .parse()
            .map_err(|_| ApiError::bad_request(format!("Invalid count {value:?}")))?,
        None => DEFAULT_COUNT,
    };
    let result: Vec<_> = state
        .catalog
        .search_museums_by_name(query)
        .into_iter()
        .take(count)
        .map(MuseumDto::from)
        .collect();
    Ok(Json(result).into_response())
}
