use museo::{
    planner::{Route, RouteStop, Waypoint},
    shared::time::Timestamp,
};
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

/// Either catalog ids or inline waypoints. Ids win when both are sent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequestDto {
    #[serde(default)]
    pub museums: Option<Vec<String>>,
    #[serde(default)]
    pub waypoints: Option<Vec<WaypointDto>>,
    #[serde(default)]
    pub start: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaypointDto {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_degrees")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_degrees")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Other(IgnoredAny),
}

/// Anything that is not a JSON number reads as NaN, null or absent as None.
fn lenient_degrees<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Degrees>::deserialize(deserializer)?.map(|degrees| match degrees {
            Degrees::Number(value) => value,
            Degrees::Other(_) => f64::NAN,
        }),
    )
}

impl From<WaypointDto> for Waypoint {
    /// A missing or malformed component becomes NaN so the sequencer rejects it.
    fn from(value: WaypointDto) -> Self {
        let name = value.name.unwrap_or_else(|| value.id.clone());
        Waypoint::new(
            value.id,
            value.latitude.unwrap_or(f64::NAN),
            value.longitude.unwrap_or(f64::NAN),
            name,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStopDto {
    pub waypoint_id: String,
    pub order: usize,
    pub estimated_arrival: Timestamp,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_from_previous_km: f64,
}

impl RouteStopDto {
    pub fn from(stop: &RouteStop) -> Self {
        Self {
            waypoint_id: stop.waypoint.id.to_string(),
            order: stop.order,
            estimated_arrival: stop.estimated_arrival,
            name: stop.waypoint.name.to_string(),
            latitude: stop.waypoint.coordinate.latitude,
            longitude: stop.waypoint.coordinate.longitude,
            distance_from_previous_km: stop.distance_from_previous.as_kilometers(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub stops: Vec<RouteStopDto>,
    pub total_distance_km: f64,
}

impl RouteDto {
    pub fn from(route: &Route) -> Self {
        Self {
            stops: route.iter().map(RouteStopDto::from).collect(),
            total_distance_km: route.total_distance().as_kilometers(),
        }
    }
}
