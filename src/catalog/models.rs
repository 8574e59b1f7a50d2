use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    planner::Waypoint,
    shared::{Identifiable, fuzzy, geo::Coordinate},
};

#[derive(Debug, Default, Clone, Serialize)]
pub struct Museum {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
    #[serde(skip)]
    pub normalized_name: Arc<str>,
    pub coordinate: Coordinate,
    pub city: Option<Arc<str>>,
    pub country: Option<Arc<str>>,
}

impl Museum {
    pub fn new(id: &str, name: &str, coordinate: Coordinate) -> Self {
        Self {
            index: 0,
            id: id.into(),
            name: name.into(),
            normalized_name: fuzzy::normalize(name).into(),
            coordinate,
            city: None,
            country: None,
        }
    }
}

impl Identifiable for Museum {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

impl From<&Museum> for Waypoint {
    fn from(value: &Museum) -> Self {
        Self {
            id: value.id.clone(),
            coordinate: value.coordinate,
            name: value.name.clone(),
        }
    }
}

/// One row of the museum export.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvMuseum {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl From<CsvMuseum> for Museum {
    fn from(value: CsvMuseum) -> Self {
        let mut museum = Museum::new(
            value.id.trim(),
            value.name.trim(),
            Coordinate::from((value.latitude, value.longitude)),
        );
        museum.city = non_empty(value.city);
        museum.country = non_empty(value.country);
        museum
    }
}

fn non_empty(value: Option<String>) -> Option<Arc<str>> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(Into::into)
}
