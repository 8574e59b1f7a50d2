use std::sync::Arc;

use serde::Serialize;

use crate::shared::{
    geo::{Coordinate, Distance},
    time::Timestamp,
};

/// A point of interest handed to the sequencer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub id: Arc<str>,
    pub coordinate: Coordinate,
    pub name: Arc<str>,
}

impl Waypoint {
    pub fn new(
        id: impl Into<Arc<str>>,
        latitude: f64,
        longitude: f64,
        name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id: id.into(),
            coordinate: Coordinate {
                latitude,
                longitude,
            },
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub waypoint: Waypoint,
    /// Position in the route, starting at 0.
    pub order: usize,
    /// Placeholder schedule, see [`crate::planner::STOP_INTERVAL`].
    pub estimated_arrival: Timestamp,
    /// Zero for the first stop.
    pub distance_from_previous: Distance,
}

/// An ordered permutation of the input waypoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Route {
    pub stops: Vec<RouteStop>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteStop> {
        self.stops.iter()
    }

    pub fn first(&self) -> Option<&RouteStop> {
        self.stops.first()
    }

    pub fn waypoint_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|stop| &*stop.waypoint.id).collect()
    }

    /// Length of the open path through every stop.
    pub fn total_distance(&self) -> Distance {
        self.stops
            .iter()
            .map(|stop| stop.distance_from_previous)
            .sum()
    }
}

impl IntoIterator for Route {
    type Item = RouteStop;
    type IntoIter = std::vec::IntoIter<RouteStop>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a RouteStop;
    type IntoIter = std::slice::Iter<'a, RouteStop>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}
