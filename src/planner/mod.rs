pub mod route;

pub use route::*;

use crate::shared::{
    geo::{Coordinate, Distance},
    time::{Duration, Timestamp},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Gap between two consecutive estimated arrivals.
/// Not derived from travel distance, it only gives the UI a default schedule.
pub const STOP_INTERVAL: Duration = Duration::from_hours(2);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("At least one waypoint is required to build a route")]
    InvalidInput,
    #[error("Waypoint {id} has an invalid coordinate ({coordinate})")]
    InvalidCoordinate {
        id: Arc<str>,
        coordinate: Coordinate,
    },
}

/// Placeholder arrival at the stop with the given order.
pub(crate) fn estimated_arrival(departure: Timestamp, order: usize) -> Timestamp {
    let offset = i64::from(STOP_INTERVAL.as_seconds()).saturating_mul(order as i64);
    departure.add_seconds(offset)
}

/// Orders waypoints with a greedy nearest-neighbour walk.
///
/// The walk always starts at the first waypoint. From the current waypoint
/// the closest unvisited one (haversine) is visited next; on equal distance
/// the one earliest in the input wins. This is a heuristic, not an exact
/// TSP solution, and the output is fully deterministic.
pub struct Sequencer<'a> {
    waypoints: &'a [Waypoint],
    departure: Option<Timestamp>,
}

impl<'a> Sequencer<'a> {
    pub fn new(waypoints: &'a [Waypoint]) -> Self {
        Self {
            waypoints,
            departure: None,
        }
    }

    /// Reference time of the first stop. Defaults to now when solving.
    pub fn departure_at(mut self, departure: Timestamp) -> Self {
        self.departure = Some(departure);
        self
    }

    pub fn solve(self) -> Result<Route, self::Error> {
        self.validate()?;
        let departure = self.departure.unwrap_or_else(Timestamp::now);

        let stops: Vec<RouteStop> = self
            .visiting_order()
            .into_iter()
            .enumerate()
            .map(|(i, (idx, distance))| RouteStop {
                waypoint: self.waypoints[idx].clone(),
                order: i,
                estimated_arrival: estimated_arrival(departure, i),
                distance_from_previous: distance,
            })
            .collect();

        let route = Route { stops };
        debug!(
            "Sequenced {} waypoints, {:.2} km total",
            route.len(),
            route.total_distance().as_kilometers()
        );
        Ok(route)
    }

    fn validate(&self) -> Result<(), self::Error> {
        if self.waypoints.is_empty() {
            return Err(Error::InvalidInput);
        }
        match self
            .waypoints
            .iter()
            .find(|waypoint| !waypoint.coordinate.is_valid())
        {
            Some(waypoint) => Err(Error::InvalidCoordinate {
                id: waypoint.id.clone(),
                coordinate: waypoint.coordinate,
            }),
            None => Ok(()),
        }
    }

    /// Input indexes in visiting order paired with the leg distance into them.
    fn visiting_order(&self) -> Vec<(usize, Distance)> {
        let n = self.waypoints.len();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);

        let mut current = 0;
        visited[current] = true;
        order.push((current, Distance::default()));

        while order.len() < n {
            let from = &self.waypoints[current].coordinate;
            let mut best: Option<(usize, Distance)> = None;
            for (idx, waypoint) in self.waypoints.iter().enumerate() {
                if visited[idx] {
                    continue;
                }
                let distance = from.haversine_distance(&waypoint.coordinate);
                // Strictly smaller only, so the earliest candidate keeps a tie
                match best {
                    Some((_, best_distance)) if distance >= best_distance => {}
                    _ => best = Some((idx, distance)),
                }
            }

            let Some((next, distance)) = best else {
                break;
            };
            visited[next] = true;
            order.push((next, distance));
            current = next;
        }
        order
    }
}

/// Builds a route over `waypoints` starting at the first one.
/// `start` is the estimated arrival at the first stop, now if omitted.
pub fn generate_route(waypoints: &[Waypoint], start: Option<Timestamp>) -> Result<Route, Error> {
    let sequencer = Sequencer::new(waypoints);
    match start {
        Some(start) => sequencer.departure_at(start).solve(),
        None => sequencer.solve(),
    }
}

#[test]
fn single_waypoint_route() {
    let waypoints = [Waypoint::new("a", 10.0, 10.0, "A")];
    let route = generate_route(&waypoints, Some(Timestamp::from_unix(0))).unwrap();
    assert_eq!(route.len(), 1);
    assert_eq!(route.stops[0].order, 0);
    assert_eq!(route.total_distance(), Distance::default());
}

#[test]
fn arrival_offsets_do_not_wrap() {
    let start = Timestamp::from_unix(1_714_554_000);
    let far = estimated_arrival(start, 600_000);
    assert_eq!(far - start, 600_000 * 7200);

    let late = Timestamp::from_unix(i64::MAX - 1);
    assert_eq!(estimated_arrival(late, 3).as_unix(), i64::MAX);
}
