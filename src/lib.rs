pub mod catalog;
pub mod planner;
pub mod shared;

pub mod prelude {
    pub use crate::catalog::{Catalog, Museum};
    pub use crate::planner::{Route, RouteStop, STOP_INTERVAL, Sequencer, Waypoint, generate_route};
    pub use crate::shared::{
        BoundingBox, Coordinate, Distance, Duration, Identifiable, Timestamp, distance_km,
    };
}
