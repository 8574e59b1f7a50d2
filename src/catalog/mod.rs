use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, Read},
    path::Path,
    sync::Arc,
};

mod models;
pub use models::*;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    planner::{self, Route, Sequencer, Waypoint},
    shared::{
        self,
        geo::{BoundingBox, Coordinate, Distance, GRID_CELL_SIZE, LATITUDE_DISTANCE},
        time::Timestamp,
    },
};

type IdToIndex = HashMap<Arc<str>, usize>;
type CellToIndexes = HashMap<(i32, i32), Box<[usize]>>;

/// Past this many grid cells a radius query scans every museum instead.
const MAX_GRID_REACH: i32 = 256;

const REQUIRED_COLUMNS: [&str; 4] = ["id", "name", "latitude", "longitude"];

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Museum export is missing column {0}")]
    MissingColumn(&'static str),
    #[error("Museum id {0} does not match any entry")]
    UnknownMuseum(String),
    #[error(transparent)]
    Planner(#[from] planner::Error),
}

/// In-memory, indexed set of museums. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub museums: Arc<[Museum]>,

    museum_lookup: Arc<IdToIndex>,
    grid_lookup: Arc<CellToIndexes>,
}

impl Catalog {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads a museum export from disk, see [`Catalog::from_csv`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, self::Error> {
        let file = File::open(path)?;
        Self::from_csv(file)
    }

    /// Reads rows of `id,name,latitude,longitude[,city,country]`.
    /// Rows that fail to parse, have invalid coordinates or repeat an id are skipped.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, self::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        if let Some(column) = REQUIRED_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|header| header == *column))
        {
            return Err(Error::MissingColumn(column));
        }

        let mut museums: Vec<Museum> = Vec::new();
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut skipped = 0;
        for (line, row) in reader.deserialize::<CsvMuseum>().enumerate() {
            let museum: Museum = match row {
                Ok(row) => row.into(),
                Err(err) => {
                    warn!("Skipping museum row {}: {err}", line + 1);
                    skipped += 1;
                    continue;
                }
            };
            if !museum.coordinate.is_valid() {
                warn!(
                    "Skipping museum {} with coordinate {}",
                    museum.id, museum.coordinate
                );
                skipped += 1;
                continue;
            }
            if !seen.insert(museum.id.clone()) {
                warn!("Skipping duplicate museum id {}", museum.id);
                skipped += 1;
                continue;
            }
            museums.push(museum);
        }
        info!("Loaded {} museums, skipped {skipped}", museums.len());
        Ok(Self::with_museums(museums))
    }

    /// Builds the lookups over an already parsed set of museums.
    /// Later duplicates of an id are unreachable through [`Catalog::museum_by_id`].
    pub fn with_museums(mut museums: Vec<Museum>) -> Self {
        let mut museum_lookup: IdToIndex = HashMap::with_capacity(museums.len());
        let mut grid_lookup: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        museums.iter_mut().enumerate().for_each(|(i, museum)| {
            museum.index = i as u32;
            museum_lookup.entry(museum.id.clone()).or_insert(i);
            grid_lookup
                .entry(museum.coordinate.to_grid())
                .or_default()
                .push(i);
        });
        let grid_lookup: CellToIndexes = grid_lookup
            .into_iter()
            .map(|(cell, indexes)| (cell, indexes.into()))
            .collect();

        Self {
            museums: museums.into(),
            museum_lookup: museum_lookup.into(),
            grid_lookup: grid_lookup.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.museums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.museums.is_empty()
    }

    /// Get a museum with the given id.
    /// If no museum is found with the given id None is returned.
    pub fn museum_by_id(&self, id: &str) -> Option<&Museum> {
        let index = self.museum_lookup.get(id)?;
        Some(&self.museums[*index])
    }

    /// Museums inside the viewport, in catalog order.
    pub fn museums_in_bounds(&self, bbox: &BoundingBox) -> Vec<&Museum> {
        self.museums
            .par_iter()
            .filter(|museum| bbox.contains(&museum.coordinate))
            .collect()
    }

    /// Museums within `distance` of the coordinate, closest first.
    pub fn museums_by_coordinate(
        &self,
        coordinate: &Coordinate,
        distance: Distance,
    ) -> Vec<&Museum> {
        if !coordinate.is_valid() {
            return Vec::new();
        }
        let mut hits: Vec<(&Museum, Distance)> = match grid_reach(coordinate, distance) {
            Some((reach_x, reach_y)) => {
                let (origin_x, origin_y) = coordinate.to_grid();
                let grid = &*self.grid_lookup;
                let museums = &*self.museums;
                (-reach_x..=reach_x)
                    .into_par_iter()
                    .flat_map_iter(move |x| {
                        (-reach_y..=reach_y)
                            .filter_map(move |y| grid.get(&(origin_x + x, origin_y + y)))
                            .flat_map(|indexes| indexes.iter())
                            .map(move |index| &museums[*index])
                    })
                    .filter_map(|museum| within(museum, coordinate, distance))
                    .collect()
            }
            None => self
                .museums
                .par_iter()
                .filter_map(|museum| within(museum, coordinate, distance))
                .collect(),
        };
        hits.par_sort_unstable_by(|(a, da), (b, db)| {
            da.partial_cmp(db)
                .unwrap_or(Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        hits.into_iter().map(|(museum, _)| museum).collect()
    }

    /// Does a fuzzy search on all the museums, comparing their name to the needle.
    pub fn search_museums_by_name(&self, needle: &str) -> Vec<&Museum> {
        shared::search(needle, &self.museums[..])
    }

    /// Resolves ids to waypoints, keeping the given order.
    pub fn waypoints<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Waypoint>, self::Error> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.museum_by_id(id)
                    .map(Waypoint::from)
                    .ok_or_else(|| Error::UnknownMuseum(id.to_string()))
            })
            .collect()
    }

    /// Sequences a trip over the given museums, starting at the first id.
    pub fn route<S: AsRef<str>>(
        &self,
        ids: &[S],
        start: Option<Timestamp>,
    ) -> Result<Route, self::Error> {
        let waypoints = self.waypoints(ids)?;
        let sequencer = Sequencer::new(&waypoints);
        let route = match start {
            Some(start) => sequencer.departure_at(start).solve()?,
            None => sequencer.solve()?,
        };
        Ok(route)
    }
}

fn within<'a>(
    museum: &'a Museum,
    coordinate: &Coordinate,
    distance: Distance,
) -> Option<(&'a Museum, Distance)> {
    let d = museum.coordinate.haversine_distance(coordinate);
    (d <= distance).then_some((museum, d))
}

/// Number of grid cells to walk in each direction, None when the window
/// would wrap the antimeridian, reach a pole or grow too large.
fn grid_reach(coordinate: &Coordinate, distance: Distance) -> Option<(i32, i32)> {
    let reach_y = (distance / GRID_CELL_SIZE).as_meters().ceil() as i32 + 1;
    let lat_span = distance.as_meters() / LATITUDE_DISTANCE.as_meters();
    let worst_lat = coordinate.latitude.abs() + lat_span;
    if worst_lat >= 89.0 {
        return None;
    }
    // A longitude cell shrinks with the cosine of the latitude
    let shrink = worst_lat.to_radians().cos();
    let reach_x = ((distance / GRID_CELL_SIZE).as_meters() / shrink).ceil() as i32 + 1;
    let lon_span = lat_span / shrink;
    if coordinate.longitude.abs() + lon_span >= 180.0 || reach_x.max(reach_y) > MAX_GRID_REACH {
        return None;
    }
    Some((reach_x, reach_y))
}
