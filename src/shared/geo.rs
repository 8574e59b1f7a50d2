use std::{
    cmp,
    fmt::Display,
    iter::Sum,
    ops::{Add, Div, Mul, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Mean earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Side length of a cell in the catalog's spatial grid.
pub const GRID_CELL_SIZE: Distance = Distance::from_kilometers(5.0);
pub(crate) const LONGITUDE_DISTANCE: Distance = Distance::from_meters(111_320.0);
pub(crate) const LATITUDE_DISTANCE: Distance = Distance::from_meters(110_540.0);

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Distance {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Distance {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Div for Distance {
    type Output = Self;
    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|distance| distance.0).sum())
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

/// Averages the coordinates, used as the centroid of a group of museums.
impl Sum for Coordinate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut count: usize = 0;
        let mut lat: f64 = 0.0;
        let mut lon: f64 = 0.0;
        iter.for_each(|coordinate| {
            count += 1;
            lat += coordinate.latitude;
            lon += coordinate.longitude;
        });
        let count = count as f64;
        Self {
            latitude: lat / count,
            longitude: lon / count,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = ParseError;

    /// Parses `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_floats::<2>(s)?;
        Ok(Self::from((values[0], values[1])))
    }
}

impl Coordinate {
    /// Great-circle distance between two points.
    /// No range checks are made, see [`Coordinate::is_valid`].
    pub fn haversine_distance(&self, coord: &Self) -> Distance {
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::powi(f64::sin(dist_lon / 2.0), 2);
        // Rounding can push `a` a hair past 1 for antipodal points
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        Distance::from_kilometers(EARTH_RADIUS_KM * c)
    }

    /// True when both components are finite and inside the geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn to_grid(&self) -> (i32, i32) {
        let x = (self.longitude * LONGITUDE_DISTANCE.as_meters() / GRID_CELL_SIZE.as_meters())
            .floor() as i32;
        let y = (self.latitude * LATITUDE_DISTANCE.as_meters() / GRID_CELL_SIZE.as_meters())
            .floor() as i32;
        (x, y)
    }
}

/// Haversine distance in kilometers between two `(latitude, longitude)` pairs.
pub fn distance_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    Coordinate::from(a)
        .haversine_distance(&Coordinate::from(b))
        .as_kilometers()
}

/// A map viewport. `west > east` means the box wraps the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        let lat_ok = (self.south..=self.north).contains(&coordinate.latitude);
        let lon_ok = if self.west <= self.east {
            (self.west..=self.east).contains(&coordinate.longitude)
        } else {
            coordinate.longitude >= self.west || coordinate.longitude <= self.east
        };
        lat_ok && lon_ok
    }

    pub fn is_valid(&self) -> bool {
        Coordinate::from((self.south, self.west)).is_valid()
            && Coordinate::from((self.north, self.east)).is_valid()
            && self.south <= self.north
    }
}

impl FromStr for BoundingBox {
    type Err = ParseError;

    /// Parses `"south,west,north,east"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [south, west, north, east] = parse_floats::<4>(s)?;
        let bbox = Self::new(south, west, north, east);
        if bbox.is_valid() {
            Ok(bbox)
        } else {
            Err(ParseError::OutOfRange)
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected {0} comma separated values")]
    WrongArity(usize),
    #[error("Value {0:?} is not a number")]
    NotANumber(String),
    #[error("Values are outside the geographic range")]
    OutOfRange,
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f64; N], ParseError> {
    let parts: Vec<_> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(ParseError::WrongArity(N));
    }
    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part
            .parse()
            .map_err(|_| ParseError::NotANumber(part.to_string()))?;
    }
    Ok(values)
}

#[test]
fn antipodal_distance_is_half_circumference() {
    let a = Coordinate::from((0.0, 0.0));
    let b = Coordinate::from((0.0, 180.0));
    let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
    assert!((a.haversine_distance(&b).as_kilometers() - expected).abs() < 1e-6);
}

#[test]
fn bbox_wraps_antimeridian() {
    let bbox = BoundingBox::new(-20.0, 170.0, 20.0, -170.0);
    assert!(bbox.contains(&Coordinate::from((0.0, 175.0))));
    assert!(bbox.contains(&Coordinate::from((0.0, -175.0))));
    assert!(!bbox.contains(&Coordinate::from((0.0, 0.0))));
}
