use std::{cmp::Ordering, f64::consts::PI, path::Path};

use log::{debug, warn};

use crate::{
    error::MsmError,
    record::{PointQuery, PointValues, decode_point_file},
};

/// Height assigned to the surface row, the height of the anemometer (m).
pub const ANEMOMETER_HEIGHT: f64 = 10.0;

/// Pressure of the levels in pressure-level files, in file order (kPa).
pub const STANDARD_PRESSURE_LEVELS: [f64; 16] = [
    100.0, 97.5, 95.0, 92.5, 90.0, 85.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 25.0, 20.0, 15.0,
    10.0,
];

/// One level of a vertical wind profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileRow {
    pub height: f64,
    pub pressure: f64,
    pub u_wind: f64,
    pub v_wind: f64,
    pub wind_speed: f64,
    /// Direction the wind blows from, in degrees clockwise from north
    pub wind_direction: f64,
}

impl ProfileRow {
    pub fn new(height: f64, pressure: f64, u_wind: f64, v_wind: f64) -> Self {
        Self {
            height,
            pressure,
            u_wind,
            v_wind,
            wind_speed: wind_speed(u_wind, v_wind),
            wind_direction: wind_direction(u_wind, v_wind),
        }
    }

    fn cmp_by_columns(&self, other: &Self) -> Ordering {
        self.height
            .total_cmp(&other.height)
            .then_with(|| self.pressure.total_cmp(&other.pressure))
            .then_with(|| self.u_wind.total_cmp(&other.u_wind))
            .then_with(|| self.v_wind.total_cmp(&other.v_wind))
    }
}

/// Vertical wind profile at one point, ordered by non-decreasing height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    rows: Vec<ProfileRow>,
}

impl Profile {
    /// Builds a profile from rows, reordering them by height if they are not
    /// already in non-decreasing order.
    ///
    /// Rows are then sorted by height, pressure, u-wind and v-wind in this
    /// order of precedence.
    pub fn from_rows(mut rows: Vec<ProfileRow>) -> Self {
        if !is_ascending_in_height(&rows) {
            debug!("heights not in ascending order, sorting rows");
            rows.sort_by(ProfileRow::cmp_by_columns);
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[ProfileRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProfileRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.height)
    }
}

impl<'a> IntoIterator for &'a Profile {
    type Item = &'a ProfileRow;
    type IntoIter = std::slice::Iter<'a, ProfileRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn is_ascending_in_height(rows: &[ProfileRow]) -> bool {
    let mut max = f64::NEG_INFINITY;
    for row in rows {
        if !(row.height >= max) {
            return false;
        }
        max = row.height;
    }
    true
}

/// Merges the values decoded from a surface file and a pressure-level file
/// into one profile.
///
/// The surface row is placed at [`ANEMOMETER_HEIGHT`] with the surface
/// pressure and wind. Each pressure-level entry is paired by position with
/// the pressure in [`STANDARD_PRESSURE_LEVELS`]. Rows are only formed where
/// every column has a value.
pub fn assemble_profile(surface: &PointValues, pressure: &PointValues) -> Profile {
    let mut rows = Vec::with_capacity(1 + STANDARD_PRESSURE_LEVELS.len());

    let surface_columns = [&surface.pressure, &surface.u_wind, &surface.v_wind];
    if surface_columns.iter().any(|column| column.len() > 1) {
        warn!(
            "surface file has more than one value per column (pressure {}, u {}, v {}), using the first",
            surface.pressure.len(),
            surface.u_wind.len(),
            surface.v_wind.len()
        );
    }
    match (
        surface.pressure.first(),
        surface.u_wind.first(),
        surface.v_wind.first(),
    ) {
        (Some(p), Some(u), Some(v)) => rows.push(ProfileRow::new(ANEMOMETER_HEIGHT, *p, *u, *v)),
        _ => warn!("surface values incomplete, no surface row"),
    }

    let num_levels = pressure.height.len();
    if pressure.u_wind.len() != num_levels
        || pressure.v_wind.len() != num_levels
        || num_levels > STANDARD_PRESSURE_LEVELS.len()
    {
        warn!(
            "pressure-level columns differ in length (height {}, u {}, v {}, levels {}), truncating",
            num_levels,
            pressure.u_wind.len(),
            pressure.v_wind.len(),
            STANDARD_PRESSURE_LEVELS.len()
        );
    }
    let levels = pressure
        .height
        .iter()
        .zip(STANDARD_PRESSURE_LEVELS.iter())
        .zip(pressure.u_wind.iter().zip(pressure.v_wind.iter()))
        .map(|((h, p), (u, v))| ProfileRow::new(*h, *p, *u, *v));
    rows.extend(levels);

    Profile::from_rows(rows)
}

/// Decodes a surface file and a pressure-level file at the requested point
/// and assembles the profile.
pub fn decode_profile<P, Q>(
    surface_path: P,
    pressure_path: Q,
    query: &PointQuery,
) -> Result<Profile, MsmError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let surface = decode_point_file(surface_path, query)?;
    let pressure = decode_point_file(pressure_path, query)?;
    if surface.is_off_grid() || pressure.is_off_grid() {
        warn!(
            "({}, {}) is not a grid point, no value decoded",
            query.lat, query.lon
        );
    }
    Ok(assemble_profile(&surface, &pressure))
}

/// Returns the wind speed from its u and v components.
#[inline]
pub fn wind_speed(u: f64, v: f64) -> f64 {
    u.hypot(v)
}

/// Returns the direction the wind blows from, in degrees clockwise from
/// north within `[0, 360)`.
#[inline]
pub fn wind_direction(u: f64, v: f64) -> f64 {
    let direction = (u.atan2(v) + PI).to_degrees().rem_euclid(360_f64);
    if direction >= 360_f64 { 0_f64 } else { direction }
}
