use super::{GridPointIterator, ScanningMode};
use crate::{
    codetables::EARTH_SHAPE_SPHERE_6371,
    error::*,
    helpers::{GribInt, read_as},
};

const SECT3_TEMPLATE_3_0_MIN_SIZE: usize = 67;

/// Grid definition of a regular latitude/longitude grid (template 3.0) as
/// used by MSM.
///
/// Coordinates are kept in microdegrees, the resolution they are encoded
/// with, so that grid points can be compared exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridDescriptor {
    pub num_points: u32,
    pub earth_shape: u8,
    /// Number of points along a parallel
    pub ni: u32,
    /// Number of points along a meridian
    pub nj: u32,
    pub first_point_lat: i32,
    pub first_point_lon: i32,
    pub last_point_lat: i32,
    pub last_point_lon: i32,
    /// i direction (longitude) increment
    pub di: u32,
    /// j direction (latitude) increment
    pub dj: u32,
    pub scanning_mode: ScanningMode,
}

impl GridDescriptor {
    /// Reads the grid definition from the body of Section 3 and checks that
    /// the grid is the one this crate can resolve coordinates on.
    pub fn from_payload(buf: &[u8]) -> Result<Self, MsmError> {
        let size = buf.len();
        if size < SECT3_TEMPLATE_3_0_MIN_SIZE {
            return Err(SectionSequenceError::SectionSizeTooSmall { num: 3, size }.into());
        }

        let grid = Self {
            num_points: read_as!(u32, buf, 1),
            earth_shape: buf[9],
            ni: read_as!(u32, buf, 25),
            nj: read_as!(u32, buf, 29),
            first_point_lat: read_as!(u32, buf, 41).as_grib_int(),
            first_point_lon: read_as!(u32, buf, 45).as_grib_int(),
            last_point_lat: read_as!(u32, buf, 50).as_grib_int(),
            last_point_lon: read_as!(u32, buf, 54).as_grib_int(),
            di: read_as!(u32, buf, 58),
            dj: read_as!(u32, buf, 62),
            scanning_mode: ScanningMode(buf[66]),
        };
        grid.validate()?;
        Ok(grid)
    }

    fn validate(&self) -> Result<(), UnsupportedGridError> {
        if self.earth_shape != EARTH_SHAPE_SPHERE_6371 {
            return Err(UnsupportedGridError::EarthShape(self.earth_shape));
        }
        if !self.scanning_mode.is_supported() {
            let ScanningMode(mode) = self.scanning_mode;
            return Err(UnsupportedGridError::ScanningMode(mode));
        }
        if u64::from(self.num_points) != u64::from(self.ni) * u64::from(self.nj) {
            return Err(UnsupportedGridError::InconsistentPointCount {
                num_points: self.num_points,
                ni: self.ni,
                nj: self.nj,
            });
        }
        Ok(())
    }

    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.ni as usize, self.nj as usize)
    }

    /// Returns an iterator over latitudes and longitudes of grid points in
    /// microdegrees.
    pub fn latlons(&self) -> GridPointIterator {
        GridPointIterator::new(
            (self.first_point_lat, self.first_point_lon),
            (self.di, self.dj),
            self.ni as usize,
            self.num_points as usize,
        )
    }

    /// Returns the index of the grid point located exactly at the given
    /// coordinate in decimal degrees, or `None` if no grid point is there.
    ///
    /// The coordinate is converted to microdegrees truncating toward zero;
    /// there is no interpolation and no nearest-point fallback.
    ///
    /// Examples
    ///
    /// ```
    /// let grid = grib_msm::GridDescriptor {
    ///     num_points: 6,
    ///     earth_shape: 6,
    ///     ni: 3,
    ///     nj: 2,
    ///     first_point_lat: 36_000_000,
    ///     first_point_lon: 135_000_000,
    ///     last_point_lat: 35_900_000,
    ///     last_point_lon: 135_250_000,
    ///     di: 125_000,
    ///     dj: 100_000,
    ///     scanning_mode: grib_msm::ScanningMode(0),
    /// };
    /// assert_eq!(grid.resolve(35.9, 135.125), Some(4));
    /// assert_eq!(grid.resolve(35.95, 135.125), None);
    /// ```
    pub fn resolve(&self, lat: f64, lon: f64) -> Option<usize> {
        let target = (to_microdegrees(lat), to_microdegrees(lon));
        self.latlons().position(|point| point == target)
    }
}

#[inline]
pub(crate) fn to_microdegrees(degrees: f64) -> i64 {
    (degrees * 1_000_000_f64) as i64
}
