mod latlon;
pub use latlon::*;

/// Scanning mode (Flag Table 3.4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanningMode(pub u8);

impl ScanningMode {
    /// Returns `true` if points of the first row or column scan in the +i (+x)
    /// direction.
    pub fn scans_positively_for_i(&self) -> bool {
        self.0 & 0b10000000 == 0
    }

    /// Returns `true` if points of the first row or column scan in the +j (+y)
    /// direction.
    pub fn scans_positively_for_j(&self) -> bool {
        self.0 & 0b01000000 != 0
    }

    /// Returns `true` if adjacent points in the i (x) direction are
    /// consecutive.
    pub fn is_consecutive_for_i(&self) -> bool {
        self.0 & 0b00100000 == 0
    }

    /// Returns `true` if adjacent rows scan in the opposite direction.
    pub fn scans_alternating_rows(&self) -> bool {
        self.0 & 0b00010000 != 0
    }

    /// Returns `true` for the only supported order: rows run west to east,
    /// rows stack north to south starting at the first grid point.
    pub fn is_supported(&self) -> bool {
        self.scans_positively_for_i()
            && !self.scans_positively_for_j()
            && self.is_consecutive_for_i()
            && !self.scans_alternating_rows()
            && self.0 & 0b00001111 == 0
    }
}

/// An iterator over latitudes and longitudes of grid points in microdegrees,
/// in scanning order.
///
/// Longitude increases by `di` within a row of `ni` points; each new row
/// restarts at the first-point longitude with latitude decreased by `dj`.
#[derive(Debug, Clone)]
pub struct GridPointIterator {
    first_point: (i64, i64),
    increments: (i64, i64),
    ni: usize,
    len: usize,
    pos: usize,
}

impl GridPointIterator {
    pub(crate) fn new(
        first_point: (i32, i32),
        increments: (u32, u32),
        ni: usize,
        len: usize,
    ) -> Self {
        let (lat, lon) = first_point;
        let (di, dj) = increments;
        Self {
            first_point: (lat.into(), lon.into()),
            increments: (di.into(), dj.into()),
            ni,
            len,
            pos: 0,
        }
    }
}

impl Iterator for GridPointIterator {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len || self.ni == 0 {
            return None;
        }

        let (i, j) = (self.pos % self.ni, self.pos / self.ni);
        let (lat, lon) = self.first_point;
        let (di, dj) = self.increments;
        self.pos += 1;
        Some((lat - dj * j as i64, lon + di * i as i64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = if self.ni == 0 {
            0
        } else {
            self.len.saturating_sub(self.pos)
        };
        (size, Some(size))
    }
}

impl ExactSizeIterator for GridPointIterator {}
