use crate::{error::*, helpers::read_as, time::ReferenceTime};

/// Section 0: Indicator Section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    /// Discipline - GRIB Master Table Number (see Code Table 0.0)
    pub discipline: u8,
    /// GRIB edition number
    pub edition: u8,
    /// Total length of GRIB message in octets (including Section 0)
    pub total_length: u64,
}

impl Indicator {
    pub(crate) fn from_slice(slice: &[u8]) -> Result<Self, FormatError> {
        let discipline = slice[6];
        let edition = slice[7];
        if edition != 2 {
            return Err(FormatError::GRIBVersionMismatch(edition));
        }

        let total_length = read_as!(u64, slice, 8);

        Ok(Self {
            discipline,
            edition,
            total_length,
        })
    }
}

/// Section 1: Identification Section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    payload: Box<[u8]>,
}

impl Identification {
    pub fn from_payload(slice: Box<[u8]>) -> Result<Self, SectionSequenceError> {
        let size = slice.len();
        if size < 16 {
            Err(SectionSequenceError::SectionSizeTooSmall { num: 1, size })
        } else {
            Ok(Self { payload: slice })
        }
    }

    /// Identification of originating/generating centre (see Common Code Table
    /// C-1)
    #[inline]
    pub fn centre_id(&self) -> u16 {
        let payload = &self.payload;
        read_as!(u16, payload, 0)
    }

    /// Reference time of data
    pub fn ref_time(&self) -> ReferenceTime {
        let payload = &self.payload;
        ReferenceTime::new(
            read_as!(u16, payload, 7),
            payload[9],
            payload[10],
            payload[11],
            payload[12],
            payload[13],
        )
    }

    /// Production status of processed data in this GRIB message
    /// (see Code Table 1.3)
    #[inline]
    pub fn prod_status(&self) -> u8 {
        self.payload[14]
    }

    /// Type of processed data in this GRIB message (see Code Table 1.4)
    #[inline]
    pub fn data_type(&self) -> u8 {
        self.payload[15]
    }

    /// Checks that the data is an operational product, the only status the
    /// MSM distribution uses.
    pub(crate) fn validate(&self) -> Result<(), FormatError> {
        match self.prod_status() {
            0 => Ok(()),
            status => Err(FormatError::NonOperationalProduct(status)),
        }
    }
}
