use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

/// Fatal error in decoding one file.
///
/// Any of these aborts the decode of the whole file; no value decoded before
/// the error is returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MsmError {
    Format(FormatError),
    SectionSequence(SectionSequenceError),
    UnsupportedGrid(UnsupportedGridError),
    UnsupportedProduct(UnsupportedProductError),
    Io(String),
}

impl Error for MsmError {}

impl Display for MsmError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "{e}"),
            Self::SectionSequence(e) => write!(f, "{e}"),
            Self::UnsupportedGrid(e) => write!(f, "{e}"),
            Self::UnsupportedProduct(e) => write!(f, "{e}"),
            Self::Io(s) => write!(f, "Read error: {s}"),
        }
    }
}

impl From<FormatError> for MsmError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<SectionSequenceError> for MsmError {
    fn from(e: SectionSequenceError) -> Self {
        Self::SectionSequence(e)
    }
}

impl From<UnsupportedGridError> for MsmError {
    fn from(e: UnsupportedGridError) -> Self {
        Self::UnsupportedGrid(e)
    }
}

impl From<UnsupportedProductError> for MsmError {
    fn from(e: UnsupportedProductError) -> Self {
        Self::UnsupportedProduct(e)
    }
}

impl From<io::Error> for MsmError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                Self::SectionSequence(SectionSequenceError::UnexpectedEndOfData)
            }
            _ => Self::Io(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatError {
    NotGRIB,
    GRIBVersionMismatch(u8),
    EndSectionMismatch,
    NonOperationalProduct(u8),
    InvalidReferenceTime(String),
}

impl Error for FormatError {}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::NotGRIB => write!(f, "Not GRIB data"),
            Self::GRIBVersionMismatch(i) => write!(f, "Not GRIB version 2: {i}"),
            Self::EndSectionMismatch => write!(f, "Content of End Section is not valid"),
            Self::NonOperationalProduct(s) => {
                write!(f, "Production status is not operational: {s}")
            }
            Self::InvalidReferenceTime(s) => write!(f, "Invalid reference time: {s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionSequenceError {
    /// Expected section number and found one, with the offset of the section.
    UnexpectedSection {
        expected: u8,
        found: u8,
        offset: usize,
    },
    /// Declared section length and the number of bytes left in the message.
    SectionTooLong { declared: usize, remaining: usize },
    SectionSizeTooSmall { num: u8, size: usize },
    /// Sample index that lies outside the data section.
    SampleOutOfRange(usize),
    UnexpectedEndOfData,
}

impl Error for SectionSequenceError {}

impl Display for SectionSequenceError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::UnexpectedSection {
                expected,
                found,
                offset,
            } => write!(
                f,
                "Section {expected} expected but section {found} found at {offset}"
            ),
            Self::SectionTooLong {
                declared,
                remaining,
            } => write!(
                f,
                "Section length {declared} exceeds the remaining {remaining} bytes"
            ),
            Self::SectionSizeTooSmall { num, size } => {
                write!(f, "Section {num} is too small: {size}")
            }
            Self::SampleOutOfRange(i) => write!(f, "Sample {i} is out of the data section"),
            Self::UnexpectedEndOfData => write!(f, "Unexpected end of data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnsupportedGridError {
    EarthShape(u8),
    ScanningMode(u8),
    InconsistentPointCount { num_points: u32, ni: u32, nj: u32 },
}

impl Error for UnsupportedGridError {}

impl Display for UnsupportedGridError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::EarthShape(code) => write!(f, "Unsupported shape of the earth: {code}"),
            Self::ScanningMode(mode) => write!(f, "Unsupported scanning mode: {mode:#010b}"),
            Self::InconsistentPointCount { num_points, ni, nj } => write!(
                f,
                "Number of data points {num_points} does not match the grid {ni}x{nj}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnsupportedProductError {
    GeneratingProcess(u8),
    DataRepresentationTemplate(u16),
    BitWidth(u8),
    Bitmap(u8),
}

impl Error for UnsupportedProductError {}

impl Display for UnsupportedProductError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::GeneratingProcess(code) => {
                write!(f, "Not MSM data: generating process {code}")
            }
            Self::DataRepresentationTemplate(num) => {
                write!(f, "Unsupported data representation template: 5.{num}")
            }
            Self::BitWidth(nbit) => write!(f, "Unsupported bit width: {nbit}"),
            Self::Bitmap(indicator) => write!(f, "Unsupported bitmap indicator: {indicator}"),
        }
    }
}
