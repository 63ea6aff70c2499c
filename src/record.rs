use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use log::{debug, trace};

use crate::{
    datatypes::{Identification, Indicator},
    decoder::{ReprDefinition, check_bitmap, decode_sample},
    error::*,
    grid::GridDescriptor,
    product::{ParameterKind, ProductDescriptor},
    reader::{SECT8_ES_SIZE, SectionReader, expect_section},
};

/// Location and forecast lead time a profile is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointQuery {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Forecast lead time in hours
    pub lead_hours: u32,
}

impl PointQuery {
    pub fn new(lat: f64, lon: f64, lead_hours: u32) -> Self {
        Self {
            lat,
            lon,
            lead_hours,
        }
    }
}

/// Values decoded from one file at the requested point, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointValues {
    pub height: Vec<f64>,
    /// Pressure in kilopascals
    pub pressure: Vec<f64>,
    pub u_wind: Vec<f64>,
    pub v_wind: Vec<f64>,
    /// Index of the grid point at the requested coordinate, `None` if the
    /// coordinate is not a grid point
    pub grid_index: Option<usize>,
}

impl PointValues {
    fn new(grid_index: Option<usize>) -> Self {
        Self {
            grid_index,
            ..Default::default()
        }
    }

    pub(crate) fn push(&mut self, kind: ParameterKind, value: f64) {
        let column = match kind {
            ParameterKind::Height => &mut self.height,
            ParameterKind::Pressure => &mut self.pressure,
            ParameterKind::UWind => &mut self.u_wind,
            ParameterKind::VWind => &mut self.v_wind,
        };
        column.push(kind.to_profile_unit(value));
    }

    /// Returns `true` if no value is available because the requested
    /// coordinate does not coincide with any grid point, as opposed to no
    /// record matching the query.
    pub fn is_off_grid(&self) -> bool {
        self.grid_index.is_none()
    }

    /// Returns `true` if no value of any kind was decoded.
    pub fn is_empty(&self) -> bool {
        self.height.is_empty()
            && self.pressure.is_empty()
            && self.u_wind.is_empty()
            && self.v_wind.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Indicator,
    Identification,
    GridDefinition,
    RecordGroup,
    End,
}

/// Drives the decode of one file through the fixed section sequence
/// `0 → 1 → [2] → 3 → {4 → 5 → 6 → 7}* → 8`.
///
/// Each stage has its own handler returning the next stage; any error ends
/// the decode and drops everything accumulated so far.
struct RecordStream<'q, R> {
    reader: SectionReader<R>,
    query: &'q PointQuery,
    values: PointValues,
}

impl<'q, R: Read + Seek> RecordStream<'q, R> {
    fn new(reader: R, query: &'q PointQuery) -> Self {
        Self {
            reader: SectionReader::new(reader),
            query,
            values: PointValues::default(),
        }
    }

    fn run(mut self) -> Result<PointValues, MsmError> {
        let mut stage = Stage::Indicator;
        loop {
            stage = match stage {
                Stage::Indicator => self.on_indicator()?,
                Stage::Identification => self.on_identification()?,
                Stage::GridDefinition => self.on_grid_definition()?,
                Stage::RecordGroup => self.on_record_group()?,
                Stage::End => {
                    self.reader.read_end()?;
                    return Ok(self.values);
                }
            };
        }
    }

    fn on_indicator(&mut self) -> Result<Stage, MsmError> {
        let Indicator { total_length, .. } = self.reader.read_indicator()?;
        debug!("GRIB2 message of {total_length} octets");
        Ok(Stage::Identification)
    }

    fn on_identification(&mut self) -> Result<Stage, MsmError> {
        read_identification(&mut self.reader)?;
        Ok(Stage::GridDefinition)
    }

    fn on_grid_definition(&mut self) -> Result<Stage, MsmError> {
        let grid = read_grid_definition(&mut self.reader)?;
        let grid_index = grid.resolve(self.query.lat, self.query.lon);
        debug!(
            "grid {}x{}, ({}, {}) resolved to {grid_index:?}",
            grid.ni, grid.nj, self.query.lat, self.query.lon
        );
        self.values = PointValues::new(grid_index);
        Ok(next_record_stage(&self.reader))
    }

    fn on_record_group(&mut self) -> Result<Stage, MsmError> {
        let header = self.reader.read_header_of(4)?;
        let product = ProductDescriptor::from_payload(&self.reader.read_payload(&header)?)?;
        let selected = product.is_selected(self.query.lead_hours);
        trace!(
            "product {}/{} at {} h, selected: {selected}",
            product.parameter_category, product.parameter_number, product.forecast_time
        );

        let header = self.reader.read_header_of(5)?;
        let repr = ReprDefinition::from_payload(self.reader.read_payload(&header)?)?;
        let param = if selected {
            Some(repr.simple_packing_param()?)
        } else {
            None
        };

        let header = self.reader.read_header_of(6)?;
        check_bitmap(&self.reader.read_payload(&header)?)?;

        let header = self.reader.read_header_of(7)?;
        let target = param.zip(product.parameter_kind()).zip(self.values.grid_index);
        match target {
            Some(((param, kind), index)) => {
                let data = self.reader.read_payload(&header)?;
                let value = decode_sample(&param, &data, index)?;
                trace!("{kind:?}: {value}");
                self.values.push(kind, value);
            }
            None => self.reader.skip_payload(&header)?,
        }

        Ok(next_record_stage(&self.reader))
    }
}

fn read_identification<R: Read + Seek>(
    reader: &mut SectionReader<R>,
) -> Result<Identification, MsmError> {
    let header = reader.read_header_of(1)?;
    let ident = Identification::from_payload(reader.read_payload(&header)?)?;
    ident.validate()?;
    #[cfg(feature = "time-calculation")]
    ident.ref_time().to_date_time()?;
    debug!("reference time {}", ident.ref_time());
    Ok(ident)
}

/// Reads Section 3, skipping the optional Section 2 in front of it.
fn read_grid_definition<R: Read + Seek>(
    reader: &mut SectionReader<R>,
) -> Result<GridDescriptor, MsmError> {
    let mut header = reader.read_header()?;
    if header.num == 2 {
        trace!("skipping local use section");
        reader.skip_payload(&header)?;
        header = reader.read_header()?;
    }
    expect_section(&header, 3)?;
    GridDescriptor::from_payload(&reader.read_payload(&header)?)
}

fn next_record_stage<R>(reader: &SectionReader<R>) -> Stage {
    if reader.rest_size() > SECT8_ES_SIZE {
        Stage::RecordGroup
    } else {
        Stage::End
    }
}

/// Decodes the values at the requested point from one GRIB2 stream.
///
/// A coordinate that is not a grid point, or a lead time no record has,
/// results in empty columns rather than an error.
pub fn decode_point<R: Read + Seek>(
    reader: R,
    query: &PointQuery,
) -> Result<PointValues, MsmError> {
    RecordStream::new(reader, query).run()
}

/// Opens the file at `path` and decodes the values at the requested point.
///
/// The file is closed before returning, whether decoding succeeded or not.
pub fn decode_point_file<P: AsRef<Path>>(
    path: P,
    query: &PointQuery,
) -> Result<PointValues, MsmError> {
    let path = path.as_ref();
    debug!("decoding {}", path.display());
    let f = File::open(path)?;
    let f = BufReader::new(f);
    decode_point(f, query)
}

/// File-level description of an MSM file: Sections 0, 1 and 3 and the
/// product definitions of all record groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub indicator: Indicator,
    pub identification: Identification,
    pub grid: GridDescriptor,
    pub products: Vec<ProductDescriptor>,
}

impl FileSummary {
    /// Returns the distinct forecast lead times in the order they appear.
    pub fn lead_times(&self) -> Vec<u32> {
        let mut lead_times = Vec::new();
        for product in &self.products {
            if !lead_times.contains(&product.forecast_time) {
                lead_times.push(product.forecast_time);
            }
        }
        lead_times
    }
}

/// Reads the whole stream with the same validation as [`decode_point`], but
/// without decoding any data.
pub fn read_summary<R: Read + Seek>(reader: R) -> Result<FileSummary, MsmError> {
    let mut reader = SectionReader::new(reader);
    let indicator = reader.read_indicator()?;
    let identification = read_identification(&mut reader)?;
    let grid = read_grid_definition(&mut reader)?;

    let mut products = Vec::new();
    while next_record_stage(&reader) == Stage::RecordGroup {
        let header = reader.read_header_of(4)?;
        let product = ProductDescriptor::from_payload(&reader.read_payload(&header)?)?;
        let header = reader.read_header_of(5)?;
        ReprDefinition::from_payload(reader.read_payload(&header)?)?;
        let header = reader.read_header_of(6)?;
        check_bitmap(&reader.read_payload(&header)?)?;
        let header = reader.read_header_of(7)?;
        reader.skip_payload(&header)?;
        products.push(product);
    }
    reader.read_end()?;

    Ok(FileSummary {
        indicator,
        identification,
        grid,
        products,
    })
}

pub fn read_summary_file<P: AsRef<Path>>(path: P) -> Result<FileSummary, MsmError> {
    let f = File::open(path)?;
    let f = BufReader::new(f);
    read_summary(f)
}
