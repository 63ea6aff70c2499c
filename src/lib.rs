//! Decoder of vertical wind profiles from JMA Meso-Scale Model (MSM) GRIB2
//! grid point value files.
//!
//! A surface file and a pressure-level file are each scanned once, section by
//! section, and only the single sample at the requested grid point is
//! unpacked from each selected record. The two results are then merged into
//! one profile ordered by height.
//!
//! # Example
//!
//! ```no_run
//! use grib_msm::{PointQuery, decode_profile};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let query = PointQuery::new(35.0, 135.0, 9);
//!     let profile = decode_profile(
//!         "Z__C_RJTD_20160822000000_MSM_GPV_Rjp_Lsurf_FH00-15_grib2.bin",
//!         "Z__C_RJTD_20160822000000_MSM_GPV_Rjp_L-pall_FH00-15_grib2.bin",
//!         &query,
//!     )?;
//!     for row in &profile {
//!         println!(
//!             "{} m: {} m/s from {} deg",
//!             row.height, row.wind_speed, row.wind_direction
//!         );
//!     }
//!     Ok(())
//! }
//! ```

pub mod codetables;
mod datatypes;
mod decoder;
mod error;
mod grid;
mod helpers;
mod product;
mod profile;
mod reader;
mod record;
mod time;

pub use crate::{
    datatypes::*, decoder::*, error::*, grid::*, product::*, profile::*, reader::*, record::*,
    time::*,
};
