use std::{io::Write, path::PathBuf};

use clap::{Arg, ArgMatches, Command, arg, value_parser};
use grib_msm::{PointQuery, Profile, ProfileRow};
use log::warn;
use serde::Serialize;

use crate::cli::WriteStream;

const CSV_HEADER: [&str; 6] = [
    "height",
    "pressure",
    "u_wind",
    "v_wind",
    "wind_speed",
    "wind_direction",
];

pub fn cli() -> Command {
    Command::new("profile")
        .about("Extract the wind profile at a grid point as CSV")
        .arg(arg!(<SURFACE> "Surface file").value_parser(value_parser!(PathBuf)))
        .arg(arg!(<PRESSURE> "Pressure-level file").value_parser(value_parser!(PathBuf)))
        .arg(
            Arg::new("lat")
                .long("lat")
                .value_name("LAT")
                .help("Latitude of the grid point in degrees")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("lon")
                .long("lon")
                .value_name("LON")
                .help("Longitude of the grid point in degrees")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("hours")
                .long("hours")
                .value_name("N")
                .help("Forecast lead time in hours")
                .default_value("0")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file ('-' for the standard output)")
                .default_value("-")
                .value_parser(value_parser!(PathBuf)),
        )
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let surface_path = args.get_one::<PathBuf>("SURFACE").unwrap();
    let pressure_path = args.get_one::<PathBuf>("PRESSURE").unwrap();
    let query = PointQuery::new(
        *args.get_one::<f64>("lat").unwrap(),
        *args.get_one::<f64>("lon").unwrap(),
        *args.get_one::<u32>("hours").unwrap(),
    );

    let profile = grib_msm::decode_profile(surface_path, pressure_path, &query)?;
    if profile.is_empty() {
        warn!(
            "no profile at ({}, {}) for {} h",
            query.lat, query.lon, query.lead_hours
        );
    }

    let out_path = args.get_one::<PathBuf>("output").unwrap();
    let stream = WriteStream::new(out_path)?;
    write_csv(stream, &profile)
}

#[derive(Serialize)]
struct CsvRow {
    height: f64,
    pressure: f64,
    u_wind: f64,
    v_wind: f64,
    wind_speed: f64,
    wind_direction: f64,
}

impl From<&ProfileRow> for CsvRow {
    fn from(row: &ProfileRow) -> Self {
        Self {
            height: row.height,
            pressure: row.pressure,
            u_wind: row.u_wind,
            v_wind: row.v_wind,
            wind_speed: row.wind_speed,
            wind_direction: row.wind_direction,
        }
    }
}

/// Writes the header line even for an empty profile.
fn write_csv<W: Write>(writer: W, profile: &Profile) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(CSV_HEADER)?;
    for row in profile {
        writer.serialize(CsvRow::from(row))?;
    }
    writer.flush()?;
    Ok(())
}
