use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use clap::{ArgMatches, Command, arg, value_parser};
use grib_msm::FileSummary;

use crate::cli;

pub fn cli() -> Command {
    Command::new("info")
        .about("Show identification and grid information")
        .arg(
            arg!(<FILE> "Target file ('-' for the standard input)")
                .value_parser(value_parser!(PathBuf)),
        )
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let file_name = args.get_one::<PathBuf>("FILE").unwrap();
    let summary = cli::summary(file_name)?;
    print!("{}", InfoView(&summary));
    Ok(())
}

struct InfoView<'i>(&'i FileSummary);

impl Display for InfoView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self(summary) = self;
        let FileSummary {
            indicator,
            identification,
            grid,
            products,
        } = summary;
        let (ni, nj) = grid.grid_shape();
        let lead_times = summary
            .lead_times()
            .iter()
            .map(|hours| hours.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "\
Discipline:                             {}
Total Length:                           {}
Originating/generating centre:          {}
Reference time of data:                 {}
Production status of processed data:    {}
Type of processed data:                 {}
Grid:                                   {} x {}
First grid point:                       ({}, {})
Last grid point:                        ({}, {})
Increments (i, j):                      ({}, {})
Number of records:                      {}
Forecast lead times (hours):            {}
",
            indicator.discipline,
            indicator.total_length,
            identification.centre_id(),
            identification.ref_time(),
            identification.prod_status(),
            identification.data_type(),
            ni,
            nj,
            Degrees(grid.first_point_lat.into()),
            Degrees(grid.first_point_lon.into()),
            Degrees(grid.last_point_lat.into()),
            Degrees(grid.last_point_lon.into()),
            Degrees(grid.di.into()),
            Degrees(grid.dj.into()),
            products.len(),
            lead_times,
        )
    }
}

/// Microdegrees shown as decimal degrees without rounding.
struct Degrees(i64);

impl Display for Degrees {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self(value) = self;
        let sign = if *value < 0 { "-" } else { "" };
        let abs = value.unsigned_abs();
        write!(f, "{sign}{}.{:06}", abs / 1_000_000, abs % 1_000_000)
    }
}
