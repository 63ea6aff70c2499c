use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::{CMD_NAME, utils};

const EXPECTED_CSV: &str = "\
height,pressure,u_wind,v_wind,wind_speed,wind_direction
10.0,102.0,0.0,-5.0,5.0,0.0
120.0,100.0,1.0,0.0,1.0,270.0
350.0,97.5,1.0,0.0,1.0,270.0
";

#[test]
fn profile_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let surface = utils::surface_file().build_to_tempfile()?;
    let pressure = utils::pressure_file(&[120, 350]).build_to_tempfile()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("profile")
        .arg(surface.path())
        .arg(pressure.path())
        .args(utils::point_args());
    cmd.assert()
        .success()
        .stdout(predicate::str::diff(EXPECTED_CSV))
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn profile_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let surface = utils::surface_file().build_to_tempfile()?;
    let pressure = utils::pressure_file(&[120, 350]).build_to_tempfile()?;
    let dir = TempDir::new()?;
    let out_path = dir.path().join("profile.csv");

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("profile")
        .arg(surface.path())
        .arg(pressure.path())
        .args(utils::point_args())
        .arg("-o")
        .arg(&out_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    let actual = std::fs::read_to_string(&out_path)?;
    assert_eq!(actual, EXPECTED_CSV);

    Ok(())
}

#[test]
fn profile_at_lead_time_without_records() -> Result<(), Box<dyn std::error::Error>> {
    let surface = utils::surface_file().build_to_tempfile()?;
    let pressure = utils::pressure_file(&[120, 350]).build_to_tempfile()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("profile")
        .arg(surface.path())
        .arg(pressure.path())
        .args(utils::point_args())
        .args(["--hours", "15"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::diff(
            "height,pressure,u_wind,v_wind,wind_speed,wind_direction\n",
        ))
        .stderr(predicate::str::contains("no profile at"));

    Ok(())
}

#[test]
fn profile_off_grid() -> Result<(), Box<dyn std::error::Error>> {
    let surface = utils::surface_file().build_to_tempfile()?;
    let pressure = utils::pressure_file(&[120, 350]).build_to_tempfile()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("profile")
        .arg(surface.path())
        .arg(pressure.path())
        .args(["--lat", "-35.5", "--lon", "135.0"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::diff(
            "height,pressure,u_wind,v_wind,wind_speed,wind_direction\n",
        ))
        .stderr(predicate::str::contains("is not a grid point"));

    Ok(())
}

#[test]
fn profile_with_broken_file() -> Result<(), Box<dyn std::error::Error>> {
    let surface = utils::surface_file().build_to_tempfile()?;
    let mut builder = utils::pressure_file(&[120, 350]);
    builder.end_marker = *b"7778";
    let pressure = builder.build_to_tempfile()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("profile")
        .arg(surface.path())
        .arg(pressure.path())
        .args(utils::point_args());
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::diff(
            "error: Content of End Section is not valid\n",
        ));

    Ok(())
}

#[test]
fn profile_with_invalid_latitude() -> Result<(), Box<dyn std::error::Error>> {
    let surface = utils::surface_file().build_to_tempfile()?;
    let pressure = utils::pressure_file(&[120]).build_to_tempfile()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("profile")
        .arg(surface.path())
        .arg(pressure.path())
        .args(["--lat", "north", "--lon", "135.0"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with(
            "error: invalid value 'north' for '--lat <LAT>'",
        ));

    Ok(())
}
