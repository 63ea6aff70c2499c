use clap::{ArgMatches, Command};

pub fn cli() -> Vec<Command> {
    vec![info::cli(), profile::cli()]
}

pub fn dispatch(matches: ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("info", args)) => info::exec(args),
        Some(("profile", args)) => profile::exec(args),
        _ => unreachable!(),
    }
}

pub mod info;
pub mod profile;
