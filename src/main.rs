use clap::{command, Arg, ArgAction};
use convert::convert;
use env_logger::Env;
use std::path::PathBuf;

mod assets;
mod config;
mod convert;
mod document;
mod error;
mod slug;
mod transform;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = command!()
        .arg(
            Arg::new("input")
                .help("Path of the markdown note to convert")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("copy-images")
                .long("copy-images")
                .help("Copy images referenced by the note into the asset directory")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let input: &PathBuf = matches.get_one("input").unwrap();
    let config = config::Config::new();

    let out_path = convert(input, &config, matches.get_flag("copy-images"))?;
    println!("Created MDX file: {}", out_path.display());

    Ok(())
}
