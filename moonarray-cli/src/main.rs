use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, Command, ValueHint};
use log::LevelFilter;

use moonarray_cli::config::{load_config, DemoConfig};
use moonarray_cli::demo::run_demo;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MOONARRAY_LOG", "error,moonarray_cli=info"))
        .init();

    let matches = Command::new("moonarray")
        .version(clap::crate_version!())
        .about("Greets the moon and walks through basic numeric array operations")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON demo configuration. Missing fields use the built-in values.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the results as a JSON report instead of text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print_config")
                .long("print-config")
                .help("Print the default configuration as JSON and exit")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["config", "json"]),
        )
        .get_matches();

    if matches.get_flag("print_config") {
        println!("{}", serde_json::to_string_pretty(&DemoConfig::default())?);
        return Ok(());
    }

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => DemoConfig::default(),
    };

    if matches.get_flag("json") {
        let report = run_demo(&config, &mut io::sink())?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        run_demo(&config, &mut out)?;
        out.flush()?;
    }

    Ok(())
}
