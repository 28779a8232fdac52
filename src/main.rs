use anyhow::{anyhow, Context, Result};
use clap::{App as Cli, Arg};
use log::*;
use netbank::config::Config;
use netbank::events::Event;
use netbank::{logger, App};
use std::fs;

fn main() -> Result<()> {
    let matches = Cli::new("netbank-replay")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replays inbound events against the netbank client state")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .possible_values(&["json", "yaml"])
                .default_value("json")
                .help("Output format for the final snapshot"),
        )
        .arg(
            Arg::with_name("events")
                .value_name("EVENTS")
                .help("YAML file containing a list of events")
                .required(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    logger::init(config.log_level, Box::new(|line: String| eprintln!("{}", line)))?;

    let path = matches
        .value_of("events")
        .ok_or_else(|| anyhow!("Missing events file"))?;
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read events from {}", path))?;
    let events: Vec<Event> = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse events in {}", path))?;

    let mut app = App::new(&config);
    let replay = app.replay(events);
    for (index, err) in &replay.rejected {
        error!("Event #{} rejected: {}", index, err);
    }

    let snapshot = app.snapshot();
    let output = match matches.value_of("format") {
        Some("yaml") => serde_yaml::to_string(&*snapshot)?,
        _ => serde_json::to_string_pretty(&*snapshot)?,
    };
    println!("{}", output);
    Ok(())
}
