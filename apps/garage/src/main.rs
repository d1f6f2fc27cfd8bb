#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use reprop_garage::car::Car;
use reprop_garage::cli::Cli;
use reprop_garage::config::{GarageConfig, load_config};
use reprop_garage::replay::replay;
use reprop_logger::{LevelFilter, Logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    let _log = init_logger(&cfg, &cli)?;

    let mut car = Car::new(&cfg.car);
    let failures = replay(&mut car);

    println!("{}", car.describe());
    for record in car.log().snapshot() {
        println!("{record}");
    }
    for failure in &failures {
        println!("error: {failure}");
    }

    Ok(())
}

fn init_logger(cfg: &GarageConfig, cli: &Cli) -> anyhow::Result<Logger> {
    let level = if cli.verbose { LevelFilter::DEBUG } else { cfg.logging.level_filter()? };

    let mut builder = Logger::builder()
        .name(env!("CARGO_BIN_NAME"))
        .level(level)
        .trace_properties(cli.trace_properties || cfg.logging.trace_properties);
    if let Some(filter) = &cfg.logging.env_filter {
        builder = builder.env_filter(filter.clone());
    }

    let logger = match &cfg.logging.path {
        Some(path) => builder.path(path).json(cfg.logging.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
