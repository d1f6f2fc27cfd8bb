//! # CLI Argument Definitions

use clap::Parser;
use std::path::PathBuf;

/// Replays a scripted session against a reactive car and prints what it observed.
#[derive(Debug, Parser)]
#[command(name = "garage")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reactive property demo")]
pub struct Cli {
    /// Configuration file; `garage.{toml,yaml,json}` in the working directory when omitted
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at DEBUG regardless of the configured level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log every property write and rejection at TRACE
    #[arg(short, long)]
    pub trace_properties: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::parse_from(["garage", "--config", "car.toml", "-v", "-t"]);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("car.toml")));
        assert!(cli.verbose);
        assert!(cli.trace_properties);

        let bare = Cli::parse_from(["garage"]);
        assert!(bare.config.is_none() && !bare.verbose && !bare.trace_properties);
    }
}
