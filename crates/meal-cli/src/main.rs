//! Meal filter CLI.

use clap::{ColorChoice, Parser};
use meal_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_fields, run_filter, run_replay};
use crate::summary::{print_fields, print_replay, print_report};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Filter(args) => {
            run_filter(args).and_then(|report| print_report(&report, args.format))
        }
        Command::Fields(args) => run_fields(args).map(|fields| print_fields(&fields)),
        Command::Replay(args) => run_replay(args).map(|commits| print_replay(&commits)),
    };
    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level(level)
        .with_format(format)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn log_flags_build_config() {
        let cli = Cli::try_parse_from([
            "meal-filter",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--log-file",
            "filter.log",
            "--color",
            "never",
            "fields",
        ])
        .unwrap();
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_file.as_deref(), Some(Path::new("filter.log")));
        assert!(!config.use_env_filter);
        assert!(!config.with_ansi);
    }

    #[test]
    fn no_log_flags_defer_to_env() {
        let cli = Cli::try_parse_from(["meal-filter", "fields"]).unwrap();
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.log_file.is_none());
        assert!(config.use_env_filter);
    }
}
