use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use dashboard_core::ViewMode;
use log::LevelFilter;

use crate::terminal::logging::LogDestination;

pub fn build_cli() -> Command {
    Command::new("candidate-dashboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal dashboard for a candidate's job applications")
        .long_about("Shows the signed-in candidate's profile and applications, refreshing every 15 seconds while an interview is scheduled or in progress. Reads the bearer token from the environment variable named in the config file.")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to the RON config file")
                .default_value("dashboard.ron"),
        )
        .arg(
            Arg::new("view")
                .long("view")
                .help("Initial view")
                .value_parser(["applications", "profile"])
                .default_value("applications"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .help("Where to write log output")
                .value_parser(["terminal", "file", "both"])
                .default_value("file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub view_mode: ViewMode,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl RunOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let config_path = matches
            .get_one::<String>("config")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("dashboard.ron"));
        let view_mode = matches
            .get_one::<String>("view")
            .map(|raw| ViewMode::parse(raw))
            .unwrap_or_default();
        let log_destination = match matches.get_one::<String>("log").map(String::as_str) {
            Some("terminal") => LogDestination::Terminal,
            Some("both") => LogDestination::Both,
            _ => LogDestination::File,
        };
        let log_level = if matches.get_flag("verbose") {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        Self {
            config_path,
            view_mode,
            log_destination,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let matches = build_cli().get_matches_from(["candidate-dashboard"]);
        let options = RunOptions::from_matches(&matches);

        assert_eq!(options.config_path, PathBuf::from("dashboard.ron"));
        assert_eq!(options.view_mode, ViewMode::Applications);
        assert!(matches!(options.log_destination, LogDestination::File));
        assert_eq!(options.log_level, LevelFilter::Info);
    }

    #[test]
    fn explicit_flags() {
        let matches = build_cli().get_matches_from([
            "candidate-dashboard",
            "--config",
            "/tmp/dash.ron",
            "--view",
            "profile",
            "--log",
            "both",
            "-v",
        ]);
        let options = RunOptions::from_matches(&matches);

        assert_eq!(options.config_path, PathBuf::from("/tmp/dash.ron"));
        assert_eq!(options.view_mode, ViewMode::Profile);
        assert!(matches!(options.log_destination, LogDestination::Both));
        assert_eq!(options.log_level, LevelFilter::Debug);
    }

    #[test]
    fn unknown_view_is_rejected() {
        let result = build_cli().try_get_matches_from(["candidate-dashboard", "--view", "admin"]);
        assert!(result.is_err());
    }
}
