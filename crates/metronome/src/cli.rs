//! Command-line interface handling for the Metronome runtime.
//!
//! Arguments override values from the configuration file.

use crate::config::AppConfig;
use clap::{value_parser, Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// Command line arguments parsed from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
    /// Optional override for the target frame rate
    pub target_fps: Option<u32>,
    /// Optional override for the number of frames to run
    pub max_frames: Option<u64>,
}

impl CliArgs {
    fn command() -> Command {
        Command::new("Metronome")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Frame-paced, single-threaded event loop runtime")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value("metronome.toml"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("fps")
                    .long("fps")
                    .value_name("FPS")
                    .help("Target frames per second")
                    .value_parser(value_parser!(u32)),
            )
            .arg(
                Arg::new("frames")
                    .short('n')
                    .long("frames")
                    .value_name("COUNT")
                    .help("Stop after COUNT frames (0 runs until Ctrl+C)")
                    .value_parser(value_parser!(u64)),
            )
    }

    /// Parses the process arguments. Exits with a usage message on bad input.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    /// Parses an explicit argument list (the first item is the program name).
    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("metronome.toml")),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            target_fps: matches.get_one::<u32>("fps").copied(),
            max_frames: matches.get_one::<u64>("frames").copied(),
        }
    }

    /// Applies every override present on the command line to `config`.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.json_format = true;
        }
        if let Some(fps) = self.target_fps {
            config.event_loop.target_fps = fps;
        }
        if let Some(frames) = self.max_frames {
            config.demo.max_frames = frames;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["metronome"]).unwrap();
        assert_eq!(args.config_path, PathBuf::from("metronome.toml"));
        assert_eq!(args.log_level, None);
        assert!(!args.json_logs);
        assert_eq!(args.target_fps, None);
        assert_eq!(args.max_frames, None);
    }

    #[test]
    fn test_all_flags() {
        let args = CliArgs::parse_from([
            "metronome",
            "--config",
            "custom.toml",
            "-l",
            "debug",
            "--json-logs",
            "--fps",
            "60",
            "-n",
            "120",
        ])
        .unwrap();

        assert_eq!(args.config_path, PathBuf::from("custom.toml"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.json_logs);
        assert_eq!(args.target_fps, Some(60));
        assert_eq!(args.max_frames, Some(120));
    }

    #[test]
    fn test_rejects_non_numeric_fps() {
        assert!(CliArgs::parse_from(["metronome", "--fps", "fast"]).is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config_path: PathBuf::from("unused.toml"),
            log_level: Some("warn".to_string()),
            json_logs: true,
            target_fps: Some(120),
            max_frames: Some(10),
        };

        args.apply_overrides(&mut config);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json_format);
        assert_eq!(config.event_loop.target_fps, 120);
        assert_eq!(config.demo.max_frames, 10);
    }

    #[test]
    fn test_absent_overrides_keep_file_values() {
        let mut config = AppConfig::default();
        config.logging.json_format = true;
        let args = CliArgs::parse_from(["metronome"]).unwrap();

        args.apply_overrides(&mut config);
        assert_eq!(config, {
            let mut expected = AppConfig::default();
            expected.logging.json_format = true;
            expected
        });
    }
}
