//! CLI module for frameclip
//!
//! This module handles command-line argument parsing and command execution.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

pub mod args;
pub mod commands;

/// Trim a video to a frame range and optionally mix audio tracks using ffmpeg
#[derive(Parser, Debug)]
#[command(name = "frameclip")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub clip: args::ClipArgs,

    /// Print the ffmpeg command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the resolved plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Configuration file [default: ./frameclip.toml if present]
    #[arg(long, env = "FRAMECLIP_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long, env = "FRAMECLIP_FFMPEG", value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe executable
    #[arg(long, env = "FRAMECLIP_FFPROBE", value_name = "PATH")]
    pub ffprobe: Option<PathBuf>,

    /// Logging level or filter directive
    #[arg(long, env = "FRAMECLIP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format (pretty or json)
    #[arg(long, env = "FRAMECLIP_LOG_FORMAT")]
    pub log_format: Option<String>,
}

/// Two-letter single-dash aliases, the long flags they stand for, and whether they take a value
const SHORT_ALIASES: &[(&str, &str, bool)] = &[
    ("-sf", "--start-frame", true),
    ("-ef", "--end-frame", true),
    ("-at", "--audio-tracks", true),
    ("-cv", "--copy-video", false),
    ("-nl", "--no-loudnorm", false),
];

/// Rewrite `-sf 10`, `-sf=10` and `-sf10` style aliases to their long forms
///
/// clap only supports single-character short flags, so these are expanded
/// before parsing. Arguments after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            for &(alias, long, takes_value) in SHORT_ALIASES {
                if text == alias {
                    return OsString::from(long);
                }
                let Some(rest) = text.strip_prefix(alias) else {
                    continue;
                };
                if let Some(value) = rest.strip_prefix('=') {
                    return OsString::from(format!("{}={}", long, value));
                }
                // Attached value such as `-sf30` or `-at0,1`
                if takes_value && rest.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
                    return OsString::from(format!("{}={}", long, rest));
                }
            }
            arg
        })
        .collect()
}
