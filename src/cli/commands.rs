//! Command implementations

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::{AppConfig, LogFormat, TomlConfigAdapter, TracingLogAdapter};
use crate::app::DefaultAppContainer;
use crate::cli::Cli;

/// Resolve configuration with precedence CLI > env > file > defaults
///
/// Environment variables arrive through clap's `env` attributes, so they are
/// already folded into the CLI values here.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = TomlConfigAdapter::load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(ffmpeg) = &cli.ffmpeg {
        config.ffmpeg = ffmpeg.clone();
    }
    if let Some(ffprobe) = &cli.ffprobe {
        config.ffprobe = ffprobe.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }

    Ok(config)
}

/// Execute the clip command
pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    let log_format: LogFormat = config.log_format.parse()?;
    TracingLogAdapter::init(&config.log_level, log_format)?;
    debug!(?config, "Configuration resolved");

    let container = DefaultAppContainer::new(&config);
    let interactor = container.clip_interactor();
    let request = cli.clip.to_request();

    info!("Input: {}", request.input.display());

    if cli.dry_run {
        let plan = interactor
            .plan(&request)
            .await
            .context("Failed to plan clip")?;
        if cli.json {
            let json = serde_json::to_string_pretty(&plan)
                .context("Failed to serialize plan to JSON")?;
            println!("{}", json);
        } else {
            let command = interactor.command_line(&plan);
            println!("{}", shell_join(&command));
        }
        return Ok(());
    }

    let response = interactor
        .execute(&request)
        .await
        .context("Failed to clip video")?;
    info!(
        "Clip operation completed successfully: {}",
        response.plan.output.display()
    );
    Ok(())
}

/// Join arguments into a string a POSIX shell would split back the same way
fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let is_plain = |c: char| c.is_ascii_alphanumeric() || "_-./:=,+@%".contains(c);
    if !arg.is_empty() && arg.chars().all(is_plain) {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
