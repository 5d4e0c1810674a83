//! frameclip
//!
//! Trim a video to a frame range and optionally mix audio tracks with ffmpeg.
//!
//! # Usage
//!
//! ```bash
//! frameclip input.mkv -sf 30 -ef 90
//! frameclip input.mkv -sf 30 -ef 90 -at 0,1 -cv -o clip.mkv
//! frameclip input.mkv -ef 300 --dry-run
//! ```

use anyhow::Result;
use clap::Parser;

use frameclip::cli::{commands, normalize_args, Cli};

/// Main entry point for frameclip
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    commands::run(cli).await
}
