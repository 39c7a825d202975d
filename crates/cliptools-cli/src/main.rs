//! ClipTools - frame-pipeline helpers
//!
//! Entry point and command dispatch.

mod commands;

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage:
  cliptools since <bookmarks.txt> <frame>...
  cliptools splice <length> <ranges.json>
  cliptools descale <errors.json> [config.json]
  cliptools errors <errors.json> <height>";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("ClipTools v{} starting...", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let lines = run(&args)?;
    for line in lines {
        println!("{line}");
    }

    Ok(())
}

fn run(args: &[String]) -> Result<Vec<String>> {
    let Some((command, rest)) = args.split_first() else {
        bail!("missing command\n{USAGE}");
    };

    match command.as_str() {
        "since" => {
            let Some((path, frames)) = rest.split_first() else {
                bail!("missing bookmark file\n{USAGE}");
            };
            if frames.is_empty() {
                bail!("missing frame numbers\n{USAGE}");
            }
            let frames = frames
                .iter()
                .map(|f| {
                    f.parse::<u64>()
                        .with_context(|| format!("invalid frame number: {f}"))
                })
                .collect::<Result<Vec<_>>>()?;
            commands::since(Path::new(path), &frames)
        }
        "splice" => {
            let [length, ranges] = rest else {
                bail!("expected <length> <ranges.json>\n{USAGE}");
            };
            let length = length
                .parse::<usize>()
                .with_context(|| format!("invalid clip length: {length}"))?;
            commands::splice(length, Path::new(ranges))
        }
        "descale" => match rest {
            [table] => commands::descale(Path::new(table), None),
            [table, config] => {
                commands::descale(Path::new(table), Some(Path::new(config)))
            }
            _ => bail!("expected <errors.json> [config.json]\n{USAGE}"),
        },
        "errors" => {
            let [table, height] = rest else {
                bail!("expected <errors.json> <height>\n{USAGE}");
            };
            let height = height
                .parse::<u32>()
                .with_context(|| format!("invalid height: {height}"))?;
            commands::errors(Path::new(table), height)
        }
        other => bail!("unknown command: {other}\n{USAGE}"),
    }
}
