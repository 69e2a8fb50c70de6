//! CLI interface for buildrun.
//!
//! Non-interactive: a structured feed in, a JSON summary out.
//!
//! ```text
//! buildrun summarize run.jsonl --project App --target AppTests \
//!     --configuration Debug --default --label test
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::action::BuildAction;
use crate::config::Config;
use crate::feed;
use crate::model::BuildMetadata;
use crate::summary::Summary;

/// buildrun — bookkeeping for a single build run.
#[derive(Debug, Parser)]
#[command(name = "buildrun", version)]
pub struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file; defaults to `~/.buildrun/config.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a JSON Lines feed of steps, warnings and the final outcome,
    /// then print the build summary as JSON.
    Summarize {
        /// Feed file, one record per line.
        feed: PathBuf,

        #[command(flatten)]
        metadata: MetadataArgs,

        /// Run label (e.g. `build`, `test`). Defaults to the configured label.
        #[arg(long)]
        label: Option<String>,

        /// Write the summary to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct MetadataArgs {
    #[arg(long)]
    pub project: String,

    #[arg(long)]
    pub target: String,

    #[arg(long)]
    pub configuration: String,

    /// The configuration is the project's default.
    #[arg(long)]
    pub default: bool,
}

impl MetadataArgs {
    fn to_domain(&self) -> BuildMetadata {
        BuildMetadata::new(
            &self.project,
            &self.target,
            &self.configuration,
            self.default,
        )
    }
}

/// Execute the parsed command.
pub fn run(cli: &Cli) -> Result<(), String> {
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match &cli.command {
        Command::Summarize {
            feed,
            metadata,
            label,
            out,
            pretty,
        } => cmd_summarize(
            &config,
            feed,
            metadata,
            label.as_deref(),
            out.as_deref(),
            *pretty || config.pretty,
        ),
    }
}

fn cmd_summarize(
    config: &Config,
    feed_path: &Path,
    metadata: &MetadataArgs,
    label: Option<&str>,
    out: Option<&Path>,
    pretty: bool,
) -> Result<(), String> {
    let records = feed::load(feed_path)
        .map_err(|e| format!("failed to load {}: {e}", feed_path.display()))?;

    let label = label.unwrap_or(&config.default_label);
    let mut action = BuildAction::with_label(metadata.to_domain(), label);
    action
        .replay(records)
        .map_err(|e| format!("failed to replay {}: {e}", feed_path.display()))?;

    let summary = Summary::of(&action);
    let json = if pretty {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    }
    .map_err(|e| format!("failed to serialize summary: {e}"))?;

    match out {
        Some(path) => {
            fs::write(path, &json)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!(
                "{} {} → {}",
                action.label(),
                action.state(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::Value;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn parses_summarize() {
        let cli = parse(&[
            "buildrun",
            "summarize",
            "run.jsonl",
            "--project",
            "App",
            "--target",
            "AppTests",
            "--configuration",
            "Debug",
            "--default",
        ]);

        let Command::Summarize {
            feed, metadata, label, ..
        } = cli.command;
        assert_eq!(feed, PathBuf::from("run.jsonl"));
        assert_eq!(
            metadata.to_domain(),
            BuildMetadata::new("App", "AppTests", "Debug", true)
        );
        assert!(label.is_none());
    }

    #[test]
    fn summarize_writes_summary_file() {
        let dir = TempDir::new().unwrap();
        let feed = dir.path().join("run.jsonl");
        let out = dir.path().join("summary.json");
        let config = dir.path().join("config.toml");
        fs::write(
            &feed,
            "{\"record\":\"warning\",\"file\":\"Main.swift\",\"line\":42}\n{\"record\":\"success\"}\n",
        )
        .unwrap();
        fs::write(&config, "default-label = \"ARCHIVE\"\n").unwrap();

        let cli = parse(&[
            "buildrun",
            "--config",
            config.to_str().unwrap(),
            "summarize",
            feed.to_str().unwrap(),
            "--project",
            "App",
            "--target",
            "App",
            "--configuration",
            "Release",
            "--out",
            out.to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["label"], "Archive");
        assert_eq!(json["state"], "successful");
        assert_eq!(json["errorCount"], 0);
        assert_eq!(json["hasWarnings"], true);
    }

    #[test]
    fn summarize_fails_on_double_outcome() {
        let dir = TempDir::new().unwrap();
        let feed = dir.path().join("run.jsonl");
        let config = dir.path().join("config.toml");
        fs::write(&feed, "{\"record\":\"success\"}\n{\"record\":\"failure\"}\n").unwrap();
        fs::write(&config, "").unwrap();

        let cli = parse(&[
            "buildrun",
            "--config",
            config.to_str().unwrap(),
            "summarize",
            feed.to_str().unwrap(),
            "--project",
            "App",
            "--target",
            "App",
            "--configuration",
            "Debug",
        ]);
        let err = run(&cli).unwrap_err();
        assert!(err.contains("cannot fire failure while build is successful"));
    }
}
