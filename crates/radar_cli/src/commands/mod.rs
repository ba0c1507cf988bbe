//! CLI command definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod inspect;
pub mod publishers;
pub mod render;

/// runradar - turn a radar directory into visualizer input
#[derive(Parser)]
#[command(name = "runradar")]
#[command(version, about = "runradar - turn a radar directory into visualizer input")]
#[command(long_about = r#"
runradar reads a technology radar described as a directory tree and
renders it for an external radar visualizer.

LAYOUT:
  <radar>/specs.yml                          rings and quadrants
  <radar>/<quadrant.id>/<ring.id>/*.yaml     one blip per file

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Structural error
  5 - Parse error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a radar with a publisher
    Render(render::RenderArgs),

    /// Show the rings, quadrants and blips of a radar
    Inspect(inspect::InspectArgs),

    /// List available publishers
    Publishers,
}

/// Radar definition directory argument shared by commands.
#[derive(clap::Args)]
pub struct RadarInput {
    /// Radar definition directory
    #[arg(default_value = "./radar")]
    pub input: PathBuf,
}

/// Right-aligned `label: value` lines, silenced by `--quiet`.
pub struct Report {
    quiet: bool,
}

impl Report {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn line(&self, label: &str, value: impl std::fmt::Display) {
        if !self.quiet {
            println!("{}", format_line(label, value));
        }
    }
}

fn format_line(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:>12}: {}", label, value)
}
