//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use compono_diagram::RankDir;

/// compono - render architecture documents as a Graphviz diagram
#[derive(Parser, Debug)]
#[command(name = "compono")]
#[command(version, about = "Render architecture documents as a Graphviz DOT diagram")]
#[command(long_about = r#"
compono reads every .yaml, .yml and .comp file below an input directory,
decodes them as one architecture document (areas, components, levels,
teams and types) and writes a Graphviz DOT digraph to standard output.

  compono -i ./architecture | dot -Tsvg > architecture.svg

Settings are read from compono.toml in the working directory (or the file
given with --config); command-line flags take precedence.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or configuration
  3 - Input error (missing directory, unreadable file, no input)
  4 - Decode error (malformed YAML, duplicate or unknown keys)
  5 - Diagram error (dependency on an unknown or unplaced component)
"#)]
pub struct Cli {
    /// Directory containing the architecture documents
    #[arg(short, long, env = "COMPONO_INPUT")]
    pub input: Option<PathBuf>,

    /// Configuration file (defaults to ./compono.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not emit the team legend
    #[arg(long)]
    pub no_legend: bool,

    /// Do not color components by owning team
    #[arg(long)]
    pub no_team_style: bool,

    /// Layout direction (LR, TB, RL or BT)
    #[arg(long)]
    pub rank_dir: Option<RankDir>,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
