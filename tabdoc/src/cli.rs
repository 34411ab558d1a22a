use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for tabdoc
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "tabdoc: tabbed GDScript and C++ snippets for markdown docs"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Later files override earlier ones.
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the tabdoc CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render a documentation tree, expanding macro calls in markdown sources.
  Build {
    /// Directory containing the markdown sources.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory to write the rendered documentation to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
  },

  /// Format three snippet files as GDScript / C++ Header / C++ Source tabs.
  Impl {
    /// File containing the GDScript snippet.
    #[arg(long)]
    gdscript: PathBuf,

    /// File containing the C++ header snippet.
    #[arg(long)]
    header: PathBuf,

    /// File containing the C++ source snippet.
    #[arg(long)]
    source: PathBuf,

    /// Write the tabs to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Initialize a new tabdoc configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "tabdoc.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
