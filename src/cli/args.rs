//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: report multi-line keys, parse errors and key coverage
//! - `transform`: rewrite sources into marker form
//! - `bake`: inline translations into a built bundle, once per locale
//! - `resolve`: look up and interpolate one key at runtime
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Transform(cmd)) => cmd.common.verbose,
            Some(Command::Bake(cmd)) => cmd.common.verbose,
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all project commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root, where the config file is searched (defaults to the current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locale files directory (overrides config file)
    #[arg(long)]
    pub locales_dir: Option<PathBuf>,

    /// Default locale (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TransformCommand {
    /// Directory receiving the rewritten source tree
    #[arg(long, short)]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct BakeCommand {
    /// Bundle output directory containing marker calls
    pub bundle_dir: PathBuf,

    /// Directory receiving one localized copy per locale
    #[arg(long, short)]
    pub out_dir: PathBuf,

    /// Locales to bake (default: all configured locales)
    /// Can be specified multiple times: --locale en --locale nl
    #[arg(long)]
    pub locale: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Translation key, e.g. "Hello $1!"
    pub key: String,

    /// Parameters; JSON numbers, booleans and null keep their type
    pub params: Vec<String>,

    /// Locale to resolve in (default: the default locale)
    #[arg(long)]
    pub locale: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check sources and locale files for localization issues
    Check(CheckCommand),
    /// Rewrite localization templates in the sources into marker calls
    Transform(TransformCommand),
    /// Inline translations into a built bundle, one output tree per locale
    Bake(BakeCommand),
    /// Resolve a key through the runtime path and print the result
    Resolve(ResolveCommand),
    /// Initialize a new .i18nbakerc.json configuration file
    Init,
}
