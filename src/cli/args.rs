//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Validate every key reference and the layout of strings files
//! - `resolve`: Print the resolved form of a value or key
//! - `render`: Print a component's strings with all references resolved
//! - `init`: Initialize the keyref configuration file

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

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Render(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands that load resource files.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Resource root containing the core strings file and the components directory
    /// (overrides config file)
    #[arg(long, env = "KEYREF_ROOT")]
    pub root: Option<PathBuf>,

    /// Maximum number of reference hops followed for one value (overrides config file)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Components to check (default: all, including the core strings)
    pub components: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Value to resolve, e.g. "[%key:component::group::title%]"
    pub value: String,

    /// Treat VALUE as a bare key path (component::group::title)
    #[arg(long)]
    pub key: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Component whose strings file is rendered
    pub component: String,

    /// Write the rendered JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check key references and strings file layout
    Check(CheckCommand),
    /// Resolve a value containing key references
    Resolve(ResolveCommand),
    /// Render a component's strings with every reference resolved
    Render(RenderCommand),
    /// Initialize a new .keyrefrc.json configuration file
    Init,
}
