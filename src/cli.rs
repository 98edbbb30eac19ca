use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Target Picker - choose what a communication antenna points at
#[derive(Parser, Debug)]
#[command(name = "target-picker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the target tree of an antenna
    Tree(TreeArgs),

    /// Launch the interactive picker
    Tui(TuiArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Scenario file (built-in Kerbol system if omitted)
    pub scenario: Option<PathBuf>,

    /// Antenna to show the tree for (first antenna if omitted)
    #[arg(short, long, value_name = "NAME")]
    pub antenna: Option<String>,

    /// Point the antenna at this body or satellite first
    #[arg(short, long, value_name = "NAME")]
    pub target: Option<String>,

    /// Collapse a node (can be specified multiple times)
    #[arg(long, value_name = "NAME")]
    pub collapse: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Append each row's color
    #[arg(long)]
    pub colors: bool,
}

#[derive(Args, Debug)]
pub struct TuiArgs {
    /// Scenario file (built-in Kerbol system if omitted)
    pub scenario: Option<PathBuf>,

    /// Antenna to pick a target for (first antenna if omitted)
    #[arg(short, long, value_name = "NAME")]
    pub antenna: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}
