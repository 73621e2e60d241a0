use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = "Example usage: terraform show -json | tfblocks import [ADDRESSES]..."
)]
pub struct Cli {
    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate import blocks
    Import(ImportArgs),
    /// Generate removed blocks
    Remove(RemoveArgs),
    /// Generate moved blocks
    Move(MoveArgs),
    /// List addresses of matching resources, one per line
    List(FilterArgs),
}

impl Command {
    pub fn filter(&self) -> &FilterArgs {
        match self {
            Command::Import(args) => &args.filter,
            Command::Remove(args) => &args.filter,
            Command::Move(args) => &args.filter,
            Command::List(filter) => filter,
        }
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Module or resource address patterns; `*` matches one segment
    pub addresses: Vec<String>,

    /// Terraform files, directories or quoted glob patterns to filter and group by
    #[arg(long, short = 'f', num_args = 1..)]
    pub files: Vec<PathBuf>,
}

impl FilterArgs {
    /// Whether any address pattern or file was given.
    pub fn is_filtering(&self) -> bool {
        !self.addresses.is_empty() || !self.files.is_empty()
    }
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Skip resource types that have no identifier rule
    #[arg(long)]
    pub supported_providers_only: bool,
}

#[derive(clap::Args, Debug)]
pub struct MoveArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Skip resource types that have no identifier rule
    #[arg(long)]
    pub supported_providers_only: bool,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Set `destroy = true` in removed blocks
    #[arg(long)]
    pub destroy: bool,
}
