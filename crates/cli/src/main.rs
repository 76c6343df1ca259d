mod cmd;
mod logging;
mod prompt;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fillin",
    version,
    about = "Fill template placeholders from prompts, flags, or answer files"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fill a template and print or write the result
    Fill(FillArgs),

    /// Show the variables a template declares
    Vars(VarsArgs),

    /// List logical template names discovered under templates_dir
    List,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct FillArgs {
    /// Template to fill: a logical name (e.g. "daily" or "work/standup"),
    /// a file path, or `-` for stdin
    pub template: String,

    /// Supply a value up front, e.g. --var due=2021-06-01 (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Read values from a JSON object file
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Never prompt; fail when a variable has no value
    #[arg(long)]
    pub batch: bool,

    /// Write the result to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct VarsArgs {
    /// Template to inspect (same forms as `fill`)
    pub template: String,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fill(args) => cmd::fill::run(cli.config.as_deref(), args),
        Commands::Vars(args) => cmd::vars::run(cli.config.as_deref(), args),
        Commands::List => cmd::list::run(cli.config.as_deref()),
        Commands::Completions(args) => cmd::completions::run(&args),
    }
}
