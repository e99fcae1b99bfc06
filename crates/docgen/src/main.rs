use crate::prelude::*;
use clap::Parser;

mod backend;
mod config;
mod controller;
mod error;
mod export;
mod generate;
mod prelude;
mod progress;
mod shell;
mod view;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate Markdown documentation for a source file, a zipped project or a GitHub repository"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Documentation backend URL
    #[clap(
        long,
        env = "DOCGEN_BASE_URL",
        global = true,
        default_value = config::ClientConfig::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Request timeout in seconds
    #[clap(long, env = "DOCGEN_TIMEOUT", global = true, default_value = "120")]
    timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "DOCGEN_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Document a single source file
    File(crate::generate::FileArgs),

    /// Document a zipped project
    Project(crate::generate::ProjectArgs),

    /// Document a GitHub repository
    Github(crate::generate::GithubArgs),

    /// Interactive session that keeps the current selection between commands
    Shell(crate::shell::ShellArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    let result = match app.command {
        SubCommands::File(args) => crate::generate::run_file(args, app.global).await,
        SubCommands::Project(args) => crate::generate::run_project(args, app.global).await,
        SubCommands::Github(args) => crate::generate::run_github(args, app.global).await,
        SubCommands::Shell(args) => crate::shell::run(args, app.global).await,
    };
    result.map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
