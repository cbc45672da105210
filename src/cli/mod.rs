//! Command-line surface of `deploy-cfg`.

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "deploy-cfg",
    version,
    about = "Resolve deployment config sections and generate service scripts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print resolved values from one config section
    Resolve(commands::resolve::ResolveArgs),
    /// Generate start_service/stop_service scripts for a deployed service
    ServerScripts(commands::server_scripts::ServerScriptsArgs),
    /// Generate run_tests.sh from a test config
    TestRunner(commands::test_runner::TestRunnerArgs),
}

impl Commands {
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Resolve(args) => commands::resolve::execute(args),
            Commands::ServerScripts(args) => commands::server_scripts::execute(args),
            Commands::TestRunner(args) => commands::test_runner::execute(args),
        }
    }
}
