use clap::Parser;
use typed_cache::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => cli::check::run(args).await,
        Command::Config => cli::settings::run(),
    }
}
