//! vcworkspace - Provision Veracode SCA workspaces from application profiles

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod logging;
mod workspace;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli::run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}
