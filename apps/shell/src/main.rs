//! # Pambala AO Entry Point
//!
//! ```text
//! $ pambala --config ./pambala.toml
//! Pambala AO - escreva 'help' para ver os comandos.
//! [home] > login caixa@pambala.ao segredo
//! [home] > go sales
//! [sales] > toggle 1
//! ```
//!
//! The actual setup is in lib.rs so tests can drive it.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "pambala", about = "Pambala AO shop manager", version)]
struct Cli {
    /// Config file (defaults to $PAMBALA_CONFIG, then the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    pambala_shell::run(cli.config).await
}
