use awn_cli::{init_observability, run, Cli};
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_observability(cli.log_json);
    info!(version = env!("CARGO_PKG_VERSION"), "starting awn");
    run(cli)
}
