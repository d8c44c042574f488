use std::time::Instant;

use clap::Parser;

use netdraw::{Cli, NetdrawOptions, run_main};
use netdraw_core::Result;
use netdraw_dot::GraphvizBackend;

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = NetdrawOptions::from(args);
    let backend = GraphvizBackend::new();

    if let Err(e) = run_main(&opts, &backend) {
        tracing::error!(kind = e.kind().as_str(), error = %e, "execution failed");
        return Err(e);
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, output = %opts.output.display(), "complete");
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
