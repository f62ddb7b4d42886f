use bam::cli::Cli;
use bam::bootstrap;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.tracing_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = bootstrap::run(&cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
