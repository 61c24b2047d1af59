use clap::Parser;

use vecwise_metrics::config::{StaticConfig, get_config, init_config};
use vecwise_metrics::runtime::run_server;
use vecwise_metrics::system::init_logging;

/// Prometheus exporter for vector search service metrics
#[derive(Debug, Parser)]
#[command(name = "vecwise-metrics", version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Print a sample configuration and exit
    #[arg(long)]
    generate_config: bool,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.generate_config {
        println!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    init_config(args.config.as_deref());
    let config = get_config();

    // Guard must outlive the server so buffered log lines are flushed
    let _log_guard = init_logging(&config.logging);

    run_server().await
}
