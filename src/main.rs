mod app;
mod application;
mod config;
mod domain;
mod exchanges;
mod infrastructure;
mod shared;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Cross-exchange arbitrage scanner with transfer-network validation")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Minimum acceptable spread in percent
    #[arg(long)]
    min_profit: Option<f64>,

    /// Quote assets to consider (comma-separated, empty = all)
    #[arg(long)]
    quote_assets: Option<String>,

    /// Exchanges to scan (comma-separated)
    #[arg(long)]
    exchanges: Option<String>,

    /// Delay between shared-pair groups in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// First shared-group index to process
    #[arg(long)]
    start_index: Option<usize>,

    /// One past the last shared-group index to process
    #[arg(long)]
    end_index: Option<usize>,

    /// Directory for persisted results
    #[arg(long)]
    data_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    // Priority: CLI args > config file > defaults
    let mut cfg = if let Some(path) = &args.config {
        config::Config::from_file(path)?
    } else {
        config::Config::default()
    };

    if let Some(min_profit) = args.min_profit {
        cfg.scanner.min_profit_percentage = min_profit;
    }
    if let Some(quote_assets) = args.quote_assets {
        cfg.scanner.quote_assets = quote_assets
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(exchanges) = args.exchanges {
        cfg.exchanges.enabled = exchanges
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(delay_ms) = args.delay_ms {
        cfg.scanner.inter_group_delay_ms = delay_ms;
    }
    if let Some(start_index) = args.start_index {
        cfg.scanner.start_index = start_index;
    }
    if args.end_index.is_some() {
        cfg.scanner.end_index = args.end_index;
    }
    if let Some(data_dir) = args.data_dir {
        cfg.store.data_dir = data_dir;
    }

    app::run(cfg).await
}
