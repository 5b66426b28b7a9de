use anyhow::Result;
use clap::Parser;
use lfl_etl::core::probe::probe_endpoint;
use lfl_etl::utils::logger;
use reqwest::Client;

#[derive(Parser)]
#[command(name = "probe")]
#[command(about = "Connectivity probe for the library listing endpoint")]
struct Args {
    /// Listing endpoint to probe
    #[arg(
        long,
        default_value = "https://appapi.littlefreelibrary.org/library/pin.json"
    )]
    endpoint: String,

    /// page_size query parameter sent with the probe
    #[arg(long, default_value = "100000")]
    page_size: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Probing listing endpoint: {}", args.endpoint);

    let client = Client::new();
    let report = probe_endpoint(&client, &args.endpoint, args.page_size).await?;

    if report.success {
        println!("✅ Request successful");
    } else {
        println!("❌ Request failed with status code {}", report.status);
    }

    println!("Response headers:");
    for (name, value) in &report.headers {
        println!("  {}: {}", name, value);
    }

    Ok(())
}
