//! cf-ddns - point Cloudflare A records at the current public IP.

use cf_ddns::{CloudflareClient, Credentials, IpDetector, Updater};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cf-ddns")]
#[command(about = "Update Cloudflare A records with the current public IP address")]
#[command(version)]
struct Cli {
    /// Path to the KEY=value config file (API_KEY, ZONE)
    #[arg(short, long)]
    config: PathBuf,

    /// Zone ID, overrides ZONE from the config file
    #[arg(short, long)]
    zone: Option<String>,

    /// API token, overrides API_KEY from the config file
    #[arg(short = 'a', long = "apikey")]
    api_key: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// IP echo endpoint
    #[arg(long, hide = true)]
    ip_url: Option<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let credentials = Credentials::resolve(cli.api_key, cli.zone, &cli.config)?;
    tracing::debug!("Using credentials:\n{}", credentials);

    let client = CloudflareClient::new(credentials)?;
    let detector = match cli.ip_url {
        Some(url) => IpDetector::with_url(url)?,
        None => IpDetector::new()?,
    };

    let report = Updater::new(client, detector).run().await?;

    for outcome in &report.outcomes {
        match (&outcome.body, &outcome.error) {
            (_, Some(error)) => println!("{}: error - {}", outcome.name, error),
            (Some(body), None) => println!("{}", body),
            (None, None) => println!("{}: no response body", outcome.name),
        }
    }

    Ok(())
}
