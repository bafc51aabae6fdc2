use anyhow::Result;
use clap::Parser;
use playground::PlaygroundClient;

mod args;

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.into_config()?;

    let reqwest_client = reqwest::Client::new();
    let client = PlaygroundClient::new(&reqwest_client);
    let summary = client.archive_user(&config).await?;

    println!("Finished processing image records.");
    println!("Total processed: {}", summary.processed);
    println!("Total downloaded: {}", summary.downloaded);

    Ok(())
}
