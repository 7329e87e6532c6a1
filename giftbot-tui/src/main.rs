// Interactive gift-manager client
use std::io::{stdout, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use giftbot_core::platforms::telegram::TelegramGiftClient;
use giftbot_core::platforms::GiftPlatform;
use giftbot_core::services::{AutoSellEngine, InventoryService, TransferService};
use giftbot_core::GiftBotConfig;
use giftbot_tui::commands::{dispatch, CommandContext};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "giftbot", about = "Automated gift manager for a Telegram account")]
struct Args {
    /// Bridge endpoint; overrides GIFTBOT_BRIDGE_URL.
    #[arg(long)]
    bridge_url: Option<String>,

    /// Monitor poll interval in seconds; overrides GIFTBOT_POLL_INTERVAL_SECS.
    #[arg(long)]
    poll_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut config = GiftBotConfig::from_env()?;
    if let Some(url) = args.bridge_url {
        config.bridge_url = url;
    }
    if let Some(secs) = args.poll_interval {
        config.poll_interval = Duration::from_secs(secs);
    }

    println!("GiftBot TUI");
    println!("Connecting to bridge at {}...", config.bridge_url);

    // Session establishment is the one failure that ends the process.
    let platform: Arc<dyn GiftPlatform> =
        Arc::new(TelegramGiftClient::connect(&config).await?);
    info!("bridge session established at {}", config.bridge_url);
    println!("Session established.");

    let inventory = Arc::new(InventoryService::new(platform.clone()));
    let engine = Arc::new(AutoSellEngine::new(platform.clone(), config.sale_delay));
    let transfer = Arc::new(TransferService::new(platform));

    let ctx = Arc::new(CommandContext {
        inventory: inventory.clone(),
        engine,
        transfer,
        config,
        last_offers: Mutex::new(Vec::new()),
    });

    match inventory.snapshot().await {
        Ok(snap) => println!("\n{}", snap.render()),
        Err(e) => println!("Could not fetch account status: {}", e),
    }

    println!("\nType 'help' for available commands.\n");

    // Main input loop
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("giftbot> ");
        stdout().flush()?;

        let line = match reader.next_line().await? {
            Some(line) => line.trim().to_string(),
            None => break, // EOF
        };

        if line.is_empty() {
            continue;
        }

        let (quit_requested, output) = dispatch(&line, &ctx).await;

        if let Some(msg) = output {
            println!("{}", msg);
        }
        if quit_requested {
            break;
        }
    }

    println!("Goodbye.");
    Ok(())
}
