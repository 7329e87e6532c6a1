// File: giftbot-tui/src/commands/gift.rs

use std::sync::{Arc, Mutex};
use std::time::Duration;

use giftbot_core::models::PurchasableGift;
use giftbot_core::services::{AutoSellEngine, InventoryService, TransferService};
use giftbot_core::tasks::AutoMonitor;
use giftbot_core::{Error, GiftBotConfig};
use tokio::sync::watch;

use crate::display::PrintSink;

/// Everything the command handlers need, shared across the input loop.
pub struct CommandContext {
    pub inventory: Arc<InventoryService>,
    pub engine: Arc<AutoSellEngine>,
    pub transfer: Arc<TransferService>,
    pub config: GiftBotConfig,
    /// Offers shown by the last `offers` call, addressed by `send <n>`.
    pub last_offers: Mutex<Vec<PurchasableGift>>,
}

pub async fn handle_status(ctx: &Arc<CommandContext>) -> String {
    match ctx.inventory.snapshot().await {
        Ok(snap) => snap.render(),
        Err(e) => format!("Could not fetch account status: {}", e),
    }
}

pub async fn handle_sell(ctx: &Arc<CommandContext>) -> String {
    match ctx.engine.sell_new_gifts().await {
        Ok(report) if report.sold_count > 0 => {
            let mut out = format!(
                "Sold {} gift(s) for {} stars.",
                report.sold_count, report.total_earned
            );
            // Show the balance the sales just changed.
            match ctx.inventory.snapshot().await {
                Ok(snap) => {
                    out.push('\n');
                    out.push_str(&snap.render());
                }
                Err(e) => out.push_str(&format!("\n(status refresh failed: {})", e)),
            }
            out
        }
        Ok(report) if report.new_count > 0 => {
            format!("{} new gift(s), none sellable.", report.new_count)
        }
        Ok(_) => "No new gifts.".to_string(),
        Err(e) => format!("Sell pass failed: {}", e),
    }
}

pub async fn handle_offers(ctx: &Arc<CommandContext>) -> String {
    match ctx.transfer.offers().await {
        Ok((balance, offers)) => {
            if offers.is_empty() {
                return "No gifts available for purchase.".to_string();
            }
            let mut out = format!("Balance: {} stars\nAvailable gifts:\n", balance);
            let mut affordable = 0;
            for (i, offer) in offers.iter().enumerate() {
                let marker = if offer.price <= balance {
                    affordable += 1;
                    "ok"
                } else {
                    "--"
                };
                out.push_str(&format!(
                    "  {}. [{}] {} stars (id: {})\n",
                    i + 1,
                    marker,
                    offer.price,
                    offer.gift_id
                ));
            }
            if affordable == 0 {
                out.push_str("Not enough stars for any of these.");
            } else {
                out.push_str("Use 'send <n> <user>' to send one.");
            }
            *ctx.last_offers.lock().unwrap() = offers;
            out
        }
        Err(e) => format!("Could not list offers: {}", e),
    }
}

pub async fn handle_send(args: &[&str], ctx: &Arc<CommandContext>) -> String {
    if args.len() < 2 {
        return "Usage: send <n> <user>".to_string();
    }
    let index: usize = match args[0].parse() {
        Ok(n) if n >= 1 => n,
        _ => return format!("'{}' is not a valid offer number.", args[0]),
    };
    let recipient = args[1];

    let offer = ctx.last_offers.lock().unwrap().get(index - 1).cloned();
    let offer = match offer {
        Some(o) => o,
        None => return "No such offer. Run 'offers' first.".to_string(),
    };

    match ctx.transfer.send(recipient, &offer).await {
        Ok(new_balance) => format!(
            "Gift sent to {}. New balance: {} stars.",
            recipient, new_balance
        ),
        Err(Error::InsufficientBalance {
            required,
            available,
        }) => format!("Not enough stars: need {}, have {}.", required, available),
        Err(e) => format!("Send failed: {}", e),
    }
}

pub async fn handle_monitor(args: &[&str], ctx: &Arc<CommandContext>) -> String {
    let interval = match args.get(0) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => return format!("'{}' is not a valid interval in seconds.", raw),
        },
        None => ctx.config.poll_interval,
    };

    println!(
        "Starting auto monitor (interval: {}s). Press Ctrl-C to stop.",
        interval.as_secs()
    );
    let (tx, rx) = watch::channel(false);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(true);
        }
    });

    let monitor = AutoMonitor::new(ctx.inventory.clone(), ctx.engine.clone(), interval);
    monitor.run(rx, &PrintSink).await;
    // Don't leave the listener waiting for a Ctrl-C that now means nothing.
    ctrl_c.abort();
    "Auto monitor stopped.".to_string()
}
