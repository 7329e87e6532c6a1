// File: giftbot-tui/src/commands/mod.rs

use std::sync::Arc;

mod gift;

pub use gift::CommandContext;

pub async fn dispatch(line: &str, ctx: &Arc<CommandContext>) -> (bool, Option<String>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = parts.get(0).unwrap_or(&"").to_lowercase();
    let args = &parts[1..];

    match cmd.as_str() {
        "help" => {
            let help = "\
Commands:
  help
  status               show balance and gift inventory
  sell                 sell all newly seen convertible gifts now
  offers               list purchasable gifts you can afford
  send <n> <user>      send offer number <n> to <user>
  monitor [secs]       poll and auto-sell until Ctrl-C
  quit
";
            (false, Some(help.to_string()))
        }
        "status" => (false, Some(gift::handle_status(ctx).await)),
        "sell" => (false, Some(gift::handle_sell(ctx).await)),
        "offers" => (false, Some(gift::handle_offers(ctx).await)),
        "send" => (false, Some(gift::handle_send(args, ctx).await)),
        "monitor" => (false, Some(gift::handle_monitor(args, ctx).await)),
        "quit" => (true, Some("(giftbot) shutting down...".to_string())),
        _ => {
            if cmd.is_empty() {
                (false, None)
            } else {
                let msg = format!("Unknown command '{}'. Type 'help' for usage.", cmd);
                (false, Some(msg))
            }
        }
    }
}
