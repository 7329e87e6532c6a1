// File: giftbot-tui/src/display.rs

use giftbot_core::models::BalanceSnapshot;
use giftbot_core::tasks::StatusSink;

/// Stdout-backed status sink used by the interactive loop and the
/// monitor command.
pub struct PrintSink;

impl StatusSink for PrintSink {
    fn status(&self, snapshot: &BalanceSnapshot) {
        println!("\n{}\n", snapshot.render());
    }
}
