// File: src/tasks/monitor.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info};

use crate::models::BalanceSnapshot;
use crate::services::{AutoSellEngine, InventoryService};

/// Display seam for the poller. The operator surface decides how a
/// snapshot reaches the screen; the poller only decides when.
pub trait StatusSink: Send + Sync {
    fn status(&self, snapshot: &BalanceSnapshot);
}

/// Unattended polling loop: show status, sell whatever is new, show
/// status again after any sale, wait, repeat.
pub struct AutoMonitor {
    inventory: Arc<InventoryService>,
    engine: Arc<AutoSellEngine>,
    interval: Duration,
}

impl AutoMonitor {
    pub fn new(
        inventory: Arc<InventoryService>,
        engine: Arc<AutoSellEngine>,
        interval: Duration,
    ) -> Self {
        Self {
            inventory,
            engine,
            interval,
        }
    }

    /// Runs until `shutdown` flips to true. Cancellation is observed at
    /// the top of the loop and during the wait, so a stop request takes
    /// effect within one interval, never mid-operation. No single
    /// failure ends the loop.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>, sink: &dyn StatusSink) {
        info!("auto monitor started (interval: {:?})", self.interval);
        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.inventory.snapshot().await {
                Ok(snap) => sink.status(&snap),
                Err(e) => error!("status refresh failed: {:?}", e),
            }

            match self.engine.sell_new_gifts().await {
                Ok(report) if report.sold_count > 0 => {
                    // Show the balance the sales just changed.
                    match self.inventory.snapshot().await {
                        Ok(snap) => sink.status(&snap),
                        Err(e) => error!("status refresh after sale failed: {:?}", e),
                    }
                }
                Ok(_) => {}
                Err(e) => error!("sell pass failed: {:?}", e),
            }

            tokio::select! {
                _ = sleep(self.interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("auto monitor stopped");
    }
}

/// Spawns the monitor on its own task; the caller keeps the watch
/// sender to stop it.
pub fn spawn_monitor_task(
    monitor: Arc<AutoMonitor>,
    shutdown: watch::Receiver<bool>,
    sink: Arc<dyn StatusSink>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        monitor.run(shutdown, sink.as_ref()).await;
    })
}
