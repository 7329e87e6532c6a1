// File: src/services/inventory.rs

use std::sync::Arc;

use crate::models::BalanceSnapshot;
use crate::platforms::GiftPlatform;
use crate::Error;

/// Read-only view over the account: current balance plus derived gift
/// inventory metrics. Safe to call as often as wanted; every call
/// observes the remote state fresh.
pub struct InventoryService {
    platform: Arc<dyn GiftPlatform>,
}

impl InventoryService {
    pub fn new(platform: Arc<dyn GiftPlatform>) -> Self {
        Self { platform }
    }

    /// Builds a complete snapshot, or fails without one. If either the
    /// balance fetch or the listing fetch errors, no partial snapshot
    /// is ever handed out.
    pub async fn snapshot(&self) -> Result<BalanceSnapshot, Error> {
        let balance = self.platform.get_star_balance().await?;
        let gifts = self.platform.list_received_gifts().await?;
        Ok(BalanceSnapshot::from_parts(balance, &gifts))
    }
}
