// File: src/platforms/mod.rs

use async_trait::async_trait;

use crate::models::{GiftId, PurchasableGift, ReceivedGift};
use crate::Error;

/// The remote gift-service operations the core depends on. Every call
/// is fallible and may take seconds; callers await them sequentially,
/// never in parallel, because they all act on one shared account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GiftPlatform: Send + Sync {
    /// Current spendable balance, in stars.
    async fn get_star_balance(&self) -> Result<i64, Error>;

    /// The full current gift inventory, drained to the end.
    async fn list_received_gifts(&self) -> Result<Vec<ReceivedGift>, Error>;

    /// Converts one gift into stars, returning the amount credited.
    /// `Error::GiftAlreadyConverted` is the one failure callers treat
    /// as success.
    async fn convert_gift(&self, gift_id: &GiftId) -> Result<i64, Error>;

    /// Gifts the account could buy for someone else.
    async fn list_purchasable_gifts(&self) -> Result<Vec<PurchasableGift>, Error>;

    /// Buys `gift_id` and sends it to `recipient`.
    async fn send_gift(&self, recipient: &str, gift_id: &str) -> Result<(), Error>;
}

pub mod telegram;
