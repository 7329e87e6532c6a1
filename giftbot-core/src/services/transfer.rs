// File: src/services/transfer.rs

use std::sync::Arc;

use tracing::info;

use crate::models::PurchasableGift;
use crate::platforms::GiftPlatform;
use crate::Error;

/// How many purchasable gifts `offers` shows the operator.
pub const OFFER_PREVIEW_LIMIT: usize = 10;

/// One-shot "buy a gift and send it to someone" flow. Performs a
/// read-then-act sequence with no remote-side reservation, so it must
/// not run concurrently with the auto-sell engine against the same
/// balance.
pub struct TransferService {
    platform: Arc<dyn GiftPlatform>,
}

impl TransferService {
    pub fn new(platform: Arc<dyn GiftPlatform>) -> Self {
        Self { platform }
    }

    /// Current balance plus the first `OFFER_PREVIEW_LIMIT` purchasable
    /// gifts, for the operator to pick from.
    pub async fn offers(&self) -> Result<(i64, Vec<PurchasableGift>), Error> {
        let balance = self.platform.get_star_balance().await?;
        let mut gifts = self.platform.list_purchasable_gifts().await?;
        gifts.truncate(OFFER_PREVIEW_LIMIT);
        Ok((balance, gifts))
    }

    /// Sends `gift` to `recipient` and returns the post-send balance.
    ///
    /// The balance may have moved since the offer listing, so
    /// affordability is re-checked immediately before the mutating call;
    /// a violation fails with `InsufficientBalance` and issues no send.
    pub async fn send(&self, recipient: &str, gift: &PurchasableGift) -> Result<i64, Error> {
        let balance = self.platform.get_star_balance().await?;
        if gift.price > balance {
            return Err(Error::InsufficientBalance {
                required: gift.price,
                available: balance,
            });
        }

        self.platform.send_gift(recipient, &gift.gift_id).await?;
        info!(
            "sent gift {} ({} stars) to {}",
            gift.gift_id, gift.price, recipient
        );
        self.platform.get_star_balance().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::MockGiftPlatform;

    #[tokio::test]
    async fn unaffordable_gift_issues_no_send() {
        let mut platform = MockGiftPlatform::new();
        platform
            .expect_get_star_balance()
            .times(1)
            .returning(|| Ok(5));
        platform.expect_send_gift().times(0);

        let transfer = TransferService::new(Arc::new(platform));
        let gift = PurchasableGift {
            gift_id: "deluxe".to_string(),
            price: 50,
        };
        match transfer.send("@friend", &gift).await {
            Err(Error::InsufficientBalance {
                required,
                available,
            }) => {
                assert_eq!(required, 50);
                assert_eq!(available, 5);
            }
            other => panic!("expected InsufficientBalance, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn offers_are_capped_at_the_preview_limit() {
        let mut platform = MockGiftPlatform::new();
        platform
            .expect_get_star_balance()
            .times(1)
            .returning(|| Ok(100));
        platform
            .expect_list_purchasable_gifts()
            .times(1)
            .returning(|| {
                Ok((0..14)
                    .map(|i| PurchasableGift {
                        gift_id: format!("g{}", i),
                        price: i,
                    })
                    .collect())
            });

        let transfer = TransferService::new(Arc::new(platform));
        let (balance, gifts) = transfer.offers().await.unwrap();
        assert_eq!(balance, 100);
        assert_eq!(gifts.len(), OFFER_PREVIEW_LIMIT);
    }
}
