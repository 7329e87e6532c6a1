// File: src/services/autosell.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info};

use crate::models::{ConversionOutcome, GiftId, SellReport};
use crate::platforms::GiftPlatform;
use crate::Error;

/// Finds gifts not yet seen during this process run and converts the
/// sellable ones into stars.
///
/// The dedup set grows for the lifetime of the process and is never
/// persisted; after a restart every gift is re-evaluated, which is safe
/// because the service rejects double conversions with a recognizable
/// error.
pub struct AutoSellEngine {
    platform: Arc<dyn GiftPlatform>,
    processed: Mutex<HashSet<GiftId>>,
    sale_delay: Duration,
}

impl AutoSellEngine {
    pub fn new(platform: Arc<dyn GiftPlatform>, sale_delay: Duration) -> Self {
        Self {
            platform,
            processed: Mutex::new(HashSet::new()),
            sale_delay,
        }
    }

    /// One sell pass. Only a failed listing fetch aborts the pass;
    /// every per-gift failure is recorded and the pass moves on.
    pub async fn sell_new_gifts(&self) -> Result<SellReport, Error> {
        // Always act on a fresh listing. A stale one could still name
        // gifts that have since been converted and removed.
        let gifts = self.platform.list_received_gifts().await?;

        let mut report = SellReport::default();
        if gifts.is_empty() {
            info!("inventory is empty, nothing to sell");
            return Ok(report);
        }

        for gift in gifts {
            // Marked processed before the attempt: at most one conversion
            // attempt per gift per process lifetime, even when the attempt
            // fails with something that looks retryable.
            {
                let mut processed = self.processed.lock().unwrap();
                if !processed.insert(gift.gift_id.clone()) {
                    continue;
                }
            }
            report.new_count += 1;

            if !gift.is_convertible() {
                info!("new gift {} is not sellable", gift.gift_id);
                report
                    .outcomes
                    .push((gift.gift_id, ConversionOutcome::NotConvertible));
                continue;
            }

            match self.platform.convert_gift(&gift.gift_id).await {
                Ok(earned) => {
                    info!("sold gift {} for {} stars", gift.gift_id, earned);
                    report.total_earned += earned;
                    report.sold_count += 1;
                    report
                        .outcomes
                        .push((gift.gift_id, ConversionOutcome::Converted { earned }));
                    // Politeness pause toward the service, not a
                    // correctness requirement.
                    sleep(self.sale_delay).await;
                }
                Err(Error::GiftAlreadyConverted) => {
                    info!("gift {} was already converted, skipping", gift.gift_id);
                    report
                        .outcomes
                        .push((gift.gift_id, ConversionOutcome::AlreadyConverted));
                }
                Err(e) => {
                    error!("failed to convert gift {}: {:?}", gift.gift_id, e);
                    report.outcomes.push((
                        gift.gift_id,
                        ConversionOutcome::Failed {
                            reason: e.to_string(),
                        },
                    ));
                }
            }
        }

        if report.sold_count > 0 {
            info!(
                "sold {} new gift(s) for {} stars",
                report.sold_count, report.total_earned
            );
        } else if report.new_count > 0 {
            info!("{} new gift(s), none sellable", report.new_count);
        } else {
            info!("no new gifts");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GiftId, ReceivedGift};
    use crate::platforms::MockGiftPlatform;
    use mockall::predicate::eq;

    fn gift(id: &str, convert_price: i64) -> ReceivedGift {
        ReceivedGift {
            gift_id: GiftId::remote(id),
            price: convert_price,
            convert_price,
        }
    }

    #[tokio::test]
    async fn non_convertible_gift_is_counted_but_never_converted() {
        let mut platform = MockGiftPlatform::new();
        platform
            .expect_list_received_gifts()
            .times(1)
            .returning(|| Ok(vec![gift("a", 0)]));
        platform.expect_convert_gift().times(0);

        let engine = AutoSellEngine::new(Arc::new(platform), Duration::ZERO);
        let report = engine.sell_new_gifts().await.unwrap();
        assert_eq!(report.new_count, 1);
        assert_eq!(report.sold_count, 0);
        assert_eq!(report.total_earned, 0);
        assert_eq!(
            report.outcomes,
            vec![(GiftId::remote("a"), ConversionOutcome::NotConvertible)]
        );
    }

    #[tokio::test]
    async fn already_converted_is_absorbed_as_success() {
        let mut platform = MockGiftPlatform::new();
        platform
            .expect_list_received_gifts()
            .times(1)
            .returning(|| Ok(vec![gift("a", 10)]));
        platform
            .expect_convert_gift()
            .with(eq(GiftId::remote("a")))
            .times(1)
            .returning(|_| Err(Error::GiftAlreadyConverted));

        let engine = AutoSellEngine::new(Arc::new(platform), Duration::ZERO);
        let report = engine.sell_new_gifts().await.unwrap();
        assert_eq!(report.new_count, 1);
        assert_eq!(report.sold_count, 0);
        assert_eq!(report.total_earned, 0);
        assert_eq!(
            report.outcomes,
            vec![(GiftId::remote("a"), ConversionOutcome::AlreadyConverted)]
        );
    }

    #[tokio::test]
    async fn listing_failure_aborts_the_pass() {
        let mut platform = MockGiftPlatform::new();
        platform
            .expect_list_received_gifts()
            .times(1)
            .returning(|| Err(Error::Platform("listing unavailable".to_string())));
        platform.expect_convert_gift().times(0);

        let engine = AutoSellEngine::new(Arc::new(platform), Duration::ZERO);
        assert!(engine.sell_new_gifts().await.is_err());
    }

    #[tokio::test]
    async fn empty_listing_is_a_no_op() {
        let mut platform = MockGiftPlatform::new();
        platform
            .expect_list_received_gifts()
            .times(1)
            .returning(|| Ok(vec![]));

        let engine = AutoSellEngine::new(Arc::new(platform), Duration::ZERO);
        let report = engine.sell_new_gifts().await.unwrap();
        assert_eq!(report.new_count, 0);
        assert_eq!(report.sold_count, 0);
    }
}
