// File: src/models/snapshot.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::gift::{GiftId, ReceivedGift};

/// How many per-gift lines `render` shows before cutting off.
const MAX_DETAIL_LINES: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct GiftDetail {
    pub gift_id: GiftId,
    pub price: i64,
    pub convert_price: i64,
    pub can_convert: bool,
}

/// Point-in-time view of the account: balance plus derived inventory
/// metrics. Built fresh on every request, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSnapshot {
    pub timestamp: DateTime<Utc>,
    pub balance: i64,
    pub gift_count: usize,
    pub convertible_gifts: usize,
    /// Sum of convert prices over the convertible gifts only.
    pub total_gift_value: i64,
    /// `balance + total_gift_value`.
    pub total_assets: i64,
    pub gift_details: Vec<GiftDetail>,
}

impl BalanceSnapshot {
    pub fn from_parts(balance: i64, gifts: &[ReceivedGift]) -> Self {
        let mut convertible_gifts = 0;
        let mut total_gift_value = 0;
        let mut gift_details = Vec::with_capacity(gifts.len());

        for gift in gifts {
            let can_convert = gift.is_convertible();
            if can_convert {
                convertible_gifts += 1;
                total_gift_value += gift.convert_price;
            }
            gift_details.push(GiftDetail {
                gift_id: gift.gift_id.clone(),
                price: gift.price,
                convert_price: gift.convert_price,
                can_convert,
            });
        }

        Self {
            timestamp: Utc::now(),
            balance,
            gift_count: gifts.len(),
            convertible_gifts,
            total_gift_value,
            total_assets: balance + total_gift_value,
            gift_details,
        }
    }

    /// Operator-facing rendering: headline metrics plus the first few
    /// gift detail lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "ACCOUNT STATUS [{}]\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str("========================================\n");
        out.push_str(&format!("Stars balance:     {}\n", self.balance));
        out.push_str(&format!("Gifts held:        {}\n", self.gift_count));
        out.push_str(&format!("Convertible:       {}\n", self.convertible_gifts));
        out.push_str(&format!(
            "Convertible value: {} stars\n",
            self.total_gift_value
        ));
        out.push_str(&format!("Total assets:      {} stars\n", self.total_assets));
        out.push_str("========================================");

        if !self.gift_details.is_empty() {
            out.push_str("\nGifts:");
            for (i, detail) in self.gift_details.iter().take(MAX_DETAIL_LINES).enumerate() {
                let marker = if detail.can_convert { "sellable" } else { "keep" };
                out.push_str(&format!(
                    "\n  {}. [{}] price: {} | sells for: {} stars",
                    i + 1,
                    marker,
                    detail.price,
                    detail.convert_price
                ));
            }
            if self.gift_details.len() > MAX_DETAIL_LINES {
                out.push_str(&format!(
                    "\n  ... and {} more",
                    self.gift_details.len() - MAX_DETAIL_LINES
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gift(id: &str, convert_price: i64) -> ReceivedGift {
        ReceivedGift {
            gift_id: GiftId::remote(id),
            price: convert_price * 2,
            convert_price,
        }
    }

    #[test]
    fn aggregates_convertible_gifts_only() {
        let gifts = vec![gift("a", 0), gift("b", 5), gift("c", 0), gift("d", 12)];
        let snap = BalanceSnapshot::from_parts(100, &gifts);

        assert_eq!(snap.gift_count, 4);
        assert_eq!(snap.convertible_gifts, 2);
        assert_eq!(snap.total_gift_value, 17);
        assert_eq!(snap.total_assets, 117);
        assert_eq!(snap.gift_details.len(), 4);
        assert!(!snap.gift_details[0].can_convert);
        assert!(snap.gift_details[1].can_convert);
    }

    #[test]
    fn empty_inventory_is_just_the_balance() {
        let snap = BalanceSnapshot::from_parts(42, &[]);
        assert_eq!(snap.gift_count, 0);
        assert_eq!(snap.convertible_gifts, 0);
        assert_eq!(snap.total_assets, 42);
    }

    #[test]
    fn render_caps_detail_lines() {
        let gifts: Vec<ReceivedGift> = (0..8).map(|i| gift(&format!("g{}", i), 1)).collect();
        let rendered = BalanceSnapshot::from_parts(0, &gifts).render();
        assert!(rendered.contains("... and 3 more"));
    }
}
