// File: src/models/mod.rs

pub mod gift;
pub mod snapshot;

pub use gift::{ConversionOutcome, GiftId, PurchasableGift, ReceivedGift, SellReport};
pub use snapshot::{BalanceSnapshot, GiftDetail};
