// File: src/models/gift.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a gift sitting in the account's inventory.
///
/// The remote service normally assigns one, stable across polls. When a
/// listing entry arrives without an id, the client mints a `Synthetic`
/// id so two id-less gifts never collide in the dedup set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GiftId {
    Remote(String),
    Synthetic(Uuid),
}

impl GiftId {
    pub fn remote(id: impl Into<String>) -> Self {
        GiftId::Remote(id.into())
    }

    pub fn synthetic() -> Self {
        GiftId::Synthetic(Uuid::new_v4())
    }
}

impl std::fmt::Display for GiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GiftId::Remote(id) => write!(f, "{}", id),
            GiftId::Synthetic(uuid) => write!(f, "local-{}", uuid),
        }
    }
}

/// A gift currently held by the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedGift {
    pub gift_id: GiftId,
    /// What the sender paid for it, in stars.
    pub price: i64,
    /// What converting it yields, in stars. Zero means non-convertible;
    /// a missing wire field decodes to zero.
    pub convert_price: i64,
}

impl ReceivedGift {
    pub fn is_convertible(&self) -> bool {
        self.convert_price > 0
    }
}

/// A gift the account could buy and send to someone else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasableGift {
    pub gift_id: String,
    pub price: i64,
}

/// What happened to one newly seen gift during a sell pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Converted { earned: i64 },
    /// The service had already converted it; terminal success, no earnings.
    AlreadyConverted,
    NotConvertible,
    Failed { reason: String },
}

/// Aggregate result of one sell pass over the inventory.
#[derive(Debug, Clone, Default)]
pub struct SellReport {
    pub total_earned: i64,
    pub sold_count: u32,
    pub new_count: u32,
    pub outcomes: Vec<(GiftId, ConversionOutcome)>,
}
