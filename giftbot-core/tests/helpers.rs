// tests/helpers.rs (a small test-only module)

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use giftbot_core::models::{GiftId, PurchasableGift, ReceivedGift};
use giftbot_core::platforms::GiftPlatform;
use giftbot_core::Error;

/// Scripted in-memory stand-in for the bridge client. Converting a gift
/// removes it from the listing and credits the balance, the way the
/// real service behaves.
pub struct FakePlatform {
    pub state: Mutex<FakeState>,
}

#[derive(Default)]
pub struct FakeState {
    pub balance: i64,
    pub gifts: Vec<ReceivedGift>,
    pub purchasable: Vec<PurchasableGift>,
    /// Ids whose conversion fails with `GiftAlreadyConverted`.
    pub already_converted: Vec<GiftId>,
    /// Ids whose conversion fails with a generic platform error.
    pub failing: Vec<GiftId>,
    pub fail_listing: bool,
    pub fail_balance: bool,
    pub convert_calls: HashMap<GiftId, u32>,
    pub send_calls: Vec<(String, String)>,
}

impl FakePlatform {
    pub fn new(balance: i64, gifts: Vec<ReceivedGift>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                balance,
                gifts,
                ..FakeState::default()
            }),
        }
    }

    pub fn convert_calls_for(&self, gift_id: &GiftId) -> u32 {
        self.state
            .lock()
            .unwrap()
            .convert_calls
            .get(gift_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn send_call_count(&self) -> usize {
        self.state.lock().unwrap().send_calls.len()
    }

    pub fn balance(&self) -> i64 {
        self.state.lock().unwrap().balance
    }
}

pub fn gift(id: &str, price: i64, convert_price: i64) -> ReceivedGift {
    ReceivedGift {
        gift_id: GiftId::remote(id),
        price,
        convert_price,
    }
}

#[async_trait]
impl GiftPlatform for FakePlatform {
    async fn get_star_balance(&self) -> Result<i64, Error> {
        let state = self.state.lock().unwrap();
        if state.fail_balance {
            return Err(Error::Platform("balance unavailable".to_string()));
        }
        Ok(state.balance)
    }

    async fn list_received_gifts(&self) -> Result<Vec<ReceivedGift>, Error> {
        let state = self.state.lock().unwrap();
        if state.fail_listing {
            return Err(Error::Platform("listing unavailable".to_string()));
        }
        Ok(state.gifts.clone())
    }

    async fn convert_gift(&self, gift_id: &GiftId) -> Result<i64, Error> {
        let mut state = self.state.lock().unwrap();
        *state.convert_calls.entry(gift_id.clone()).or_insert(0) += 1;

        if state.already_converted.contains(gift_id) {
            return Err(Error::GiftAlreadyConverted);
        }
        if state.failing.contains(gift_id) {
            return Err(Error::Platform("FLOOD_WAIT_30".to_string()));
        }

        let pos = state
            .gifts
            .iter()
            .position(|g| &g.gift_id == gift_id)
            .ok_or_else(|| Error::Platform(format!("no such gift: {}", gift_id)))?;
        let sold = state.gifts.remove(pos);
        state.balance += sold.convert_price;
        Ok(sold.convert_price)
    }

    async fn list_purchasable_gifts(&self) -> Result<Vec<PurchasableGift>, Error> {
        Ok(self.state.lock().unwrap().purchasable.clone())
    }

    async fn send_gift(&self, recipient: &str, gift_id: &str) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state
            .send_calls
            .push((recipient.to_string(), gift_id.to_string()));
        let price = state
            .purchasable
            .iter()
            .find(|g| g.gift_id == gift_id)
            .map(|g| g.price);
        if let Some(price) = price {
            state.balance -= price;
        }
        Ok(())
    }
}
