// File: src/platforms/telegram/client.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::GiftBotConfig;
use crate::models::{GiftId, PurchasableGift, ReceivedGift};
use crate::platforms::GiftPlatform;
use crate::Error;

/// Marker the bridge embeds in the error body when a conversion targets
/// a gift the service already converted.
const ALREADY_CONVERTED_MARKER: &str = "GIFT_ALREADY_CONVERTED";

/// HTTP client for the MTProto bridge sidecar. The bridge exposes the
/// user-session gift methods as plain JSON POST endpoints; this client
/// owns nothing but the session token and the base URL.
pub struct TelegramGiftClient {
    http_client: Client,
    base_url: String,
    session_token: String,
}

/// JSON shape of one inventory entry from `getChatGifts`.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GiftJson {
    id: Option<String>,
    price: i64,
    convert_price: i64,
}

/// One page of `getChatGifts`. An empty or missing `next_offset` ends
/// the drain.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GiftPageJson {
    gifts: Vec<GiftJson>,
    next_offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BalanceJson {
    balance: i64,
}

#[derive(Debug, Deserialize)]
struct ConvertJson {
    earned: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AvailableGiftJson {
    id: String,
    price: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct MeJson {
    id: i64,
    username: Option<String>,
}

impl TelegramGiftClient {
    /// Connects to the bridge and verifies the session with `getMe`.
    /// A failure here is the one condition the process treats as fatal.
    pub async fn connect(config: &GiftBotConfig) -> Result<Self, Error> {
        let client = Self {
            http_client: Client::new(),
            base_url: config.bridge_url.trim_end_matches('/').to_string(),
            session_token: config.session_token.clone(),
        };

        let me: MeJson = client
            .call("getMe", json!({}))
            .await
            .map_err(|e| Error::Auth(format!("session check failed: {}", e)))?;
        info!(
            "Telegram session established: account id={} username={:?}",
            me.id, me.username
        );
        Ok(client)
    }

    async fn call<T>(&self, method: &str, params: Value) -> Result<T, Error>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, method);
        let resp = self
            .http_client
            .post(&url)
            .bearer_auth(&self.session_token)
            .json(&params)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            if body.contains(ALREADY_CONVERTED_MARKER) {
                return Err(Error::GiftAlreadyConverted);
            }
            return Err(Error::Platform(format!(
                "{} returned {}: {}",
                method, status, body
            )));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl GiftPlatform for TelegramGiftClient {
    async fn get_star_balance(&self) -> Result<i64, Error> {
        let out: BalanceJson = self.call("getStarsBalance", json!({})).await?;
        Ok(out.balance)
    }

    async fn list_received_gifts(&self) -> Result<Vec<ReceivedGift>, Error> {
        // Drain every page before returning; callers rely on the listing
        // being complete.
        let mut gifts = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let params = match &offset {
                Some(o) => json!({ "chat_id": "me", "offset": o }),
                None => json!({ "chat_id": "me" }),
            };
            let page: GiftPageJson = self.call("getChatGifts", params).await?;

            for entry in page.gifts {
                let gift_id = match entry.id {
                    Some(id) => GiftId::remote(id),
                    None => {
                        warn!("gift listing entry has no id; assigning a synthetic one");
                        GiftId::synthetic()
                    }
                };
                gifts.push(ReceivedGift {
                    gift_id,
                    price: entry.price,
                    convert_price: entry.convert_price,
                });
            }

            match page.next_offset {
                Some(o) if !o.is_empty() => offset = Some(o),
                _ => break,
            }
        }
        Ok(gifts)
    }

    async fn convert_gift(&self, gift_id: &GiftId) -> Result<i64, Error> {
        let remote_id = match gift_id {
            GiftId::Remote(id) => id.as_str(),
            // A synthetic id only exists locally; the service cannot act on it.
            GiftId::Synthetic(_) => {
                return Err(Error::Platform(
                    "cannot convert a gift the service never identified".to_string(),
                ));
            }
        };
        let out: ConvertJson = self
            .call("convertGift", json!({ "gift_id": remote_id }))
            .await?;
        Ok(out.earned)
    }

    async fn list_purchasable_gifts(&self) -> Result<Vec<PurchasableGift>, Error> {
        let out: Vec<AvailableGiftJson> = self.call("getAvailableGifts", json!({})).await?;
        Ok(out
            .into_iter()
            .map(|g| PurchasableGift {
                gift_id: g.id,
                price: g.price,
            })
            .collect())
    }

    async fn send_gift(&self, recipient: &str, gift_id: &str) -> Result<(), Error> {
        let _: Value = self
            .call("sendGift", json!({ "chat_id": recipient, "gift_id": gift_id }))
            .await?;
        Ok(())
    }
}
