// File: src/platforms/telegram/mod.rs

pub mod client;

pub use client::TelegramGiftClient;
