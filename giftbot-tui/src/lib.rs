// File: giftbot-tui/src/lib.rs

pub mod commands;
pub mod display;

pub use display::PrintSink;
