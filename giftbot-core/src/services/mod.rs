// File: src/services/mod.rs

pub mod autosell;
pub mod inventory;
pub mod transfer;

pub use autosell::AutoSellEngine;
pub use inventory::InventoryService;
pub use transfer::TransferService;
