// File: src/tasks/mod.rs

pub mod monitor;

pub use monitor::{spawn_monitor_task, AutoMonitor, StatusSink};
