pub mod config;
pub mod logging;

pub mod batch;
pub mod catalog;
pub mod manifest;
pub mod progress;
pub mod retry;
pub mod transfer;
