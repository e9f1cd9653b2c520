//! cbtc-sim library: cone-based topology control for wireless multi-hop networks.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod server;
