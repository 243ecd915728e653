//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Domain types as CoinGecko and the proxy serve them
//! - `wire.rs` — Query builders and raw upstream shapes
//! - `convert.rs` — Conversions from raw upstream shapes
//! - `client.rs` — Sub-client with HTTP methods
//!
//! `watchlist` has no wire side; it is client state behind a storage port.

pub mod chart;
pub mod coin;
pub mod watchlist;
