//! # cryptodash
//!
//! Data layer for a cryptocurrency dashboard backed by CoinGecko.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, formatting, errors
//! 2. **Proxy** — axum server that holds the CoinGecko key and normalizes failures
//! 3. **HTTP API** — `DashboardHttp` with retry, validation and cancellation
//! 4. **High-Level Client** — `DashboardClient` with nested sub-clients
//! 5. **State** — `Watchlist`, persisted through a key/value storage port
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cryptodash::prelude::*;
//! use std::sync::Arc;
//!
//! let client = DashboardClient::builder()
//!     .base_url("http://localhost:3000")
//!     .build()?;
//!
//! let coins = client.coins().markets(1, 50).await?;
//! let chart = client.charts().get(&CoinId::from("bitcoin"), ChartWindow::Month1).await?;
//!
//! let mut watchlist = Watchlist::open(Arc::new(FileStore::new("./data")));
//! watchlist.add("bitcoin")?;
//! let watched = client.coins().watchlist(&watchlist).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display helpers used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, sub-clients.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL and limit constants.
pub mod network;

// ── Layer 2: Proxy ───────────────────────────────────────────────────────────

/// CoinGecko proxy server.
#[cfg(feature = "proxy")]
pub mod proxy;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies and cancellation.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `DashboardClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{ChartWindow, CoinId};

    // Domain types — coin
    pub use crate::domain::coin::{
        has_next_page, Coin, CoinDetail, MarketData, MarketView, MarketsQuery, SortKey, SortOrder,
    };

    // Domain types — chart
    pub use crate::domain::chart::ChartPoint;

    // State containers
    pub use crate::domain::watchlist::{FileStore, KeyValueStore, MemoryStore, Watchlist};

    // Errors
    pub use crate::error::{ErrorCategory, HttpError, SdkError, WatchlistError};

    // Network
    pub use crate::network::DEFAULT_PROXY_URL;

    // HTTP client + sub-clients
    pub use crate::client::{ChartsClient, CoinsClient, DashboardClient, DashboardClientBuilder};
    pub use crate::http::{CancelToken, RetryConfig, RetryPolicy};
}
