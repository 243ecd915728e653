//! HTTP client layer — `DashboardHttp` with a configurable retry policy.

pub mod cancel;
pub mod client;
pub mod retry;

pub use cancel::CancelToken;
pub use client::DashboardHttp;
pub use retry::{RetryConfig, RetryOn, RetryPolicy};
