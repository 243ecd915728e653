//! Chart domain — historical price series for one coin and lookback window.

pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single point on a price chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub price: f64,
}

impl ChartPoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Lowest and highest price of a series, for axis scaling.
pub fn price_range(points: &[ChartPoint]) -> Option<(f64, f64)> {
    points.iter().fold(None, |range, p| match range {
        None => Some((p.price, p.price)),
        Some((lo, hi)) => Some((lo.min(p.price), hi.max(p.price))),
    })
}

/// Percent change from the first to the last point.
pub fn period_change_percentage(points: &[ChartPoint]) -> Option<f64> {
    let first = points.first()?.price;
    let last = points.last()?.price;
    if first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}
