//! Conversion: MarketChartResponse → ordered `Vec<ChartPoint>`.

use super::wire::{MarketChartResponse, RawPoint};
use super::ChartPoint;

impl ChartPoint {
    /// A raw pair becomes a point only if both parts are finite.
    pub(crate) fn from_raw((timestamp, price): RawPoint) -> Option<Self> {
        let price = price.filter(|p| p.is_finite())?;
        if !timestamp.is_finite() {
            return None;
        }
        Some(ChartPoint::new(timestamp as i64, price))
    }
}

impl MarketChartResponse {
    /// The price series, ascending by timestamp, unusable entries dropped.
    pub fn into_points(self) -> Vec<ChartPoint> {
        let mut points: Vec<ChartPoint> = self
            .prices
            .into_iter()
            .filter_map(ChartPoint::from_raw)
            .collect();
        points.sort_by_key(|p| p.timestamp);
        points
    }
}
