//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format CoinGecko sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Newtype for CoinGecko coin identifiers (e.g. `"bitcoin"`, `"wrapped-steth"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CoinId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CoinId(s.to_string()))
    }
}

impl AsRef<str> for CoinId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CoinId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CoinId(s))
    }
}

/// Join identifiers into the comma-separated form the `ids` filter expects.
pub fn join_ids(ids: &[CoinId]) -> String {
    ids.iter().map(CoinId::as_str).collect::<Vec<_>>().join(",")
}

// ─── ChartWindow ─────────────────────────────────────────────────────────────

/// Lookback period for historical price queries, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartWindow {
    #[serde(rename = "1")]
    Day1,
    #[default]
    #[serde(rename = "7")]
    Week1,
    #[serde(rename = "30")]
    Month1,
    #[serde(rename = "90")]
    Month3,
}

impl ChartWindow {
    pub const ALL: [ChartWindow; 4] = [
        ChartWindow::Day1,
        ChartWindow::Week1,
        ChartWindow::Month1,
        ChartWindow::Month3,
    ];

    /// The `days` query value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "1",
            Self::Week1 => "7",
            Self::Month1 => "30",
            Self::Month3 => "90",
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::Day1 => 1,
            Self::Week1 => 7,
            Self::Month1 => 30,
            Self::Month3 => 90,
        }
    }
}

impl std::fmt::Display for ChartWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a `days` value is not one of 1, 7, 30, 90.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid chart window '{0}': expected one of 1, 7, 30, 90")]
pub struct InvalidChartWindow(pub String);

impl FromStr for ChartWindow {
    type Err = InvalidChartWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Day1),
            "7" => Ok(Self::Week1),
            "30" => Ok(Self::Month1),
            "90" => Ok(Self::Month3),
            other => Err(InvalidChartWindow(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_id_serde() {
        let id = CoinId::from("bitcoin");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bitcoin\"");
        let back: CoinId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_join_ids() {
        let ids = vec![CoinId::from("bitcoin"), CoinId::from("ethereum")];
        assert_eq!(join_ids(&ids), "bitcoin,ethereum");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn test_chart_window_serde() {
        let w: ChartWindow = serde_json::from_str("\"30\"").unwrap();
        assert_eq!(w, ChartWindow::Month1);
        assert_eq!(w.days(), 30);
        assert_eq!(serde_json::to_string(&ChartWindow::Day1).unwrap(), "\"1\"");
    }

    #[test]
    fn test_chart_window_parse() {
        for window in ChartWindow::ALL {
            assert_eq!(window.as_str().parse::<ChartWindow>().unwrap(), window);
        }
        assert_eq!(ChartWindow::default(), ChartWindow::Week1);
        assert!("14".parse::<ChartWindow>().is_err());
        assert!("".parse::<ChartWindow>().is_err());
    }
}
