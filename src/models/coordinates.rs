use crate::constants::{EARTH_RADIUS_KM, NAVER_COORDINATE_SCALE};
use serde::{Deserialize, Serialize};

/// A point as the search provider reports it: `mapx` / `mapy` integers,
/// which are longitude / latitude scaled by 1e7.
///
/// `distance_to` works on the raw integers and is what the sequencer ranks
/// by. Real-world distances go through `distance_km`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProjectedPoint {
    #[serde(rename = "mapx")]
    pub x: i64,
    #[serde(rename = "mapy")]
    pub y: i64,
}

impl ProjectedPoint {
    pub fn new(x: i64, y: i64) -> Self {
        ProjectedPoint { x, y }
    }

    /// Parse the raw `mapx` / `mapy` strings returned by the provider.
    /// Reads the leading integer of each field; anything unreadable becomes 0.
    pub fn from_raw(mapx: &str, mapy: &str) -> Self {
        ProjectedPoint {
            x: parse_leading_int(mapx),
            y: parse_leading_int(mapy),
        }
    }

    /// An x of zero means the provider gave no usable position.
    pub fn is_known(&self) -> bool {
        self.x != 0
    }

    /// Planar Euclidean distance in provider units.
    /// Returns 0 when either point has no known position.
    pub fn distance_to(&self, other: &ProjectedPoint) -> f64 {
        if !self.is_known() || !other.is_known() {
            return 0.0;
        }

        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn longitude(&self) -> f64 {
        self.x as f64 / NAVER_COORDINATE_SCALE
    }

    pub fn latitude(&self) -> f64 {
        self.y as f64 / NAVER_COORDINATE_SCALE
    }

    /// Great-circle (haversine) distance in kilometers, or `None` when either
    /// point has no known position.
    pub fn distance_km(&self, other: &ProjectedPoint) -> Option<f64> {
        if !self.is_known() || !other.is_known() {
            return None;
        }

        let lat1_rad = self.latitude().to_radians();
        let lat2_rad = other.latitude().to_radians();
        let delta_lat = (other.latitude() - self.latitude()).to_radians();
        let delta_lng = (other.longitude() - self.longitude()).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Some(EARTH_RADIUS_KM * c)
    }
}

fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().map(|v| sign * v).unwrap_or(0)
}
