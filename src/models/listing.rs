use crate::models::ProjectedPoint;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Normalized venue category used for pools and category-diversity logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Food,
    Cafe,
    Activity,
    Bar,
}

impl PlaceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::Food => "food",
            PlaceCategory::Cafe => "cafe",
            PlaceCategory::Activity => "activity",
            PlaceCategory::Bar => "bar",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(PlaceCategory::Food),
            "cafe" => Ok(PlaceCategory::Cafe),
            "activity" => Ok(PlaceCategory::Activity),
            "bar" => Ok(PlaceCategory::Bar),
            _ => Err(format!("Invalid place category: {}", s)),
        }
    }
}

/// Remove inline markup (e.g. `<b>` highlight tags) from provider text.
pub fn strip_markup(text: &str) -> String {
    static MARKUP: OnceLock<Regex> = OnceLock::new();
    MARKUP
        .get_or_init(|| Regex::new(r"<[^>]+>").expect("markup pattern is valid"))
        .replace_all(text, "")
        .into_owned()
}

/// One search result as returned by the gateway, before scoring.
/// Text fields may still carry markup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawListing {
    pub title: String,
    pub link: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub road_address: String,
    pub point: ProjectedPoint,
}

impl RawListing {
    pub fn clean_title(&self) -> String {
        strip_markup(&self.title)
    }

    /// Title, address, category and description concatenated, markup removed.
    pub fn full_text(&self) -> String {
        strip_markup(&format!(
            "{}{}{}{}",
            self.title, self.address, self.category, self.description
        ))
    }

    /// Primary address, or the road address when the primary is missing.
    pub fn display_address(&self) -> &str {
        if self.address.trim().is_empty() {
            &self.road_address
        } else {
            &self.address
        }
    }
}

/// A listing after scoring: carries its relevance score, normalized
/// category, and the pool (food / cafe / activity) it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredListing {
    pub listing: RawListing,
    pub clean_title: String,
    pub score: i32,
    pub category: PlaceCategory,
    pub pool: PlaceCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<b>성수</b> 카페"), "성수 카페");
        assert_eq!(strip_markup("plain"), "plain");
        assert_eq!(strip_markup("<a href=\"x\">link</a><br/>"), "link");
    }

    #[test]
    fn test_display_address_falls_back_to_road_address() {
        let mut listing = RawListing {
            road_address: "서울 성동구 연무장길 1".to_string(),
            ..Default::default()
        };
        assert_eq!(listing.display_address(), "서울 성동구 연무장길 1");

        listing.address = "서울 성동구 성수동2가 1".to_string();
        assert_eq!(listing.display_address(), "서울 성동구 성수동2가 1");
    }

    #[test]
    fn test_full_text_strips_markup() {
        let listing = RawListing {
            title: "<b>숲</b>속 식당".to_string(),
            address: "서울".to_string(),
            category: "한식".to_string(),
            description: "<i>조용한</i>".to_string(),
            ..Default::default()
        };
        assert_eq!(listing.full_text(), "숲속 식당서울한식조용한");
    }

    #[test]
    fn test_place_category_parsing() {
        assert_eq!("CAFE".parse::<PlaceCategory>().unwrap(), PlaceCategory::Cafe);
        assert_eq!(PlaceCategory::Activity.to_string(), "activity");
        assert!("club".parse::<PlaceCategory>().is_err());
    }
}
