use super::keywords::KeywordTables;
use crate::models::{Mbti, Preferences, SortBy, TransportMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many preference-derived keywords are folded into the search text.
/// Escalates smart → relaxed → simple when result volume is too low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackLevel {
    Smart,
    Relaxed,
    Simple,
}

impl fmt::Display for FallbackLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackLevel::Smart => write!(f, "smart"),
            FallbackLevel::Relaxed => write!(f, "relaxed"),
            FallbackLevel::Simple => write!(f, "simple"),
        }
    }
}

/// Result ordering requested from the search provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Relevance
    Similarity,
    /// Newest first
    Date,
    /// Most reviewed first
    Comment,
    Random,
}

impl SortMode {
    /// Value of the provider's `sort` parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            SortMode::Similarity => "sim",
            SortMode::Date => "date",
            SortMode::Comment => "comment",
            SortMode::Random => "random",
        }
    }
}

impl From<SortBy> for SortMode {
    fn from(sort_by: SortBy) -> Self {
        match sort_by {
            SortBy::Review => SortMode::Comment,
            SortBy::New => SortMode::Date,
            SortBy::Rating | SortBy::Random => SortMode::Similarity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQueries {
    pub food: String,
    pub cafe: String,
    pub activity: String,
    pub sort: SortMode,
}

/// Build the three category queries for one fallback level. Pure.
pub fn generate_queries(
    prefs: &Preferences,
    level: FallbackLevel,
    tables: &KeywordTables,
) -> SearchQueries {
    let region = prefs.region.as_str();

    if level == FallbackLevel::Simple {
        return SearchQueries {
            food: format!("{} {}", region, tables.food_suffix),
            cafe: format!("{} {}", region, tables.cafe_suffix),
            activity: format!("{} {}", region, tables.activity_suffix),
            sort: SortMode::Random,
        };
    }

    let smart = level == FallbackLevel::Smart;

    let base_region = if smart {
        match prefs.transport {
            TransportMode::Public => format!("{}{}", region, tables.public_region_suffix),
            TransportMode::Car => format!("{}{}", region, tables.car_region_suffix),
        }
    } else {
        region.to_string()
    };

    let theme = tables.theme_phrase(prefs.theme);
    let companion = tables.companion_phrase(prefs.companion.as_deref());

    let (moods, mbti, anniversary) = if smart {
        let mbti = match prefs.mbti {
            Some(Mbti::Introvert) => tables.introvert_word.as_str(),
            Some(Mbti::Extrovert) => tables.extrovert_word.as_str(),
            None => "",
        };
        let anniversary = if tables.is_anniversary(&prefs.anniversary) {
            tables.anniversary_phrase.as_str()
        } else {
            ""
        };
        (prefs.atmosphere.join(" "), mbti, anniversary)
    } else {
        (String::new(), "", "")
    };

    SearchQueries {
        food: compose(&[
            &base_region,
            theme,
            companion,
            &moods,
            mbti,
            anniversary,
            &tables.food_suffix,
        ]),
        cafe: compose(&[&base_region, theme, companion, &moods, &tables.cafe_suffix]),
        activity: compose(&[&base_region, theme, companion, &tables.activity_suffix]),
        sort: prefs.sort_by.into(),
    }
}

/// Space-join fragments, skipping empty ones.
fn compose(fragments: &[&str]) -> String {
    fragments
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive atmosphere tags from mood words in a free-text region, for requests
/// that carry neither a theme nor explicit tags. Returns `None` when nothing
/// should change.
pub fn infer_atmosphere(prefs: &Preferences, tables: &KeywordTables) -> Option<Vec<String>> {
    if prefs.region.is_empty() || prefs.theme.is_some() || !prefs.atmosphere.is_empty() {
        return None;
    }

    let found: Vec<String> = tables
        .mood_inference
        .iter()
        .filter(|(keyword, _)| prefs.region.contains(keyword.as_str()))
        .map(|(_, tag)| tag.clone())
        .collect();

    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}
