use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Public transit and walking
    #[default]
    Public,
    Car,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Public => write!(f, "public"),
            TransportMode::Car => write!(f, "car"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(TransportMode::Public),
            "car" => Ok(TransportMode::Car),
            _ => Err(format!("Invalid transport mode: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Insta,
    Mood,
    Healing,
    Local,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Theme::Insta => "insta",
            Theme::Mood => "mood",
            Theme::Healing => "healing",
            Theme::Local => "local",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "insta" => Ok(Theme::Insta),
            "mood" => Ok(Theme::Mood),
            "healing" => Ok(Theme::Healing),
            "local" => Ok(Theme::Local),
            _ => Err(format!("Invalid theme: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Rating,
    Review,
    New,
    Random,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rating" => Ok(SortBy::Rating),
            "review" => Ok(SortBy::Review),
            "new" => Ok(SortBy::New),
            "random" => Ok(SortBy::Random),
            _ => Err(format!("Invalid sort: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mbti {
    #[serde(rename = "I")]
    Introvert,
    #[serde(rename = "E")]
    Extrovert,
}

impl fmt::Display for Mbti {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mbti::Introvert => write!(f, "I"),
            Mbti::Extrovert => write!(f, "E"),
        }
    }
}

impl FromStr for Mbti {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "I" => Ok(Mbti::Introvert),
            "E" => Ok(Mbti::Extrovert),
            _ => Err(format!("Invalid MBTI axis: '{}'", s)),
        }
    }
}

/// Validated user preferences for one course request. Not mutated once the
/// pipeline starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub region: String,
    pub transport: TransportMode,
    pub theme: Option<Theme>,
    pub companion: Option<String>,
    pub atmosphere: Vec<String>,
    pub anniversary: String,
    pub sort_by: SortBy,
    pub mbti: Option<Mbti>,
}

impl Preferences {
    pub fn new(region: impl Into<String>) -> Self {
        Preferences {
            region: region.into(),
            transport: TransportMode::default(),
            theme: None,
            companion: None,
            atmosphere: Vec::new(),
            anniversary: String::new(),
            sort_by: SortBy::default(),
            mbti: None,
        }
    }

    /// Defaults for the free-text search form: public transport, no mood
    /// tags, random ordering.
    pub fn from_free_text(query: &str) -> Self {
        Preferences {
            sort_by: SortBy::Random,
            ..Preferences::new(query.trim())
        }
    }
}

// Request types for API endpoints

/// Body of a structured course request. Every field may be missing or
/// `null`; only a usable region is required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseRequest {
    pub region: Option<String>,
    pub transport: Option<String>,
    pub atmosphere: Option<Vec<String>>,
    pub mbti: Option<String>,
    pub anniversary: Option<String>,
    pub sort_by: Option<String>,
    pub theme: Option<String>,
    pub companion: Option<String>,
}

impl CourseRequest {
    pub fn validate(&self) -> Result<(), String> {
        match self.region.as_deref() {
            Some(region) if !region.trim().is_empty() => Ok(()),
            _ => Err("region is required".to_string()),
        }
    }

    /// Convert the wire payload into domain preferences. Unknown transport,
    /// theme, sort and MBTI values are treated as unset rather than rejected.
    pub fn into_preferences(self) -> Preferences {
        let transport = non_blank(self.transport)
            .and_then(|t| match t.parse::<TransportMode>() {
                Ok(transport) => Some(transport),
                Err(e) => {
                    tracing::debug!("{}; using default transport", e);
                    None
                }
            })
            .unwrap_or_default();

        let theme = non_blank(self.theme).and_then(|t| match t.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::debug!("{}; ignoring theme", e);
                None
            }
        });

        let sort_by = match non_blank(self.sort_by) {
            Some(sort_by) => sort_by.parse().unwrap_or_else(|e| {
                tracing::debug!("{}; using default sort", e);
                SortBy::default()
            }),
            None => SortBy::default(),
        };

        let mbti = non_blank(self.mbti).and_then(|m| m.parse().ok());

        Preferences {
            region: self.region.unwrap_or_default().trim().to_string(),
            transport,
            theme,
            companion: non_blank(self.companion),
            atmosphere: self
                .atmosphere
                .unwrap_or_default()
                .into_iter()
                .filter(|tag| !tag.trim().is_empty())
                .collect(),
            anniversary: self.anniversary.unwrap_or_default(),
            sort_by,
            mbti,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Query parameters for the free-text search form
#[derive(Debug, Deserialize)]
pub struct FreeTextSearchParams {
    #[serde(default)]
    pub query: Option<String>,
}

impl FreeTextSearchParams {
    pub fn into_preferences(self) -> Result<Preferences, String> {
        match self.query {
            Some(q) if !q.trim().is_empty() => Ok(Preferences::from_free_text(&q)),
            _ => Err("Query is required".to_string()),
        }
    }
}
