//! Keyword tables for query planning, scoring, categorization and labels.
//!
//! Everything here is plain data. The planner, scorer and label functions
//! take a `&KeywordTables` so tests can run them against custom tables.

use crate::models::Theme;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct KeywordTables {
    pub theme_phrases: HashMap<Theme, String>,
    pub companion_phrases: HashMap<String, String>,
    pub introvert_word: String,
    pub extrovert_word: String,
    pub anniversary_phrase: String,
    /// Anniversary answers meaning "no anniversary"
    pub anniversary_negatives: Vec<String>,
    /// Station suffix appended to the region on public transit
    pub public_region_suffix: String,
    /// Parking suffix appended to the region when driving
    pub car_region_suffix: String,
    pub food_suffix: String,
    pub cafe_suffix: String,
    pub activity_suffix: String,
    pub categories: CategoryMarkers,
    pub scoring: ScoringRules,
    pub labels: LabelTable,
    /// Mood words looked for in a free-text region, mapped to atmosphere tags.
    /// Order is preserved in the inferred tags.
    pub mood_inference: Vec<(String, String)>,
}

/// Markers for classifying a provider's free-text category.
/// Checked in order: cafe, bar, activity; no match means food.
#[derive(Debug, Clone)]
pub struct CategoryMarkers {
    pub cafe: Vec<String>,
    pub bar: Vec<String>,
    pub activity: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ScoringRules {
    pub station_markers: Vec<String>,
    pub station_points: i32,
    pub parking_markers: Vec<String>,
    pub parking_points: i32,
    pub theme_markers: HashMap<Theme, Vec<String>>,
    pub theme_points: i32,
    pub atmosphere_points: i32,
    /// Leading characters of a mood tag matched against listing text
    pub atmosphere_prefix_chars: usize,
}

#[derive(Debug, Clone)]
pub struct LabelTable {
    pub theme_labels: HashMap<Theme, String>,
    pub fallback_short_label: String,
    pub tag_marker: String,
    pub companion_marker: String,
    pub atmosphere_marker: String,
    pub separator: String,
    pub fallback_description: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        let theme_phrases = HashMap::from([
            (Theme::Insta, "인스타 핫플 인생샷 트렌디".to_string()),
            (Theme::Mood, "분위기 좋은 고급 무드".to_string()),
            (Theme::Healing, "조용한 힐링 감성".to_string()),
            (Theme::Local, "로컬 맛집 가성비".to_string()),
        ]);

        let companion_phrases = HashMap::from([
            ("아이와".to_string(), "아이와 가기 좋은".to_string()),
            ("부모님".to_string(), "부모님 모시고".to_string()),
            ("반려동물".to_string(), "반려동물 동반".to_string()),
            ("연인".to_string(), "데이트 코스 커플".to_string()),
            ("친구".to_string(), "친구랑 핫플".to_string()),
        ]);

        let theme_markers = HashMap::from([
            (Theme::Insta, strings(&["사진", "인생샷", "감성"])),
            (Theme::Mood, strings(&["고급", "분위기", "와인"])),
            (Theme::Healing, strings(&["조용한", "힐링", "숲"])),
        ]);

        let theme_labels = HashMap::from([
            (Theme::Insta, "✨ 인스타 핫플".to_string()),
            (Theme::Mood, "🍷 분위기 깡패".to_string()),
            (Theme::Healing, "🌿 힐링/정적".to_string()),
            (Theme::Local, "🏠 가성비 로컬".to_string()),
        ]);

        let mood_inference = [
            ("분위기", "로맨틱한"),
            ("로맨틱", "로맨틱한"),
            ("조용한", "조용한한"),
            ("활기찬", "활기찬한"),
            ("이색", "이색적인"),
            ("가성비", "가성비한"),
            ("럭셔리", "럭셔리한"),
            ("뷰맛집", "뷰맛집한"),
            ("힙한", "힙한한"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        KeywordTables {
            theme_phrases,
            companion_phrases,
            introvert_word: "조용한".to_string(),
            extrovert_word: "핫플".to_string(),
            anniversary_phrase: "기념일 이벤트".to_string(),
            anniversary_negatives: strings(&["아니요", "no"]),
            public_region_suffix: "역 근처".to_string(),
            car_region_suffix: " 주차".to_string(),
            food_suffix: "맛집".to_string(),
            cafe_suffix: "카페".to_string(),
            activity_suffix: "가볼만한곳".to_string(),
            categories: CategoryMarkers {
                cafe: strings(&["카페", "커피", "디저트"]),
                bar: strings(&["술집", "바", "포차", "이자카야"]),
                activity: strings(&["영화", "공원", "체험", "전시"]),
            },
            scoring: ScoringRules {
                station_markers: strings(&["역", "역세권", "출구"]),
                station_points: 50,
                parking_markers: strings(&["주차", "발렛", "넓은"]),
                parking_points: 30,
                theme_markers,
                theme_points: 40,
                atmosphere_points: 15,
                atmosphere_prefix_chars: 2,
            },
            labels: LabelTable {
                theme_labels,
                fallback_short_label: "커스텀".to_string(),
                tag_marker: "🏷️".to_string(),
                companion_marker: "👫".to_string(),
                atmosphere_marker: "🎨".to_string(),
                separator: " · ".to_string(),
                fallback_description: "당신을 위한 맞춤 코스".to_string(),
            },
            mood_inference,
        }
    }
}

impl KeywordTables {
    pub fn theme_phrase(&self, theme: Option<Theme>) -> &str {
        theme
            .and_then(|t| self.theme_phrases.get(&t))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn companion_phrase(&self, companion: Option<&str>) -> &str {
        companion
            .and_then(|c| self.companion_phrases.get(c))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_anniversary(&self, anniversary: &str) -> bool {
        let answer = anniversary.trim();
        !answer.is_empty()
            && !self
                .anniversary_negatives
                .iter()
                .any(|neg| neg.eq_ignore_ascii_case(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_phrase_lookup() {
        let tables = KeywordTables::default();
        assert_eq!(tables.theme_phrase(Some(Theme::Insta)), "인스타 핫플 인생샷 트렌디");
        assert_eq!(tables.theme_phrase(None), "");
    }

    #[test]
    fn test_companion_phrase_lookup() {
        let tables = KeywordTables::default();
        assert_eq!(tables.companion_phrase(Some("연인")), "데이트 코스 커플");
        assert_eq!(tables.companion_phrase(Some("동료")), "");
        assert_eq!(tables.companion_phrase(None), "");
    }

    #[test]
    fn test_anniversary_negatives() {
        let tables = KeywordTables::default();
        assert!(tables.is_anniversary("100일"));
        assert!(!tables.is_anniversary("아니요"));
        assert!(!tables.is_anniversary("No"));
        assert!(!tables.is_anniversary(""));
    }
}
