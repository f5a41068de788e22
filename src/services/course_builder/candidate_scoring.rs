use super::keywords::{CategoryMarkers, KeywordTables};
use crate::models::{PlaceCategory, Preferences, RawListing, ScoredListing, TransportMode};

fn contains_any(text: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| text.contains(m.as_str()))
}

/// Classify a provider category string. Cafe markers win over bar markers,
/// which win over activity markers; anything else is food.
pub fn categorize(raw_category: &str, markers: &CategoryMarkers) -> PlaceCategory {
    if contains_any(raw_category, &markers.cafe) {
        PlaceCategory::Cafe
    } else if contains_any(raw_category, &markers.bar) {
        PlaceCategory::Bar
    } else if contains_any(raw_category, &markers.activity) {
        PlaceCategory::Activity
    } else {
        PlaceCategory::Food
    }
}

/// Additive relevance score of a listing against the user's preferences.
pub fn score(listing: &RawListing, prefs: &Preferences, tables: &KeywordTables) -> i32 {
    let rules = &tables.scoring;
    let text = listing.full_text();
    let mut score = 0;

    match prefs.transport {
        TransportMode::Public if contains_any(&text, &rules.station_markers) => {
            score += rules.station_points;
        }
        TransportMode::Car if contains_any(&text, &rules.parking_markers) => {
            score += rules.parking_points;
        }
        _ => {}
    }

    if let Some(markers) = prefs.theme.and_then(|t| rules.theme_markers.get(&t)) {
        if contains_any(&text, markers) {
            score += rules.theme_points;
        }
    }

    for tag in &prefs.atmosphere {
        let prefix: String = tag.chars().take(rules.atmosphere_prefix_chars).collect();
        if text.contains(prefix.as_str()) {
            score += rules.atmosphere_points;
        }
    }

    score
}

/// Score, categorize and tag one pool, then order it by descending score.
/// The sort is stable so equal scores keep the provider's order.
pub fn rank_pool(
    listings: Vec<RawListing>,
    pool: PlaceCategory,
    prefs: &Preferences,
    tables: &KeywordTables,
) -> Vec<ScoredListing> {
    let mut scored: Vec<ScoredListing> = listings
        .into_iter()
        .map(|listing| ScoredListing {
            clean_title: listing.clean_title(),
            score: score(&listing, prefs, tables),
            category: categorize(&listing.category, &tables.categories),
            pool,
            listing,
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;

    fn listing(title: &str, category: &str, description: &str) -> RawListing {
        RawListing {
            title: title.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            address: "서울 성동구".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_categorize_priority() {
        let markers = KeywordTables::default().categories;

        assert_eq!(categorize("카페,디저트", &markers), PlaceCategory::Cafe);
        assert_eq!(categorize("음식점>카페", &markers), PlaceCategory::Cafe);
        assert_eq!(categorize("술집>이자카야", &markers), PlaceCategory::Bar);
        // "바" inside a cafe category still classifies as cafe
        assert_eq!(categorize("바 카페", &markers), PlaceCategory::Cafe);
        assert_eq!(categorize("문화,예술>전시관", &markers), PlaceCategory::Activity);
        assert_eq!(categorize("공원", &markers), PlaceCategory::Activity);
        assert_eq!(categorize("한식>육류,고기요리", &markers), PlaceCategory::Food);
        assert_eq!(categorize("", &markers), PlaceCategory::Food);
    }

    #[test]
    fn test_parking_marker_bonus_for_car() {
        let tables = KeywordTables::default();
        let prefs = Preferences {
            transport: TransportMode::Car,
            ..Preferences::new("판교")
        };

        let with_parking = listing("고깃집", "한식", "주차 가능");
        let without = listing("고깃집", "한식", "예약 가능");

        let diff = score(&with_parking, &prefs, &tables) - score(&without, &prefs, &tables);
        assert!(diff >= 30, "expected at least 30 points, got {}", diff);
    }

    #[test]
    fn test_station_marker_only_counts_on_public_transit() {
        let tables = KeywordTables::default();
        let near_station = listing("역앞 파스타", "양식", "");

        let public = Preferences::new("홍대");
        let car = Preferences {
            transport: TransportMode::Car,
            ..Preferences::new("홍대")
        };

        assert_eq!(score(&near_station, &public, &tables), 50);
        assert_eq!(score(&near_station, &car, &tables), 0);
    }

    #[test]
    fn test_theme_and_atmosphere_points_add_up() {
        let tables = KeywordTables::default();
        let prefs = Preferences {
            transport: TransportMode::Car,
            theme: Some(Theme::Insta),
            atmosphere: vec!["감성적인".to_string(), "조용한".to_string(), "힙한".to_string()],
            ..Preferences::new("성수")
        };

        // 인생샷 → theme, 감성 → first tag, 조용 → second tag
        let candidate = listing("<b>인생샷</b> 스튜디오", "사진관", "조용한 감성 공간");
        assert_eq!(score(&candidate, &prefs, &tables), 40 + 15 + 15);
    }

    #[test]
    fn test_local_theme_has_no_marker_bonus() {
        let tables = KeywordTables::default();
        let prefs = Preferences {
            transport: TransportMode::Car,
            theme: Some(Theme::Local),
            ..Preferences::new("망원")
        };
        assert_eq!(score(&listing("노포", "한식", "고급 와인 분위기"), &prefs, &tables), 0);
    }

    #[test]
    fn test_rank_pool_is_stable() {
        let tables = KeywordTables::default();
        let prefs = Preferences::new("성수");

        let pool = vec![
            listing("첫번째", "한식", ""),
            listing("두번째", "한식", "성수역 3번 출구"),
            listing("세번째", "한식", ""),
            listing("네번째", "한식", "역세권"),
        ];

        let ranked = rank_pool(pool, PlaceCategory::Food, &prefs, &tables);
        let titles: Vec<&str> = ranked.iter().map(|s| s.clean_title.as_str()).collect();

        assert_eq!(titles, vec!["두번째", "네번째", "첫번째", "세번째"]);
        assert!(ranked.iter().all(|s| s.pool == PlaceCategory::Food));
    }
}
