use super::keywords::KeywordTables;
use crate::models::Preferences;

pub fn course_title(prefs: &Preferences, tables: &KeywordTables) -> String {
    let theme_label = prefs
        .theme
        .and_then(|t| tables.labels.theme_labels.get(&t));

    match (theme_label, prefs.mbti) {
        (Some(label), _) => format!("{} {} 코스", prefs.region, label),
        (None, Some(mbti)) => format!("{} {} 맞춤 코스", prefs.region, mbti),
        (None, None) => format!("{} AI 추천 코스", prefs.region),
    }
}

/// Second word of the theme label, e.g. "✨ 인스타 핫플" → "인스타".
fn short_theme_label<'a>(prefs: &Preferences, tables: &'a KeywordTables) -> &'a str {
    prefs
        .theme
        .and_then(|t| tables.labels.theme_labels.get(&t))
        .and_then(|label| label.split(' ').nth(1))
        .unwrap_or(tables.labels.fallback_short_label.as_str())
}

pub fn course_description(prefs: &Preferences, tables: &KeywordTables) -> String {
    let labels = &tables.labels;

    let mut parts = vec![format!(
        "{} {}",
        labels.tag_marker,
        short_theme_label(prefs, tables)
    )];
    if let Some(companion) = &prefs.companion {
        parts.push(format!("{} {}", labels.companion_marker, companion));
    }
    if !prefs.atmosphere.is_empty() {
        parts.push(format!(
            "{} {}",
            labels.atmosphere_marker,
            prefs.atmosphere.join(", ")
        ));
    }

    let description = parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(&labels.separator);

    if description.is_empty() {
        labels.fallback_description.clone()
    } else {
        description
    }
}
