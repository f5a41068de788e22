use crate::constants::{CAR_TRAVEL_SPEED_KMH, PUBLIC_TRAVEL_SPEED_KMH};
use crate::models::{CourseLeg, PlaceStop, TransportMode};

/// Rough travel time in minutes for a distance in kilometers.
pub fn estimate_minutes(distance_km: f64, transport: TransportMode) -> u32 {
    let speed_kmh = match transport {
        TransportMode::Car => CAR_TRAVEL_SPEED_KMH,
        TransportMode::Public => PUBLIC_TRAVEL_SPEED_KMH,
    };
    ((distance_km / speed_kmh) * 60.0).round() as u32
}

pub fn travel_label(minutes: u32) -> String {
    if minutes < 1 {
        "1분 미만".to_string()
    } else {
        format!("{}분", minutes)
    }
}

/// Legs between consecutive stops, by great-circle distance. A pair where
/// either stop has no position gets no leg.
pub fn course_legs(stops: &[PlaceStop], transport: TransportMode) -> Vec<CourseLeg> {
    stops
        .windows(2)
        .filter_map(|pair| {
            let distance_km = pair[0].point.distance_km(&pair[1].point)?;
            let estimated_minutes = estimate_minutes(distance_km, transport);
            Some(CourseLeg {
                from_order: pair[0].sequence_order,
                to_order: pair[1].sequence_order,
                distance_km,
                estimated_minutes,
                label: travel_label(estimated_minutes),
            })
        })
        .collect()
}
