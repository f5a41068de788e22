//! Greedy stop sequencing.
//!
//! This is a bounded-window nearest-neighbour walk, not a tour optimiser: at
//! each step only the first K unused candidates (in pool order) are
//! considered, and the cheapest by weighted distance plus category penalty
//! wins.

use crate::config::CourseBuilderConfig;
use crate::models::{strip_markup, PlaceStop, ScoredListing, TransportMode};
use std::collections::HashSet;

/// The three ranked pools a course is built from.
#[derive(Debug, Clone, Default)]
pub struct CandidatePools {
    pub food: Vec<ScoredListing>,
    pub cafe: Vec<ScoredListing>,
    pub activity: Vec<ScoredListing>,
}

impl CandidatePools {
    pub fn total(&self) -> usize {
        self.food.len() + self.cafe.len() + self.activity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Food, then cafe, then activity.
    pub fn into_concatenated(self) -> Vec<ScoredListing> {
        let mut all = self.food;
        all.extend(self.cafe);
        all.extend(self.activity);
        all
    }
}

/// Per-request sequencing parameters, resolved for one transport mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencingParams {
    pub max_stops: usize,
    pub seed_window: usize,
    pub candidate_window: usize,
    pub distance_weight: f64,
    pub category_penalty: f64,
}

impl SequencingParams {
    pub fn for_transport(config: &CourseBuilderConfig, transport: TransportMode) -> Self {
        SequencingParams {
            max_stops: config.max_stops,
            seed_window: config.seed_window,
            candidate_window: config.candidate_window(transport),
            distance_weight: config.distance_weight(transport),
            category_penalty: config.category_penalty,
        }
    }
}

/// Order candidates into at most `max_stops` stops.
///
/// The seed is the first entry of the leading `seed_window` candidates, which
/// in practice is the top food listing unless the food pool is empty. It is
/// not the best-scored listing across all pools.
pub fn sequence_stops(pools: CandidatePools, params: &SequencingParams) -> Vec<PlaceStop> {
    let candidates = pools.into_concatenated();

    let Some(seed) = candidates.iter().take(params.seed_window).next() else {
        return Vec::new();
    };

    let mut used: HashSet<&str> = HashSet::new();
    let mut chosen: Vec<&ScoredListing> = vec![seed];
    used.insert(seed.clean_title.as_str());
    let mut current = seed;

    while chosen.len() < params.max_stops {
        let mut best: Option<(&ScoredListing, f64)> = None;

        let window = candidates
            .iter()
            .filter(|c| !used.contains(c.clean_title.as_str()))
            .take(params.candidate_window);

        for candidate in window {
            let penalty = if chosen.iter().any(|c| c.category == candidate.category) {
                params.category_penalty
            } else {
                0.0
            };
            let distance = current.listing.point.distance_to(&candidate.listing.point);
            let weight = distance * params.distance_weight + penalty;

            // Strict comparison: the first candidate wins ties
            if best.map_or(true, |(_, best_weight)| weight < best_weight) {
                best = Some((candidate, weight));
            }
        }

        match best {
            Some((next, weight)) => {
                tracing::trace!(
                    stop = chosen.len(),
                    title = %next.clean_title,
                    category = %next.category,
                    weight = weight,
                    "Sequenced next stop"
                );
                used.insert(next.clean_title.as_str());
                chosen.push(next);
                current = next;
            }
            None => break,
        }
    }

    chosen
        .into_iter()
        .enumerate()
        .map(|(idx, candidate)| to_stop(candidate, idx as u32))
        .collect()
}

fn to_stop(candidate: &ScoredListing, sequence_order: u32) -> PlaceStop {
    let listing = &candidate.listing;
    PlaceStop {
        name: candidate.clean_title.clone(),
        address: strip_markup(listing.display_address()),
        category: candidate.category,
        category_label: listing.category.clone(),
        description: strip_markup(&listing.description),
        link: listing.link.clone(),
        sequence_order,
        point: listing.point,
    }
}
