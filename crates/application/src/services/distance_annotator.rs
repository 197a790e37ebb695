//! Distance annotation
//!
//! Attaches the great-circle distance from the search center to every
//! candidate.

use domain::{GeoCandidate, GeoLocation};

/// Set `distance` (meters, haversine) on every candidate
///
/// Pure and order-preserving. Existing distances are overwritten.
#[must_use]
pub fn annotate_distances(center: &GeoLocation, candidates: Vec<GeoCandidate>) -> Vec<GeoCandidate> {
    candidates
        .into_iter()
        .map(|candidate| {
            let distance = center.distance_meters(&candidate.location());
            candidate.with_distance(distance)
        })
        .collect()
}
