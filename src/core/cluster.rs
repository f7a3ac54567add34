use crate::core::distance::haversine_distance;
use crate::core::scoring::round2;

/// Calculate cluster density scores for a whole batch of coordinates
///
/// Counts peer properties (excluding self) within `radius_km` of each
/// property and maps the count through an exponential-saturation curve:
/// `100 * (1 - e^(-n/2))`. Zero peers score 0, two peers land near 63,
/// and the score approaches 100 as peers accumulate. Clustered
/// distressed properties signal a revitalization opportunity, with
/// diminishing returns per extra neighbor.
///
/// Pairwise O(n²) over the batch; fine at tens-to-hundreds of
/// properties. Swap in a spatial grid if batches ever grow past that.
pub fn cluster_density_scores(coordinates: &[(f64, f64)], radius_km: f64) -> Vec<f64> {
    coordinates
        .iter()
        .enumerate()
        .map(|(index, &(lat, lon))| {
            let peers = coordinates
                .iter()
                .enumerate()
                .filter(|&(other_index, &(other_lat, other_lon))| {
                    other_index != index
                        && haversine_distance(lat, lon, other_lat, other_lon) <= radius_km
                })
                .count();

            round2(peer_count_score(peers))
        })
        .collect()
}

#[inline]
fn peer_count_score(peers: usize) -> f64 {
    100.0 * (1.0 - (-(peers as f64) / 2.0).exp())
}
