use geo::{line_string, Haversine, Length, LineString};
use serde::Serialize;

use super::model::{Coordinate, Facility};

/// How many facilities are shown when the caller does not say otherwise.
pub const DEFAULT_LIMIT: usize = 10;

/// Great-circle distance in meters between two coordinates.
pub fn distance_meters(from: Coordinate, to: Coordinate) -> f64 {
    let line: LineString<f64> = line_string![from.to_point().0, to.to_point().0];
    Haversine.length(&line)
}

/// A facility together with its distance from the reference coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFacility {
    pub facility: Facility,
    pub distance_m: f64,
}

/// Keep facilities passing `predicate`, order them by distance from
/// `reference` and return at most `k`, nearest first.
///
/// The sort is stable: facilities at equal distance keep their input order.
pub fn rank_with_distance<P>(
    facilities: &[Facility],
    predicate: P,
    reference: Coordinate,
    k: usize,
) -> Vec<RankedFacility>
where
    P: Fn(&Facility) -> bool,
{
    if k == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(f64, &Facility)> = facilities
        .iter()
        .filter(|f| predicate(*f))
        .map(|f| (distance_meters(reference, f.coordinate()), f))
        .collect();
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

    candidates
        .into_iter()
        .take(k)
        .map(|(distance_m, facility)| RankedFacility {
            facility: facility.clone(),
            distance_m,
        })
        .collect()
}

/// Like [`rank_with_distance`], without the distances.
pub fn rank<P>(facilities: &[Facility], predicate: P, reference: Coordinate, k: usize) -> Vec<Facility>
where
    P: Fn(&Facility) -> bool,
{
    rank_with_distance(facilities, predicate, reference, k)
        .into_iter()
        .map(|r| r.facility)
        .collect()
}
