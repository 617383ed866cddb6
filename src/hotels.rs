use crate::types::{HotelSummary, HotelView, Review};
use crate::util::average;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Hotel-level thresholds. A hotel passes when its average score is
/// strictly above `min_avg_score` and it has at least `min_review_count`
/// reviews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotelFilter {
    pub min_avg_score: f64,
    pub min_review_count: usize,
}

impl Default for HotelFilter {
    fn default() -> Self {
        Self {
            min_avg_score: 3.0,
            min_review_count: 0,
        }
    }
}

impl HotelFilter {
    pub fn matches(&self, summary: &HotelSummary) -> bool {
        summary.average_score > self.min_avg_score
            && summary.review_count >= self.min_review_count
    }
}

/// Group reviews by exact hotel name and compute the mean score and the
/// review count of each group. Keys come back in name order.
pub fn aggregate(reviews: &[Review]) -> BTreeMap<String, HotelSummary> {
    let mut scores: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in reviews {
        scores
            .entry(r.hotel_name.as_str())
            .or_default()
            .push(r.reviewer_score);
    }
    scores
        .into_iter()
        .map(|(name, s)| {
            let summary = HotelSummary {
                hotel_name: name.to_string(),
                average_score: average(&s),
                review_count: s.len(),
            };
            (name.to_string(), summary)
        })
        .collect()
}

/// Apply `filter` and order the survivors by average score, best first.
///
/// The sort is stable over the map's name order, so hotels with equal
/// averages are listed alphabetically.
pub fn filter_hotels(
    summaries: &BTreeMap<String, HotelSummary>,
    filter: &HotelFilter,
) -> Vec<HotelSummary> {
    let mut out: Vec<HotelSummary> = summaries
        .values()
        .filter(|s| filter.matches(s))
        .cloned()
        .collect();
    out.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(Ordering::Equal)
    });
    log::debug!(
        "{} of {} hotels pass score > {} and reviews >= {}",
        out.len(),
        summaries.len(),
        filter.min_avg_score,
        filter.min_review_count
    );
    out
}

/// Attach one address and coordinate pair to each filtered hotel.
///
/// The location of a hotel is taken from its first review in dataset
/// order, even when later reviews carry a different address. Hotels with
/// no review in `reviews` are dropped. Output order follows `hotels`.
pub fn join_locations(hotels: &[HotelSummary], reviews: &[Review]) -> Vec<HotelView> {
    let mut first_seen: HashMap<&str, &Review> = HashMap::new();
    for r in reviews {
        first_seen.entry(r.hotel_name.as_str()).or_insert(r);
    }
    hotels
        .iter()
        .filter_map(|h| {
            let loc = first_seen.get(h.hotel_name.as_str())?;
            Some(HotelView {
                hotel_name: h.hotel_name.clone(),
                average_score: h.average_score,
                review_count: h.review_count,
                hotel_address: loc.hotel_address.clone(),
                lat: loc.lat,
                lng: loc.lng,
            })
        })
        .collect()
}
