use crate::types::Review;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Predicates on the reviews of the selected hotel.
///
/// Score and date bounds are inclusive. An empty `nationalities` set means
/// no nationality was picked and every nationality is accepted; it never
/// means "match none".
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewQuery {
    pub min_score: u8,
    pub max_score: u8,
    pub nationalities: BTreeSet<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            min_score: 0,
            max_score: 10,
            nationalities: BTreeSet::new(),
            start_date: NaiveDate::from_ymd_opt(2017, 6, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2017, 12, 31).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl ReviewQuery {
    pub fn matches(&self, review: &Review) -> bool {
        review.reviewer_score >= f64::from(self.min_score)
            && review.reviewer_score <= f64::from(self.max_score)
            && (self.nationalities.is_empty()
                || self.nationalities.contains(&review.reviewer_nationality))
            && review.date >= self.start_date
            && review.date <= self.end_date
    }
}

/// Reviews of one hotel in dataset order.
pub fn reviews_for_hotel<'a>(reviews: &'a [Review], hotel_name: &str) -> Vec<&'a Review> {
    if hotel_name.is_empty() {
        return Vec::new();
    }
    reviews
        .iter()
        .filter(|r| r.hotel_name == hotel_name)
        .collect()
}

/// Distinct nationalities in order of first appearance.
pub fn nationalities<'a, I>(reviews: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for r in reviews {
        if seen.insert(r.reviewer_nationality.as_str()) {
            out.push(r.reviewer_nationality.clone());
        }
    }
    out
}

/// Keep the reviews matching every predicate of `query`, newest first.
/// Reviews from the same day keep their input order. An inverted score or
/// date range simply matches nothing.
pub fn filter_reviews<'a, I>(reviews: I, query: &ReviewQuery) -> Vec<&'a Review>
where
    I: IntoIterator<Item = &'a Review>,
{
    let mut out: Vec<&Review> = reviews.into_iter().filter(|r| query.matches(r)).collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}
