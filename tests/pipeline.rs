use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use hotel_reviews::cache::DatasetCache;
use hotel_reviews::dashboard::map_layer;
use hotel_reviews::{Dashboard, HotelFilter, ReviewQuery};
use tempfile::NamedTempFile;

const CSV: &str = "\
Hotel_Address,Review_Date,Hotel_Name,Reviewer_Nationality,Negative_Review,Positive_Review,Reviewer_Score,lat,lng
Via Roma 1 Milan,8/3/2017,Hotel Roma, Italy ,No Negative,Great breakfast,9.0,45.4654,9.1859
Via Roma 1 Milan,12/31/2017,Hotel Roma, France ,Small room,Friendly staff,7.0,45.4654,9.1859
Corso Como 5 Milan,1/1/2018,Hotel Como, Germany ,Noisy,Central,6.0,45.4820,9.1880
Corso Como 5 Milan,7/15/2017,Hotel Como, Italy ,Nothing,Clean,8.0,45.4820,9.1880
Corso Como 5 Milan,9/1/2017,Hotel Como, Spain ,Breakfast,View,7.0,45.4820,9.1880
Piazza Duomo Milan,10/10/2017,Hotel Solo, Italy ,None,Location,9.5,45.4641,9.1919
Viale Monza Milan,11/11/2017,Hotel Bad, Italy ,Dirty,Nothing,2.5,NA,NA
Broken Row,not a date,Hotel Roma, Italy ,x,y,8.0,45.0,9.0
";

fn fixture() -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{}", CSV).unwrap();
    tmp
}

fn dashboard(tmp: &NamedTempFile) -> Dashboard {
    let cache = DatasetCache::new();
    let ds = cache.get_or_load(tmp.path(), 100_000).unwrap();
    Dashboard::new(Arc::clone(&ds))
}

fn names(hotels: &[hotel_reviews::types::HotelSummary]) -> Vec<&str> {
    hotels.iter().map(|h| h.hotel_name.as_str()).collect()
}

#[test]
fn test_malformed_rows_are_skipped() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    assert_eq!(d.dataset().report.total_rows, 8);
    assert_eq!(d.dataset().report.skipped_rows, 1);
    assert_eq!(d.dataset().reviews.len(), 7);
}

#[test]
fn test_aggregate_one_summary_per_hotel() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let stats = d.stats();
    assert_eq!(stats.len(), 4);
    let roma = &stats["Hotel Roma"];
    assert_eq!(roma.review_count, 2);
    assert!((roma.average_score - 8.0).abs() < 1e-9);
    let como = &stats["Hotel Como"];
    assert_eq!(como.review_count, 3);
    assert!((como.average_score - 7.0).abs() < 1e-9);
}

#[test]
fn test_hotel_roma_passes_default_thresholds() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let hotels = d.hotels(&HotelFilter {
        min_avg_score: 3.0,
        min_review_count: 0,
    });
    assert_eq!(names(&hotels), vec!["Hotel Solo", "Hotel Roma", "Hotel Como"]);
}

#[test]
fn test_single_review_hotel_needs_min_reviews() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let hotels = d.hotels(&HotelFilter {
        min_avg_score: 3.0,
        min_review_count: 2,
    });
    assert!(!names(&hotels).contains(&"Hotel Solo"));
    assert_eq!(names(&hotels), vec!["Hotel Roma", "Hotel Como"]);
}

#[test]
fn test_average_equal_to_threshold_is_excluded() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let hotels = d.hotels(&HotelFilter {
        min_avg_score: 8.0,
        min_review_count: 0,
    });
    assert_eq!(names(&hotels), vec!["Hotel Solo"]);
}

#[test]
fn test_no_hotel_passes() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let hotels = d.hotels(&HotelFilter {
        min_avg_score: 10.0,
        min_review_count: 0,
    });
    assert!(hotels.is_empty());
    assert!(d.map_points(&hotels).is_empty());
    assert!(map_layer(&d.map_points(&hotels)).points.is_empty());
}

#[test]
fn test_map_points_follow_filtered_order() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let hotels = d.hotels(&HotelFilter {
        min_avg_score: 0.0,
        min_review_count: 0,
    });
    let views = d.map_points(&hotels);
    let joined: Vec<&str> = views.iter().map(|v| v.hotel_name.as_str()).collect();
    assert_eq!(joined, names(&hotels));
    assert_eq!(views[1].hotel_address, "Via Roma 1 Milan");

    // Hotel Bad has no coordinates: joined, but not plotted.
    let layer = map_layer(&views);
    assert_eq!(layer.points.len(), views.len() - 1);
    assert!(layer.points.iter().all(|p| p.hotel_name != "Hotel Bad"));
}

#[test]
fn test_empty_nationality_selection_returns_all() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let out = d.reviews("Hotel Roma", &ReviewQuery::default());
    let nats: Vec<&str> = out.iter().map(|r| r.reviewer_nationality.as_str()).collect();
    assert_eq!(nats, vec!["France", "Italy"]);

    let everyone = ReviewQuery {
        nationalities: d.nationalities("Hotel Roma").into_iter().collect(),
        ..ReviewQuery::default()
    };
    assert_eq!(d.reviews("Hotel Roma", &everyone), out);
}

#[test]
fn test_nationality_selection_restricts() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let query = ReviewQuery {
        nationalities: BTreeSet::from(["Italy".to_string()]),
        ..ReviewQuery::default()
    };
    let out = d.reviews("Hotel Roma", &query);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].positive_review, "Great breakfast");
}

#[test]
fn test_default_date_range_bounds() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let como = d.reviews("Hotel Como", &ReviewQuery::default());
    let dates: Vec<NaiveDate> = como.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2017, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2017, 7, 15).unwrap(),
        ]
    );

    let roma = d.reviews("Hotel Roma", &ReviewQuery::default());
    assert_eq!(roma[0].review_date, "12/31/2017");
}

#[test]
fn test_score_bounds_inclusive_end_to_end() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    let query = ReviewQuery {
        min_score: 7,
        max_score: 7,
        ..ReviewQuery::default()
    };
    let out = d.reviews("Hotel Roma", &query);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].reviewer_score, 7.0);
}

#[test]
fn test_unknown_or_empty_hotel_has_no_reviews() {
    let tmp = fixture();
    let d = dashboard(&tmp);
    assert!(d.reviews("", &ReviewQuery::default()).is_empty());
    assert!(d.reviews("Hotel Nowhere", &ReviewQuery::default()).is_empty());
    assert!(d.nationalities("Hotel Nowhere").is_empty());
}

#[test]
fn test_global_cache_reuses_load() {
    let tmp = fixture();
    let cache = hotel_reviews::cache::global();
    let a = cache.get_or_load(tmp.path(), 3).unwrap();
    let b = cache.get_or_load(tmp.path(), 3).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.reviews.len(), 3);
}
