use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One CSV record as read from disk, after header names have been
/// lower-cased. Every field is kept as text so that a single bad cell does
/// not fail the whole file; typing happens in the loader.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    pub hotel_name: Option<String>,
    pub hotel_address: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub reviewer_nationality: Option<String>,
    pub reviewer_score: Option<String>,
    pub review_date: Option<String>,
    pub positive_review: Option<String>,
    pub negative_review: Option<String>,
}

/// A cleaned review row.
///
/// `review_date` is the text as it appeared in the file and is what the
/// review cards show; `date` is the calendar day derived from it at load
/// time and is what the date-range filter compares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub hotel_name: String,
    pub hotel_address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub reviewer_nationality: String,
    pub reviewer_score: f64,
    pub review_date: String,
    pub date: NaiveDate,
    pub positive_review: String,
    pub negative_review: String,
}

/// Per-hotel aggregate over every loaded review of that hotel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelSummary {
    pub hotel_name: String,
    pub average_score: f64,
    pub review_count: usize,
}

/// A filtered hotel joined with one location drawn from its reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelView {
    pub hotel_name: String,
    pub average_score: f64,
    pub review_count: usize,
    pub hotel_address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HotelTableRow {
    #[serde(rename = "Hotel Name")]
    #[tabled(rename = "Hotel Name")]
    pub hotel_name: String,
    #[serde(rename = "Average Score")]
    #[tabled(rename = "Average Score")]
    pub average_score: String,
    #[serde(rename = "Number of Reviews")]
    #[tabled(rename = "Number of Reviews")]
    pub number_reviews: String,
}

/// A single marker of the hotel map.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapPoint {
    pub hotel_name: String,
    pub hotel_address: String,
    pub lat: f64,
    pub lng: f64,
}

/// Initial camera of the hotel map.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapLayer {
    pub view: MapViewState,
    pub points: Vec<MapPoint>,
}
