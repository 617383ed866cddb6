use crate::config::{MAP_CENTER, MAP_PITCH, MAP_ZOOM};
use crate::hotels::{aggregate, filter_hotels, join_locations, HotelFilter};
use crate::loader::Dataset;
use crate::reviews::{filter_reviews, nationalities, reviews_for_hotel, ReviewQuery};
use crate::types::{HotelSummary, HotelView, MapLayer, MapPoint, MapViewState, Review};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One loaded dataset together with its per-hotel aggregation.
///
/// The aggregation is computed once here; every filter change afterwards
/// works from it and from the read-only reviews.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    stats: BTreeMap<String, HotelSummary>,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let stats = aggregate(&dataset.reviews);
        log::info!(
            "aggregated {} reviews into {} hotels",
            dataset.reviews.len(),
            stats.len()
        );
        Self { dataset, stats }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn stats(&self) -> &BTreeMap<String, HotelSummary> {
        &self.stats
    }

    pub fn hotels(&self, filter: &HotelFilter) -> Vec<HotelSummary> {
        filter_hotels(&self.stats, filter)
    }

    pub fn map_points(&self, hotels: &[HotelSummary]) -> Vec<HotelView> {
        join_locations(hotels, &self.dataset.reviews)
    }

    pub fn hotel_reviews(&self, hotel_name: &str) -> Vec<&Review> {
        reviews_for_hotel(&self.dataset.reviews, hotel_name)
    }

    pub fn nationalities(&self, hotel_name: &str) -> Vec<String> {
        nationalities(self.hotel_reviews(hotel_name))
    }

    pub fn reviews(&self, hotel_name: &str, query: &ReviewQuery) -> Vec<&Review> {
        let out = filter_reviews(self.hotel_reviews(hotel_name), query);
        log::debug!("{} reviews of {:?} match", out.len(), hotel_name);
        out
    }
}

/// Map layer for the joined hotels. Hotels without coordinates are not
/// plotted.
pub fn map_layer(views: &[HotelView]) -> MapLayer {
    let points = views
        .iter()
        .filter_map(|v| {
            Some(MapPoint {
                hotel_name: v.hotel_name.clone(),
                hotel_address: v.hotel_address.clone(),
                lat: v.lat?,
                lng: v.lng?,
            })
        })
        .collect();
    MapLayer {
        view: MapViewState {
            latitude: MAP_CENTER.0,
            longitude: MAP_CENTER.1,
            zoom: MAP_ZOOM,
            pitch: MAP_PITCH,
        },
        points,
    }
}
