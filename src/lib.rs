//! Hotel review exploration: load a city's review CSV, aggregate it per
//! hotel, filter hotels by average score and review count, place them on a
//! map and drill into the reviews of one hotel.
//!
//! ```text
//!  reviews.csv ─► loader ─► cache ─► Dashboard
//!                                      ├─ hotels::aggregate (once per load)
//!                                      ├─ hotels::filter_hotels ─► hotels::join_locations ─► map
//!                                      └─ reviews::filter_reviews ─► review cards
//! ```
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod hotels;
pub mod loader;
pub mod output;
pub mod reviews;
pub mod types;
pub mod util;

pub use dashboard::Dashboard;
pub use hotels::HotelFilter;
pub use reviews::ReviewQuery;
