use crate::types::{RawRow, Review};
use crate::util::{clean_text, parse_date_safe, parse_f64_safe};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REQUIRED_COLUMNS: &[&str] = &[
    "hotel_name",
    "hotel_address",
    "lat",
    "lng",
    "reviewer_nationality",
    "reviewer_score",
    "review_date",
    "positive_review",
    "negative_review",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
    pub missing_coords: usize,
}

/// The reviews of one load plus what happened while reading them.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub reviews: Vec<Review>,
    pub report: LoadReport,
}

/// Read at most `number_rows` records from the top of the CSV at `path`.
pub fn load_reviews(path: &Path, number_rows: usize) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = read_reviews(file, number_rows)?;
    log::info!(
        "loaded {} reviews from {} ({} skipped, {} without coordinates)",
        dataset.report.loaded_rows,
        path.display(),
        dataset.report.skipped_rows,
        dataset.report.missing_coords
    );
    Ok(dataset)
}

/// Same as [`load_reviews`] over any reader; header names are matched
/// case-insensitively.
pub fn read_reviews<R: Read>(input: R, number_rows: usize) -> Result<Dataset, LoadError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(input);

    let headers: StringRecord = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == **c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut report = LoadReport::default();
    let mut reviews = Vec::new();

    for result in rdr.records().take(number_rows) {
        report.total_rows += 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::debug!("row {}: unreadable record: {}", report.total_rows, e);
                report.skipped_rows += 1;
                continue;
            }
        };
        let row: RawRow = match record.deserialize(Some(&headers)) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("row {}: {}", report.total_rows, e);
                report.skipped_rows += 1;
                continue;
            }
        };
        match clean_row(row) {
            Some(review) => {
                if review.lat.is_none() || review.lng.is_none() {
                    report.missing_coords += 1;
                }
                reviews.push(review);
            }
            None => report.skipped_rows += 1,
        }
    }

    if report.skipped_rows > 0 {
        log::warn!(
            "skipped {} of {} rows with a missing hotel name, score or date",
            report.skipped_rows,
            report.total_rows
        );
    }
    report.loaded_rows = reviews.len();
    Ok(Dataset { reviews, report })
}

/// Type one raw row. Rows without a hotel name, with a score outside
/// 0..=10, or with an unreadable date are dropped.
fn clean_row(row: RawRow) -> Option<Review> {
    let hotel_name = clean_text(row.hotel_name);
    if hotel_name.is_empty() {
        return None;
    }
    let reviewer_score = match parse_f64_safe(row.reviewer_score.as_deref()) {
        Some(s) if (0.0..=10.0).contains(&s) => s,
        _ => return None,
    };
    let date = parse_date_safe(row.review_date.as_deref())?;

    Some(Review {
        hotel_name,
        hotel_address: clean_text(row.hotel_address),
        lat: parse_f64_safe(row.lat.as_deref()),
        lng: parse_f64_safe(row.lng.as_deref()),
        reviewer_nationality: clean_text(row.reviewer_nationality),
        reviewer_score,
        review_date: clean_text(row.review_date),
        date,
        positive_review: clean_text(row.positive_review),
        negative_review: clean_text(row.negative_review),
    })
}
