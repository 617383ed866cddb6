use crate::types::{HotelSummary, HotelTableRow, Review};
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub const NO_HOTELS: &str = "No hotels match the current filters.";
pub const NO_REVIEWS: &str = "No reviews available for this hotel.";

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Display rows of the hotel table, scores to two decimals.
pub fn hotel_table_rows(hotels: &[HotelSummary]) -> Vec<HotelTableRow> {
    hotels
        .iter()
        .map(|h| HotelTableRow {
            hotel_name: h.hotel_name.clone(),
            average_score: format_number(h.average_score, 2),
            number_reviews: format_int(h.review_count),
        })
        .collect()
}

pub fn render_table<T>(rows: &[T], max_rows: usize) -> Option<String>
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        return None;
    }
    Some(Table::new(slice).with(Style::markdown()).to_string())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    match render_table(rows, max_rows) {
        Some(table_str) => println!("{}\n", table_str),
        None => println!("(no rows)\n"),
    }
}

/// One review card: date, score and nationality on a line, then both texts.
pub fn render_review_card(r: &Review) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "Date: {}    Reviewer Score: {}    Reviewer Nationality: {}",
        r.review_date, r.reviewer_score, r.reviewer_nationality
    );
    let _ = writeln!(s, "Positive Review: {}", r.positive_review);
    let _ = writeln!(s, "Negative Review: {}", r.negative_review);
    s.push_str("---");
    s
}

pub fn print_review_cards(reviews: &[&Review]) {
    if reviews.is_empty() {
        println!("{}\n", NO_REVIEWS);
        return;
    }
    println!("Reviews:");
    for r in reviews {
        println!("{}", render_review_card(r));
    }
    println!();
}
