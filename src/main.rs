// Entry point and interactive terminal flow.
//
// The binary stands in for the dashboard's widgets:
// - The dataset is loaded once at startup through the process-wide cache;
//   a load failure ends the program.
// - Option [1] asks for the hotel thresholds, prints the hotel table and
//   exports the table and the map layer.
// - Option [2] picks one of the listed hotels and asks for the review
//   filters, then prints the matching review cards.
// - Option [3] clears the cache and reloads the file.
use anyhow::{Context, Result};
use chrono::NaiveDate;
use hotel_reviews::config::{Config, AVG_SCORE_RANGE, REVIEW_COUNT_RANGE, REVIEW_SCORE_RANGE};
use hotel_reviews::dashboard::map_layer;
use hotel_reviews::types::HotelSummary;
use hotel_reviews::util::{format_int, format_number, parse_date_safe};
use hotel_reviews::{cache, output, Dashboard, HotelFilter, ReviewQuery};
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

struct Session {
    config: Config,
    dashboard: Dashboard,
    hotels: Vec<HotelSummary>,
}

/// Print `label` with its default and read one trimmed line.
fn prompt(label: &str, default: &str) -> String {
    print!("{} [{}]: ", label, default);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the menu.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Parse `input` or fall back to `default`, then clamp into `range` the way
/// a slider would.
fn parse_clamped<T>(input: &str, default: T, range: (T, T)) -> T
where
    T: FromStr + PartialOrd + Copy,
{
    let v = if input.is_empty() {
        default
    } else {
        input.parse().unwrap_or(default)
    };
    if v < range.0 {
        range.0
    } else if v > range.1 {
        range.1
    } else {
        v
    }
}

/// Comma-separated selection; blank or `all` means nothing selected.
fn parse_selection(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
        .map(str::to_string)
        .collect()
}

fn parse_date_or(input: &str, default: NaiveDate) -> NaiveDate {
    parse_date_safe(Some(input)).unwrap_or(default)
}

fn load_session(config: Config) -> Result<Session> {
    let dataset = cache::global()
        .get_or_load(&config.data_path, config.number_rows)
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    println!(
        "Processing dataset... ({} rows read, {} reviews loaded)",
        format_int(dataset.report.total_rows),
        format_int(dataset.report.loaded_rows)
    );
    if dataset.report.skipped_rows > 0 {
        println!(
            "Note: {} rows skipped due to a missing hotel name, score or date.",
            format_int(dataset.report.skipped_rows)
        );
    }
    println!();
    let dashboard = Dashboard::new(Arc::clone(&dataset));
    let hotels = dashboard.hotels(&HotelFilter::default());
    Ok(Session {
        config,
        dashboard,
        hotels,
    })
}

/// Handle option [1]: hotel thresholds, table, and map export.
fn handle_hotels(session: &mut Session) {
    let defaults = HotelFilter::default();
    let min_reviews = prompt(
        "Select minimum number of reviews",
        &defaults.min_review_count.to_string(),
    );
    let min_score = prompt(
        "Select minimum average score",
        &format_number(defaults.min_avg_score, 1),
    );
    let filter = HotelFilter {
        min_review_count: parse_clamped(
            &min_reviews,
            defaults.min_review_count,
            REVIEW_COUNT_RANGE,
        ),
        min_avg_score: parse_clamped(&min_score, defaults.min_avg_score, AVG_SCORE_RANGE),
    };
    session.hotels = session.dashboard.hotels(&filter);

    println!(
        "\nHotels with average score higher than {}\n",
        format_number(filter.min_avg_score, 1)
    );
    let rows = output::hotel_table_rows(&session.hotels);
    if rows.is_empty() {
        println!("{}\n", output::NO_HOTELS);
        return;
    }
    output::preview_table_rows(&rows, 20);

    let table_file = session.config.export_dir.join("hotels.csv");
    if let Err(e) = output::write_csv(&table_file, &rows) {
        eprintln!("Write error: {}", e);
    }
    let layer = map_layer(&session.dashboard.map_points(&session.hotels));
    let map_file = session.config.export_dir.join("hotel_map.json");
    if let Err(e) = output::write_json(&map_file, &layer) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "(Full table exported to {}, {} map points exported to {})\n",
        table_file.display(),
        format_int(layer.points.len()),
        map_file.display()
    );
}

/// Handle option [2]: choose a listed hotel and filter its reviews.
fn handle_reviews(session: &Session) {
    if session.hotels.is_empty() {
        println!("{}\n", output::NO_HOTELS);
        return;
    }
    println!("Select a hotel to see reviews:");
    for (idx, h) in session.hotels.iter().enumerate() {
        println!("[{}] {}", idx + 1, h.hotel_name);
    }
    let pick = prompt("Hotel number", "1");
    let idx = parse_clamped(&pick, 1usize, (1, session.hotels.len())) - 1;
    let hotel = &session.hotels[idx].hotel_name;

    if session.dashboard.hotel_reviews(hotel).is_empty() {
        println!("{}\n", output::NO_REVIEWS);
        return;
    }

    let defaults = ReviewQuery::default();
    let min_score = prompt("Minimum review score", &defaults.min_score.to_string());
    let max_score = prompt("Maximum review score", &defaults.max_score.to_string());
    println!(
        "Nationalities: {}",
        session.dashboard.nationalities(hotel).join(", ")
    );
    let selected = prompt("Filter by reviewer nationality (comma separated)", "all");
    let start = prompt("Start date", &defaults.start_date.to_string());
    let end = prompt("End date", &defaults.end_date.to_string());

    let query = ReviewQuery {
        min_score: parse_clamped(&min_score, defaults.min_score, REVIEW_SCORE_RANGE),
        max_score: parse_clamped(&max_score, defaults.max_score, REVIEW_SCORE_RANGE),
        nationalities: parse_selection(&selected),
        start_date: parse_date_or(&start, defaults.start_date),
        end_date: parse_date_or(&end, defaults.end_date),
    };
    println!();
    output::print_review_cards(&session.dashboard.reviews(hotel, &query));
}

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env().context("invalid configuration")?;
    let mut session = load_session(config)?;

    loop {
        println!("Milan hotels");
        println!("[1] Filter hotels");
        println!("[2] Show reviews of a hotel");
        println!("[3] Reload the file\n");
        match read_choice().as_str() {
            "1" => handle_hotels(&mut session),
            "2" => {
                handle_reviews(&session);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "3" => {
                cache::global().clear();
                session = load_session(session.config)?;
            }
            _ => println!("Invalid choice. Please enter 1, 2 or 3.\n"),
        }
    }
    Ok(())
}
