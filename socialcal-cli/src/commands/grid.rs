use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use socialcal_core::birthday::Birthday;
use socialcal_core::month::{MONTHS, month_config};
use socialcal_core::{BirthdayStore, Session, next_birthday};

use crate::View;
use crate::render::{Render, day_cell, month_header};

/// A day number and whoever celebrates on it.
type Cell<'a> = (u32, Vec<&'a Birthday>);

pub fn run(
    session: &Session,
    query: &str,
    view: View,
    open: Option<u32>,
    today: NaiveDate,
) -> Result<()> {
    match next_birthday(today, session.store()) {
        Some(next) => println!("{}", next.render()),
        None => println!("{}", "No upcoming birthdays set".dimmed()),
    }
    println!();

    let visible = visible_store(session.store(), query);

    if !query.is_empty() && visible.is_empty() {
        println!("{}", format!("No friends match '{query}'").dimmed());
        return Ok(());
    }

    match view {
        View::Board => render_board(&visible),
        View::Accordion => render_accordion(&visible, open.unwrap_or(today.month0())),
    }

    Ok(())
}

/// Cells are filled from the search results, not the full store.
fn visible_store(store: &BirthdayStore, query: &str) -> BirthdayStore {
    BirthdayStore::from_snapshot(store.search(query).into_iter().cloned().collect())
}

/// Cells of one month column; empty days are kept only if `include_empty`.
fn month_cells(store: &BirthdayStore, month_index: u32, include_empty: bool) -> Vec<Cell<'_>> {
    let Some(month) = month_config(month_index) else {
        return Vec::new();
    };

    month
        .day_numbers()
        .map(|day_index| (day_index, store.by_day(month_index, day_index)))
        .filter(|(_, birthdays)| include_empty || !birthdays.is_empty())
        .collect()
}

/// Every month with only the days that have someone on them.
fn render_board(store: &BirthdayStore) {
    for month_index in 0..MONTHS.len() as u32 {
        println!("{}", month_header(month_index, store.count_in_month(month_index)));

        let cells = month_cells(store, month_index, false);
        if cells.is_empty() {
            println!("{}", "     ·".dimmed());
        }
        for (day_index, birthdays) in cells {
            println!("{}", day_cell(day_index, &birthdays));
        }
        println!();
    }
}

/// Month headers only, with the `open` month expanded to every cell.
fn render_accordion(store: &BirthdayStore, open: u32) {
    for month_index in 0..MONTHS.len() as u32 {
        let marker = if month_index == open { "v" } else { ">" };
        println!(
            "{} {}",
            marker.dimmed(),
            month_header(month_index, store.count_in_month(month_index))
        );

        if month_index != open {
            continue;
        }

        for (day_index, birthdays) in month_cells(store, month_index, true) {
            println!("{}", day_cell(day_index, &birthdays));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> BirthdayStore {
        BirthdayStore::from_snapshot(vec![
            Birthday {
                id: "1".into(),
                name: "Ada".into(),
                handle: "grace".into(),
                month_index: 11,
                day_index: 10,
            },
            Birthday {
                id: "2".into(),
                name: "Alan".into(),
                handle: "turing".into(),
                month_index: 5,
                day_index: 23,
            },
        ])
    }

    #[test]
    fn test_query_hides_non_matching_cells() {
        let visible = visible_store(&sample_store(), "GRACE");

        assert!(month_cells(&visible, 5, false).is_empty());
        assert_eq!(visible.count_in_month(5), 0);

        let december = month_cells(&visible, 11, false);
        assert_eq!(december.len(), 1);
        assert_eq!(december[0].0, 10);
        assert_eq!(december[0].1[0].name, "Ada");
    }

    #[test]
    fn test_empty_query_shows_everyone() {
        let visible = visible_store(&sample_store(), "");
        assert_eq!(month_cells(&visible, 5, false).len(), 1);
        assert_eq!(month_cells(&visible, 11, false).len(), 1);
    }

    #[test]
    fn test_expanded_month_keeps_every_day() {
        let visible = visible_store(&sample_store(), "");

        let february = month_cells(&visible, 1, true);
        assert_eq!(february.len(), 29);
        assert!(february.iter().all(|(_, birthdays)| birthdays.is_empty()));

        assert!(month_cells(&visible, 12, true).is_empty());
    }
}
