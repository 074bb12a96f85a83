use anyhow::Result;
use owo_colors::OwoColorize;
use socialcal_core::Session;
use socialcal_core::birthday::Birthday;
use socialcal_core::month::MONTHS;

use crate::render::{Render, month_header};

pub fn run(session: &Session, query: &str) -> Result<()> {
    let results = session.store().search(query);

    if results.is_empty() {
        if query.is_empty() {
            println!("{}", "No birthdays yet. Add one with `socialcal add`".dimmed());
        } else {
            println!("{}", format!("No friends match '{query}'").dimmed());
        }
        return Ok(());
    }

    let mut first = true;
    for month_index in 0..MONTHS.len() as u32 {
        let in_month: Vec<&Birthday> = results
            .iter()
            .copied()
            .filter(|b| b.month_index == month_index)
            .collect();

        if in_month.is_empty() {
            continue;
        }

        if !first {
            println!();
        }
        first = false;

        println!("{}", month_header(month_index, in_month.len()));
        for birthday in in_month {
            println!("  {:>2}  {}", birthday.day_index, birthday.render());
        }
    }

    // Records whose month index is outside the grid still exist; show them last
    let unplaced: Vec<&Birthday> = results
        .iter()
        .copied()
        .filter(|b| b.month_index as usize >= MONTHS.len())
        .collect();
    if !unplaced.is_empty() {
        println!();
        println!("{}", "Unplaced".dimmed());
        for birthday in unplaced {
            println!("  {}", birthday.render());
        }
    }

    Ok(())
}
