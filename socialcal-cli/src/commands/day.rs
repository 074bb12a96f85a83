use anyhow::Result;
use owo_colors::OwoColorize;
use socialcal_core::Session;
use socialcal_core::month::month_config;

use crate::render::Render;

pub fn run(session: &Session, month_index: u32, day_index: u32) -> Result<()> {
    let month = month_config(month_index)
        .ok_or_else(|| anyhow::anyhow!("Invalid month index {month_index}"))?;
    let birthdays = session.store().by_day(month_index, day_index);

    println!("{}", format!("{} {}", month.name, day_index).bold());

    if birthdays.is_empty() {
        println!("  {}", "Nobody yet".dimmed());
        return Ok(());
    }

    for birthday in birthdays {
        println!("  {}", birthday.render());
        println!("    {}", birthday.avatar_url().dimmed());
    }

    Ok(())
}
