use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use socialcal_core::{Session, next_birthday};

use crate::render::Render;

pub fn run(session: &Session, today: NaiveDate) -> Result<()> {
    match next_birthday(today, session.store()) {
        Some(next) => println!("{}", next.render()),
        None => println!("{}", "No upcoming birthdays set".dimmed()),
    }

    Ok(())
}
