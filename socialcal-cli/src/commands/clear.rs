use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use socialcal_core::Session;

use crate::render::pluralize;

pub async fn run(session: &mut Session, yes: bool) -> Result<()> {
    let count = session.store().len();
    if count == 0 {
        println!("{}", "Nothing to clear".dimmed());
        return Ok(());
    }

    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to clear all calendar entries ({count})?"
            ))
            .default(false)
            .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    session.clear_all().await?;
    println!("{}", format!("Cleared {} {}", count, pluralize("birthday", count)).red());
    Ok(())
}
