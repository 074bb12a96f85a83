use anyhow::Result;
use owo_colors::OwoColorize;
use socialcal_core::{NewBirthday, Session};

use crate::render::Render;

pub async fn run(
    session: &mut Session,
    name: &str,
    handle: &str,
    month_index: u32,
    day_index: u32,
) -> Result<()> {
    let entry = NewBirthday::parse(name, handle, month_index, day_index)?;
    let created = session.add(entry).await?;

    println!("{} {}", "Added".green(), created.render());
    Ok(())
}
