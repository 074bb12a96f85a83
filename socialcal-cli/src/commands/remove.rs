use anyhow::Result;
use owo_colors::OwoColorize;
use socialcal_core::Session;

use crate::render::Render;

pub async fn run(session: &mut Session, id: &str) -> Result<()> {
    match session.remove(id).await? {
        Some(removed) => println!("{} {}", "Removed".red(), removed.render()),
        None => println!("{} {}", "Removed".red(), format!("[{id}]").dimmed()),
    }
    Ok(())
}
