//! TUI rendering traits for socialcal types.
//!
//! Extension traits that add colored terminal rendering to
//! socialcal-core types using owo_colors.

use owo_colors::OwoColorize;
use socialcal_core::birthday::Birthday;
use socialcal_core::month::month_config;
use socialcal_core::next_birthday::NextBirthday;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Birthday {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.name.bold(),
            format!("@{}", self.handle).cyan(),
            format!("[{}]", self.id).dimmed()
        )
    }
}

impl Render for NextBirthday<'_> {
    fn render(&self) -> String {
        let badge = self.countdown_label();
        let badge = if self.is_today() {
            badge.on_red().white().bold().to_string()
        } else {
            badge.red().bold().to_string()
        };
        let month = month_config(self.birthday.month_index)
            .map(|m| m.name)
            .unwrap_or("an unknown month");

        format!(
            "{} {} {} {} {}",
            "Next celebration:".dimmed(),
            self.birthday.name.bold(),
            format!("in {month}").dimmed(),
            badge,
            self.birthday.avatar_url().dimmed()
        )
    }
}

/// Month header tinted per month, e.g. "January (2)".
pub fn month_header(month_index: u32, count: usize) -> String {
    let name = month_config(month_index).map(|m| m.name).unwrap_or("Unknown");
    let label = format!("{name} ({count})");

    match month_index {
        0 | 11 => label.red().bold().to_string(),
        1 => label.magenta().bold().to_string(),
        2 | 3 => label.purple().bold().to_string(),
        4 | 5 => label.blue().bold().to_string(),
        6 => label.cyan().bold().to_string(),
        7 | 8 => label.green().bold().to_string(),
        _ => label.yellow().bold().to_string(),
    }
}

/// One grid cell: the day number followed by whoever celebrates on it.
pub fn day_cell(day_index: u32, birthdays: &[&Birthday]) -> String {
    let day = format!("{day_index:>4}");

    if birthdays.is_empty() {
        return format!("{}  {}", day.dimmed(), "·".dimmed());
    }

    let people: Vec<String> = birthdays.iter().map(|b| b.render()).collect();
    format!("{}  {}", day, people.join(", "))
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
