mod commands;
mod render;
mod utils;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use socialcal_core::Session;
use socialcal_core::config::SocialcalConfig;
use socialcal_core::month::parse_month;
use socialcal_core::provider::{MemoryProvider, ProviderKind, open_provider};
use tracing_subscriber::EnvFilter;

use crate::utils::tui::create_spinner;

#[derive(Parser)]
#[command(name = "socialcal")]
#[command(about = "Keep track of your friends' birthdays on a 12-month calendar")]
struct Cli {
    /// Use a throwaway in-memory store instead of the configured provider
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pin a friend's birthday to a day
    Add {
        name: String,

        /// Social handle, with or without @ or a profile URL
        handle: String,

        /// Month as 1-12 or a name (e.g. "mar")
        #[arg(short, long)]
        month: String,

        #[arg(short, long)]
        day: u32,
    },
    /// List birthdays, optionally filtered by name or handle
    List { query: Option<String> },
    /// Show who celebrates on a given day
    Day {
        #[arg(short, long)]
        month: String,

        #[arg(short, long)]
        day: u32,
    },
    /// Render the year grid
    Grid {
        /// Only show birthdays matching this name or handle
        query: Option<String>,

        #[arg(long, value_enum, default_value_t = View::Board)]
        view: View,

        /// Month to expand in accordion view (defaults to the current month)
        #[arg(long)]
        open: Option<String>,
    },
    /// Show the next upcoming celebration
    Next {
        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Delete one birthday by id
    Remove { id: String },
    /// Delete every birthday
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Board,
    Accordion,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = open_session(cli.ephemeral).await?;

    match cli.command {
        Commands::Add {
            name,
            handle,
            month,
            day,
        } => {
            let month_index = resolve_month(&month)?;
            commands::add::run(&mut session, &name, &handle, month_index, day).await
        }
        Commands::List { query } => commands::list::run(&session, query.as_deref().unwrap_or("")),
        Commands::Day { month, day } => {
            let month_index = resolve_month(&month)?;
            commands::day::run(&session, month_index, day)
        }
        Commands::Grid { query, view, open } => {
            let open = open.as_deref().map(resolve_month).transpose()?;
            commands::grid::run(&session, query.as_deref().unwrap_or(""), view, open, today())
        }
        Commands::Next { today: date } => {
            let today = match date {
                Some(s) => parse_date(&s)?,
                None => today(),
            };
            commands::next::run(&session, today)
        }
        Commands::Remove { id } => commands::remove::run(&mut session, &id).await,
        Commands::Clear { yes } => commands::clear::run(&mut session, yes).await,
    }
}

async fn open_session(ephemeral: bool) -> Result<Session> {
    if ephemeral {
        return Ok(Session::open(Box::new(MemoryProvider::new())).await?);
    }

    let config = SocialcalConfig::load()?;
    tracing::debug!(provider = %config.provider, data_dir = %config.data_path().display(), "loaded config");
    let provider = open_provider(&config)?;

    // Only remote providers are slow enough to deserve a spinner
    if let ProviderKind::External(name) = ProviderKind::from_name(&config.provider) {
        let spinner = create_spinner(format!("Loading birthdays from {name}"));
        let session = Session::open(provider).await;
        spinner.finish_and_clear();
        return Ok(session?);
    }

    Ok(Session::open(provider).await?)
}

fn resolve_month(input: &str) -> Result<u32> {
    parse_month(input).ok_or_else(|| {
        anyhow::anyhow!("Invalid month '{}'. Use 1-12 or a month name", input)
    })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::try_parse_from(["socialcal", "add", "Ada", "@ada", "-m", "dec", "-d", "10"])
            .unwrap();
        match cli.command {
            Commands::Add { name, month, day, .. } => {
                assert_eq!(name, "Ada");
                assert_eq!(resolve_month(&month).unwrap(), 11);
                assert_eq!(day, 10);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_resolve_month_rejects_garbage() {
        assert!(resolve_month("13").is_err());
        assert!(resolve_month("xyz").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert!(parse_date("10/03/2024").is_err());
    }
}
