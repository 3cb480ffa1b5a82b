//! Command-line driver for the repolens store.
//!
//! Each subcommand dispatches the events a presentation layer would send,
//! waits for the store to settle, and prints the affected slice as JSON.
//!
//! ```text
//! repolens list --pages 3 --sort desc
//! repolens search "tokio runtime"
//! repolens repo rust-lang/rust
//! repolens profile --avatar file:///tmp/me.png
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use repolens::app::{DebouncedIntent, FeedSource, SearchDebouncer, SortOrder};
use repolens::observability::init_tracing;
use repolens::{initialize, Config, Dispatcher, Event};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "repolens", version, about = "Browse and search the public repository catalog")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Configuration override as KEY=VALUE, may be repeated
    #[arg(short = 'o', long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Page through the primary feed
    List {
        /// Cursor to start from
        #[arg(long, default_value_t = 0)]
        since: u64,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Order the printed feed by name
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Search repositories by keyword
    Search {
        /// Query text; blank text clears the search feed
        query: Vec<String>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Show one repository
    Repo {
        /// Repository as OWNER/NAME
        full_name: String,
    },
    /// Show the configured profile
    Profile {
        /// Locally chosen avatar URI
        #[arg(long)]
        avatar: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => Self::Ascending,
            SortArg::Desc => Self::Descending,
        }
    }
}

fn parse_overrides(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("override '{pair}' is not KEY=VALUE"))?;
            Ok((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_feed(dispatcher: &Dispatcher, source: FeedSource, sort: Option<SortArg>) -> Result<()> {
    let catalog = &dispatcher.store().catalog;
    let feed: Vec<_> = match sort {
        Some(order) => catalog.sorted(source, order.into()),
        None => catalog.feed(source).iter().collect(),
    };
    print_json(&serde_json::json!({
        "items": feed,
        "pagination_cursor": catalog.pagination_cursor,
        "has_more_pages": catalog.has_more_pages,
        "last_error": catalog.last_error,
    }))
}

async fn list(dispatcher: &mut Dispatcher, since: u64, pages: u32, sort: Option<SortArg>) -> Result<()> {
    dispatcher.dispatch(Event::FetchRepositoriesRequested { since })?;
    dispatcher.settle().await?;

    for _ in 1..pages {
        let catalog = &dispatcher.store().catalog;
        if catalog.last_error.is_some() || !catalog.has_more_pages {
            break;
        }
        dispatcher.dispatch(Event::FetchMoreRequested)?;
        dispatcher.settle().await?;
    }

    print_feed(dispatcher, FeedSource::Catalog, sort)
}

async fn search(dispatcher: &mut Dispatcher, debounce: std::time::Duration, text: &str, sort: Option<SortArg>) -> Result<()> {
    let mut debouncer = SearchDebouncer::new(debounce);
    let intent = match debouncer.push(text, Instant::now()) {
        Some(intent) => Some(intent),
        None => debouncer.next_intent().await,
    };

    match intent {
        Some(DebouncedIntent::Search(query)) => {
            dispatcher.dispatch(Event::SearchRequested { query })?;
        }
        Some(DebouncedIntent::Clear) | None => {
            dispatcher.dispatch(Event::ClearSearch)?;
        }
    }
    dispatcher.settle().await?;

    print_feed(dispatcher, FeedSource::SearchResults, sort)
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = parse_overrides(&cli.overrides)?;
    let config = Config::load(cli.config.as_deref())?.with_overrides(&overrides);
    init_tracing(&config);

    let mut dispatcher = initialize(&config)?;

    match cli.command {
        Command::List { since, pages, sort } => {
            if pages == 0 {
                bail!("--pages must be at least 1");
            }
            list(&mut dispatcher, since, pages, sort).await
        }
        Command::Search { query, sort } => {
            search(&mut dispatcher, config.search_debounce(), &query.join(" "), sort).await
        }
        Command::Repo { full_name } => {
            dispatcher.dispatch(Event::FetchEntityRequested { full_name })?;
            dispatcher.settle().await?;
            print_json(&dispatcher.store().entity)
        }
        Command::Profile { avatar } => {
            if avatar.is_some() {
                dispatcher.dispatch(Event::SetLocalAvatarOverride(avatar))?;
            }
            dispatcher.dispatch(Event::FetchProfileRequested)?;
            dispatcher.settle().await?;

            let profile = &dispatcher.store().profile;
            print_json(&serde_json::json!({
                "profile": profile,
                "effective_avatar_url": profile.effective_avatar_url(),
            }))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}
