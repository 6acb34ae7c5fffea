//! Operator CLI: inspect the configured feeds and preview search results
//! offline, with the membership gate stubbed out.

use anyhow::Result;
use clap::{Parser, Subcommand};
use reel_bot::{BotConfig, BotService, ButtonAction, ChatContext, ChatKind, LogSink, UserRef};
use reel_catalog::HttpFeedFetcher;
use reel_gate::StaticMembership;
use reel_protocol::CallbackToken;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reel")]
#[command(about = "Movie catalog search bot toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config; built-in defaults are used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the configured feeds and print per-category record counts
    Feeds,
    /// Load the catalog and preview a ranked result page
    Search {
        /// Free-text query
        query: String,

        /// Page to render (0-based)
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Print the raw outbound payload as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Stderr)
        .init();

    let config = match &cli.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };

    match cli.command {
        Commands::Feeds => feeds(config).await,
        Commands::Search { query, page, json } => search(config, &query, page, json).await,
    }
}

async fn feeds(config: BotConfig) -> Result<()> {
    let fetcher = HttpFeedFetcher::new();
    let catalog = reel_catalog::load(&config.feeds, &fetcher).await;

    let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
    for record in catalog.records() {
        *per_category.entry(record.category.as_str()).or_default() += 1;
    }

    println!("{} records from {} feeds", catalog.len(), config.feeds.len());
    for (category, count) in per_category {
        println!("  {category}: {count}");
    }
    Ok(())
}

/// Wire payload for the requested page, going through the token codec so the
/// same delimiter normalization and size ceiling apply as in the bot.
fn page_token(query: &str, page: usize) -> Result<String> {
    let token = CallbackToken::Next {
        query: query.to_string(),
        page,
    };
    Ok(token.encode()?)
}

async fn search(config: BotConfig, query: &str, page: usize, json: bool) -> Result<()> {
    let service = BotService::new(
        config,
        HttpFeedFetcher::new(),
        StaticMembership::member(),
        LogSink,
    );
    let operator = UserRef {
        id: 0,
        first_name: "operator".to_string(),
        username: None,
    };
    let chat = ChatContext {
        id: 0,
        kind: ChatKind::Private,
    };

    // Page N is reached the way the bot reaches it: by replaying a token.
    let response = if page == 0 {
        service.handle_search(&operator, &chat, query).await
    } else {
        let payload = page_token(query, page)?;
        service.handle_callback(&operator, &chat, &payload).await
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", response.text);
    for row in &response.buttons {
        let rendered: Vec<String> = row
            .iter()
            .map(|button| match &button.action {
                ButtonAction::Url(url) => format!("[{}] -> {url}", button.label),
                ButtonAction::Callback(payload) => format!("[{}] ~> {payload}", button.label),
            })
            .collect();
        println!("  {}", rendered.join("  "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_token_goes_through_the_codec() {
        assert_eq!(page_token("sholay", 2).expect("encode"), "n|2|sholay");
        // Delimiters in the query are normalized, never passed through raw.
        assert_eq!(page_token("piku|2015", 1).expect("encode"), "n|1|piku 2015");
        // Oversize payloads are refused instead of silently truncated.
        assert!(page_token(&"x".repeat(200), 1).is_err());
    }
}
