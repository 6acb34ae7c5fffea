use anyhow::{Context, Result};
use reel_catalog::FeedSource;
use reel_gate::GroupDescriptor;
use serde::Deserialize;
use std::path::Path;

/// Runtime configuration, loadable from a TOML file.
///
/// Defaults mirror the deployed bot: three decade feeds, two required
/// groups, ten items per page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Feeds the catalog is built from, in dedup priority order.
    pub feeds: Vec<FeedSource>,
    /// Groups a user must join before results are revealed, in the order
    /// they are listed on join prompts.
    pub groups: Vec<GroupDescriptor>,
    /// Results per page.
    pub page_size: usize,
    /// Chat that receives operator notices.
    pub admin_chat_id: i64,
    /// Deep-link base: `<base><key>` re-opens this bot on a record.
    pub deep_link_base: String,
    /// Delivery-bot base: `<base><key>` opens the media bot on a record.
    pub media_link_base: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        let feed = |category: &str, file: &str| FeedSource {
            category: category.to_string(),
            url: format!("https://raw.githubusercontent.com/itzfew/MoviesBot/master/data/{file}"),
        };
        Self {
            feeds: vec![
                feed("1950-1989", "bollywood5089.csv"),
                feed("1990-2009", "bollywood9009.csv"),
                feed("2010-2019", "bollywood1019.csv"),
            ],
            groups: vec![
                GroupDescriptor {
                    id: "-1001234567890".to_string(),
                    invite_url: "https://t.me/+2csYKkDagRBhMWRl".to_string(),
                    name: "Group 1".to_string(),
                },
                GroupDescriptor {
                    id: "-1009876543210".to_string(),
                    invite_url: "https://t.me/+FUdbdVUKII02M2Jl".to_string(),
                    name: "Group 2".to_string(),
                },
            ],
            page_size: 10,
            admin_chat_id: 6_930_703_214,
            deep_link_base: "https://t.me/Search_indianMoviesbot?start=".to_string(),
            media_link_base: "https://t.me/SearchMoviesbot_bot?start=".to_string(),
        }
    }
}

impl BotConfig {
    /// Load from a TOML file; fields left out fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_cover_three_feeds_and_two_groups() {
        let config = BotConfig::default();
        assert_eq!(config.feeds.len(), 3);
        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bot.toml");
        std::fs::write(
            &path,
            r#"
page_size = 4

[[feeds]]
category = "testing"
url = "https://feeds.example/test.csv"
"#,
        )
        .expect("write config");

        let config = BotConfig::load(&path).expect("load");
        assert_eq!(config.page_size, 4);
        assert_eq!(config.feeds.len(), 1);
        assert_eq!(config.feeds[0].category, "testing");
        // Untouched sections fall back.
        assert_eq!(config.groups.len(), 2);
    }
}
