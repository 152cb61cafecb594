//! Dashboard configuration
//! Compiled-in defaults with a single environment override for the data source.

use crate::data::DataSource;
use std::env;

/// FiveThirtyEight CSV of sports owners' political donations.
pub const SPORTS_DONATIONS_DATA: &str = "https://raw.githubusercontent.com/fivethirtyeight/data/master/sports-political-donations/sports-political-donations.csv";
pub const DATA_LINK: &str =
    "https://github.com/fivethirtyeight/data/tree/master/sports-political-donations";
pub const ARTICLE_LINK: &str = "https://fivethirtyeight.com/features/inside-the-political-donation-history-of-wealthy-sports-owners/";

/// Environment variable that replaces the default source (URL or local CSV path).
pub const SOURCE_ENV_VAR: &str = "DONATIONS_SOURCE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub title: String,
    pub data_link: String,
    pub article_link: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Url(SPORTS_DONATIONS_DATA.to_string()),
            title: "Political Donations of U.S. Sports Owners".to_string(),
            data_link: DATA_LINK.to_string(),
            article_link: ARTICLE_LINK.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the source taken from `DONATIONS_SOURCE` when set.
    pub fn from_env() -> Self {
        Self::with_source_override(env::var(SOURCE_ENV_VAR).ok())
    }

    /// Defaults, with the source replaced when `location` is non-blank.
    pub fn with_source_override(location: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(location) = location.filter(|l| !l.trim().is_empty()) {
            config.source = DataSource::parse(&location);
        }
        config
    }

    /// Intro text naming the article and the data repository.
    pub fn description(&self) -> String {
        format!(
            "Exploring the data behind FiveThirtyEight's investigation ({}) into political \
             donations of U.S. sports franchise owners.\nSource Data: {}",
            self.article_link, self.data_link
        )
    }
}
