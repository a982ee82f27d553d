use serde_json::Value;
use tracing::{debug, info};

use super::Scraper;
use crate::api::StatsApi;
use crate::error::ScrapeError;

/// `displayName` of every entry of `/api/v1/statTypes`.
pub async fn fetch_stat_types(api: &dyn StatsApi) -> Result<Vec<String>, ScrapeError> {
    let document = api.stat_types().await?;
    extract_field(&document, "statTypes", "displayName")
}

/// `name` of every entry of `/api/v1/standingsTypes`.
pub async fn fetch_standings_types(api: &dyn StatsApi) -> Result<Vec<String>, ScrapeError> {
    let document = api.standings_types().await?;
    extract_field(&document, "standingsTypes", "name")
}

fn extract_field(document: &Value, what: &str, field: &str) -> Result<Vec<String>, ScrapeError> {
    let entries = document
        .as_array()
        .ok_or_else(|| ScrapeError::missing(format!("{what} array")))?;

    let names: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.get(field).and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    if names.len() < entries.len() {
        debug!(
            what,
            field,
            skipped = entries.len() - names.len(),
            "Enumeration entries without the expected field"
        );
    }
    Ok(names)
}

impl Scraper {
    pub(super) async fn load_enumerations(&mut self) -> Result<(), ScrapeError> {
        self.stat_types = fetch_stat_types(self.api.as_ref()).await?;
        self.standings_types = fetch_standings_types(self.api.as_ref()).await?;
        info!(
            stat_types = self.stat_types.len(),
            standings_types = self.standings_types.len(),
            "Loaded enumerations"
        );
        Ok(())
    }
}
