use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::services::DDG_HTML_URL;

const CONFIG_FILE: &str = "sitefinder";
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub spreadsheet_id: String,
    pub google_credentials_json: String,
    pub sheet_tab_name: String,
    pub blacklist_tab_name: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub batch_size: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub ddg_sleep_seconds: f64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub search_timeout_seconds: u64,
    pub search_endpoint: String,
    pub sheets_api_base: String,
}

impl Settings {
    pub fn search_pause(&self) -> Duration {
        Duration::try_from_secs_f64(self.ddg_sleep_seconds).unwrap_or(Duration::ZERO)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_seconds)
    }
}

/// Defaults, then an optional `sitefinder.yaml`, then the process environment
/// (`SPREADSHEET_ID`, `BATCH_SIZE`, ...).
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    build_configuration(config::Environment::default())
}

fn build_configuration(environment: config::Environment) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("sheet_tab_name", "Companies_Enrichment")?
        .set_default("blacklist_tab_name", "Blacklist_Rules")?
        .set_default("batch_size", "50")?
        .set_default("ddg_sleep_seconds", "2.5")?
        .set_default("search_timeout_seconds", "30")?
        .set_default("search_endpoint", DDG_HTML_URL)?
        .set_default("sheets_api_base", SHEETS_API_BASE)?
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(environment)
        .build()?;

    settings.try_deserialize::<Settings>()
}
