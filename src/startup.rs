use anyhow::Context;

use crate::{
    configuration::Settings,
    dal::{blacklist_db::fetch_blacklist, GoogleCredentials, SheetsClient},
    domain::company_row::ColumnMap,
    services::{enrich_companies, DuckDuckGoClient, EnrichmentSettings, RunOutcome},
};

pub async fn run(configuration: Settings) -> anyhow::Result<RunOutcome> {
    let credentials = GoogleCredentials::from_payload(&configuration.google_credentials_json)
        .context("Failed to read Google credentials")?;
    let access_token = credentials
        .access_token(&reqwest::Client::new())
        .await
        .context("Failed to obtain a Google access token")?;

    let sheets = SheetsClient::new(
        configuration.sheets_api_base.clone(),
        configuration.spreadsheet_id.clone(),
        access_token,
    );
    let search = DuckDuckGoClient::new(
        configuration.search_endpoint.clone(),
        configuration.search_timeout(),
    )
    .context("Failed to build search client")?;

    let blacklist = fetch_blacklist(&sheets, &configuration.blacklist_tab_name)
        .await
        .with_context(|| format!("Failed to load {}", configuration.blacklist_tab_name))?;

    let settings = EnrichmentSettings {
        tab_name: configuration.sheet_tab_name.clone(),
        columns: ColumnMap::default(),
        max_rows: configuration.batch_size,
        pause: configuration.search_pause(),
    };

    log::info!(
        "Enriching up to {} rows of {} ({} blocked domains, {} contains rules)",
        settings.max_rows,
        settings.tab_name,
        blacklist.exact_domain_count(),
        blacklist.contains_pattern_count()
    );

    enrich_companies(&sheets, &search, &blacklist, &settings)
        .await
        .with_context(|| format!("Failed to enrich {}", settings.tab_name))
}
