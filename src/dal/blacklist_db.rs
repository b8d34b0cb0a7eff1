use crate::domain::blacklist::{load_blacklist_rules, Blacklist, ConfigurationError};

use super::sheet_db::{tab_range, SheetError, TableStore};

const RULE_RANGE: &str = "A:Z";

#[derive(Debug, thiserror::Error)]
pub enum BlacklistLoadError {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

pub async fn fetch_blacklist<S>(
    store: &S,
    tab_name: &str,
) -> Result<Blacklist, BlacklistLoadError>
where
    S: TableStore + ?Sized,
{
    let values = store.get_values(&tab_range(tab_name, RULE_RANGE)).await?;
    let rules = load_blacklist_rules(&values)?;

    log::info!(
        "Loaded {} exact and {} contains blacklist rules from {} ({} rows skipped)",
        rules.exact_domains.len(),
        rules.contains_patterns.len(),
        tab_name,
        rules.discarded.len()
    );

    Ok(Blacklist::from_rules(rules))
}
