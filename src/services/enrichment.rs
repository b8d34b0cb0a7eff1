use std::time::Duration;

use crate::{
    dal::{
        company_db::{fetch_company_rows, write_row_updates},
        SheetError, TableStore,
    },
    domain::{
        blacklist::Blacklist,
        candidate::choose_best_candidate,
        company_row::{ColumnMap, CompanyRow, LookupStatus, RowUpdate},
    },
};

use super::SearchProvider;

#[derive(Debug, Clone)]
pub struct EnrichmentSettings {
    pub tab_name: String,
    pub columns: ColumnMap,
    pub max_rows: usize,
    pub pause: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub websites_found: usize,
    pub rows_updated: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NoData,
    NothingToUpdate,
    Completed(RunSummary),
}

/// One search attempt, mapped to the row's outcome. Search failures never escape.
pub async fn lookup_company<P>(search: &P, blacklist: &Blacklist, row: &CompanyRow) -> RowUpdate
where
    P: SearchProvider + ?Sized,
{
    let query = row.search_query();

    match search.fetch_result_links(&query).await {
        Ok(hrefs) => {
            let selection = choose_best_candidate(&hrefs, blacklist);
            RowUpdate::from_selection(row.row_number, selection)
        }
        Err(e) => {
            log::error!("Search failed for row {} ({}): {}", row.row_number, query, e);
            RowUpdate::from_error(row.row_number, e.kind(), &e.to_string())
        }
    }
}

/// Processes eligible rows in sheet order and commits every outcome in one batch.
pub async fn enrich_companies<S, P>(
    store: &S,
    search: &P,
    blacklist: &Blacklist,
    settings: &EnrichmentSettings,
) -> Result<RunOutcome, SheetError>
where
    S: TableStore + ?Sized,
    P: SearchProvider + ?Sized,
{
    let rows = match fetch_company_rows(store, &settings.tab_name, &settings.columns).await? {
        Some(rows) => rows,
        None => return Ok(RunOutcome::NoData),
    };

    let mut updates: Vec<RowUpdate> = vec![];

    for row in rows.iter().filter(|row| row.is_eligible()) {
        if updates.len() >= settings.max_rows {
            log::info!("Reached the limit of {} rows for this run", settings.max_rows);
            break;
        }

        if !updates.is_empty() {
            tokio::time::sleep(settings.pause).await;
        }

        let update = lookup_company(search, blacklist, row).await;
        log::info!(
            "Row {} {}: {} {}",
            update.row_number,
            row.company,
            update.status,
            update.debug
        );
        updates.push(update);
    }

    if updates.is_empty() {
        return Ok(RunOutcome::NothingToUpdate);
    }

    write_row_updates(store, &settings.tab_name, &settings.columns, &updates).await?;

    let websites_found = updates
        .iter()
        .filter(|update| update.status == LookupStatus::Found)
        .count();

    Ok(RunOutcome::Completed(RunSummary {
        processed: updates.len(),
        websites_found,
        rows_updated: updates.len(),
    }))
}
