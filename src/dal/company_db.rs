use crate::domain::company_row::{
    column_letter, truncate_chars, ColumnMap, CompanyRow, RowUpdate, DEBUG_MAX_CHARS,
};

use super::sheet_db::{tab_range, RangeUpdate, SheetError, TableStore};

/// Every data row of the enrichment tab, or `None` when the tab has no data rows.
pub async fn fetch_company_rows<S>(
    store: &S,
    tab_name: &str,
    columns: &ColumnMap,
) -> Result<Option<Vec<CompanyRow>>, SheetError>
where
    S: TableStore + ?Sized,
{
    let values = store
        .get_values(&tab_range(tab_name, &columns.read_range()))
        .await?;

    if values.len() < 2 {
        return Ok(None);
    }

    Ok(Some(
        values
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, row)| CompanyRow::from_values(i + 1, row, columns))
            .collect(),
    ))
}

/// Two ranges per row: the website cell and the adjacent status/debug pair.
pub fn build_range_updates(
    tab_name: &str,
    columns: &ColumnMap,
    updates: &[RowUpdate],
) -> Vec<RangeUpdate> {
    let website_col = column_letter(columns.website);
    let status_col = column_letter(columns.status);
    let debug_col = column_letter(columns.debug);

    updates
        .iter()
        .flat_map(|update| {
            let n = update.row_number;
            let website_range = format!("{}{}:{}{}", website_col, n, website_col, n);
            let status_range = format!("{}{}:{}{}", status_col, n, debug_col, n);
            [
                RangeUpdate {
                    range: tab_range(tab_name, &website_range),
                    values: vec![vec![update.website.clone()]],
                },
                RangeUpdate {
                    range: tab_range(tab_name, &status_range),
                    values: vec![vec![
                        update.status.to_string(),
                        truncate_chars(&update.debug, DEBUG_MAX_CHARS),
                    ]],
                },
            ]
        })
        .collect()
}

pub async fn write_row_updates<S>(
    store: &S,
    tab_name: &str,
    columns: &ColumnMap,
    updates: &[RowUpdate],
) -> Result<(), SheetError>
where
    S: TableStore + ?Sized,
{
    let ranges = build_range_updates(tab_name, columns, updates);
    log::info!(
        "Writing {} ranges for {} rows to {}",
        ranges.len(),
        updates.len(),
        tab_name
    );

    store.batch_update(ranges).await
}
