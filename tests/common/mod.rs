#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use sitefinder::{
    dal::{RangeUpdate, SheetError, TableStore},
    services::{SearchError, SearchProvider},
};

pub fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// A 16-column company row with only the mapped cells filled in.
pub fn company_row(company: &str, address: &str, row_type: &str, website: &str) -> Vec<String> {
    let mut row = vec![String::new(); 16];
    row[0] = company.to_string();
    row[2] = address.to_string();
    row[9] = row_type.to_string();
    row[11] = website.to_string();
    row
}

pub fn company_header() -> Vec<String> {
    let mut row = vec![String::new(); 16];
    row[0] = "Recipient (Company)".to_string();
    row[2] = "Recipient (HQ) Address".to_string();
    row[9] = "row_type".to_string();
    row[11] = "Website".to_string();
    row[14] = "ddg_lookup_status".to_string();
    row[15] = "ddg_debug".to_string();
    row
}

#[derive(Default)]
pub struct InMemoryStore {
    ranges: HashMap<String, Vec<Vec<String>>>,
    pub batches: Mutex<Vec<Vec<RangeUpdate>>>,
}

impl InMemoryStore {
    pub fn with_range(mut self, range: &str, values: Vec<Vec<String>>) -> Self {
        self.ranges.insert(range.to_string(), values);
        self
    }

    pub fn batches(&self) -> Vec<Vec<RangeUpdate>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetError> {
        Ok(self.ranges.get(range).cloned().unwrap_or_default())
    }

    async fn batch_update(&self, updates: Vec<RangeUpdate>) -> Result<(), SheetError> {
        self.batches.lock().unwrap().push(updates);
        Ok(())
    }
}

pub enum Scripted {
    Links(Vec<String>),
    Fail(fn() -> SearchError),
}

/// Answers queries from a script and records every query it saw.
#[derive(Default)]
pub struct ScriptedSearch {
    answers: HashMap<String, Scripted>,
    pub queries: Mutex<Vec<String>>,
}

impl ScriptedSearch {
    pub fn answer(mut self, query: &str, links: &[&str]) -> Self {
        let links = links.iter().map(|l| l.to_string()).collect();
        self.answers.insert(query.to_string(), Scripted::Links(links));
        self
    }

    pub fn fail(mut self, query: &str, error: fn() -> SearchError) -> Self {
        self.answers.insert(query.to_string(), Scripted::Fail(error));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for ScriptedSearch {
    async fn fetch_result_links(&self, query: &str) -> Result<Vec<String>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());

        match self.answers.get(query) {
            Some(Scripted::Links(links)) => Ok(links.clone()),
            Some(Scripted::Fail(error)) => Err(error()),
            None => Ok(vec![]),
        }
    }
}
