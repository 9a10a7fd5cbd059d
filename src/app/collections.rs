//! Collections index and CSV rows
//!
//! OPenn publishes `collections.csv`, one row per repository, and a
//! `<tag>_contents.csv` listing per repository. Both are read into
//! [`CsvRow`]s keyed by header name.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::app::paths::repo_tag;
use crate::constants::columns;
use crate::errors::{CollectionsError, CollectionsResult};

/// One CSV record, column name to value
///
/// Empty cells are treated as absent so that fallback columns apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CsvRow(BTreeMap<String, String>);

impl CsvRow {
    /// Value of a column, `None` when missing or empty
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// First non-empty value among the given columns
    pub fn first_of(&self, columns: &[&str]) -> Option<&str> {
        columns.iter().find_map(|column| self.get(column))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Date the collection was added to OPenn
pub fn date_added(row: &CsvRow) -> Option<&str> {
    row.get(columns::ADDED)
}

/// Creation date, preferring `created` over `document_created`
pub fn date_created(row: &CsvRow) -> Option<&str> {
    row.first_of(&[columns::CREATED, columns::DOCUMENT_CREATED])
}

/// Update date, preferring `updated` over `document_updated`
pub fn date_updated(row: &CsvRow) -> Option<&str> {
    row.first_of(&[columns::UPDATED, columns::DOCUMENT_UPDATED])
}

/// Parses CSV text with a header row into rows
///
/// Short rows are accepted; their missing columns are simply absent. A header
/// repeated across columns keeps the rightmost value.
pub fn parse_rows(text: &str) -> CollectionsResult<(Vec<String>, Vec<CsvRow>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows: Vec<CsvRow> = Vec::new();

    for record in reader.records() {
        let record = record?;
        let row: CsvRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    debug!("Parsed {} CSV rows with {} columns", rows.len(), headers.len());
    Ok((headers, rows))
}

/// Repository metadata keyed by `repository_id`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CollectionsIndex {
    rows: HashMap<String, CsvRow>,
}

impl CollectionsIndex {
    /// Builds the index from the collections CSV
    ///
    /// Later rows with the same `repository_id` replace earlier ones. Rows
    /// without an id are skipped.
    pub fn from_csv(text: &str) -> CollectionsResult<Self> {
        let (headers, rows) = parse_rows(text)?;
        if !headers.iter().any(|h| h == columns::REPOSITORY_ID) {
            return Err(CollectionsError::MissingColumn {
                column: columns::REPOSITORY_ID.to_string(),
            });
        }

        let mut index = HashMap::with_capacity(rows.len());
        for row in rows {
            let Some(id) = row.get(columns::REPOSITORY_ID).map(str::to_string) else {
                warn!("Skipping collections row without repository_id");
                continue;
            };
            if index.insert(id.clone(), row).is_some() {
                debug!("Duplicate repository_id {}; keeping the later row", id);
            }
        }

        Ok(Self { rows: index })
    }

    /// Row for a repository id, exactly as written in the CSV
    pub fn get(&self, repository_id: &str) -> Option<&CsvRow> {
        self.rows.get(repository_id)
    }

    /// Row for a repository number, trying it as written and then as a tag
    pub fn for_repository(&self, repo_number: &str) -> Option<&CsvRow> {
        self.get(repo_number)
            .or_else(|| self.get(&repo_tag(repo_number)))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Repository ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CsvRow)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }
}
