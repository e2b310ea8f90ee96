pub use crate::config::*;
use crate::normalize::normalize_table;

/// A builder for the table of one ranking source.
///
/// The rows go through the same normalization as the tables read from files.
///
/// ```
/// pub use ranking_compare::builder::TableBuilder;
/// pub use ranking_compare::{RankingSource, RawCell};
/// # use ranking_compare::RankingErrors;
///
/// let mut builder = TableBuilder::new(RankingSource::Times);
/// builder.add_row(
///     "Massachusetts Institute of Technology",
///     2023,
///     Some(false),
///     &[("Times_Rank", RawCell::Text("3".to_string()))],
/// );
/// let table = builder.build()?;
/// assert_eq!(table.records.len(), 1);
///
/// # Ok::<(), RankingErrors>(())
/// ```
pub struct TableBuilder {
    pub(crate) _source: RankingSource,
    pub(crate) _metric_names: Vec<String>,
    pub(crate) _rows: Vec<(String, i32, Option<bool>, Vec<(String, RawCell)>)>,
}

impl TableBuilder {
    pub fn new(source: RankingSource) -> TableBuilder {
        TableBuilder {
            _source: source,
            _metric_names: Vec::new(),
            _rows: Vec::new(),
        }
    }

    /// Adds a row. Metric columns are created in the order in which they are first seen.
    pub fn add_row(
        &mut self,
        institution: &str,
        year: i32,
        new_jersey: Option<bool>,
        metrics: &[(&str, RawCell)],
    ) -> &mut TableBuilder {
        for (name, _) in metrics.iter() {
            if !self._metric_names.iter().any(|n| n == name) {
                self._metric_names.push(name.to_string());
            }
        }
        self._rows.push((
            institution.to_string(),
            year,
            new_jersey,
            metrics
                .iter()
                .map(|(name, cell)| (name.to_string(), cell.clone()))
                .collect(),
        ));
        self
    }

    /// Adds a row that only carries a rank, written as in the published tables.
    pub fn add_rank(
        &mut self,
        institution: &str,
        year: i32,
        rank_column: &str,
        rank: &str,
    ) -> &mut TableBuilder {
        self.add_row(
            institution,
            year,
            None,
            &[(rank_column, RawCell::Text(rank.to_string()))],
        )
    }

    pub fn raw_table(&self) -> RawTable {
        let mut header: Vec<String> = vec![
            INSTITUTION_COLUMN.to_string(),
            YEAR_COLUMN.to_string(),
            NJ_COLUMN.to_string(),
        ];
        header.extend(self._metric_names.iter().cloned());

        let rows = self
            ._rows
            .iter()
            .map(|(institution, year, nj, metrics)| {
                let mut row = vec![
                    RawCell::Text(institution.clone()),
                    RawCell::Int(*year as i64),
                    match nj {
                        Some(true) => RawCell::Text("Yes".to_string()),
                        Some(false) => RawCell::Text("No".to_string()),
                        None => RawCell::Empty,
                    },
                ];
                for name in self._metric_names.iter() {
                    let cell = metrics
                        .iter()
                        .find(|(n, _)| n == name)
                        .map(|(_, c)| c.clone())
                        .unwrap_or(RawCell::Empty);
                    row.push(cell);
                }
                row
            })
            .collect();
        RawTable { header, rows }
    }

    pub fn build(&self) -> Result<SourceTable, RankingErrors> {
        normalize_table(self._source, &self.raw_table())
    }
}
