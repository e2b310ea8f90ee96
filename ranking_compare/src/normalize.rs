use log::{debug, warn};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::*;

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Turns a raw table into the normalized records of a source.
///
/// The year must be readable as an integer on every row, otherwise the whole table is
/// rejected. No row is dropped.
pub fn normalize_table(source: RankingSource, raw: &RawTable) -> Result<SourceTable, RankingErrors> {
    if raw.header.is_empty() {
        return Err(RankingErrors::EmptyTable(source));
    }
    let col_names: HashMap<&str, usize> = raw
        .header
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim(), idx))
        .collect();
    let find_col = |name: &str| -> Result<usize, RankingErrors> {
        col_names
            .get(name)
            .cloned()
            .ok_or_else(|| RankingErrors::MissingColumn(source, name.to_string()))
    };
    let institution_idx = find_col(INSTITUTION_COLUMN)?;
    let year_idx = find_col(YEAR_COLUMN)?;
    let nj_idx = col_names.get(NJ_COLUMN).cloned();

    let metric_cols: Vec<(usize, String)> = raw
        .header
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != institution_idx && *idx != year_idx && Some(*idx) != nj_idx)
        .map(|(idx, name)| (idx, name.clone()))
        .collect();
    debug!(
        "normalize_table: {:?}: {} metric columns",
        source,
        metric_cols.len()
    );

    let mut records: Vec<RankingRecord> = Vec::with_capacity(raw.rows.len());
    let mut seen: HashSet<(String, i32)> = HashSet::new();
    for (idx, row) in raw.rows.iter().enumerate() {
        let cell = |col: usize| row.get(col).unwrap_or(&EMPTY_CELL);
        let lineno = idx + 1;
        let year = coerce_year(cell(year_idx))
            .ok_or_else(|| RankingErrors::InvalidYear(source, lineno, format!("{:?}", cell(year_idx))))?;
        let institution = coerce_institution(cell(institution_idx));
        let new_jersey = nj_idx.and_then(|col| coerce_nj_flag(cell(col)));
        let metrics: BTreeMap<String, MetricValue> = metric_cols
            .iter()
            .map(|(col, name)| (name.clone(), coerce_metric(cell(*col))))
            .collect();

        if !seen.insert((institution.clone(), year)) {
            warn!(
                "normalize_table: {:?}: duplicate row for {:?} in {}, the first one is used",
                source, institution, year
            );
        }
        records.push(RankingRecord {
            institution,
            year,
            new_jersey,
            metrics,
        });
    }

    Ok(SourceTable {
        source,
        metric_names: metric_cols.into_iter().map(|(_, name)| name).collect(),
        records,
    })
}

fn coerce_year(cell: &RawCell) -> Option<i32> {
    match cell {
        RawCell::Int(i) => i32::try_from(*i).ok(),
        RawCell::Float(f) => integral_year(*f),
        RawCell::Text(s) => {
            let s = s.trim();
            match s.parse::<i32>() {
                Ok(y) => Some(y),
                Err(_) => s.parse::<f64>().ok().and_then(integral_year),
            }
        }
        _ => None,
    }
}

// Only integral decimals within the range of i32 are years.
fn integral_year(f: f64) -> Option<i32> {
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

fn coerce_institution(cell: &RawCell) -> String {
    match cell {
        RawCell::Text(s) => s.trim().to_string(),
        RawCell::Int(i) => i.to_string(),
        RawCell::Float(f) => f.to_string(),
        RawCell::Bool(b) => b.to_string(),
        RawCell::Empty => "".to_string(),
    }
}

fn coerce_nj_flag(cell: &RawCell) -> Option<bool> {
    match cell {
        RawCell::Text(s) => match s.trim().to_lowercase().as_str() {
            "yes" => Some(true),
            "no" => Some(false),
            _ => None,
        },
        RawCell::Bool(b) => Some(*b),
        _ => None,
    }
}

// Textual cells stay textual: rank expressions such as "23-30" must survive as written.
fn coerce_metric(cell: &RawCell) -> MetricValue {
    match cell {
        RawCell::Int(i) => MetricValue::Number(*i as f64),
        RawCell::Float(f) if f.is_nan() => MetricValue::Missing,
        RawCell::Float(f) => MetricValue::Number(*f),
        RawCell::Text(s) if s.trim().is_empty() => MetricValue::Missing,
        RawCell::Text(s) => MetricValue::Text(s.clone()),
        RawCell::Bool(b) => MetricValue::Text(b.to_string()),
        RawCell::Empty => MetricValue::Missing,
    }
}
