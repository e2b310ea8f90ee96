// ********* Input data structures ***********

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::Display;

/// The four ranking agencies compared by the dashboard.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum RankingSource {
    Times,
    Qs,
    Usn,
    Washington,
}

impl RankingSource {
    pub const ALL: [RankingSource; 4] = [
        RankingSource::Times,
        RankingSource::Qs,
        RankingSource::Usn,
        RankingSource::Washington,
    ];

    /// The key used in configuration files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            RankingSource::Times => "times",
            RankingSource::Qs => "qs",
            RankingSource::Usn => "usn",
            RankingSource::Washington => "washington",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankingSource::Times => "TIMES",
            RankingSource::Qs => "QS",
            RankingSource::Usn => "USN",
            RankingSource::Washington => "Washington",
        }
    }

    pub fn from_key(key: &str) -> Option<RankingSource> {
        let k = key.trim().to_lowercase();
        RankingSource::ALL.iter().find(|s| s.key() == k).cloned()
    }
}

/// A cell as read from a spreadsheet or a CSV file, before normalization.
#[derive(PartialEq, Debug, Clone)]
pub enum RawCell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

/// A table as read by the input providers: the header row and the data rows.
///
/// Rows may be shorter than the header, missing cells are treated as empty.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

pub const INSTITUTION_COLUMN: &str = "IPEDS_Name";
pub const YEAR_COLUMN: &str = "Year";
pub const NJ_COLUMN: &str = "New_Jersey_University";

// ********* Normalized data structures ***********

/// The value of one metric for one institution and one year.
///
/// Source tables do not agree on their columns, so metrics are kept as tagged values
/// keyed by the verbatim column header.
#[derive(PartialEq, Debug, Clone)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    Missing,
}

impl MetricValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, MetricValue::Missing)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankingRecord {
    pub institution: String,
    pub year: i32,
    /// None when the flag is absent or not understood.
    pub new_jersey: Option<bool>,
    pub metrics: BTreeMap<String, MetricValue>,
}

static MISSING: MetricValue = MetricValue::Missing;

impl RankingRecord {
    pub fn metric(&self, name: &str) -> &MetricValue {
        self.metrics.get(name).unwrap_or(&MISSING)
    }
}

/// The normalized records of one ranking source.
#[derive(PartialEq, Debug, Clone)]
pub struct SourceTable {
    pub source: RankingSource,
    /// The metric columns, in header order.
    pub metric_names: Vec<String>,
    pub records: Vec<RankingRecord>,
}

impl SourceTable {
    pub fn institutions(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.institution.clone()).collect()
    }

    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// The record for this institution and year. The first one wins if the input had duplicates.
    pub fn record(&self, institution: &str, year: i32) -> Option<&RankingRecord> {
        self.records
            .iter()
            .find(|r| r.year == year && r.institution == institution)
    }
}

/// Named and curated sets of institutions (e.g. "Aspirational"), sorted by name.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PeerGroups {
    pub groups: BTreeMap<String, Vec<String>>,
}

impl PeerGroups {
    /// Builds the groups from (group name, institution) pairs. Members keep the order of
    /// first appearance.
    pub fn from_pairs(pairs: &[(String, String)]) -> PeerGroups {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (group, institution) in pairs.iter() {
            let members = groups.entry(group.clone()).or_default();
            if !members.contains(institution) {
                members.push(institution.clone());
            }
        }
        PeerGroups { groups }
    }

    pub fn names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    pub fn members(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(|v| v.as_slice())
    }

    /// The first group (by name) that lists this institution.
    pub fn group_of(&self, institution: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == institution))
            .map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ********* Selection **********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NjFilter {
    All,
    Only,
    Exclude,
}

impl NjFilter {
    pub fn accepts(&self, new_jersey: Option<bool>) -> bool {
        match self {
            NjFilter::All => true,
            NjFilter::Only => new_jersey == Some(true),
            NjFilter::Exclude => new_jersey == Some(false),
        }
    }
}

/// What the user picked in the sidebar.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub nj_filter: NjFilter,
    pub peer_groups: Vec<String>,
    pub manual: Vec<String>,
}

/// The institutions that are treated specially by the selection rules.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ComparisonPolicy {
    /// Always compared, always first.
    pub home: String,
    /// Shown when nothing else is selected.
    pub default_comparison: String,
}

impl ComparisonPolicy {
    pub const HOME: &'static str = "New Jersey Institute of Technology";
    pub const DEFAULT_COMPARISON: &'static str = "Rutgers University-New Brunswick";
}

impl Default for ComparisonPolicy {
    fn default() -> Self {
        ComparisonPolicy {
            home: ComparisonPolicy::HOME.to_string(),
            default_comparison: ComparisonPolicy::DEFAULT_COMPARISON.to_string(),
        }
    }
}

// ******** Errors *********

/// Errors that prevent a source table from being loaded.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RankingErrors {
    EmptyTable(RankingSource),
    MissingColumn(RankingSource, String),
    /// The row number (starting at 1 for the first data row) and the offending content.
    InvalidYear(RankingSource, usize, String),
}

impl Error for RankingErrors {}

impl Display for RankingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingErrors::EmptyTable(s) => write!(f, "{} table has no header", s.label()),
            RankingErrors::MissingColumn(s, col) => {
                write!(f, "{} table is missing column {:?}", s.label(), col)
            }
            RankingErrors::InvalidYear(s, row, content) => write!(
                f,
                "{} table: row {}: cannot read year from {:?}",
                s.label(),
                row,
                content
            ),
        }
    }
}
