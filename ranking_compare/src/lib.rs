mod config;
use log::{debug, info};

use std::collections::BTreeSet;
use std::fmt::Write;

pub use crate::config::*;
pub use crate::rank_band::{parse_rank, parse_rank_expression, RankBand};

pub mod builder;
pub mod colors;
pub mod layout;
pub mod manual;
pub mod normalize;
pub mod rank_band;
pub mod reconcile;
pub mod selection;
pub mod view;

/// The four normalized source tables and the peer groups.
///
/// A dataset is immutable once built. Its fingerprint is computed from the content, so that
/// two datasets loaded from identical files share the results memoized for them.
#[derive(PartialEq, Debug, Clone)]
pub struct Dataset {
    pub times: SourceTable,
    pub qs: SourceTable,
    pub usn: SourceTable,
    pub washington: SourceTable,
    pub peer_groups: PeerGroups,
    fingerprint: String,
}

impl Dataset {
    pub fn new(
        times: SourceTable,
        qs: SourceTable,
        usn: SourceTable,
        washington: SourceTable,
        peer_groups: PeerGroups,
    ) -> Dataset {
        let fingerprint = fingerprint(&[&times, &qs, &usn, &washington], &peer_groups);
        info!(
            "Dataset: {} TIMES rows, {} QS rows, {} USN rows, {} Washington rows, {} peer groups",
            times.records.len(),
            qs.records.len(),
            usn.records.len(),
            washington.records.len(),
            peer_groups.groups.len()
        );
        debug!("Dataset: fingerprint {}", fingerprint);
        Dataset {
            times,
            qs,
            usn,
            washington,
            peer_groups,
            fingerprint,
        }
    }

    pub fn table(&self, source: RankingSource) -> &SourceTable {
        match source {
            RankingSource::Times => &self.times,
            RankingSource::Qs => &self.qs,
            RankingSource::Usn => &self.usn,
            RankingSource::Washington => &self.washington,
        }
    }

    pub fn tables(&self) -> [&SourceTable; 4] {
        [&self.times, &self.qs, &self.usn, &self.washington]
    }

    /// SHA-256 of a canonical rendering of every record and peer group.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn available_years(&self) -> BTreeSet<i32> {
        view::available_years(self)
    }
}

fn fingerprint(tables: &[&SourceTable], peer_groups: &PeerGroups) -> String {
    let mut canonical = String::new();
    // Writing to a String does not fail.
    for t in tables.iter() {
        let _ = writeln!(canonical, "#{} {:?}", t.source.key(), t.metric_names);
        for r in t.records.iter() {
            let _ = write!(
                canonical,
                "{:?}\t{}\t{:?}",
                r.institution, r.year, r.new_jersey
            );
            for (name, value) in r.metrics.iter() {
                let _ = write!(canonical, "\t{:?}={:?}", name, value);
            }
            canonical.push('\n');
        }
    }
    for (group, members) in peer_groups.groups.iter() {
        let _ = writeln!(canonical, "@{:?} {:?}", group, members);
    }
    sha256::digest(canonical)
}
