use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use crate::config::*;
use crate::Dataset;

/// The institutions that appear in every one of the tables.
///
/// Only membership matters: an institution listed for several years counts once.
pub fn common_institutions(tables: &[&SourceTable]) -> BTreeSet<String> {
    let mut iter = tables.iter();
    let mut res: BTreeSet<String> = match iter.next() {
        Some(t) => t.institutions(),
        None => return BTreeSet::new(),
    };
    for t in iter {
        let other = t.institutions();
        res.retain(|name| other.contains(name));
    }
    res
}

/// The institutions covered by all four ranking sources.
pub fn common(
    a: &SourceTable,
    b: &SourceTable,
    c: &SourceTable,
    d: &SourceTable,
) -> BTreeSet<String> {
    common_institutions(&[a, b, c, d])
}

/// The institutions only offered by this source: not common to all sources, and not the
/// home institution.
pub fn extras(table: &SourceTable, common: &BTreeSet<String>, home: &str) -> Vec<String> {
    table
        .institutions()
        .into_iter()
        .filter(|name| !common.contains(name) && name != home)
        .collect()
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Reconciled {
    pub common: BTreeSet<String>,
    pub extras: BTreeMap<RankingSource, Vec<String>>,
}

impl Reconciled {
    pub fn extras_for(&self, source: RankingSource) -> &[String] {
        self.extras.get(&source).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

pub fn reconcile(dataset: &Dataset, home: &str) -> Reconciled {
    let common = common(&dataset.times, &dataset.qs, &dataset.usn, &dataset.washington);
    let extras = RankingSource::ALL
        .iter()
        .map(|s| (*s, extras(dataset.table(*s), &common, home)))
        .collect();
    Reconciled { common, extras }
}

/// Memoizes the reconciliation of datasets.
///
/// Entries are keyed by the content fingerprint of the dataset: the tables are loaded once
/// and reused for every interaction. Nothing is evicted until `invalidate` is called.
#[derive(Debug, Default)]
pub struct ReconcileCache {
    entries: HashMap<(String, String), Rc<Reconciled>>,
    hits: u64,
    misses: u64,
}

impl ReconcileCache {
    pub fn new() -> ReconcileCache {
        ReconcileCache::default()
    }

    pub fn get(&mut self, dataset: &Dataset, home: &str) -> Rc<Reconciled> {
        let key = (dataset.fingerprint().to_string(), home.to_string());
        if let Some(r) = self.entries.get(&key) {
            self.hits += 1;
            debug!("ReconcileCache: hit for {}", &key.0);
            return r.clone();
        }
        self.misses += 1;
        debug!("ReconcileCache: miss for {}", &key.0);
        let r = Rc::new(reconcile(dataset, home));
        self.entries.insert(key, r.clone());
        r
    }

    /// Drops every memoized result, for instance after the source files were reloaded.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;

    fn table(source: RankingSource, names: &[&str]) -> SourceTable {
        let mut b = TableBuilder::new(source);
        for name in names {
            b.add_rank(name, 2021, "Rank", "1");
            b.add_rank(name, 2022, "Rank", "2");
        }
        b.build().unwrap()
    }

    fn names(v: &[&str]) -> BTreeSet<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn common_is_exact_intersection() {
        let a = table(RankingSource::Times, &["A", "B", "C", "H"]);
        let b = table(RankingSource::Qs, &["B", "C", "D", "H"]);
        let c = table(RankingSource::Usn, &["C", "B", "E", "H"]);
        let d = table(RankingSource::Washington, &["B", "C", "H", "F"]);
        let res = common(&a, &b, &c, &d);
        assert_eq!(res, names(&["B", "C", "H"]));
        // Order of the arguments does not matter.
        assert_eq!(common(&d, &c, &b, &a), res);
        // Grouping does not matter either.
        let ab = common_institutions(&[&a, &b]);
        let cd = common_institutions(&[&c, &d]);
        let grouped: BTreeSet<String> = ab.intersection(&cd).cloned().collect();
        assert_eq!(grouped, res);
        assert!(common_institutions(&[]).is_empty());
    }

    #[test]
    fn extras_exclude_common_and_home() {
        let a = table(RankingSource::Times, &["A", "B", "H"]);
        let common = names(&["B"]);
        assert_eq!(extras(&a, &common, "H"), vec!["A".to_string()]);
    }

    #[test]
    fn cache_is_keyed_by_content() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ds = Dataset::new(
            table(RankingSource::Times, &["A", "B"]),
            table(RankingSource::Qs, &["A", "B"]),
            table(RankingSource::Usn, &["A"]),
            table(RankingSource::Washington, &["A", "B"]),
            PeerGroups::default(),
        );
        let same = ds.clone();
        let mut cache = ReconcileCache::new();
        let r1 = cache.get(&ds, "H");
        let r2 = cache.get(&same, "H");
        assert!(Rc::ptr_eq(&r1, &r2));
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(r1.common, names(&["A"]));
        assert_eq!(r1.extras_for(RankingSource::Times), &["B".to_string()]);
        assert!(r1.extras_for(RankingSource::Usn).is_empty());

        let other = Dataset::new(
            table(RankingSource::Times, &["A", "B"]),
            table(RankingSource::Qs, &["A", "B"]),
            table(RankingSource::Usn, &["A", "B"]),
            table(RankingSource::Washington, &["A", "B"]),
            PeerGroups::default(),
        );
        let r3 = cache.get(&other, "H");
        assert_eq!(r3.common, names(&["A", "B"]));
        assert_eq!(cache.len(), 2);

        cache.invalidate();
        assert!(cache.is_empty());
        let r4 = cache.get(&ds, "H");
        assert!(!Rc::ptr_eq(&r1, &r4));
        assert_eq!(*r1, *r4);
    }
}
