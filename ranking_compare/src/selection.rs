use log::{debug, warn};
use std::collections::BTreeSet;

use crate::config::*;
use crate::Dataset;

/// The institutions a user may compare, given the NJ filter: present in every source,
/// matching the filter on at least one row, never the home institution.
pub fn universe(
    dataset: &Dataset,
    common: &BTreeSet<String>,
    nj_filter: NjFilter,
    home: &str,
) -> BTreeSet<String> {
    RankingSource::ALL
        .iter()
        .flat_map(|s| dataset.table(*s).records.iter())
        .filter(|r| common.contains(&r.institution) && nj_filter.accepts(r.new_jersey))
        .filter(|r| r.institution != home)
        .map(|r| r.institution.clone())
        .collect()
}

/// The members of the selected peer groups, in selection order then member order.
pub fn peer_institutions(selected: &[String], peer_groups: &PeerGroups) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for name in selected.iter() {
        match peer_groups.members(name) {
            Some(members) => push_unique(&mut res, members.iter()),
            None => warn!("peer_institutions: unknown peer group {:?}", name),
        }
    }
    res
}

/// The institutions that can still be added by hand.
///
/// When a peer group is active, the default comparison institution has to come from a peer
/// group, it is not offered here.
pub fn manual_candidates(
    universe: &BTreeSet<String>,
    peers: &[String],
    peers_active: bool,
    policy: &ComparisonPolicy,
) -> Vec<String> {
    universe
        .iter()
        .filter(|name| !peers.contains(name))
        .filter(|name| !(peers_active && **name == policy.default_comparison))
        .filter(|name| **name != policy.home)
        .cloned()
        .collect()
}

/// The institutions selected in the sidebar, without the home institution.
pub fn combined_selection(
    selection: &Selection,
    peer_groups: &PeerGroups,
    universe: &BTreeSet<String>,
    policy: &ComparisonPolicy,
) -> Vec<String> {
    let peers_active = !selection.peer_groups.is_empty();
    let peers = peer_institutions(&selection.peer_groups, peer_groups);
    let candidates = manual_candidates(universe, &peers, peers_active, policy);

    let manual: Vec<&String> = selection
        .manual
        .iter()
        .filter(|name| {
            let ok = candidates.contains(name);
            if !ok {
                debug!("combined_selection: {:?} cannot be added manually", name);
            }
            ok
        })
        .collect();

    let mut combined: Vec<String> = Vec::new();
    push_unique(&mut combined, peers.iter().chain(manual.into_iter()));
    combined.retain(|name| *name != policy.home);

    if !peers_active && combined.is_empty() && universe.contains(&policy.default_comparison) {
        debug!(
            "combined_selection: nothing selected, falling back to {:?}",
            policy.default_comparison
        );
        combined.push(policy.default_comparison.clone());
    }
    combined
}

/// The final list of institutions to compare: the home institution first, then the
/// selection.
pub fn resolve(
    selection: &Selection,
    peer_groups: &PeerGroups,
    universe: &BTreeSet<String>,
    policy: &ComparisonPolicy,
) -> Vec<String> {
    with_home(
        &combined_selection(selection, peer_groups, universe, policy),
        policy,
    )
}

fn with_home(selected: &[String], policy: &ComparisonPolicy) -> Vec<String> {
    let mut res = vec![policy.home.clone()];
    push_unique(&mut res, selected.iter());
    res
}

fn push_unique<'a>(res: &mut Vec<String>, names: impl Iterator<Item = &'a String>) {
    for name in names {
        if !res.contains(name) {
            res.push(name.clone());
        }
    }
}

// ********* Per-source tabs **********

/// The manual additions remembered by each source tab during a session.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SessionState {
    pub times: Vec<String>,
    pub qs: Vec<String>,
    pub usn: Vec<String>,
    pub washington: Vec<String>,
}

impl SessionState {
    pub fn remembered(&self, source: RankingSource) -> &[String] {
        match source {
            RankingSource::Times => &self.times,
            RankingSource::Qs => &self.qs,
            RankingSource::Usn => &self.usn,
            RankingSource::Washington => &self.washington,
        }
    }

    fn remembered_mut(&mut self, source: RankingSource) -> &mut Vec<String> {
        match source {
            RankingSource::Times => &mut self.times,
            RankingSource::Qs => &mut self.qs,
            RankingSource::Usn => &mut self.usn,
            RankingSource::Washington => &mut self.washington,
        }
    }
}

/// What a source tab offers: the sidebar selection, then the institutions only this
/// source covers.
pub fn tab_options(combined: &[String], extras: &[String]) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    push_unique(&mut res, combined.iter().chain(extras.iter()));
    res
}

/// What a source tab shows before the user touches its picker.
pub fn tab_default_pick(session: &SessionState, source: RankingSource, combined: &[String]) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    push_unique(
        &mut res,
        combined.iter().chain(session.remembered(source).iter()),
    );
    res
}

/// Resolves the institutions of one source tab and updates what the tab remembers.
///
/// `user_pick` is the content of the tab's picker if the user changed it. Only the
/// institutions that are not part of the sidebar selection are remembered, so that
/// changing the peer groups later does not leave stale peers behind.
pub fn resolve_tab(
    session: &mut SessionState,
    source: RankingSource,
    combined: &[String],
    options: &[String],
    user_pick: Option<&[String]>,
    policy: &ComparisonPolicy,
) -> Vec<String> {
    let pick: Vec<String> = match user_pick {
        Some(p) => p.to_vec(),
        None => tab_default_pick(session, source, combined),
    };
    let mut current: Vec<String> = Vec::new();
    push_unique(
        &mut current,
        pick.iter()
            .filter(|name| options.contains(name) && **name != policy.home),
    );

    let remembered: Vec<String> = current
        .iter()
        .filter(|name| !combined.contains(name))
        .cloned()
        .collect();
    debug!(
        "resolve_tab: {:?}: current {:?}, remembered {:?}",
        source, current, remembered
    );
    *session.remembered_mut(source) = remembered;

    with_home(&current, policy)
}
