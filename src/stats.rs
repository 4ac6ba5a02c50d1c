//! Monthly triage statistics: counting severity events into chartable series.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::severity::{Severity, SeverityBand};
use crate::team::compute_ranks;
use crate::timeline;

/// Component key for the per-owner rollup across all their components.
pub const GLOBAL: &str = "Global";

/// Whether an event opened or closed a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Created,
    Resolved,
}

/// One dated severity event attributed to a triage owner.
///
/// Created events count +1 and resolved events count -1 in the month bucket
/// of their timestamp, so the raw series read as net backlog movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugEvent {
    pub kind: EventKind,
    pub severity: Severity,
    pub product: String,
    pub component: String,
    pub triage_owner: String,
    pub at: DateTime<Utc>,
}

impl BugEvent {
    /// `product::component` key used throughout the stats maps.
    pub fn component_key(&self) -> String {
        format!("{}::{}", self.product, self.component)
    }
}

/// Monthly counts per severity band, plus the `all` rollup.
///
/// All four series share one length, the number of months in the timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandSeries {
    pub high: Vec<i64>,
    pub normal: Vec<i64>,
    pub low: Vec<i64>,
    pub all: Vec<i64>,
}

impl BandSeries {
    /// A zero series set spanning `months` buckets.
    pub fn zeroed(months: usize) -> Self {
        Self {
            high: vec![0; months],
            normal: vec![0; months],
            low: vec![0; months],
            all: vec![0; months],
        }
    }

    pub fn months(&self) -> usize {
        self.all.len()
    }

    pub fn get(&self, band: SeverityBand) -> &[i64] {
        match band {
            SeverityBand::High => &self.high,
            SeverityBand::Normal => &self.normal,
            SeverityBand::Low => &self.low,
        }
    }

    fn series_mut(&mut self, band: SeverityBand) -> &mut Vec<i64> {
        match band {
            SeverityBand::High => &mut self.high,
            SeverityBand::Normal => &mut self.normal,
            SeverityBand::Low => &mut self.low,
        }
    }

    /// Apply `delta` at `index` to the band series and the `all` rollup.
    pub fn bump(&mut self, band: SeverityBand, index: usize, delta: i64) {
        self.series_mut(band)[index] += delta;
        self.all[index] += delta;
    }

    /// Running prefix sums of every series.
    pub fn cumulate(&self) -> BandSeries {
        fn running(values: &[i64]) -> Vec<i64> {
            let mut total = 0;
            values
                .iter()
                .map(|v| {
                    total += v;
                    total
                })
                .collect()
        }
        BandSeries {
            high: running(&self.high),
            normal: running(&self.normal),
            low: running(&self.low),
            all: running(&self.all),
        }
    }

    /// Element-wise accumulate `other` into `self`.
    ///
    /// An empty receiver takes `other` wholesale, so a fresh `default()` can
    /// be merged into repeatedly.
    pub fn merge(&mut self, other: &BandSeries) {
        if self.all.is_empty() {
            *self = other.clone();
            return;
        }
        fn add_into(dst: &mut [i64], src: &[i64]) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d += s;
            }
        }
        add_into(&mut self.high, &other.high);
        add_into(&mut self.normal, &other.normal);
        add_into(&mut self.low, &other.low);
        add_into(&mut self.all, &other.all);
    }
}

/// Raw and cumulative series for one owner, keyed by `product::component`
/// (plus the synthetic [`GLOBAL`] key).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerStats {
    pub raw: BTreeMap<String, BandSeries>,
    pub cumulate: BTreeMap<String, BandSeries>,
}

impl OwnerStats {
    fn bump(
        &mut self,
        component: &str,
        months: usize,
        band: SeverityBand,
        index: usize,
        delta: i64,
    ) {
        self.raw
            .entry(component.to_string())
            .or_insert_with(|| BandSeries::zeroed(months))
            .bump(band, index, delta);
    }

    /// The owner's components, sorted, with the [`GLOBAL`] rollup excluded.
    pub fn components(&self) -> Vec<&str> {
        self.raw
            .keys()
            .map(String::as_str)
            .filter(|c| *c != GLOBAL)
            .collect()
    }
}

/// Monthly stats for every triage owner seen in the input events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageStats {
    pub owners: BTreeMap<String, OwnerStats>,
    pub labels: Vec<String>,
}

/// Aggregate raw events into per-owner monthly series over `[start, end]`.
///
/// Events outside the span are dropped. Series lengths all equal the label
/// count; nothing else about the data is validated.
pub fn collect(events: &[BugEvent], start: DateTime<Utc>, end: DateTime<Utc>) -> TriageStats {
    let labels = timeline::month_labels(start, end);
    let months = labels.len();
    let mut owners: BTreeMap<String, OwnerStats> = BTreeMap::new();

    for event in events {
        if event.at < start || event.at > end {
            debug!(owner = %event.triage_owner, at = %event.at, "event outside timeline, dropped");
            continue;
        }
        let index = timeline::month_index(start, event.at);
        let delta = match event.kind {
            EventKind::Created => 1,
            EventKind::Resolved => -1,
        };
        let band = event.severity.band();
        let owner = owners.entry(event.triage_owner.clone()).or_default();
        owner.bump(&event.component_key(), months, band, index, delta);
        owner.bump(GLOBAL, months, band, index, delta);
    }

    for owner in owners.values_mut() {
        owner.cumulate = owner
            .raw
            .iter()
            .map(|(component, series)| (component.clone(), series.cumulate()))
            .collect();
    }

    TriageStats { owners, labels }
}

/// A manager's series rolled up over their whole reporting line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollupStats {
    pub raw: BandSeries,
    pub cumulate: BandSeries,
}

/// Everything one site generation run needs: per-owner stats, manager
/// rollups, the team structure and the shared month labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backlog {
    pub owners: BTreeMap<String, OwnerStats>,
    pub managers: BTreeMap<String, RollupStats>,
    pub teams: BTreeMap<String, Vec<String>>,
    pub labels: Vec<String>,
}

/// Roll owner stats up the management chain.
///
/// Managers are processed in rank order, so a manager's rollup folds in the
/// already-computed rollups of any managers reporting to them.
pub fn team_backlog(stats: &TriageStats, teams: &BTreeMap<String, Vec<String>>) -> Backlog {
    let mut people: BTreeSet<String> = stats.owners.keys().cloned().collect();
    for (manager, team) in teams {
        people.insert(manager.clone());
        people.extend(team.iter().cloned());
    }

    let ranks = compute_ranks(&people, teams);
    let mut managers: BTreeMap<String, RollupStats> = BTreeMap::new();

    for ranked in ranks.iter().skip(1) {
        for manager in ranked {
            let mut raw = BandSeries::default();
            let mut cumulate = BandSeries::default();

            if let Some(own) = stats.owners.get(manager) {
                if let Some(series) = own.raw.get(GLOBAL) {
                    raw.merge(series);
                }
                if let Some(series) = own.cumulate.get(GLOBAL) {
                    cumulate.merge(series);
                }
            }

            for person in teams.get(manager).map(Vec::as_slice).unwrap_or(&[]) {
                if let Some(rollup) = managers.get(person) {
                    raw.merge(&rollup.raw);
                    cumulate.merge(&rollup.cumulate);
                } else if let Some(own) = stats.owners.get(person) {
                    if let Some(series) = own.raw.get(GLOBAL) {
                        raw.merge(series);
                    }
                    if let Some(series) = own.cumulate.get(GLOBAL) {
                        cumulate.merge(series);
                    }
                }
            }

            if raw.months() > 0 {
                managers.insert(manager.clone(), RollupStats { raw, cumulate });
            }
        }
    }

    Backlog {
        owners: stats.owners.clone(),
        managers,
        teams: teams.clone(),
        labels: stats.labels.clone(),
    }
}
