//! Team structure: member trees, manager ranks and reporting maps.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// A person in the org tree with their (possibly empty) reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<TeamNode>,
}

impl TeamNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: Vec::new() }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<TeamNode>) -> Self {
        Self { name: name.into(), children }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A menu's backing tree: a root label plus the members that render.
///
/// The label is carried for callers' bookkeeping only; rendering walks the
/// members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTree {
    pub label: String,
    pub members: Vec<TeamNode>,
}

impl TeamTree {
    pub fn new(label: impl Into<String>, members: Vec<TeamNode>) -> Self {
        Self { label: label.into(), members }
    }

    /// A tree with no members; renders to nothing.
    pub fn empty(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }
}

/// Partition people by management rank.
///
/// Rank 0 is everyone who manages no one; rank N+1 is managers whose whole
/// team already sits at rank N or below. Stops once no further manager can
/// be ranked, so a malformed cyclic map terminates with those managers
/// unranked.
pub fn compute_ranks(
    people: &BTreeSet<String>,
    teams: &BTreeMap<String, Vec<String>>,
) -> Vec<BTreeSet<String>> {
    let mut remaining: BTreeMap<&str, BTreeSet<&str>> = teams
        .iter()
        .map(|(manager, team)| {
            (manager.as_str(), team.iter().map(String::as_str).collect())
        })
        .collect();

    let mut ranked: BTreeSet<String> = people
        .iter()
        .filter(|p| !teams.contains_key(*p))
        .cloned()
        .collect();
    let mut ranks = vec![ranked.clone()];

    while !remaining.is_empty() {
        let mut next = BTreeSet::new();
        for (manager, team) in remaining.iter_mut() {
            team.retain(|p| !ranked.contains(*p));
            if team.is_empty() {
                next.insert(manager.to_string());
            }
        }
        if next.is_empty() {
            break;
        }
        for manager in &next {
            remaining.remove(manager.as_str());
        }
        ranks.push(next.clone());
        ranked = next;
    }

    ranks
}

/// Build the subtree rooted at `person`: children are their direct reports,
/// sorted by name and restricted to `people`, built bottom-up.
fn tree_for(
    person: &str,
    teams: &BTreeMap<String, Vec<String>>,
    people: &BTreeSet<String>,
    cache: &mut HashMap<String, TeamNode>,
) -> TeamNode {
    if let Some(node) = cache.get(person) {
        return node.clone();
    }

    let mut children = Vec::new();
    if let Some(team) = teams.get(person) {
        let mut reports: Vec<&String> =
            team.iter().filter(|p| people.contains(*p)).collect();
        reports.sort();
        for report in reports {
            children.push(tree_for(report, teams, people, cache));
        }
    }

    let node = TeamNode { name: person.to_string(), children };
    cache.insert(person.to_string(), node.clone());
    node
}

/// One tree per manager, memoized across shared subtrees.
pub fn manager_trees(
    teams: &BTreeMap<String, Vec<String>>,
    people: &BTreeSet<String>,
) -> HashMap<String, TeamNode> {
    let mut cache = HashMap::new();
    for manager in teams.keys() {
        tree_for(manager, teams, people, &mut cache);
    }
    cache
}

/// Reverse map from each person to their manager.
pub fn person_to_manager(teams: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, String> {
    let mut managers = BTreeMap::new();
    for (manager, team) in teams {
        for person in team {
            managers.insert(person.clone(), manager.clone());
        }
    }
    managers
}
