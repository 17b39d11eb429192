//! Gate network: locations as nodes, gates as undirected unweighted edges.
//!
//! The [`LocationGraph`] is the spatial backbone of the simulation. It keeps
//! one neighbor list per node in the order gates were added, plus the set of
//! normalized `(low, high)` pairs used to reject duplicates.
//!
//! Neighbor order matters: breadth-first search expands neighbors in stored
//! order, so among several equally short routes the one discovered first
//! wins. Replaying the same `add_gate` sequence therefore always yields the
//! same routes.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use starlane_types::{LocationId, RouteResult};

/// Undirected graph of locations joined by gates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationGraph {
    /// Adjacency: location -> neighbors in insertion order.
    adjacency: BTreeMap<LocationId, Vec<LocationId>>,
    /// Every gate as a normalized `(smaller, larger)` pair.
    gates: BTreeSet<(LocationId, LocationId)>,
    /// Number of gates successfully added.
    gate_count: usize,
}

/// Order a pair so the smaller id comes first.
const fn normalize(a: LocationId, b: LocationId) -> (LocationId, LocationId) {
    if a.0 < b.0 { (a, b) } else { (b, a) }
}

impl LocationGraph {
    /// Create an empty graph.
    pub const fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            gates: BTreeSet::new(),
            gate_count: 0,
        }
    }

    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Ensure `id` exists as a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, id: LocationId) {
        self.adjacency.entry(id).or_default();
    }

    /// Whether `id` is a node of the graph.
    pub fn has_node(&self, id: LocationId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Add an undirected gate between `a` and `b`.
    ///
    /// Both endpoints become nodes if they were not already. Returns `false`
    /// without touching the graph for a self-loop or an existing gate.
    pub fn add_gate(&mut self, a: LocationId, b: LocationId) -> bool {
        if a == b {
            return false;
        }
        self.add_node(a);
        self.add_node(b);

        if !self.gates.insert(normalize(a, b)) {
            return false;
        }

        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        self.gate_count = self.gate_count.saturating_add(1);
        true
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Whether a gate joins `a` and `b` (in either direction).
    pub fn has_gate(&self, a: LocationId, b: LocationId) -> bool {
        a != b && self.gates.contains(&normalize(a, b))
    }

    /// Neighbors of `id` in the order their gates were added.
    ///
    /// Unknown ids have no neighbors.
    pub fn neighbors(&self, id: LocationId) -> &[LocationId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of gates.
    pub const fn gate_count(&self) -> usize {
        self.gate_count
    }

    /// All node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.adjacency.keys().copied()
    }

    /// All gates as normalized pairs in ascending order.
    pub fn gates(&self) -> impl Iterator<Item = (LocationId, LocationId)> + '_ {
        self.gates.iter().copied()
    }

    /// Find the fewest-jumps route from `start` to `goal`.
    ///
    /// Returns `None` if either endpoint is unknown or the two lie in
    /// different components. A route from a node to itself is zero jumps.
    pub fn shortest_route(&self, start: LocationId, goal: LocationId) -> Option<RouteResult> {
        if !self.has_node(start) || !self.has_node(goal) {
            return None;
        }
        if start == goal {
            return Some(RouteResult {
                jumps: 0,
                path: vec![start],
            });
        }

        // Predecessor map doubles as the visited set.
        let mut prev: BTreeMap<LocationId, LocationId> = BTreeMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if next == start || prev.contains_key(&next) {
                    continue;
                }
                prev.insert(next, current);

                if next == goal {
                    return Some(reconstruct(&prev, start, goal));
                }
                queue.push_back(next);
            }
        }

        None
    }

    /// Locations reachable from `start` in at most `max_jumps` jumps.
    ///
    /// Results come in BFS discovery order. `start` itself is only listed
    /// when `include_start` is set. Unknown starts and negative bounds give
    /// an empty list.
    pub fn within(&self, start: LocationId, max_jumps: i32, include_start: bool) -> Vec<LocationId> {
        let mut out = Vec::new();
        if !self.has_node(start) || max_jumps < 0 {
            return out;
        }

        let mut dist: BTreeMap<LocationId, i32> = BTreeMap::new();
        let mut queue = VecDeque::new();
        dist.insert(start, 0);
        queue.push_back((start, 0_i32));

        while let Some((current, d)) = queue.pop_front() {
            if include_start || current != start {
                out.push(current);
            }
            let next_dist = d.saturating_add(1);
            if next_dist > max_jumps {
                continue;
            }
            for &next in self.neighbors(current) {
                if dist.contains_key(&next) {
                    continue;
                }
                dist.insert(next, next_dist);
                queue.push_back((next, next_dist));
            }
        }

        out
    }

    /// Whether every node is reachable from every other node.
    ///
    /// The search is rooted at the lowest id so the answer never depends on
    /// map iteration order. An empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        let Some(&root) = self.adjacency.keys().next() else {
            return true;
        };

        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(root);
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited.len() == self.adjacency.len()
    }
}

/// Walk predecessor links back from `goal` and return the forward route.
fn reconstruct(
    prev: &BTreeMap<LocationId, LocationId>,
    start: LocationId,
    goal: LocationId,
) -> RouteResult {
    let mut path = VecDeque::new();
    let mut current = goal;
    path.push_front(current);
    while current != start {
        let Some(&predecessor) = prev.get(&current) else {
            break;
        };
        path.push_front(predecessor);
        current = predecessor;
    }

    let path: Vec<LocationId> = path.into_iter().collect();
    let jumps = u32::try_from(path.len().saturating_sub(1)).unwrap_or(u32::MAX);
    RouteResult { jumps, path }
}
