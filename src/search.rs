//! Best-first search over an implicit graph, in the shape of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//!
//! Every node discovered during one call lives in an insertion-ordered arena and is
//! addressed by its index in it; predecessors are stored as such indices. The open set
//! is a heap over `(f, index)`, which selects the same node a front-to-back scan of an
//! open list would: the earliest discovered among those with the lowest `f`.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Marks the node without predecessor.
const NO_PARENT: usize = usize::MAX;

/// A node discovered during one search. Its coordinate is the arena key.
#[derive(Clone, Copy, Debug)]
pub struct SearchNode<C> {
    pub parent: usize,
    pub g: C,
    pub h: C,
    pub closed: bool,
}

struct SmallestCostHolder<C> {
    estimated_cost: C,
    cost: C,
    index: usize,
}

impl<C: PartialOrd> Eq for SmallestCostHolder<C> {}

impl<C: PartialOrd> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: PartialOrd> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: PartialOrd> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys since BinaryHeap pops the largest: lowest estimate
        // first, then the node discovered first
        match other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// Counters of one search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes moved to the closed set.
    pub expanded: usize,
    /// Nodes ever placed in the arena.
    pub discovered: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome<N, C> {
    /// The success predicate held; `path` runs from start to the matching node.
    Found { path: Vec<N>, cost: C },
    /// The open set ran dry.
    Exhausted,
    /// The expansion limit was hit before the open set ran dry.
    LimitReached,
}

impl<N, C> SearchOutcome<N, C> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// The found path, or an empty one.
    pub fn into_path(self) -> Vec<N> {
        match self {
            SearchOutcome::Found { path, .. } => path,
            _ => Vec::new(),
        }
    }
}

fn reverse_path<N, C>(nodes: &FxIndexMap<N, SearchNode<C>>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut cursor = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        let (node, value) = nodes.get_index(cursor)?;
        cursor = value.parent;
        Some(node.clone())
    })
    .collect();
    path.reverse();
    path
}

/// Runs the search from `start` until `success` holds for a selected node, the open set
/// is empty, or `limit` nodes have been expanded. `successors` yields neighbours with
/// the cost of stepping onto them and must only yield traversable ones; closed nodes
/// among them are skipped here.
pub fn best_first<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    limit: Option<usize>,
) -> (SearchOutcome<N, C>, SearchStats)
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut stats = SearchStats::default();
    let mut nodes: FxIndexMap<N, SearchNode<C>> = FxIndexMap::default();
    let mut to_see = BinaryHeap::new();

    let h = heuristic(start);
    nodes.insert(
        start.clone(),
        SearchNode {
            parent: NO_PARENT,
            g: Zero::zero(),
            h,
            closed: false,
        },
    );
    stats.discovered += 1;
    to_see.push(SmallestCostHolder {
        estimated_cost: h,
        cost: Zero::zero(),
        index: 0,
    });

    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, value)) = nodes.get_index_mut(index) else {
                continue;
            };
            // A node is pushed again whenever its cost improves; only the entry
            // carrying its current cost is live
            if value.closed || cost > value.g {
                continue;
            }
            if limit.is_some_and(|limit| stats.expanded >= limit) {
                return (SearchOutcome::LimitReached, stats);
            }
            value.closed = true;
            stats.expanded += 1;
            if success(node) {
                let path = reverse_path(&nodes, index);
                return (SearchOutcome::Found { path, cost }, stats);
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match nodes.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(SearchNode {
                        parent: index,
                        g: new_cost,
                        h,
                        closed: false,
                    });
                    stats.discovered += 1;
                }
                Occupied(mut e) => {
                    let value = e.get_mut();
                    if !value.closed && new_cost < value.g {
                        value.parent = index;
                        value.g = new_cost;
                        h = value.h;
                        n = e.index();
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    (SearchOutcome::Exhausted, stats)
}
