use grid_util::point::Point;
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::block_registry::BlockRegistry;
use crate::heuristic::{Heuristic, ZeroHeuristic};
use crate::search::{best_first, SearchOutcome, SearchStats};
use crate::{DEFAULT_EXPANSION_LIMIT, N_SMALLVEC_SIZE, STEP_COST};

/// Offsets of the eight neighbours in the order they are expanded: the four straight
/// moves, then the four diagonals.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Neighbours of `point` in expansion order. Offsets leading past the `i32` range are
/// left out, so the grid ends there.
pub fn neighbours(point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
    NEIGHBOUR_OFFSETS
        .iter()
        .filter_map(|(dx, dy)| {
            Some(Point::new(
                point.x.checked_add(*dx)?,
                point.y.checked_add(*dy)?,
            ))
        })
        .collect()
}

/// Whether two cells are one of the eight neighbour offsets apart.
pub fn adjacent(p1: &Point, p2: &Point) -> bool {
    p1.x.abs_diff(p2.x).max(p1.y.abs_diff(p2.y)) == 1
}

/// Result of [PathGenerator::search].
#[derive(Clone, Debug, PartialEq)]
pub enum PathSearch {
    /// Start or target is blocked, nothing was searched.
    BlockedEndpoint,
    Found { path: Vec<Point>, stats: SearchStats },
    /// Every cell reachable from the start was expanded without meeting the target.
    Exhausted { stats: SearchStats },
    /// The expansion limit ended the search.
    LimitReached { stats: SearchStats },
}

impl PathSearch {
    pub fn is_found(&self) -> bool {
        matches!(self, PathSearch::Found { .. })
    }

    pub fn stats(&self) -> Option<SearchStats> {
        match self {
            PathSearch::BlockedEndpoint => None,
            PathSearch::Found { stats, .. }
            | PathSearch::Exhausted { stats }
            | PathSearch::LimitReached { stats } => Some(*stats),
        }
    }

    /// The path from start to target, empty when none was found.
    pub fn into_path(self) -> Vec<Point> {
        match self {
            PathSearch::Found { path, .. } => path,
            _ => Vec::new(),
        }
    }
}

/// Computes shortest paths over the unbounded 8-connected grid, where a cell can be
/// entered unless the [BlockRegistry] passed in marks it blocked. Each step costs 1,
/// diagonal or not.
///
/// The default heuristic is [ZeroHeuristic], making the search Dijkstra's algorithm;
/// among several shortest paths the one chosen follows from the expansion order of
/// [NEIGHBOUR_OFFSETS]. Since the grid has no border, a search for an enclosed target
/// only ends by `expansion_limit`, which defaults to [DEFAULT_EXPANSION_LIMIT].
#[derive(Clone, Debug)]
pub struct PathGenerator<H: Heuristic = ZeroHeuristic> {
    pub heuristic: H,
    pub expansion_limit: Option<usize>,
}

impl Default for PathGenerator {
    fn default() -> PathGenerator {
        PathGenerator {
            heuristic: ZeroHeuristic,
            expansion_limit: Some(DEFAULT_EXPANSION_LIMIT),
        }
    }
}

impl PathGenerator {
    pub fn new() -> PathGenerator {
        PathGenerator::default()
    }
}

impl<H: Heuristic> PathGenerator<H> {
    pub fn with_heuristic<H2: Heuristic>(self, heuristic: H2) -> PathGenerator<H2> {
        PathGenerator {
            heuristic,
            expansion_limit: self.expansion_limit,
        }
    }

    /// `None` lets a search run until the open set is empty.
    pub fn with_expansion_limit(mut self, expansion_limit: Option<usize>) -> Self {
        self.expansion_limit = expansion_limit;
        self
    }

    /// Computes a path from `start` to `target`, both included. The path is empty if
    /// either endpoint is blocked or the target could not be reached.
    pub fn generate_path(
        &self,
        blocks: &BlockRegistry,
        start: Point,
        target: Point,
    ) -> Vec<Point> {
        self.search(blocks, start, target).into_path()
    }

    /// Like [generate_path](Self::generate_path) but reports why no path was found.
    pub fn search(&self, blocks: &BlockRegistry, start: Point, target: Point) -> PathSearch {
        if blocks.has_block(&start) || blocks.has_block(&target) {
            info!("{} or {} is blocked, no path computed", start, target);
            return PathSearch::BlockedEndpoint;
        }
        let (outcome, stats) = best_first(
            &start,
            |node| {
                neighbours(node)
                    .into_iter()
                    .filter(|p| !blocks.has_block(p))
                    .map(|p| (p, STEP_COST))
                    .collect::<SmallVec<[_; N_SMALLVEC_SIZE]>>()
            },
            |point| self.heuristic.estimate(point, &target),
            |point| *point == target,
            self.expansion_limit,
        );
        match outcome {
            SearchOutcome::Found { path, cost } => {
                info!(
                    "Path from {} to {} found with cost {} after {} expansions",
                    start, target, cost, stats.expanded
                );
                PathSearch::Found { path, stats }
            }
            SearchOutcome::Exhausted => {
                debug!(
                    "{} is not reachable from {}, {} cells expanded",
                    target, start, stats.expanded
                );
                PathSearch::Exhausted { stats }
            }
            SearchOutcome::LimitReached => {
                warn!(
                    "Search from {} to {} stopped after {} expansions",
                    start, target, stats.expanded
                );
                PathSearch::LimitReached { stats }
            }
        }
    }

    /// Cost of following `path` under the uniform step cost.
    pub fn path_cost(&self, path: &[Point]) -> f32 {
        path.len().saturating_sub(1) as f32 * STEP_COST
    }

    /// Checks that every cell of `path` is free and every step goes to a neighbour.
    pub fn is_valid_path(&self, blocks: &BlockRegistry, path: &[Point]) -> bool {
        path.iter().all(|p| !blocks.has_block(p))
            && path.windows(2).all(|w| adjacent(&w[0], &w[1]))
    }
}
