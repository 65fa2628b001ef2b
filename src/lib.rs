//! # block_pathfinding
//!
//! Shortest paths on an unbounded grid with
//! [8-connected](https://en.wikipedia.org/wiki/Moore_neighborhood) movement where every
//! step, straight or diagonal, costs the same. Obstacles are kept in a [BlockRegistry]
//! which counts how many independent sources block each cell, so a cell only frees up
//! once all of them have removed their block.
//!
//! Paths are computed by a best-first search with a pluggable [Heuristic]. The default,
//! [ZeroHeuristic], makes it behave as
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm), which
//! together with the fixed neighbour order of [NEIGHBOUR_OFFSETS] determines which of
//! several equally short paths is returned.
pub mod block_registry;
pub mod generator;
pub mod heuristic;
pub mod search;

use core::fmt;

pub use block_registry::{BlockInfo, BlockRegistry};
pub use generator::{PathGenerator, PathSearch, NEIGHBOUR_OFFSETS};
pub use grid_util::point::Point;
pub use heuristic::{
    ChebyshevHeuristic, EuclideanHeuristic, Heuristic, ManhattanHeuristic, ZeroHeuristic,
};

/// Cost of moving to any of the eight neighbours.
pub const STEP_COST: f32 = 1.0;
/// Default upper bound on expanded cells per search. Without one, a search for an
/// enclosed target on the unbounded grid never ends.
pub const DEFAULT_EXPANSION_LIMIT: usize = 1 << 20;
pub const N_SMALLVEC_SIZE: usize = 8;

/// [Pathfinder] bundles the obstacle state with a [PathGenerator] so both can be
/// driven through one value, the way a game object exposing pathfinding would.
#[derive(Clone, Debug)]
pub struct Pathfinder<H: Heuristic = ZeroHeuristic> {
    pub blocks: BlockRegistry,
    pub generator: PathGenerator<H>,
}

impl Default for Pathfinder {
    fn default() -> Pathfinder {
        Pathfinder::with_generator(PathGenerator::default())
    }
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder::default()
    }
}

impl<H: Heuristic> Pathfinder<H> {
    pub fn with_generator(generator: PathGenerator<H>) -> Pathfinder<H> {
        Pathfinder {
            blocks: BlockRegistry::new(),
            generator,
        }
    }

    pub fn add_block<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = Point>,
    {
        self.blocks.add_block(coords);
    }

    pub fn remove_block<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = Point>,
    {
        self.blocks.remove_block(coords);
    }

    pub fn empty_block(&mut self) {
        self.blocks.empty_block();
    }

    pub fn has_block(&self, coord: &Point) -> bool {
        self.blocks.has_block(coord)
    }

    pub fn get_block_array(&self) -> Vec<Point> {
        self.blocks.get_block_array()
    }

    /// See [PathGenerator::generate_path].
    pub fn generate_path(&self, start: Point, target: Point) -> Vec<Point> {
        self.generator.generate_path(&self.blocks, start, target)
    }

    pub fn search(&self, start: Point, target: Point) -> PathSearch {
        self.generator.search(&self.blocks, start, target)
    }
}

impl<H: Heuristic> fmt::Display for Pathfinder<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Pathfinder ({} blocked cells, expansion limit {:?})",
            self.blocks.len(),
            self.generator.expansion_limit
        )?;
        write!(f, "{}", self.blocks)
    }
}
