use core::fmt;

use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Largest bounding box, in cells, that [BlockRegistry]'s `Display` draws cell by cell.
const MAX_DRAWN_CELLS: u64 = 1 << 16;

/// Number of independent obstacle sources covering one cell. A cell stored in a
/// [BlockRegistry] always has at least one layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockInfo {
    pub layers: u32,
}

/// [BlockRegistry] records, for every blocked cell of the unbounded grid, how many
/// obstacle sources currently cover it. A cell only becomes free again once every
/// source that blocked it has removed its layer, so overlapping systems can mark the
/// same cell without stepping on each other.
///
/// Mutation takes `&mut self`: a registry must not be changed while a search that
/// borrows it is running.
#[derive(Clone, Debug, Default)]
pub struct BlockRegistry {
    blocks: FxIndexMap<Point, BlockInfo>,
}

impl BlockRegistry {
    pub fn new() -> BlockRegistry {
        BlockRegistry::default()
    }

    /// Adds one layer to every given cell. A cell listed twice gets two layers.
    pub fn add_block<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = Point>,
    {
        for coord in coords {
            self.blocks.entry(coord).or_default().layers += 1;
        }
    }

    /// Removes one layer from every given cell, forgetting cells whose last layer is
    /// removed. Cells that are not blocked are ignored.
    pub fn remove_block<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = Point>,
    {
        for coord in coords {
            match self.blocks.entry(coord) {
                Occupied(mut e) => {
                    if e.get().layers > 1 {
                        e.get_mut().layers -= 1;
                    } else {
                        e.shift_remove();
                    }
                }
                Vacant(_) => debug!("{} is not blocked, nothing to remove", coord),
            }
        }
    }

    pub fn block(&mut self, coord: Point) {
        self.add_block([coord]);
    }

    pub fn unblock(&mut self, coord: Point) {
        self.remove_block([coord]);
    }

    /// Drops every layer of every cell.
    pub fn empty_block(&mut self) {
        self.blocks.clear();
    }

    pub fn has_block(&self, coord: &Point) -> bool {
        self.layers(coord) > 0
    }

    pub fn layers(&self, coord: &Point) -> u32 {
        self.blocks.get(coord).map_or(0, |info| info.layers)
    }

    /// All blocked cells. The order is the order in which cells were first blocked,
    /// but callers should not rely on it.
    pub fn get_block_array(&self) -> Vec<Point> {
        self.blocks.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Point, &BlockInfo)> {
        self.blocks.iter()
    }

    /// Number of distinct blocked cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Smallest and largest corner of the box enclosing all blocked cells.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let (min_x, max_x) = self.blocks.keys().map(|p| p.x).minmax().into_option()?;
        let (min_y, max_y) = self.blocks.keys().map(|p| p.y).minmax().into_option()?;
        Some((Point::new(min_x, min_y), Point::new(max_x, max_y)))
    }
}

impl fmt::Display for BlockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Some((min, max)) = self.bounds() else {
            return writeln!(f, "(no blocks)");
        };
        let width = min.x.abs_diff(max.x) as u64 + 1;
        let height = min.y.abs_diff(max.y) as u64 + 1;
        if width.saturating_mul(height) > MAX_DRAWN_CELLS {
            return writeln!(
                f,
                "{} blocked cells from {} to {}, too spread out to draw",
                self.len(),
                min,
                max
            );
        }
        writeln!(f, "Blocks from {} to {}:", min, max)?;
        for y in (min.y..=max.y).rev() {
            let row: String = (min.x..=max.x)
                .map(|x| {
                    if self.has_block(&Point::new(x, y)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
