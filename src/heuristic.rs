use grid_util::point::Point;

/// Axis distances between two cells. `abs_diff` cannot overflow, even between
/// `i32::MIN` and `i32::MAX`.
fn axis_distances(from: &Point, to: &Point) -> (f32, f32) {
    (
        from.x.abs_diff(to.x) as f32,
        from.y.abs_diff(to.y) as f32,
    )
}

/// Estimates the remaining cost from a cell to the target. Every step on the grid
/// costs 1, diagonal steps included, so an estimate that never exceeds
/// the [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance)
/// keeps the found paths shortest.
pub trait Heuristic {
    fn estimate(&self, from: &Point, to: &Point) -> f32;
}

impl<F> Heuristic for F
where
    F: Fn(&Point, &Point) -> f32,
{
    fn estimate(&self, from: &Point, to: &Point) -> f32 {
        self(from, to)
    }
}

/// Always 0, which turns the search into Dijkstra's algorithm. This is the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _: &Point, _: &Point) -> f32 {
        0.0
    }
}

/// Straight line distance. Since a diagonal step costs 1, this overestimates for any
/// target off the axes, so paths found with it need not be shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanHeuristic;

impl Heuristic for EuclideanHeuristic {
    fn estimate(&self, from: &Point, to: &Point) -> f32 {
        let (dx, dy) = axis_distances(from, to);
        dx.hypot(dy)
    }
}

/// Sum of the axis distances. Overestimates whenever a diagonal step is possible.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManhattanHeuristic;

impl Heuristic for ManhattanHeuristic {
    fn estimate(&self, from: &Point, to: &Point) -> f32 {
        let (dx, dy) = axis_distances(from, to);
        dx + dy
    }
}

/// Largest axis distance, the exact step count on an open 8-connected grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChebyshevHeuristic;

impl Heuristic for ChebyshevHeuristic {
    fn estimate(&self, from: &Point, to: &Point) -> f32 {
        let (dx, dy) = axis_distances(from, to);
        dx.max(dy)
    }
}
