use block_pathfinding::{Pathfinder, Point};

// In this example a path is found around a single obstacle
//  ___
// |  E|
// | # |
// |S  |
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood and the grid is unbounded

fn main() {
    let mut pathfinder = Pathfinder::new();
    pathfinder.add_block([Point::new(1, 1)]);
    println!("{}", pathfinder);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = pathfinder.generate_path(start, end);
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
