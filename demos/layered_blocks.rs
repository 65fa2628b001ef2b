use block_pathfinding::{Pathfinder, Point};

// Two independent systems place a wall on the same cells. The wall only opens up
// once both have taken their block away again.
//
//  S # E
//    #
//    #

fn main() {
    let mut pathfinder = Pathfinder::new();
    let wall: Vec<Point> = (-2..=0).map(|y| Point::new(1, y)).collect();
    let start = Point::new(0, 0);
    let end = Point::new(2, 0);

    pathfinder.add_block(wall.clone());
    pathfinder.add_block([Point::new(1, 0)]);
    println!("{}", pathfinder);

    for round in 0..3 {
        let path = pathfinder.generate_path(start, end);
        println!("Round {round}, path of {} cells: {:?}", path.len(), path);
        pathfinder.remove_block([Point::new(1, 0)]);
    }
}
