//! Fuzzes the path generator on many random obstacle fields. Paths are checked against a
//! plain open-list search that scans for the first node with the lowest F, against
//! breadth-first distances, and for being walkable.
use block_pathfinding::{
    BlockRegistry, ChebyshevHeuristic, EuclideanHeuristic, Heuristic, ManhattanHeuristic,
    PathGenerator, Point, ZeroHeuristic, NEIGHBOUR_OFFSETS,
};
use rand::prelude::*;
use std::collections::{HashMap, VecDeque};

/// Random obstacles fenced in by a blocked border so every search ends.
fn random_blocks(n: i32, rng: &mut StdRng) -> BlockRegistry {
    let mut blocks = BlockRegistry::new();
    for x in -1..=n {
        for y in -1..=n {
            let border = x == -1 || y == -1 || x == n || y == n;
            if border || rng.gen_bool(0.35) {
                blocks.block(Point::new(x, y));
            }
            // Stack a second layer on some cells to exercise counting
            if !border && rng.gen_bool(0.05) {
                blocks.block(Point::new(x, y));
            }
        }
    }
    blocks
}

fn random_grid_point(n: i32, rng: &mut StdRng) -> Point {
    Point::new(rng.gen_range(0..n), rng.gen_range(0..n))
}

fn visualize_grid(n: i32, blocks: &BlockRegistry, start: &Point, end: &Point) {
    for y in (0..n).rev() {
        for x in 0..n {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if blocks.has_block(&p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

struct Node {
    coord: Point,
    parent: Option<usize>,
    g: f32,
    h: f32,
}

/// Open and closed lists kept as plain vectors, the minimum found by scanning.
fn reference_path<H: Heuristic>(
    blocks: &BlockRegistry,
    start: Point,
    target: Point,
    heuristic: &H,
) -> Vec<Point> {
    if blocks.has_block(&start) || blocks.has_block(&target) {
        return Vec::new();
    }
    let mut nodes = vec![Node {
        coord: start,
        parent: None,
        g: 0.0,
        h: heuristic.estimate(&start, &target),
    }];
    let mut open: Vec<usize> = vec![0];
    let mut closed: Vec<usize> = Vec::new();
    while !open.is_empty() {
        let mut best = 0;
        for i in 1..open.len() {
            let f = |n: &Node| n.g + n.h;
            if f(&nodes[open[i]]) < f(&nodes[open[best]]) {
                best = i;
            }
        }
        let current = open.remove(best);
        closed.push(current);
        if nodes[current].coord == target {
            let mut path = Vec::new();
            let mut cursor = Some(current);
            while let Some(i) = cursor {
                path.push(nodes[i].coord);
                cursor = nodes[i].parent;
            }
            path.reverse();
            return path;
        }
        let here = nodes[current].coord;
        for (dx, dy) in NEIGHBOUR_OFFSETS {
            let next = Point::new(here.x + dx, here.y + dy);
            if blocks.has_block(&next) || closed.iter().any(|&i| nodes[i].coord == next) {
                continue;
            }
            let g = nodes[current].g + 1.0;
            match open.iter().copied().find(|&i| nodes[i].coord == next) {
                Some(i) => {
                    if g < nodes[i].g {
                        nodes[i].parent = Some(current);
                        nodes[i].g = g;
                    }
                }
                None => {
                    nodes.push(Node {
                        coord: next,
                        parent: Some(current),
                        g,
                        h: heuristic.estimate(&next, &target),
                    });
                    open.push(nodes.len() - 1);
                }
            }
        }
    }
    Vec::new()
}

/// Breadth-first step counts from `start`, not leaving the square `lo..=hi` on either axis.
fn bfs_distances(
    blocks: &BlockRegistry,
    start: Point,
    lo: i32,
    hi: i32,
) -> HashMap<Point, usize> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(start, 0);
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        let d = dist[&p];
        for (dx, dy) in NEIGHBOUR_OFFSETS {
            let q = Point::new(p.x + dx, p.y + dy);
            let inside = (lo..=hi).contains(&q.x) && (lo..=hi).contains(&q.y);
            if inside && !blocks.has_block(&q) && !dist.contains_key(&q) {
                dist.insert(q, d + 1);
                queue.push_back(q);
            }
        }
    }
    dist
}

#[test]
fn fuzz() {
    const N: i32 = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let generator = PathGenerator::new();
    for _ in 0..N_GRIDS {
        let mut blocks = random_blocks(N, &mut rng);
        let start = random_grid_point(N, &mut rng);
        let end = random_grid_point(N, &mut rng);
        if rng.gen_bool(0.8) {
            while blocks.has_block(&start) {
                blocks.unblock(start);
            }
            while blocks.has_block(&end) {
                blocks.unblock(end);
            }
        }
        let path = generator.generate_path(&blocks, start, end);
        let expected = reference_path(&blocks, start, end, &ZeroHeuristic);
        // Show the grid if the paths disagree
        if path != expected {
            visualize_grid(N, &blocks, &start, &end);
            println!("Path: {path:?}\nReference: {expected:?}");
        }
        assert_eq!(path, expected);

        if blocks.has_block(&start) || blocks.has_block(&end) {
            assert!(path.is_empty());
            continue;
        }
        let distances = bfs_distances(&blocks, start, -1, N);
        match distances.get(&end) {
            Some(&d) => {
                assert_eq!(path.len(), d + 1);
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&end));
                assert!(generator.is_valid_path(&blocks, &path));
            }
            None => assert!(path.is_empty()),
        }
    }
}

/// Unfenced obstacles on the open grid. Outside the obstacle square everything is free,
/// so reachability can be decided by a search confined to the square plus a one cell
/// margin. A search towards an enclosed target ends at the expansion limit.
#[test]
fn fuzz_open_grid() {
    const N: i32 = 12;
    const N_GRIDS: usize = 200;
    let mut rng = StdRng::seed_from_u64(1);
    let generator = PathGenerator::new().with_expansion_limit(Some(10_000));
    for _ in 0..N_GRIDS {
        let mut blocks = BlockRegistry::new();
        for _ in 0..(N * N / 3) {
            blocks.block(random_grid_point(N, &mut rng));
        }
        let start = random_grid_point(N, &mut rng);
        let end = random_grid_point(N, &mut rng);
        while blocks.has_block(&start) || blocks.has_block(&end) {
            blocks.remove_block([start, end]);
        }
        let result = generator.search(&blocks, start, end);
        if bfs_distances(&blocks, start, -1, N).contains_key(&end) {
            let path = result.into_path();
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            assert!(generator.is_valid_path(&blocks, &path));
            assert_eq!(path, generator.generate_path(&blocks, start, end));
        } else {
            assert!(!result.is_found());
            assert!(result.into_path().is_empty());
        }
    }
}

fn compare_with_reference<H: Heuristic + Clone>(heuristic: H, rng: &mut StdRng) {
    const N: i32 = 10;
    const N_GRIDS: usize = 500;
    let generator = PathGenerator::new().with_heuristic(heuristic.clone());
    for _ in 0..N_GRIDS {
        let mut blocks = random_blocks(N, rng);
        let start = random_grid_point(N, rng);
        let end = random_grid_point(N, rng);
        while blocks.has_block(&start) || blocks.has_block(&end) {
            blocks.remove_block([start, end]);
        }
        let path = generator.generate_path(&blocks, start, end);
        let expected = reference_path(&blocks, start, end, &heuristic);
        if path != expected {
            visualize_grid(N, &blocks, &start, &end);
            println!("Path: {path:?}\nReference: {expected:?}");
        }
        assert_eq!(path, expected);
        if !path.is_empty() {
            assert!(generator.is_valid_path(&blocks, &path));
        }
    }
}

/// With a nonzero heuristic open nodes do get cheaper parents later on, which must
/// not move them in the selection order.
#[test]
fn fuzz_heuristics() {
    let mut rng = StdRng::seed_from_u64(2);
    compare_with_reference(EuclideanHeuristic, &mut rng);
    compare_with_reference(ManhattanHeuristic, &mut rng);
    compare_with_reference(ChebyshevHeuristic, &mut rng);
}
