//! Wall/floor skeleton builders that run before entity placement.

use rand_chacha::ChaCha8Rng;

use super::rng::{coin, percent, roll, roll_i32};
use crate::state::Map;
use crate::types::{Pos, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Spiral,
    Maze,
    Symmetrical,
    Rooms,
}

impl Pattern {
    pub const CYCLE: [Pattern; 4] =
        [Pattern::Spiral, Pattern::Maze, Pattern::Symmetrical, Pattern::Rooms];
}

/// Builds a wall/floor-only map for the pattern. The boundary ring is always
/// solid wall.
pub fn build_skeleton(
    rng: &mut ChaCha8Rng,
    pattern: Pattern,
    width: usize,
    height: usize,
) -> Map {
    match pattern {
        Pattern::Spiral => build_spiral(rng, width, height),
        Pattern::Maze => build_maze(rng, width, height),
        Pattern::Symmetrical => build_symmetrical(rng, width, height),
        Pattern::Rooms => build_rooms(rng, width, height),
    }
}

/// Writes only strictly inside the boundary ring; ring segments that would
/// touch the boundary are clipped instead of drawn.
fn set_interior(map: &mut Map, pos: Pos, tile: Tile) {
    let inside = pos.x >= 1
        && pos.y >= 1
        && (pos.x as usize) < map.width - 1
        && (pos.y as usize) < map.height - 1;
    if inside {
        map.set_tile(pos, tile);
    }
}

fn build_spiral(rng: &mut ChaCha8Rng, width: usize, height: usize) -> Map {
    let mut map = Map::new(width, height);
    map.stamp_boundary_walls();

    let center_x = (width / 2) as i32;
    let center_y = (height / 2) as i32;
    let max_radius = center_x.min(center_y) - 1;

    let mut radius = 2;
    while radius <= max_radius {
        for i in -radius..=radius {
            set_interior(&mut map, Pos { y: center_y - radius, x: center_x + i }, Tile::Wall);
            set_interior(&mut map, Pos { y: center_y + radius, x: center_x + i }, Tile::Wall);
            set_interior(&mut map, Pos { y: center_y + i, x: center_x - radius }, Tile::Wall);
            set_interior(&mut map, Pos { y: center_y + i, x: center_x + radius }, Tile::Wall);
        }

        // One opening per ring keeps the rings walkable.
        let side = roll(rng, 0, 3);
        let offset = roll_i32(rng, -radius + 1, radius - 1);
        let opening = match side {
            0 => Pos { y: center_y - radius, x: center_x + offset },
            1 => Pos { y: center_y + offset, x: center_x + radius },
            2 => Pos { y: center_y + radius, x: center_x + offset },
            _ => Pos { y: center_y + offset, x: center_x - radius },
        };
        set_interior(&mut map, opening, Tile::Floor);

        radius += 2;
    }
    map
}

fn build_maze(rng: &mut ChaCha8Rng, width: usize, height: usize) -> Map {
    let mut map = Map::filled(width, height, Tile::Wall);

    let start = Pos { y: 1, x: 1 };
    map.set_tile(start, Tile::Floor);
    let mut stack = vec![start];

    // Randomized DFS over the odd-coordinate lattice, carving the connector
    // wall along with each new cell.
    while let Some(&current) = stack.last() {
        let Pos { y, x } = current;
        let mut candidates: Vec<(Pos, Pos)> = Vec::new();
        if y - 2 > 0 && map.tile_at(Pos { y: y - 2, x }) == Tile::Wall {
            candidates.push((Pos { y: y - 1, x }, Pos { y: y - 2, x }));
        }
        if x + 2 < width as i32 - 1 && map.tile_at(Pos { y, x: x + 2 }) == Tile::Wall {
            candidates.push((Pos { y, x: x + 1 }, Pos { y, x: x + 2 }));
        }
        if y + 2 < height as i32 - 1 && map.tile_at(Pos { y: y + 2, x }) == Tile::Wall {
            candidates.push((Pos { y: y + 1, x }, Pos { y: y + 2, x }));
        }
        if x - 2 > 0 && map.tile_at(Pos { y, x: x - 2 }) == Tile::Wall {
            candidates.push((Pos { y, x: x - 1 }, Pos { y, x: x - 2 }));
        }

        if candidates.is_empty() {
            stack.pop();
        } else {
            let (connector, neighbor) = candidates[roll(rng, 0, candidates.len() - 1)];
            map.set_tile(connector, Tile::Floor);
            map.set_tile(neighbor, Tile::Floor);
            stack.push(neighbor);
        }
    }

    punch_maze_openings(rng, &mut map);
    map
}

/// Opens roughly 5% of the area in extra walls so the maze has loops, while
/// refusing any opening that would leave a neighbor with more than two open
/// cells in its own 8-neighborhood.
fn punch_maze_openings(rng: &mut ChaCha8Rng, map: &mut Map) {
    let openings = map.width * map.height / 20;
    for _ in 0..openings {
        let pos = Pos {
            y: roll(rng, 1, map.height - 2) as i32,
            x: roll(rng, 1, map.width - 2) as i32,
        };
        if map.tile_at(pos) != Tile::Wall {
            continue;
        }
        if opening_keeps_corridors_tight(map, pos) {
            map.set_tile(pos, Tile::Floor);
        }
    }
}

fn opening_keeps_corridors_tight(map: &Map, pos: Pos) -> bool {
    for dy in -1..=1i32 {
        for dx in -1..=1i32 {
            if dy == 0 && dx == 0 {
                continue;
            }
            let neighbor = Pos { y: pos.y + dy, x: pos.x + dx };
            if !map.in_bounds(neighbor) {
                continue;
            }
            let mut open = 0;
            for ny in -1..=1i32 {
                for nx in -1..=1i32 {
                    if ny == 0 && nx == 0 {
                        continue;
                    }
                    let cell = Pos { y: neighbor.y + ny, x: neighbor.x + nx };
                    if map.in_bounds(cell) && map.tile_at(cell) == Tile::Floor {
                        open += 1;
                    }
                }
            }
            if open > 2 {
                return false;
            }
        }
    }
    true
}

fn build_symmetrical(rng: &mut ChaCha8Rng, width: usize, height: usize) -> Map {
    let mut map = Map::new(width, height);
    map.stamp_boundary_walls();

    let center_x = width / 2;
    let center_y = height / 2;

    for y in 1..center_y {
        for x in 1..width - 1 {
            if percent(rng) < 20 {
                map.set_tile(Pos { y: y as i32, x: x as i32 }, Tile::Wall);
                map.set_tile(Pos { y: (height - 1 - y) as i32, x: x as i32 }, Tile::Wall);
            }
        }
    }
    // Independent second pass; the two mirrors are not composed.
    for x in 1..center_x {
        for y in 1..height - 1 {
            if percent(rng) < 20 {
                map.set_tile(Pos { y: y as i32, x: x as i32 }, Tile::Wall);
                map.set_tile(Pos { y: y as i32, x: (width - 1 - x) as i32 }, Tile::Wall);
            }
        }
    }
    map
}

fn build_rooms(rng: &mut ChaCha8Rng, width: usize, height: usize) -> Map {
    let mut map = Map::filled(width, height, Tile::Wall);

    let room_count = roll(rng, 3, 6);
    let mut centers: Vec<Pos> = Vec::with_capacity(room_count);
    for _ in 0..room_count {
        let room_width = roll(rng, 3, 6);
        let room_height = roll(rng, 3, 6);
        let room_x = roll(rng, 1, width - room_width - 1);
        let room_y = roll(rng, 1, height - room_height - 1);

        // Overlapping rooms are allowed and simply merge.
        for y in room_y..room_y + room_height {
            for x in room_x..room_x + room_width {
                map.set_tile(Pos { y: y as i32, x: x as i32 }, Tile::Floor);
            }
        }
        centers.push(Pos {
            y: (room_y + room_height / 2) as i32,
            x: (room_x + room_width / 2) as i32,
        });
    }

    for pair in centers.windows(2) {
        carve_l_corridor(&mut map, pair[0], pair[1], coin(rng));
    }
    map
}

fn carve_l_corridor(map: &mut Map, start: Pos, end: Pos, horizontal_first: bool) {
    if horizontal_first {
        carve_horizontal(map, start.y, start.x, end.x);
        carve_vertical(map, end.x, start.y, end.y);
    } else {
        carve_vertical(map, start.x, start.y, end.y);
        carve_horizontal(map, end.y, start.x, end.x);
    }
}

fn carve_horizontal(map: &mut Map, y: i32, from_x: i32, to_x: i32) {
    for x in from_x.min(to_x)..=from_x.max(to_x) {
        map.set_tile(Pos { y, x }, Tile::Floor);
    }
}

fn carve_vertical(map: &mut Map, x: i32, from_y: i32, to_y: i32) {
    for y in from_y.min(to_y)..=from_y.max(to_y) {
        map.set_tile(Pos { y, x }, Tile::Floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use proptest::prelude::*;
    use rand_chacha::rand_core::SeedableRng;
    use std::collections::VecDeque;

    fn boundary_is_solid(map: &Map) -> bool {
        let right = (map.width - 1) as i32;
        let bottom = (map.height - 1) as i32;
        (0..map.width as i32).all(|x| {
            map.tile_at(Pos { y: 0, x }) == Tile::Wall
                && map.tile_at(Pos { y: bottom, x }) == Tile::Wall
        }) && (0..map.height as i32).all(|y| {
            map.tile_at(Pos { y, x: 0 }) == Tile::Wall
                && map.tile_at(Pos { y, x: right }) == Tile::Wall
        })
    }

    fn floor_cells(map: &Map) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..map.height as i32 {
            for x in 0..map.width as i32 {
                if map.tile_at(Pos { y, x }) == Tile::Floor {
                    cells.push(Pos { y, x });
                }
            }
        }
        cells
    }

    fn all_floor_connected(map: &Map) -> bool {
        let cells = floor_cells(map);
        let Some(&start) = cells.first() else {
            return true;
        };
        let mut seen = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for direction in Direction::ALL {
                let (dy, dx) = direction.delta();
                let next = Pos { y: current.y + dy, x: current.x + dx };
                if map.tile_at(next) == Tile::Floor && !seen.contains(&next) {
                    seen.push(next);
                    queue.push_back(next);
                }
            }
        }
        seen.len() == cells.len()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn skeletons_keep_the_boundary_solid(
            seed in any::<u64>(),
            selector in 0usize..4,
            width in 9usize..=17,
            height in 9usize..=17,
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let map = build_skeleton(&mut rng, Pattern::CYCLE[selector], width, height);
            prop_assert_eq!(map.width, width);
            prop_assert_eq!(map.height, height);
            prop_assert!(boundary_is_solid(&map));
        }

        #[test]
        fn mazes_are_fully_connected(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let map = build_skeleton(&mut rng, Pattern::Maze, 13, 13);
            prop_assert!(all_floor_connected(&map));
        }

        #[test]
        fn symmetrical_skeletons_have_open_floor(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let map = build_skeleton(&mut rng, Pattern::Symmetrical, 11, 11);
            prop_assert!(!floor_cells(&map).is_empty());
        }
    }

    #[test]
    fn spiral_draws_interior_rings() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let map = build_skeleton(&mut rng, Pattern::Spiral, 15, 15);
        // Radius-2 ring around the center must exist up to its opening.
        let ring: Vec<Tile> = (-2..=2)
            .map(|i| map.tile_at(Pos { y: 5, x: 7 + i }))
            .collect();
        assert!(ring.iter().filter(|&&t| t == Tile::Wall).count() >= 4);
    }

    #[test]
    fn rooms_skeleton_carves_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let map = build_skeleton(&mut rng, Pattern::Rooms, 13, 13);
        assert!(floor_cells(&map).len() >= 9);
    }
}
