//! Player, box, and goal placement over a finished skeleton.

use rand_chacha::ChaCha8Rng;

use super::rng::roll;
use crate::state::Map;
use crate::types::{LevelError, Pos, Tile};

const MAX_PLACEMENT_ATTEMPTS: u32 = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxRule {
    /// Reject box cells with two perpendicular wall neighbors.
    AvoidDeadCorners,
    /// Any bare floor cell, for the fast throughput path.
    Anywhere,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedLevel {
    pub player: Pos,
    pub boxes: Vec<Pos>,
    pub goals: Vec<Pos>,
}

/// Stamps one player, `box_count` boxes, and `box_count` goals onto bare
/// floor cells by rejection sampling. Goals are placed after boxes and may
/// not share a cell with anything already stamped.
pub fn place_entities(
    rng: &mut ChaCha8Rng,
    map: &mut Map,
    box_count: usize,
    box_rule: BoxRule,
) -> Result<PlacedLevel, LevelError> {
    let player = sample_cell(rng, map, "player placement", |map, pos| {
        map.tile_at(pos) == Tile::Floor
    })?;
    map.set_tile(player, Tile::Player);

    let mut boxes = Vec::with_capacity(box_count);
    for _ in 0..box_count {
        let pos = sample_cell(rng, map, "box placement", |map, pos| {
            map.tile_at(pos) == Tile::Floor
                && (box_rule == BoxRule::Anywhere || !is_dead_corner(map, pos))
        })?;
        map.set_tile(pos, Tile::Box);
        boxes.push(pos);
    }

    let mut goals = Vec::with_capacity(box_count);
    for _ in 0..box_count {
        let pos = sample_cell(rng, map, "goal placement", |map, pos| {
            map.tile_at(pos) == Tile::Floor
        })?;
        map.set_tile(pos, Tile::Goal);
        goals.push(pos);
    }

    Ok(PlacedLevel { player, boxes, goals })
}

fn sample_cell(
    rng: &mut ChaCha8Rng,
    map: &Map,
    stage: &'static str,
    accept: impl Fn(&Map, Pos) -> bool,
) -> Result<Pos, LevelError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = Pos {
            y: roll(rng, 1, map.height - 2) as i32,
            x: roll(rng, 1, map.width - 2) as i32,
        };
        if accept(map, pos) {
            return Ok(pos);
        }
    }
    Err(LevelError::GenerationStall { stage, attempts: MAX_PLACEMENT_ATTEMPTS })
}

/// A cell with two perpendicular wall neighbors; a box pushed into one can
/// never leave it.
pub fn is_dead_corner(map: &Map, pos: Pos) -> bool {
    let wall_up = map.tile_at(Pos { y: pos.y - 1, x: pos.x }) == Tile::Wall;
    let wall_down = map.tile_at(Pos { y: pos.y + 1, x: pos.x }) == Tile::Wall;
    let wall_left = map.tile_at(Pos { y: pos.y, x: pos.x - 1 }) == Tile::Wall;
    let wall_right = map.tile_at(Pos { y: pos.y, x: pos.x + 1 }) == Tile::Wall;
    (wall_up && wall_left)
        || (wall_up && wall_right)
        || (wall_down && wall_left)
        || (wall_down && wall_right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;

    fn open_map(width: usize, height: usize) -> Map {
        let mut map = Map::new(width, height);
        map.stamp_boundary_walls();
        map
    }

    #[test]
    fn corner_cells_are_dead_corners() {
        let map = open_map(5, 5);
        assert!(is_dead_corner(&map, Pos { y: 1, x: 1 }));
        assert!(is_dead_corner(&map, Pos { y: 3, x: 3 }));
        assert!(!is_dead_corner(&map, Pos { y: 2, x: 2 }));
    }

    #[test]
    fn edge_cells_are_not_dead_corners() {
        // One wall neighbor only; opposing walls do not count either.
        let map = open_map(7, 7);
        assert!(!is_dead_corner(&map, Pos { y: 1, x: 3 }));
        let mut corridor = open_map(7, 7);
        for x in 1..6 {
            corridor.set_tile(Pos { y: 2, x }, Tile::Wall);
            corridor.set_tile(Pos { y: 4, x }, Tile::Wall);
        }
        assert!(!is_dead_corner(&corridor, Pos { y: 3, x: 3 }));
    }

    #[test]
    fn placements_never_overlap() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut map = open_map(10, 10);
        let placed =
            place_entities(&mut rng, &mut map, 4, BoxRule::AvoidDeadCorners).unwrap();
        assert_eq!(placed.boxes.len(), 4);
        assert_eq!(placed.goals.len(), 4);
        let mut cells = vec![placed.player];
        cells.extend(&placed.boxes);
        cells.extend(&placed.goals);
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 9);
        assert_eq!(map.count_tiles(Tile::Box), 4);
        assert_eq!(map.count_tiles(Tile::Goal), 4);
    }

    #[test]
    fn dead_corner_rule_keeps_boxes_out_of_corners() {
        for seed in 0..40 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut map = open_map(6, 6);
            let placed =
                place_entities(&mut rng, &mut map, 2, BoxRule::AvoidDeadCorners).unwrap();
            for &pos in &placed.boxes {
                let corners =
                    [Pos { y: 1, x: 1 }, Pos { y: 1, x: 4 }, Pos { y: 4, x: 1 }, Pos { y: 4, x: 4 }];
                assert!(!corners.contains(&pos));
            }
        }
    }

    #[test]
    fn full_map_stalls_instead_of_spinning() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut map = Map::filled(6, 6, Tile::Wall);
        let err = place_entities(&mut rng, &mut map, 1, BoxRule::Anywhere).unwrap_err();
        assert!(matches!(err, LevelError::GenerationStall { .. }));
    }
}
