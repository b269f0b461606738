//! Level construction paths: filtered random, patterned, and fast simple.

use rand_chacha::ChaCha8Rng;

use super::difficulty::GenerationParams;
use super::patterns::{Pattern, build_skeleton};
use super::placement::{BoxRule, place_entities};
use super::rng::roll;
use super::solvability::plausibly_solvable;
use crate::state::Map;
use crate::types::{LevelError, Pos, Tile};

const MAX_LEVEL_ATTEMPTS: u32 = 64;

/// Open-field level with scattered interior walls, sized and filled per the
/// difficulty params, gated on the line-of-sight filter. Retries with a
/// fresh layout until the attempt budget runs out.
pub fn generate_random_level(
    rng: &mut ChaCha8Rng,
    params: &GenerationParams,
) -> Result<String, LevelError> {
    for _ in 0..MAX_LEVEL_ATTEMPTS {
        let width = roll(rng, params.min_width, params.max_width);
        let height = roll(rng, params.min_height, params.max_height);

        let mut map = Map::new(width, height);
        map.stamp_boundary_walls();
        let walls_percent = roll(rng, params.min_walls_percent, params.max_walls_percent);
        let wall_count = (width - 2) * (height - 2) * walls_percent / 100;
        scatter_walls(rng, &mut map, wall_count);

        let box_count = roll(rng, params.min_boxes, params.max_boxes);
        let Ok(placed) = place_entities(rng, &mut map, box_count, BoxRule::AvoidDeadCorners)
        else {
            continue;
        };
        if plausibly_solvable(&map, placed.player, &placed.boxes, &placed.goals) {
            return Ok(map.to_text());
        }
    }
    Err(LevelError::GenerationStall { stage: "random level", attempts: MAX_LEVEL_ATTEMPTS })
}

/// Structured level from one of the four skeleton patterns, with the same
/// placement rules and solvability gate as the random path.
pub fn generate_pattern_level(
    rng: &mut ChaCha8Rng,
    pattern: Pattern,
) -> Result<String, LevelError> {
    for _ in 0..MAX_LEVEL_ATTEMPTS {
        let (width, height, box_count) = pattern_dimensions(rng, pattern);
        let mut map = build_skeleton(rng, pattern, width, height);
        let Ok(placed) = place_entities(rng, &mut map, box_count, BoxRule::AvoidDeadCorners)
        else {
            continue;
        };
        if plausibly_solvable(&map, placed.player, &placed.boxes, &placed.goals) {
            return Ok(map.to_text());
        }
    }
    Err(LevelError::GenerationStall { stage: "pattern level", attempts: MAX_LEVEL_ATTEMPTS })
}

fn pattern_dimensions(rng: &mut ChaCha8Rng, pattern: Pattern) -> (usize, usize, usize) {
    match pattern {
        Pattern::Spiral => (roll(rng, 11, 15), roll(rng, 11, 15), roll(rng, 3, 6)),
        Pattern::Maze => (roll(rng, 11, 17), roll(rng, 11, 17), roll(rng, 3, 5)),
        Pattern::Symmetrical => (roll(rng, 9, 15), roll(rng, 9, 15), roll(rng, 4, 8)),
        Pattern::Rooms => (roll(rng, 11, 17), roll(rng, 11, 17), roll(rng, 4, 7)),
    }
}

/// Small open level with light wall scatter and no placement filters. Used
/// for corpus bulk where throughput beats quality.
pub fn generate_simple_level(
    rng: &mut ChaCha8Rng,
    box_count: usize,
) -> Result<String, LevelError> {
    let width = roll(rng, 8, 12);
    let height = roll(rng, 8, 12);

    let mut map = Map::new(width, height);
    map.stamp_boundary_walls();
    scatter_walls(rng, &mut map, width * height / 10);

    place_entities(rng, &mut map, box_count, BoxRule::Anywhere)?;
    Ok(map.to_text())
}

/// Random interior wall scatter; repeats may hit the same cell, so the
/// resulting wall count is at most `wall_count`.
fn scatter_walls(rng: &mut ChaCha8Rng, map: &mut Map, wall_count: usize) {
    for _ in 0..wall_count {
        let pos = Pos {
            y: roll(rng, 1, map.height - 2) as i32,
            x: roll(rng, 1, map.width - 2) as i32,
        };
        map.set_tile(pos, Tile::Wall);
    }
}
