//! Cheap plausibility filter for freshly placed levels.

use crate::state::Map;
use crate::types::{Pos, Tile};

/// Every box needs a goal it can see along an unobstructed row or column,
/// and the player needs such a line to every box. This is a necessary-ish
/// condition only, not a path search: off-axis pairs pass unconditionally
/// and only walls block.
pub(super) fn plausibly_solvable(
    map: &Map,
    player: Pos,
    boxes: &[Pos],
    goals: &[Pos],
) -> bool {
    boxes.iter().all(|&bx| goals.iter().any(|&goal| straight_path_clear(map, bx, goal)))
        && boxes.iter().all(|&bx| straight_path_clear(map, player, bx))
}

fn straight_path_clear(map: &Map, from: Pos, to: Pos) -> bool {
    if from.y == to.y {
        let y = from.y;
        return (from.x.min(to.x) + 1..from.x.max(to.x))
            .all(|x| map.tile_at(Pos { y, x }) != Tile::Wall);
    }
    if from.x == to.x {
        let x = from.x;
        return (from.y.min(to.y) + 1..from.y.max(to.y))
            .all(|y| map.tile_at(Pos { y, x }) != Tile::Wall);
    }
    true
}
