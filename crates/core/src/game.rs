use xxhash_rust::xxh3::Xxh3;

use crate::state::Map;
use crate::types::{Direction, LevelError, Pos, Tile};

#[derive(Clone, Debug)]
struct Snapshot {
    map: Map,
    player: Pos,
    moves: u32,
}

/// The playable state machine for a single level: movement with box pushing,
/// a snapshot-stack undo, and restart from the original text.
pub struct Game {
    level_text: String,
    map: Map,
    player: Pos,
    moves: u32,
    complete: bool,
    history: Vec<Snapshot>,
}

impl Game {
    pub fn load(level_text: &str) -> Result<Self, LevelError> {
        let (map, player) = Map::parse(level_text)?;
        let complete = map.count_tiles(Tile::Box) == 0;
        Ok(Self {
            level_text: level_text.to_string(),
            map,
            player,
            moves: 0,
            complete,
            history: Vec::new(),
        })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn level_text(&self) -> &str {
        &self.level_text
    }

    /// Attempts one step. Walls, blocked pushes, and moves after completion
    /// are silent no-ops; a successful step records a snapshot first.
    pub fn move_player(&mut self, direction: Direction) {
        if self.complete {
            return;
        }

        let (dy, dx) = direction.delta();
        let target = Pos { y: self.player.y + dy, x: self.player.x + dx };
        let target_tile = self.map.tile_at(target);
        if target_tile == Tile::Wall {
            return;
        }

        if target_tile.is_box() {
            let beyond = Pos { y: target.y + dy, x: target.x + dx };
            let beyond_tile = self.map.tile_at(beyond);
            if beyond_tile == Tile::Wall || beyond_tile.is_box() {
                return;
            }
            self.push_snapshot();
            let pushed =
                if beyond_tile == Tile::Goal { Tile::BoxOnGoal } else { Tile::Box };
            self.map.set_tile(beyond, pushed);
        } else {
            self.push_snapshot();
        }

        let landing = if target_tile == Tile::Goal || target_tile == Tile::BoxOnGoal {
            Tile::PlayerOnGoal
        } else {
            Tile::Player
        };
        let origin = if self.map.tile_at(self.player) == Tile::PlayerOnGoal {
            Tile::Goal
        } else {
            Tile::Floor
        };
        self.map.set_tile(target, landing);
        self.map.set_tile(self.player, origin);
        self.player = target;
        self.moves += 1;
        self.complete = self.map.count_tiles(Tile::Box) == 0;
    }

    /// Restores the state captured before the most recent step, if any.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.pop() else {
            return;
        };
        self.map = snapshot.map;
        self.player = snapshot.player;
        self.moves = snapshot.moves;
        self.complete = self.map.count_tiles(Tile::Box) == 0;
    }

    pub fn reload(&mut self) {
        // Parsed once at load already, so reparsing the same text cannot fail.
        if let Ok(fresh) = Self::load(&self.level_text) {
            *self = fresh;
        }
    }

    fn push_snapshot(&mut self) {
        self.history.push(Snapshot {
            map: self.map.clone(),
            player: self.player,
            moves: self.moves,
        });
    }

    /// Order-insensitive fingerprint of the full visible state, for
    /// determinism checks and the fuzz harness.
    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;

        let mut hasher = Xxh3::new();
        hasher.write(&self.map.canonical_bytes());
        hasher.write_i32(self.player.y);
        hasher.write_i32(self.player.x);
        hasher.write_u32(self.moves);
        hasher.write_u8(u8::from(self.complete));
        hasher.finish()
    }
}
