use crate::types::{LevelError, Pos, Tile};

/// Row-major tile grid with the text serialization used by every level on
/// disk and in the corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Map {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Tile::Floor)
    }

    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    /// Overwrites the outer ring with walls. Callers guarantee w, h >= 2.
    pub fn stamp_boundary_walls(&mut self) {
        for x in 0..self.width {
            self.set_tile(Pos { y: 0, x: x as i32 }, Tile::Wall);
            self.set_tile(Pos { y: (self.height - 1) as i32, x: x as i32 }, Tile::Wall);
        }
        for y in 0..self.height {
            self.set_tile(Pos { y: y as i32, x: 0 }, Tile::Wall);
            self.set_tile(Pos { y: y as i32, x: (self.width - 1) as i32 }, Tile::Wall);
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds cells read as walls so movement and carving code never
    /// needs a separate boundary branch.
    pub fn tile_at(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Wall;
        }
        self.tiles[pos.y as usize * self.width + pos.x as usize]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if self.in_bounds(pos) {
            self.tiles[pos.y as usize * self.width + pos.x as usize] = tile;
        }
    }

    pub fn count_tiles(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.tiles.len() + self.height);
        for y in 0..self.height {
            if y > 0 {
                text.push('\n');
            }
            for x in 0..self.width {
                text.push(self.tiles[y * self.width + x].to_char());
            }
        }
        text
    }

    /// Parses level text into a map plus the single player position. Rows
    /// shorter than the widest row are right-padded with floor.
    pub fn parse(text: &str) -> Result<(Self, Pos), LevelError> {
        let trimmed = text.trim_matches(['\r', '\n']);
        if trimmed.is_empty() {
            return Err(LevelError::MalformedLevel { reason: "empty level text".to_string() });
        }

        let rows: Vec<&str> = trimmed.lines().collect();
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);

        let mut tiles = Vec::with_capacity(width * height);
        let mut player = None;
        for (y, row) in rows.iter().enumerate() {
            let mut chars = row.chars();
            for x in 0..width {
                let character = chars.next().unwrap_or(' ');
                let tile = Tile::from_char(character).ok_or_else(|| {
                    LevelError::MalformedLevel {
                        reason: format!("unknown tile character {character:?}"),
                    }
                })?;
                if tile.is_player() {
                    if player.is_some() {
                        return Err(LevelError::MalformedLevel {
                            reason: "more than one player marker".to_string(),
                        });
                    }
                    player = Some(Pos { y: y as i32, x: x as i32 });
                }
                tiles.push(tile);
            }
        }

        let player = player.ok_or_else(|| LevelError::MalformedLevel {
            reason: "missing player marker".to_string(),
        })?;
        Ok((Self { width, height, tiles }, player))
    }

    /// Stable byte encoding of the grid for fingerprinting.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend_from_slice(&(self.width as u32).to_le_bytes());
        bytes.extend_from_slice(&(self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(*tile as u8);
        }
        bytes
    }
}
