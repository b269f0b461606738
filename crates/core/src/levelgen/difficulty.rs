//! Difficulty-to-parameter mapping for the random level path.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationParams {
    pub min_boxes: usize,
    pub max_boxes: usize,
    pub min_walls_percent: usize,
    pub max_walls_percent: usize,
    pub min_width: usize,
    pub max_width: usize,
    pub min_height: usize,
    pub max_height: usize,
}

/// Pure mapping from a 1..=10 difficulty (clamped) to generation ranges.
/// Boxes, wall density, and map size all grow with difficulty up to fixed
/// caps.
pub fn params_for_difficulty(difficulty: u8) -> GenerationParams {
    let d = difficulty.clamp(1, 10) as usize;
    GenerationParams {
        min_boxes: (3 + d / 2).min(7),
        max_boxes: (4 + d / 2).min(12),
        min_walls_percent: (15 + d).min(30),
        max_walls_percent: (20 + d).min(40),
        min_width: (8 + d / 3).min(12),
        max_width: (10 + d / 2).min(20),
        min_height: (8 + d / 3).min(12),
        max_height: (10 + d / 2).min(20),
    }
}
