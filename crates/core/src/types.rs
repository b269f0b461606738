use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// One cell of the board. Goal presence and occupant are fused into a single
/// value, which is also the contract of the text serialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Floor,
    Wall,
    Goal,
    Box,
    BoxOnGoal,
    Player,
    PlayerOnGoal,
}

impl Tile {
    pub fn to_char(self) -> char {
        match self {
            Tile::Floor => ' ',
            Tile::Wall => '#',
            Tile::Goal => '.',
            Tile::Box => '$',
            Tile::BoxOnGoal => '*',
            Tile::Player => '@',
            Tile::PlayerOnGoal => '+',
        }
    }

    pub fn from_char(character: char) -> Option<Self> {
        match character {
            ' ' => Some(Tile::Floor),
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Goal),
            '$' => Some(Tile::Box),
            '*' => Some(Tile::BoxOnGoal),
            '@' => Some(Tile::Player),
            '+' => Some(Tile::PlayerOnGoal),
            _ => None,
        }
    }

    pub fn is_box(self) -> bool {
        matches!(self, Tile::Box | Tile::BoxOnGoal)
    }

    pub fn is_player(self) -> bool {
        matches!(self, Tile::Player | Tile::PlayerOnGoal)
    }

    pub fn has_goal(self) -> bool {
        matches!(self, Tile::Goal | Tile::BoxOnGoal | Tile::PlayerOnGoal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step as `(dy, dx)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// Level text is empty, has an unknown character, or the player marker is
    /// missing or duplicated.
    MalformedLevel { reason: String },
    /// A bounded generation loop exhausted its attempt budget.
    GenerationStall { stage: &'static str, attempts: u32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLevel { reason } => write!(f, "malformed level: {reason}"),
            Self::GenerationStall { stage, attempts } => {
                write!(f, "level generation stalled at {stage} after {attempts} attempts")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_chars_round_trip() {
        for tile in [
            Tile::Floor,
            Tile::Wall,
            Tile::Goal,
            Tile::Box,
            Tile::BoxOnGoal,
            Tile::Player,
            Tile::PlayerOnGoal,
        ] {
            assert_eq!(Tile::from_char(tile.to_char()), Some(tile));
        }
        assert_eq!(Tile::from_char('x'), None);
    }

    #[test]
    fn direction_deltas_are_unit_steps() {
        for direction in Direction::ALL {
            let (dy, dx) = direction.delta();
            assert_eq!(dy.abs() + dx.abs(), 1);
        }
    }
}
