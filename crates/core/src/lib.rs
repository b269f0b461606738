pub mod corpus_file;
pub mod game;
pub mod levelgen;
pub mod state;
pub mod types;

pub use corpus_file::{CorpusFileError, CorpusWriter, LoadedCorpus, load_corpus_from_file};
pub use game::Game;
pub use levelgen::{
    FALLBACK_LEVEL, GenerationParams, Pattern, STARTER_LEVEL, build_corpus, build_skeleton,
    generate_pattern_level, generate_random_level, generate_simple_level, is_dead_corner,
    params_for_difficulty,
};
pub use state::Map;
pub use types::{Direction, LevelError, Pos, Tile};
