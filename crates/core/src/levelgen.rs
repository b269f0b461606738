//! Procedural level generation, split into skeleton patterns, entity
//! placement, a solvability gate, difficulty scaling, and corpus assembly.

pub mod corpus;
pub mod difficulty;
pub mod generator;
pub mod patterns;
pub mod placement;

mod rng;
mod solvability;

pub use corpus::{FALLBACK_LEVEL, STARTER_LEVEL, build_corpus};
pub use difficulty::{GenerationParams, params_for_difficulty};
pub use generator::{generate_pattern_level, generate_random_level, generate_simple_level};
pub use patterns::{Pattern, build_skeleton};
pub use placement::is_dead_corner;
