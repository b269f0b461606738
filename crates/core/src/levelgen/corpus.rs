//! Ordered corpus assembly: preserved levels first, then generated fill.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use super::difficulty::params_for_difficulty;
use super::generator::{generate_pattern_level, generate_simple_level};
use super::patterns::Pattern;

/// Hand-authored opener used when no preserved levels are supplied.
pub const STARTER_LEVEL: &str = "#####\n#@  #\n# $ #\n# . #\n#####";

/// Substitute for any single level whose generation fails.
pub const FALLBACK_LEVEL: &str = "######\n#    #\n# @$ #\n# .  #\n#    #\n######";

const MAX_PRESERVED: usize = 100;
const PATTERNED_SPAN: usize = 100;

/// Builds the ordered level list for one game install: up to 100 preserved
/// levels (or the starter), then generated levels on a difficulty ramp. The
/// early generated span uses the structured pattern path, the rest the fast
/// simple path. Never fails; a stalled generation yields the fallback level.
pub fn build_corpus(seed: u64, target_count: usize, preserved: &[String]) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut levels: Vec<String> =
        preserved.iter().take(MAX_PRESERVED).cloned().collect();
    if levels.is_empty() {
        levels.push(STARTER_LEVEL.to_string());
    }

    let remaining = target_count.saturating_sub(levels.len());
    for index in 0..remaining {
        let difficulty = ramp_difficulty(index, remaining);
        let generated = if index < PATTERNED_SPAN {
            let pattern = Pattern::CYCLE[(index / PATTERNED_SPAN) % Pattern::CYCLE.len()];
            generate_pattern_level(&mut rng, pattern)
        } else {
            let box_count = params_for_difficulty(difficulty).min_boxes;
            generate_simple_level(&mut rng, box_count)
        };
        levels.push(generated.unwrap_or_else(|_| FALLBACK_LEVEL.to_string()));
    }

    levels
}

/// Linear 1..=9 ramp over the generated span.
fn ramp_difficulty(index: usize, remaining: usize) -> u8 {
    if remaining == 0 {
        return 1;
    }
    (1 + index * 9 / remaining) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn fixed_levels_parse() {
        assert!(!Game::load(STARTER_LEVEL).unwrap().is_complete());
        assert!(!Game::load(FALLBACK_LEVEL).unwrap().is_complete());
    }

    #[test]
    fn empty_preserved_gets_the_starter_first() {
        let levels = build_corpus(1, 5, &[]);
        assert_eq!(levels.len(), 5);
        assert_eq!(levels[0], STARTER_LEVEL);
    }

    #[test]
    fn preserved_levels_lead_in_order() {
        let preserved = vec![STARTER_LEVEL.to_string(), FALLBACK_LEVEL.to_string()];
        let levels = build_corpus(2, 6, &preserved);
        assert_eq!(levels.len(), 6);
        assert_eq!(&levels[0..2], preserved.as_slice());
    }

    #[test]
    fn preserved_levels_are_capped_at_one_hundred() {
        let preserved: Vec<String> = (0..120).map(|_| STARTER_LEVEL.to_string()).collect();
        let levels = build_corpus(3, 110, &preserved);
        assert_eq!(levels.len(), 110);
        assert_ne!(levels[100], STARTER_LEVEL);
    }

    #[test]
    fn ramp_spans_one_to_nine() {
        assert_eq!(ramp_difficulty(0, 900), 1);
        assert_eq!(ramp_difficulty(899, 900), 9);
        assert_eq!(ramp_difficulty(450, 900), 5);
        assert_eq!(ramp_difficulty(0, 0), 1);
    }
}
