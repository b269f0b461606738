//! Full-size corpus builds: shape, ordering, and level validity.

use sokoban_core::{Game, STARTER_LEVEL, build_corpus};

#[test]
fn thousand_level_corpus_has_exact_shape() {
    let levels = build_corpus(42, 1000, &[]);
    assert_eq!(levels.len(), 1000);
    assert_eq!(levels[0], STARTER_LEVEL);
}

#[test]
fn every_corpus_level_loads_with_one_player() {
    let levels = build_corpus(42, 300, &[]);
    for (index, level) in levels.iter().enumerate() {
        let game = Game::load(level)
            .unwrap_or_else(|e| panic!("level {index} failed to load: {e}\n{level}"));
        assert!(!game.is_complete(), "level {index} is already solved at load");
    }
}

#[test]
fn preserved_levels_lead_and_are_capped() {
    let preserved: Vec<String> = (0..120)
        .map(|i| format!("######\n#@   #\n# ${} #\n######", if i % 2 == 0 { '.' } else { ' ' }))
        .collect();
    let levels = build_corpus(9, 400, &preserved);
    assert_eq!(levels.len(), 400);
    assert_eq!(&levels[..100], &preserved[..100]);
    assert_ne!(levels[100], preserved[100]);
}

#[test]
fn target_below_preserved_count_returns_just_the_preserved() {
    let preserved: Vec<String> = (0..30).map(|_| STARTER_LEVEL.to_string()).collect();
    let levels = build_corpus(9, 10, &preserved);
    assert_eq!(levels.len(), 30);
}
