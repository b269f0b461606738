use anyhow::Result;
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use sokoban_core::{Direction, Game, Tile, generate_random_level, params_for_difficulty};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 2000)]
    steps: u32,
    #[arg(long, default_value_t = 5)]
    difficulty: u8,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn total_boxes(game: &Game) -> usize {
    game.map().count_tiles(Tile::Box) + game.map().count_tiles(Tile::BoxOnGoal)
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting move fuzz on seed {} for max {} steps...", args.seed, args.steps);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let params = params_for_difficulty(args.difficulty);
    let level = generate_random_level(&mut rng, &params)
        .map_err(|e| anyhow::anyhow!("Level generation failed: {e}"))?;
    let mut game =
        Game::load(&level).map_err(|e| anyhow::anyhow!("Generated level did not load: {e}"))?;

    let box_total = total_boxes(&game);
    for _ in 0..args.steps {
        let moves_before = game.moves();
        if game.moves() > 0 && rng.next_u64() % 8 == 0 {
            game.undo();
            assert!(game.moves() < moves_before, "Invariant failed: undo did not rewind");
        } else {
            game.move_player(choose(&mut rng, &Direction::ALL));
            assert!(game.moves() >= moves_before, "Invariant failed: move counter went back");
        }

        // Assert invariants
        assert_eq!(total_boxes(&game), box_total, "Invariant failed: box count changed");
        assert_eq!(
            game.is_complete(),
            game.map().count_tiles(Tile::Box) == 0,
            "Invariant failed: completion flag out of sync"
        );
        let player_tile = game.map().tile_at(game.player());
        assert!(player_tile.is_player(), "Invariant failed: player marker off its cell");

        if game.is_complete() {
            println!("Level solved after {} moves; reloading.", game.moves());
            game.reload();
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
