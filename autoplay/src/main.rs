use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::prelude::*;
use sweeper_core::{Difficulty, GameState, Msg};

use player::Player;
use report::{Ending, GameRecord, Report};

mod player;
mod report;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

/// Plays seeded games against the rules engine and reports how they went.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Board preset to play on
    #[arg(short, long, value_enum, default_value_t = Level::Easy)]
    difficulty: Level,

    /// How many games to play
    #[arg(short = 'n', long, default_value_t = 100)]
    games: u32,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let difficulty = Difficulty::from(args.difficulty);
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Playing {} {} games, seed {}", args.games, difficulty, seed);

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut report = Report::new(difficulty, seed);
    for game in 0..args.games {
        let record = play(difficulty, &mut rng)?;
        log::debug!("Game {} ended {:?} after {} moves", game, record.ending, record.moves);
        report.record(&record);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

/// Drives one game to the end, answering generation requests from `rng`.
fn play(difficulty: Difficulty, rng: &mut SmallRng) -> anyhow::Result<GameRecord> {
    let config = difficulty.config();
    let max_moves = 2 * u32::from(config.total_cells());

    let mut player = Player::new(rng.random());
    let mut state = GameState::from_difficulty(difficulty);
    let mut moves = 0;
    let mut generation_attempts = 0;

    while let Some(msg) = player.next_move(&state) {
        if moves >= max_moves {
            log::warn!("Giving up after {} moves", moves);
            return Ok(GameRecord {
                ending: Ending::Stalled,
                moves,
                generation_attempts,
            });
        }
        moves += 1;

        let mut transition = state.update(msg);
        while let Some(request) = transition.request.take() {
            generation_attempts = generation_attempts.max(request.attempt);
            let response = request.run(rng.random())?;
            transition = transition.state.update(Msg::Generated(response));
        }
        state = transition.state;
    }

    let ending = match state {
        GameState::Completed(_) => Ending::Won,
        _ => Ending::Lost,
    };
    Ok(GameRecord {
        ending,
        moves,
        generation_attempts,
    })
}
