use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, SeedableRng};
use salvo::{Coord, GameStatus, Session, SessionConfig, Side};
use serde_json::json;

const MAX_ROUNDS: usize = 200;

/// Seeded self-play: the player places and targets at random too.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <session-seed> <player-seed>", args[0]);
        std::process::exit(1);
    }
    let session_seed: u64 = args[1].parse()?;
    let player_seed: u64 = args[2].parse()?;

    salvo::init_logging();
    let mut session = Session::new(SessionConfig::seeded(session_seed));
    let mut rng = SmallRng::seed_from_u64(player_seed);

    session.auto_place_fleet()?;
    session.start()?;

    let mut rounds = 0;
    while session.status() == GameStatus::InProgress {
        if rounds >= MAX_ROUNDS {
            anyhow::bail!("game did not finish within {} rounds", MAX_ROUNDS);
        }
        rounds += 1;
        let mut open: Vec<Coord> = session.board(Side::Opponent).unshot_cells().collect();
        open.shuffle(&mut rng);
        open.truncate(session.pool_info().available);
        for coord in open {
            session.toggle_target(coord)?;
        }
        session.play_round().await?;
    }

    let winner = match session.status() {
        GameStatus::Won => Some("player"),
        GameStatus::Lost => Some("opponent"),
        _ => None,
    };
    let result = json!({
        "winner": winner,
        "rounds": rounds,
        "player_shots": session.engine().player_log().len(),
        "opponent_shots": session.engine().opponent_log().len(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
