#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use salvo::{
    cli::{parse_command, Command, HELP},
    init_logging,
    render::{render_board, render_log, render_pool},
    GameEvent, GameStatus, Phase, Session, SessionConfig, Side,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use tokio::sync::mpsc::{self, UnboundedReceiver};
#[cfg(feature = "std")]
use tokio::time::Duration;

/// Two-board salvo combat against a random opponent, with undo.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1000, help = "Delay before the opponent replies, in milliseconds")]
    delay_ms: u64,
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = SessionConfig {
        seed: cli.seed,
        enemy_delay: Duration::from_millis(cli.delay_ms),
    };
    if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<GameEvent>();
    let mut session = Session::new(config);
    session.subscribe(tx);

    println!("{}", HELP);
    show(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}> ", session.phase());
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = execute(&mut session, command).await {
            println!("Error: {}", e);
        }
        drain_events(&mut rx);
        if matches!(
            command,
            Command::Place { .. }
                | Command::AutoPlace
                | Command::Start
                | Command::Target(_)
                | Command::Fire
                | Command::Undo
                | Command::Reset
                | Command::Show
        ) {
            show(&session);
        }
        match session.status() {
            GameStatus::Won => println!("\nVICTORY! You have sunk all enemy ships. Undo or reset to continue."),
            GameStatus::Lost => println!("\nDEFEAT. All your ships have been destroyed. Undo or reset to continue."),
            _ => {}
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn execute(session: &mut Session, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Place {
            kind,
            origin,
            orientation,
        } => {
            session.place_ship(kind, origin, orientation)?;
            if session.fleet().is_complete() {
                println!("Fleet complete. Type start to begin.");
            }
        }
        Command::AutoPlace => {
            let placed = session.auto_place_fleet()?;
            println!("Placed {} ships.", placed);
        }
        Command::Start => session.start()?,
        Command::Target(coord) => {
            let selected = session.toggle_target(coord)?;
            println!("{} {}", coord, if selected { "selected" } else { "deselected" });
        }
        Command::Fire => {
            let report = session.play_round().await?;
            println!("Your shots:\n{}", render_log(&report.player));
            if !report.opponent.is_empty() {
                println!("Opponent shots:\n{}", render_log(&report.opponent));
            }
        }
        Command::Undo => {
            if !session.undo()? {
                println!("Nothing to undo.");
            }
        }
        Command::Reset => session.reset(),
        Command::Show => {}
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

#[cfg(feature = "std")]
fn drain_events(rx: &mut UnboundedReceiver<GameEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            GameEvent::GameStarted => println!("The game has started. Select targets and fire."),
            GameEvent::GameFinished { winner } => println!("Game over, {} wins.", winner),
            GameEvent::GameReset => println!("Game reset."),
            other => log::debug!("event: {:?}", other),
        }
    }
}

#[cfg(feature = "std")]
fn show(session: &Session) {
    let selected: Vec<_> = session.selection().collect();
    println!("\nYour fleet:");
    print!("{}", render_board(session.board(Side::Player), true, &[]));
    if session.phase() != Phase::Placement {
        println!("\nTarget board:");
        print!("{}", render_board(session.board(Side::Opponent), false, &selected));
        println!("{}", render_pool(&session.pool_info()));
    } else {
        println!("Ships left to place: {}", session.fleet().total_remaining());
    }
}
