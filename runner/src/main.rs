mod broadcaster;
mod commands;
mod config;

use std::path::PathBuf;

use clap::Parser;
use common::games::SystemClock;
use common::games::snake::{SessionCommand, SnakeSession, SnakeSessionState};
use common::records::{
    FileRecordLog, GameRecord, RecordLog, format_record_line, high_score, recent_records,
};
use common::{log, logger};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use broadcaster::LogBroadcaster;
use commands::{InputCommand, parse_command};
use config::{RunnerConfig, get_config_manager};

#[derive(Parser)]
#[command(name = "snake_runner")]
struct Args {
    /// YAML config file; defaults to snake_runner_config.yaml next to the binary
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    use_log_prefix: bool,
    /// Print the high score and recent games, then exit
    #[arg(long)]
    history: bool,
}

type StdinLines = Lines<BufReader<Stdin>>;

enum GameEnd {
    Finished(Option<GameRecord>),
    Quit(Option<GameRecord>),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = get_config_manager(args.config).get_or_create_config()?;
    let record_log = FileRecordLog::new(&config.records.path);

    if args.history {
        print_history(&record_log, config.records.recent_count);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let session_state =
        SnakeSessionState::create("local", config.game.clone(), SystemClock::new(), seed)?;
    log!(
        "Snake {}x{} (seed {}). Commands: w/a/s/d or up/down/left/right, p(ause), r(esume), reset, q(uit)",
        config.game.field_width,
        config.game.field_height,
        seed
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let end = play_one_game(&session_state, &mut lines).await;
        let (GameEnd::Finished(record) | GameEnd::Quit(record)) = &end;

        if let Some(record) = record {
            save_record(&record_log, &config, record);
        }
        if matches!(end, GameEnd::Quit(_)) {
            break;
        }

        log!("Type reset to play again or q to quit");
        if !wait_for_restart(&mut lines).await {
            break;
        }
        SnakeSession::handle_command(&session_state, SessionCommand::Reset).await;
    }

    log!("Bye");
    Ok(())
}

async fn play_one_game(session_state: &SnakeSessionState, lines: &mut StdinLines) -> GameEnd {
    SnakeSession::handle_command(session_state, SessionCommand::Start).await;
    let mut game_handle = tokio::spawn(SnakeSession::run(
        session_state.clone(),
        LogBroadcaster::new(),
    ));
    let mut quit_requested = false;

    loop {
        tokio::select! {
            result = &mut game_handle => {
                let record = match result {
                    Ok(record) => Some(record),
                    Err(e) => {
                        log!("Game task failed: {}", e);
                        None
                    }
                };
                return if quit_requested {
                    GameEnd::Quit(record)
                } else {
                    GameEnd::Finished(record)
                };
            }
            line = lines.next_line(), if !quit_requested => {
                let command = match line {
                    Ok(Some(line)) => match parse_command(&line) {
                        Some(command) => command,
                        None => {
                            log!("Unknown command: {}", line.trim());
                            continue;
                        }
                    },
                    Ok(None) => InputCommand::Quit,
                    Err(e) => {
                        log!("Failed to read stdin: {}", e);
                        InputCommand::Quit
                    }
                };

                match command {
                    InputCommand::Quit => {
                        quit_requested = true;
                        SnakeSession::handle_command(session_state, SessionCommand::Stop).await;
                    }
                    InputCommand::Session(SessionCommand::Reset) => {
                        SnakeSession::handle_command(session_state, SessionCommand::Reset).await;
                        SnakeSession::handle_command(session_state, SessionCommand::Start).await;
                    }
                    InputCommand::Session(command) => {
                        SnakeSession::handle_command(session_state, command).await;
                    }
                }
            }
        }
    }
}

async fn wait_for_restart(lines: &mut StdinLines) -> bool {
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_command(&line) {
                Some(InputCommand::Session(SessionCommand::Reset | SessionCommand::Start)) => {
                    return true;
                }
                Some(InputCommand::Quit) => return false,
                _ => log!("Type reset to play again or q to quit"),
            },
            Ok(None) => return false,
            Err(e) => {
                log!("Failed to read stdin: {}", e);
                return false;
            }
        }
    }
}

fn save_record(record_log: &FileRecordLog, config: &RunnerConfig, record: &GameRecord) {
    if !config.records.save {
        return;
    }
    if let Err(e) = record_log.append(record) {
        log!("Failed to save record to {}: {}", record_log.path().display(), e);
        return;
    }
    match high_score(record_log) {
        Ok(best) => log!("Record saved. High score: {}", best),
        Err(e) => log!("Failed to read records: {}", e),
    }
}

fn print_history(record_log: &FileRecordLog, count: usize) {
    let best = match high_score(record_log) {
        Ok(best) => best,
        Err(e) => {
            log!("Failed to read records from {}: {}", record_log.path().display(), e);
            return;
        }
    };
    println!("High score: {}", best);

    match recent_records(record_log, count) {
        Ok(entries) if entries.is_empty() => println!("No games recorded yet"),
        Ok(entries) => {
            println!("Recent games:");
            for entry in entries {
                println!("  {}", format_record_line(&entry.timestamp, &entry.record));
            }
        }
        Err(e) => log!("Failed to read records: {}", e),
    }
}
