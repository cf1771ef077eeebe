//! Headless gesture replay.

use clap::Parser;
use inkboard_app::{Replay, ReplayError, load_script};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "inkboard-replay", about = "Replay a whiteboard gesture script")]
struct Cli {
    /// Script to replay (JSON).
    script: PathBuf,

    /// Write the final frame as SVG.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the final board as JSON.
    #[arg(long)]
    board: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<(), ReplayError> {
    let script = load_script(&cli.script)?;
    log::info!("Loaded {} steps from {}", script.steps.len(), cli.script.display());
    let replay = Replay::run(&script)?;

    if let Some(path) = &cli.svg {
        replay.write_svg(path)?;
        log::info!("Wrote frame to {}", path.display());
    }
    if let Some(path) = &cli.board {
        replay.write_board(path)?;
        log::info!("Wrote board to {}", path.display());
    }
    if cli.svg.is_none() && cli.board.is_none() {
        println!("{}", replay.board_json()?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("inkboard-replay: {err}");
            ExitCode::FAILURE
        }
    }
}
