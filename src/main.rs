use anyhow::{Context, Result};
use lifebox::{FrameLoop, Game, GameOfLife, Host, PatternCodec, Renderer, RunLengthEncoded};
use std::{fs, sync::Mutex};
use tracing::{error, info};

mod console;
mod options;

fn init_tracing(path: &str) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create log file {path}"))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lifebox=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!("install tracing subscriber: {err}"))
}

/// Fills the board from the fill option, then stamps the input pattern on top
fn seed_board(args: &options::Args, game: &mut Game) -> Result<()> {
    let fill = args.fill_mode()?;
    let (board, rng) = game.parts_mut();
    fill.fill(board, rng);

    if let Some(file_name) = args.input_file() {
        let encoded = fs::read_to_string(&file_name)
            .with_context(|| format!("read pattern {file_name}"))?;
        let pattern = RunLengthEncoded::default().decode(&encoded)?;
        let origin = pattern.centered_on(game.board());
        let placed = game.board_mut().stamp(origin, &pattern.alive);
        info!(
            file = %file_name,
            name = pattern.name.as_deref().unwrap_or(""),
            cells = pattern.alive.len(),
            placed,
            "loaded pattern"
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };
    if let Some(path) = args.log_file() {
        init_tracing(&path)?;
    }

    let frame_loop = FrameLoop::new(args.frame_rate()?).max_frames(args.frames()?);
    let (cell_size, params, seed) = (args.cell_size()?, args.params()?, args.seed()?);

    let mut host = console::ConsoleHost::new()?;
    let (width, height) = host.screen_size();
    let mut game = Game::for_screen(width, height, cell_size, params, seed)?
        .with_engine(GameOfLife::new(args.multithreading()));
    seed_board(&args, &mut game)?;
    let mut renderer = Renderer::new(game.board(), game.cell_size());

    let outcome = frame_loop.run(&mut host, &mut game, &mut renderer);
    // restore the terminal before reporting anything
    std::mem::drop(host);

    if let Err(err) = outcome {
        error!(%err, "frame loop aborted");
        return Err(err.into());
    }

    if let Some(file_name) = args.output_file() {
        let encoder = RunLengthEncoded::default().set_name("lifebox generated pattern");
        let encoded = encoder.encode(game.board());
        fs::write(&file_name, encoded).with_context(|| format!("write pattern {file_name}"))?;
        info!(file = %file_name, alive = game.board().count_alive(), "saved board");
    }

    Ok(())
}
