use lifebox::{
    Cell, FrameInput, FrameLoop, Game, Host, Key, MouseState, Renderer, SimulationParameters,
    Surface,
};
use std::{collections::VecDeque, io};

const SCREEN: (u32, u32) = (48, 32);
const CELL_SIZE: u32 = 4;

/// Replays scripted frames, then idles; keeps the last presented screen
struct ScriptedHost {
    frames: VecDeque<FrameInput>,
    presented: usize,
    last: Option<Surface>,
}
impl ScriptedHost {
    fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            presented: 0,
            last: None,
        }
    }
}
impl Host for ScriptedHost {
    fn screen_size(&self) -> (u32, u32) {
        SCREEN
    }
    fn poll_input(&mut self) -> io::Result<FrameInput> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
    fn present(&mut self, screen: &Surface) -> io::Result<()> {
        self.presented += 1;
        self.last = Some(screen.clone());
        Ok(())
    }
}

fn setup(params: SimulationParameters) -> (Game, Renderer) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("lifebox=debug")
        .with_test_writer()
        .try_init();

    let game = Game::for_screen(SCREEN.0, SCREEN.1, CELL_SIZE, params, Some(11)).expect("game");
    let renderer = Renderer::new(game.board(), game.cell_size());
    (game, renderer)
}

fn click(cell_x: i32, cell_y: i32) -> FrameInput {
    FrameInput::mouse(MouseState {
        x: cell_x * CELL_SIZE as i32 + 1,
        y: cell_y * CELL_SIZE as i32 + 1,
        left: true,
        ..MouseState::default()
    })
}

#[test]
fn escape_quits_after_presenting_its_frame() {
    let (mut game, mut renderer) = setup(SimulationParameters::default());
    let mut host = ScriptedHost::new([
        FrameInput::default(),
        FrameInput::default(),
        FrameInput::key(Key::Escape),
        FrameInput::default(),
    ]);

    let frames = FrameLoop::new(0)
        .run(&mut host, &mut game, &mut renderer)
        .expect("run");

    assert_eq!(frames, 3);
    assert_eq!(host.presented, 3);
}

#[test]
fn drawn_blinker_oscillates_under_single_steps() {
    let params = SimulationParameters {
        running: false,
        ..SimulationParameters::default()
    };
    let (mut game, mut renderer) = setup(params);
    let mut host = ScriptedHost::new([
        click(5, 4),
        click(6, 4),
        click(7, 4),
        FrameInput::key(Key::Char('s')),
    ]);

    FrameLoop::new(0)
        .max_frames(Some(4))
        .run(&mut host, &mut game, &mut renderer)
        .expect("run");

    let board = game.board();
    assert_eq!(game.params().steps, 1);
    assert!(!game.params().running);
    assert_eq!(board.get(6, 3), Cell::Alive);
    assert_eq!(board.get(6, 5), Cell::Alive);
    assert_eq!(board.get(5, 4), Cell::Dead);
    assert_eq!(board.get(7, 4), Cell::Dead);

    let screen = host.last.expect("presented screen");
    let px = |cx: u32, cy: u32| screen.pixel(cx * CELL_SIZE + 2, cy * CELL_SIZE + 2);
    assert_eq!(px(6, 3), Some(lifebox::render::ALIVE_COLOR));
}

#[test]
fn running_game_steps_on_cadence() {
    let params = SimulationParameters {
        tick_interval: 5,
        ..SimulationParameters::default()
    };
    let (mut game, mut renderer) = setup(params);
    let mut host = ScriptedHost::new([]);

    let frames = FrameLoop::new(0)
        .max_frames(Some(20))
        .run(&mut host, &mut game, &mut renderer)
        .expect("run");

    assert_eq!(frames, 20);
    assert_eq!(game.params().steps, 4);
}

#[test]
fn clear_key_resets_counter_mid_run() {
    let params = SimulationParameters {
        tick_interval: 1,
        ..SimulationParameters::default()
    };
    let (mut game, mut renderer) = setup(params);
    let mut host = ScriptedHost::new([
        FrameInput::key(Key::Char('r')),
        FrameInput::default(),
        FrameInput::key(Key::Char('C')),
    ]);

    FrameLoop::new(0)
        .max_frames(Some(3))
        .run(&mut host, &mut game, &mut renderer)
        .expect("run");

    // the clear frame still steps once afterwards, on an empty board
    assert_eq!(game.params().steps, 1);
    assert_eq!(game.board().count_alive(), 0);
}
