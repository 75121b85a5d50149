use crate::{
    Pos2,
    board::{Board, Cell},
    engine::GameOfLife,
    error::{Error, Result},
    input::{Action, FrameInput, key_action, mouse_paint},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

/// Frames between automatic generations at startup
pub const DEFAULT_TICK_INTERVAL: u32 = 20;
/// How far one arrow press moves the tick interval
pub const TICK_INTERVAL_STEP: u32 = 4;
/// Chance of a cell being alive after a randomize
pub const RANDOM_FILL_PROBABILITY: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationParameters {
    /// Frames between automatic generations, never below 1
    pub tick_interval: u32,
    pub running: bool,
    /// Generations computed since start or the last clear
    pub steps: u64,
    pub show_grid: bool,
}
impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            running: true,
            steps: 0,
            show_grid: true,
        }
    }
}

/// What the frame loop should do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Stop once the current frame has been rendered
    Quit,
}

/// The simulation context: board, parameters and everything that mutates them
pub struct Game {
    board: Board,
    params: SimulationParameters,
    engine: GameOfLife,
    rng: StdRng,
    cell_size: u32,
    frame: u64,
}

impl Game {
    pub fn new(board: Board, params: SimulationParameters, cell_size: u32, rng: StdRng) -> Self {
        Self {
            board,
            params,
            engine: GameOfLife::default(),
            rng,
            cell_size: cell_size.max(1),
            frame: 0,
        }
    }

    /// Sizes the board to fit a `width` x `height` pixel screen
    pub fn for_screen(
        width: u32,
        height: u32,
        cell_size: u32,
        params: SimulationParameters,
        seed: Option<u64>,
    ) -> Result<Self> {
        let cell_size = cell_size.max(1);
        let (cells_x, cells_y) = (width / cell_size, height / cell_size);
        if cells_x == 0 || cells_y == 0 {
            return Err(Error::ScreenTooSmall {
                width,
                height,
                cell_size,
            });
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(width, height, cell_size, cells_x, cells_y, "sized board to screen");
        Ok(Self::new(
            Board::new(cells_x as usize, cells_y as usize),
            params,
            cell_size,
            rng,
        ))
    }

    pub fn with_engine(mut self, engine: GameOfLife) -> Self {
        self.engine = engine;
        self
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
    #[inline]
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }
    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
    /// Frames updated so far
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }
    /// The board together with the game's random generator, for seeding
    #[inline]
    pub fn parts_mut(&mut self) -> (&mut Board, &mut StdRng) {
        (&mut self.board, &mut self.rng)
    }

    /// The board cell under a screen pixel (possibly off the board)
    #[inline]
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Pos2 {
        Pos2::from_pixel(x, y, self.cell_size)
    }

    /// Runs the update phase of one frame
    ///
    /// Applies the key action, clamps the tick interval, paints under the
    /// mouse, then advances a generation if running and the frame counter
    /// is a multiple of the tick interval.
    pub fn update(&mut self, input: &FrameInput) -> Control {
        let mut control = Control::Continue;
        if let Some(action) = input.key.and_then(key_action) {
            control = self.apply(action);
        }
        self.params.tick_interval = self.params.tick_interval.max(1);

        if let Some(cell) = mouse_paint(&input.mouse) {
            let pos = self.cell_at_pixel(input.mouse.x, input.mouse.y);
            self.board.set_at(pos, cell);
        }

        if self.params.running && self.frame % self.params.tick_interval as u64 == 0 {
            self.step();
        }
        self.frame += 1;
        control
    }

    pub fn apply(&mut self, action: Action) -> Control {
        match action {
            Action::Quit => {
                info!(frame = self.frame, "quit requested");
                return Control::Quit;
            }
            Action::ShortenInterval => {
                self.params.tick_interval = self
                    .params
                    .tick_interval
                    .saturating_sub(TICK_INTERVAL_STEP)
                    .max(1);
                debug!(tick_interval = self.params.tick_interval, "tick interval changed");
            }
            Action::LengthenInterval => {
                self.params.tick_interval = self
                    .params
                    .tick_interval
                    .saturating_add(TICK_INTERVAL_STEP);
                debug!(tick_interval = self.params.tick_interval, "tick interval changed");
            }
            Action::ToggleRunning => {
                self.params.running = !self.params.running;
                debug!(running = self.params.running, "toggled running");
            }
            Action::Clear => self.clear(),
            Action::ToggleGrid => {
                self.params.show_grid = !self.params.show_grid;
                debug!(show_grid = self.params.show_grid, "toggled grid");
            }
            Action::Randomize => self.randomize(RANDOM_FILL_PROBABILITY),
            Action::SingleStep => {
                self.params.running = false;
                self.step();
            }
        }
        Control::Continue
    }

    /// Advances exactly one generation, regardless of running state or cadence
    pub fn step(&mut self) {
        self.engine.step(&mut self.board);
        self.params.steps += 1;
    }

    /// Empties the board and resets the step counter
    pub fn clear(&mut self) {
        self.board.clear();
        self.params.steps = 0;
        info!("cleared board");
    }

    pub fn randomize(&mut self, probability: f64) {
        self.board.randomize(probability, &mut self.rng);
        info!(alive = self.board.count_alive(), "randomized board");
    }

    /// Live neighbor count of a board position, or `None` if it is off the board
    pub fn live_neighbors_at(&self, pos: Pos2) -> Option<usize> {
        self.board
            .contains(pos)
            .then(|| self.board.live_neighbors(pos.x as usize, pos.y as usize))
    }

    /// Paints `cell` at `pos`; off-board positions are ignored
    #[inline]
    pub fn paint(&mut self, pos: Pos2, cell: Cell) -> bool {
        self.board.set_at(pos, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, MouseState};

    const CELL: u32 = 8;

    fn game(params: SimulationParameters) -> Game {
        Game::for_screen(80, 80, CELL, params, Some(42)).expect("game")
    }

    fn paused() -> SimulationParameters {
        SimulationParameters {
            running: false,
            ..SimulationParameters::default()
        }
    }

    fn seed_blinker(game: &mut Game) {
        for x in 3..6 {
            game.paint(Pos2::new(x, 4), Cell::Alive);
        }
    }

    fn press(game: &mut Game, key: Key) -> Control {
        game.update(&FrameInput::key(key))
    }

    #[test]
    fn step_counter_starts_at_zero() {
        let mut game = game(SimulationParameters::default());
        assert_eq!(game.params().steps, 0);

        // the first update lands on the cadence and steps once
        game.update(&FrameInput::default());
        assert_eq!(game.params().steps, 1);
    }

    #[test]
    fn board_fits_screen() {
        let game = Game::for_screen(640, 480, 8, SimulationParameters::default(), Some(1))
            .expect("game");

        assert_eq!((game.board().width(), game.board().height()), (80, 60));
    }

    #[test]
    fn tiny_screen_is_rejected() {
        let result = Game::for_screen(7, 80, 8, SimulationParameters::default(), Some(1));

        assert!(matches!(result, Err(Error::ScreenTooSmall { .. })));
    }

    #[test]
    fn interval_never_drops_below_one() {
        let mut game = game(paused());
        for _ in 0..20 {
            press(&mut game, Key::Left);
        }
        assert_eq!(game.params().tick_interval, 1);

        press(&mut game, Key::Right);
        assert_eq!(game.params().tick_interval, 1 + TICK_INTERVAL_STEP);
    }

    #[test]
    fn zero_interval_is_clamped_on_update() {
        let mut game = game(SimulationParameters {
            tick_interval: 0,
            ..paused()
        });
        game.update(&FrameInput::default());

        assert_eq!(game.params().tick_interval, 1);
    }

    #[test]
    fn single_step_pauses_and_steps_once() {
        for frame_phase in 0..3 {
            let mut game = game(SimulationParameters {
                tick_interval: 1,
                ..SimulationParameters::default()
            });
            // move the frame counter off phase with the game paused
            game.params.running = false;
            for _ in 0..frame_phase {
                game.update(&FrameInput::default());
            }
            game.params.running = true;
            let before = game.params().steps;

            press(&mut game, Key::Char('s'));

            assert!(!game.params().running);
            assert_eq!(game.params().steps, before + 1, "phase {frame_phase}");
        }
    }

    #[test]
    fn single_step_works_while_paused() {
        let mut game = game(paused());
        seed_blinker(&mut game);
        press(&mut game, Key::Char('S'));

        assert_eq!(game.params().steps, 1);
        assert_eq!(game.board().get(4, 3), Cell::Alive);
        assert_eq!(game.board().get(3, 4), Cell::Dead);
    }

    #[test]
    fn steps_follow_tick_interval() {
        let mut game = game(SimulationParameters {
            tick_interval: 4,
            ..SimulationParameters::default()
        });
        for _ in 0..9 {
            game.update(&FrameInput::default());
        }

        // frames 0, 4 and 8
        assert_eq!(game.params().steps, 3);
        assert_eq!(game.frame(), 9);
    }

    #[test]
    fn paused_game_does_not_step() {
        let mut game = game(paused());
        for _ in 0..50 {
            game.update(&FrameInput::default());
        }

        assert_eq!(game.params().steps, 0);
    }

    #[test]
    fn space_toggles_running() {
        let mut game = game(SimulationParameters::default());
        press(&mut game, Key::Space);
        assert!(!game.params().running);
        press(&mut game, Key::Space);
        assert!(game.params().running);
    }

    #[test]
    fn clear_resets_board_and_steps() {
        let mut game = game(paused());
        seed_blinker(&mut game);
        game.step();
        game.step();
        press(&mut game, Key::Char('c'));

        assert_eq!(game.board().count_alive(), 0);
        assert_eq!(game.params().steps, 0);
    }

    #[test]
    fn grid_toggles() {
        let mut game = game(paused());
        press(&mut game, Key::Char('g'));
        assert!(!game.params().show_grid);
        press(&mut game, Key::Char('g'));
        assert!(game.params().show_grid);
    }

    #[test]
    fn randomize_fills_some_cells() {
        let mut game = game(paused());
        press(&mut game, Key::Char('r'));

        let alive = game.board().count_alive();
        assert!(alive > 0 && alive < 100, "{alive} of 100 cells alive");
    }

    #[test]
    fn escape_requests_quit() {
        let mut game = game(paused());

        assert_eq!(press(&mut game, Key::Escape), Control::Quit);
        assert_eq!(press(&mut game, Key::Other), Control::Continue);
    }

    #[test]
    fn mouse_paints_and_erases() {
        let mut game = game(paused());
        let mut mouse = MouseState {
            x: 19,
            y: 33,
            left: true,
            ..MouseState::default()
        };
        game.update(&FrameInput::mouse(mouse));
        assert_eq!(game.board().get(2, 4), Cell::Alive);

        mouse.left = false;
        mouse.right = true;
        game.update(&FrameInput::mouse(mouse));
        assert_eq!(game.board().get(2, 4), Cell::Empty);
    }

    #[test]
    fn mouse_off_board_is_ignored() {
        let mut game = game(paused());
        for (x, y) in [(-1, 4), (80, 4), (4, 80), (500, -20)] {
            let mouse = MouseState {
                x,
                y,
                left: true,
                ..MouseState::default()
            };
            game.update(&FrameInput::mouse(mouse));
        }

        assert_eq!(game.board().count_alive(), 0);
    }

    #[test]
    fn hovered_neighbor_count() {
        let mut game = game(paused());
        seed_blinker(&mut game);

        assert_eq!(game.live_neighbors_at(Pos2::new(4, 3)), Some(3));
        assert_eq!(game.live_neighbors_at(Pos2::new(4, 4)), Some(2));
        assert_eq!(game.live_neighbors_at(Pos2::new(10, 4)), None);
    }
}
