mod index;

use crate::board::{Board, Cell, count_live_around};
use rayon::prelude::*;

/// Advances a [`Board`] one generation at a time
///
/// The next generation is always computed from an untouched copy of the
/// current one into a scratch buffer, which is then swapped with the board's
/// cells. The scratch buffer is kept between steps so stepping does not allocate.
#[derive(Debug, Default)]
pub struct GameOfLife {
    scratch: Vec<u8>,
    parallel: bool,
}

impl GameOfLife {
    #[inline]
    pub fn new(parallel: bool) -> Self {
        Self {
            scratch: Vec::new(),
            parallel,
        }
    }

    /// Computes the next generation, using rayon if this engine was created parallel
    pub fn step(&mut self, board: &mut Board) {
        if self.parallel {
            self.next_generation_parallel(board);
        } else {
            self.next_generation(board);
        }
    }

    pub fn next_generation(&mut self, board: &mut Board) {
        let (width, height) = (board.width(), board.height());
        self.scratch.resize(board.cells.len(), Cell::Empty.raw());

        for y in 0..height {
            let row = &mut self.scratch[y * width..(y + 1) * width];
            next_row(&board.cells, width, height, y, row);
        }
        std::mem::swap(&mut board.cells, &mut self.scratch);
    }

    pub fn next_generation_parallel(&mut self, board: &mut Board) {
        let (width, height) = (board.width(), board.height());
        if width == 0 || height == 0 {
            return;
        }
        self.scratch.resize(board.cells.len(), Cell::Empty.raw());

        // each row of the output only reads the frozen current generation,
        // so rows can be written independently
        let current = &board.cells;
        self.scratch
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| next_row(current, width, height, y, row));
        std::mem::swap(&mut board.cells, &mut self.scratch);
    }
}

/// Writes the next state of row `y` of `current` into `out`
fn next_row(current: &[u8], width: usize, height: usize, y: usize, out: &mut [u8]) {
    let rules = index::rule_table();
    for (x, next) in out.iter_mut().enumerate() {
        let raw = current[y * width + x];
        *next = match Cell::from_raw(raw) {
            Some(cell) => {
                let neighbors = count_live_around(current, width, height, x, y);
                rules[cell.raw() as usize][neighbors].raw()
            }
            // unknown bytes are carried over for the rasterizer to catch
            None => raw,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pos2;
    use rand::{SeedableRng, rngs::StdRng};

    fn board_from(rows: &[&str]) -> Board {
        let mut board = Board::new(rows[0].len(), rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let cell = match c {
                    'O' => Cell::Alive,
                    'x' => Cell::Dead,
                    _ => Cell::Empty,
                };
                board.set(x, y, cell);
            }
        }
        board
    }

    fn render(board: &Board) -> String {
        let br = Pos2::new(board.width() as i32, board.height() as i32);
        board.window(Pos2::zero(), br).to_string()
    }

    #[test]
    fn blinker_rotates_from_snapshot() {
        let mut board = board_from(&[".....", ".....", ".OOO.", ".....", "....."]);
        GameOfLife::default().next_generation(&mut board);

        assert_eq!(render(&board), ".....\n..O..\n.xOx.\n..O..\n.....");
    }

    #[test]
    fn blinker_returns_with_dead_trail() {
        let mut board = board_from(&[".....", ".....", ".OOO.", ".....", "....."]);
        let mut engine = GameOfLife::default();
        engine.next_generation(&mut board);
        engine.next_generation(&mut board);

        assert_eq!(render(&board), ".....\n..x..\n.OOO.\n..x..\n.....");
    }

    #[test]
    fn block_is_stable() {
        let mut board = board_from(&["....", ".OO.", ".OO.", "...."]);
        let before = board.clone();
        GameOfLife::default().next_generation(&mut board);

        assert_eq!(board, before);
    }

    #[test]
    fn lonely_cell_dies_and_stays_dead() {
        let mut board = board_from(&["...", ".O.", "..."]);
        let mut engine = GameOfLife::default();
        engine.next_generation(&mut board);
        assert_eq!(board.get(1, 1), Cell::Dead);

        for _ in 0..5 {
            engine.next_generation(&mut board);
        }
        assert_eq!(board.get(1, 1), Cell::Dead);
    }

    #[test]
    fn overcrowded_cell_dies() {
        let mut board = board_from(&["OOO", "OO.", "..."]);
        GameOfLife::default().next_generation(&mut board);

        // (1,1) had 4 live neighbors
        assert_eq!(board.get(1, 1), Cell::Dead);
    }

    #[test]
    fn dead_cell_is_reborn_on_three() {
        let mut board = board_from(&["O.O", ".x.", ".O."]);
        GameOfLife::default().next_generation(&mut board);

        assert_eq!(board.get(1, 1), Cell::Alive);
    }

    #[test]
    fn edges_do_not_wrap() {
        // a vertical line on the left edge would give the right edge cells
        // three neighbors if the board wrapped
        let mut board = board_from(&["O...", "O...", "O...", "...."]);
        GameOfLife::default().next_generation(&mut board);

        assert!((0..4).all(|y| board.get(3, y) == Cell::Empty));
    }

    #[test]
    fn invalid_bytes_are_carried_over() {
        let mut board = board_from(&["...", "...", "..."]);
        let idx = board.index(1, 1);
        board.cells[idx] = 9;
        GameOfLife::default().next_generation(&mut board);

        assert_eq!(board.raw(1, 1), 9);
    }

    #[test]
    fn parallel_matches_serial() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut serial = Board::new(37, 23);
        serial.randomize(0.3, &mut rng);
        let mut parallel = serial.clone();

        let mut serial_engine = GameOfLife::new(false);
        let mut parallel_engine = GameOfLife::new(true);
        for generation in 0..12 {
            serial_engine.step(&mut serial);
            parallel_engine.step(&mut parallel);
            assert_eq!(serial, parallel, "generation {generation}");
        }
    }
}
