mod window;

pub use self::window::BoardWindow;
use crate::Pos2;
use rand::Rng;

/// The state of a single cell
///
/// [`Cell::Dead`] marks a cell that was alive and died. It is only a visual
/// tint; the rules treat it exactly like [`Cell::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Alive = 1,
    Dead = 2,
}
impl Cell {
    pub const COUNT: usize = 3;
    pub const ALL: [Cell; Self::COUNT] = [Cell::Empty, Cell::Alive, Cell::Dead];

    /// Decodes a stored byte, returning [`None`] for bytes outside the three states
    #[inline]
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Empty),
            1 => Some(Self::Alive),
            2 => Some(Self::Dead),
            _ => None,
        }
    }
    #[inline]
    pub fn raw(self) -> u8 {
        self as u8
    }
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }
}

/// A fixed-size grid of cells, stored row-major as packed bytes
///
/// The board never wraps: cells past an edge simply do not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    pub(crate) cells: Vec<u8>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty.raw(); width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Pos2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "({x},{y}) is outside of the {}x{} board",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// The cell at `(x, y)`
    ///
    /// A byte outside the known states reads as [`Cell::Empty`]; only the
    /// rasterizer reports those.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        Cell::from_raw(self.cells[self.index(x, y)]).unwrap_or_default()
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell.raw();
    }

    #[inline]
    pub fn get_at(&self, pos: Pos2) -> Option<Cell> {
        self.contains(pos)
            .then(|| self.get(pos.x as usize, pos.y as usize))
    }
    /// Sets the cell at `pos`, returning `false` if it is off the board
    #[inline]
    pub fn set_at(&mut self, pos: Pos2, cell: Cell) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.set(pos.x as usize, pos.y as usize, cell);
        true
    }

    #[inline]
    pub(crate) fn raw(&self, x: usize, y: usize) -> u8 {
        self.cells[self.index(x, y)]
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty.raw());
    }

    /// Makes every cell independently alive with the given probability
    pub fn randomize<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) {
        let probability = probability.clamp(0.0, 1.0);
        for cell in self.cells.iter_mut() {
            *cell = if rng.random_bool(probability) {
                Cell::Alive.raw()
            } else {
                Cell::Empty.raw()
            };
        }
    }

    pub fn count_alive(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&raw| raw == Cell::Alive.raw())
            .count()
    }

    /// The neighbors of `(x, y)` that exist on the board
    ///
    /// Inner cells have 8, edge cells 5 and corner cells 3.
    pub fn neighbors_of(&self, x: usize, y: usize) -> impl Iterator<Item = Cell> + '_ {
        Pos2::new(x as i32, y as i32)
            .around()
            .filter_map(|pos| self.get_at(pos))
    }

    #[inline]
    pub fn live_neighbors(&self, x: usize, y: usize) -> usize {
        count_live_around(&self.cells, self.width, self.height, x, y)
    }

    /// Every alive cell, in row-major order
    pub fn alive_positions(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &raw)| raw == Cell::Alive.raw())
            .map(|(i, _)| Pos2::new((i % self.width) as i32, (i / self.width) as i32))
    }

    /// Marks `alive` (relative to `origin`) as alive, skipping cells that fall off the board
    ///
    /// Returns the number of cells that landed on the board.
    pub fn stamp(&mut self, origin: Pos2, alive: &[Pos2]) -> usize {
        alive
            .iter()
            .filter(|&&pos| self.set_at(origin + pos, Cell::Alive))
            .count()
    }

    /// A printable view of the cells in `[top_left, bottom_right)`
    pub fn window(&self, top_left: Pos2, bottom_right: Pos2) -> BoardWindow<'_> {
        BoardWindow::new(self, top_left, bottom_right)
    }
}

/// Counts the alive bytes around `(x, y)` in a row-major buffer, without wrapping
#[inline]
pub(crate) fn count_live_around(cells: &[u8], width: usize, height: usize, x: usize, y: usize) -> usize {
    let alive = Cell::Alive.raw();
    let x0 = x.saturating_sub(1);
    let x1 = (x + 1).min(width - 1);
    let y0 = y.saturating_sub(1);
    let y1 = (y + 1).min(height - 1);

    let mut count = 0;
    for ny in y0..=y1 {
        let row = &cells[ny * width..(ny + 1) * width];
        for (nx, &raw) in row.iter().enumerate().take(x1 + 1).skip(x0) {
            if raw == alive && !(nx == x && ny == y) {
                count += 1;
            }
        }
    }
    count
}
