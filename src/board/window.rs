use super::{Board, Cell};
use crate::Pos2;

/// A rectangular view over a [`Board`], printable as text
///
/// Alive cells print as `O`, dead cells as `x` and empty cells as `.`.
/// Positions of the window that fall off the board are skipped.
pub struct BoardWindow<'a> {
    tl: Pos2,
    br: Pos2,
    board: &'a Board,
}
impl<'a> BoardWindow<'a> {
    pub fn new(board: &'a Board, top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
            board,
        }
    }

    /// The on-board cells of the window, row by row
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Pos2, Cell)> + '_ {
        (self.tl.y..self.br.y)
            .flat_map(move |y| (self.tl.x..self.br.x).map(move |x| Pos2::new(x, y)))
            .filter_map(|pos| self.board.get_at(pos).map(|cell| (pos, cell)))
    }
}

impl<'a> std::fmt::Display for BoardWindow<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut last_row = None;
        for (pos, cell) in self.iter() {
            if last_row.is_some_and(|row| row != pos.y) {
                writeln!(f)?;
            }
            last_row = Some(pos.y);

            let c = match cell {
                Cell::Empty => '.',
                Cell::Alive => 'O',
                Cell::Dead => 'x',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_rows_of_cells() {
        let mut board = Board::new(3, 2);
        board.set(0, 0, Cell::Alive);
        board.set(2, 1, Cell::Dead);

        let text = board.window(Pos2::zero(), Pos2::new(3, 2)).to_string();
        assert_eq!(text, "O..\n..x");
    }

    #[test]
    fn clips_to_the_board() {
        let mut board = Board::new(2, 2);
        board.set(1, 1, Cell::Alive);

        let text = board.window(Pos2::new(-1, -1), Pos2::new(5, 5)).to_string();
        assert_eq!(text, "..\n.O");
    }
}
