use std::{
    cmp::Ordering,
    ops::{Add, Sub},
};

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos2 {
    pub x: i32,
    pub y: i32,
}
impl Pos2 {
    /// Offsets to the eight surrounding cells, row by row starting at the top left
    pub const NEIGHBOR_OFFSETS: [Pos2; 8] = [
        Pos2::new(-1, -1),
        Pos2::new(0, -1),
        Pos2::new(1, -1),
        Pos2::new(-1, 0),
        Pos2::new(1, 0),
        Pos2::new(-1, 1),
        Pos2::new(0, 1),
        Pos2::new(1, 1),
    ];

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Maps a pixel coordinate to the cell that contains it
    ///
    /// Uses floor division, so pixels left of or above the origin land on
    /// negative cells instead of collapsing onto row/column 0.
    #[inline]
    pub fn from_pixel(px: i32, py: i32, cell_size: u32) -> Self {
        let size = cell_size.max(1) as i32;
        Self {
            x: px.div_euclid(size),
            y: py.div_euclid(size),
        }
    }

    /// The positions around this one, including ones that fall off any board
    #[inline]
    pub fn around(self) -> impl Iterator<Item = Pos2> {
        Self::NEIGHBOR_OFFSETS.into_iter().map(move |offset| self + offset)
    }
}
impl Default for Pos2 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major: compare y first, then x
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}
impl Add for Pos2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl Sub for Pos2 {
    type Output = Pos2;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixel_floors_toward_negative() {
        assert_eq!(Pos2::from_pixel(17, 8, 8), Pos2::new(2, 1));
        assert_eq!(Pos2::from_pixel(7, 7, 8), Pos2::new(0, 0));
        assert_eq!(Pos2::from_pixel(-1, 3, 8), Pos2::new(-1, 0));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut cells = vec![Pos2::new(3, 1), Pos2::new(0, 2), Pos2::new(5, 0)];
        cells.sort();

        assert_eq!(cells, vec![Pos2::new(5, 0), Pos2::new(3, 1), Pos2::new(0, 2)]);
    }
}
