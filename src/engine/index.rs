use crate::board::Cell;
use std::sync::OnceLock;

/// Live neighbor counts range over `0..=8`
pub(super) const NEIGHBOR_COUNTS: usize = 9;
pub(super) type RuleTable = [[Cell; NEIGHBOR_COUNTS]; Cell::COUNT];

/// Returns a Singleton lookup table for the three-state Game of Life ruleset
///
/// Equivalent to calling [`generate_rule_table`] once and storing the result
pub(super) fn rule_table() -> &'static RuleTable {
    static CELL: OnceLock<RuleTable> = OnceLock::new();
    CELL.get_or_init(generate_rule_table)
}

/// Creates a lookup table for the three-state Game of Life ruleset
///
/// The table is indexed by the raw byte of the current cell, then by its
/// number of live neighbors, and yields the cell's next state.
///
/// Alive cells with 2 or 3 live neighbors survive and otherwise turn Dead.
/// Empty and Dead cells with exactly 3 become Alive and otherwise keep their state.
pub(super) fn generate_rule_table() -> RuleTable {
    let mut table = [[Cell::Empty; NEIGHBOR_COUNTS]; Cell::COUNT];
    for cell in Cell::ALL {
        for neighbors in 0..NEIGHBOR_COUNTS {
            table[cell.raw() as usize][neighbors] = match (cell, neighbors) {
                (Cell::Alive, 2 | 3) => Cell::Alive,
                (Cell::Alive, _) => Cell::Dead,
                (_, 3) => Cell::Alive,
                (other, _) => other,
            };
        }
    }
    table
}
