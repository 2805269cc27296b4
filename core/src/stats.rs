use serde::{Deserialize, Serialize};

use crate::*;

/// Aggregate counts over a board snapshot, recomputed on demand.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStats {
    pub cells_count: CellCount,
    pub bombs_count: CellCount,
    pub unrevealed_cells_count: CellCount,
    pub flagged_count: CellCount,
}

impl BoardStats {
    pub fn of(board: &Board) -> Self {
        board
            .grid()
            .iter()
            .fold(Self::default(), |mut stats, &game_cell| {
                stats.cells_count += 1;
                if game_cell.cell().is_bomb() {
                    stats.bombs_count += 1;
                }
                match game_cell {
                    GameCell::Unrevealed(_) => stats.unrevealed_cells_count += 1,
                    GameCell::Flagged(_) => {
                        stats.unrevealed_cells_count += 1;
                        stats.flagged_count += 1;
                    }
                    GameCell::Revealed(_) => {}
                }
                stats
            })
    }

    /// Every safe cell is revealed, so only bombs (flagged or not) remain hidden.
    pub const fn is_complete(&self) -> bool {
        self.bombs_count == self.unrevealed_cells_count
    }

    pub const fn revealed_count(&self) -> CellCount {
        self.cells_count - self.unrevealed_cells_count
    }

    /// Bombs minus flags, negative when the player over-flags.
    pub const fn bombs_left(&self) -> i32 {
        self.bombs_count as i32 - self.flagged_count as i32
    }
}

impl Board {
    pub fn stats(&self) -> BoardStats {
        BoardStats::of(self)
    }
}
