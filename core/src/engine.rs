use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Playable board: the visibility layer wrapped around a generated minefield.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    grid: Grid<GameCell>,
}

impl Board {
    /// Wraps every cell of `minefield` as unrevealed.
    pub fn new(minefield: &Minefield) -> Self {
        Self {
            grid: minefield.map(|&cell| GameCell::Unrevealed(cell)),
        }
    }

    pub fn grid(&self) -> &Grid<GameCell> {
        &self.grid
    }

    pub fn size(&self) -> Size {
        self.grid.size()
    }

    pub fn get(&self, pos: Pos) -> Option<GameCell> {
        self.grid.get(pos).copied()
    }

    /// The mine-layer cell under `pos`, regardless of visibility.
    pub fn peek(&self, pos: Pos) -> Option<Cell> {
        self.get(pos).map(GameCell::cell)
    }

    /// Reveals a single position without cascading.
    ///
    /// Whatever wrapper the cell had is replaced by `Revealed`; flags do not protect a cell.
    pub fn reveal(&mut self, pos: Pos) -> Option<Cell> {
        let game_cell = self.grid.get_mut(pos)?;
        let cell = game_cell.cell();
        *game_cell = GameCell::Revealed(cell);
        Some(cell)
    }

    /// Toggles a flag on an unrevealed cell.
    pub fn flag(&mut self, pos: Pos) -> MarkOutcome {
        let Some(game_cell) = self.grid.get_mut(pos) else {
            return MarkOutcome::NoChange;
        };

        match *game_cell {
            GameCell::Unrevealed(cell) => {
                *game_cell = GameCell::Flagged(cell);
                MarkOutcome::Changed
            }
            GameCell::Flagged(cell) => {
                *game_cell = GameCell::Unrevealed(cell);
                MarkOutcome::Changed
            }
            GameCell::Revealed(_) => MarkOutcome::NoChange,
        }
    }

    /// Reveals `pos` and, if it is empty, flood-fills the surrounding empty region.
    ///
    /// The fill stops at (and reveals) bomb-neighbor cells and never reveals a bomb.
    pub fn cascade_reveal(&mut self, pos: Pos) -> Option<Cell> {
        let cell = self.reveal(pos)?;
        if !cell.is_empty() {
            return Some(cell);
        }

        let mut visited = HashSet::new();
        visited.insert(pos);
        let mut to_visit: VecDeque<Pos> = self.hidden_neighbors(pos).collect();
        let mut opened = 1usize;

        while let Some(visit_pos) = to_visit.pop_front() {
            if !visited.insert(visit_pos) {
                continue;
            }

            let visit_cell = match self.get(visit_pos) {
                Some(GameCell::Unrevealed(cell) | GameCell::Flagged(cell)) if !cell.is_bomb() => {
                    cell
                }
                _ => continue,
            };

            self.reveal(visit_pos);
            opened += 1;
            log::trace!("Flood revealed {:?}: {:?}", visit_pos, visit_cell);

            if visit_cell.is_empty() {
                to_visit.extend(
                    self.hidden_neighbors(visit_pos)
                        .filter(|neighbor| !visited.contains(neighbor)),
                );
            }
        }

        log::debug!("Cascade from {:?} revealed {} cells", pos, opened);
        Some(cell)
    }

    /// Discloses every cell, leaving the exploded flags as they are.
    pub fn reveal_all(&mut self) {
        for game_cell in self.grid.iter_mut() {
            *game_cell = GameCell::Revealed(game_cell.cell());
        }
    }

    /// Marks the bomb at `pos` as the one that went off. Returns whether there was a bomb.
    pub fn mark_exploded(&mut self, pos: Pos) -> bool {
        match self.grid.get_mut(pos) {
            Some(
                GameCell::Unrevealed(Cell::Bomb { exploded })
                | GameCell::Flagged(Cell::Bomb { exploded })
                | GameCell::Revealed(Cell::Bomb { exploded }),
            ) => {
                *exploded = true;
                true
            }
            _ => false,
        }
    }

    /// Hidden neighbors a chord on `pos` would open.
    ///
    /// Empty unless `pos` is a revealed bomb-neighbor whose count equals the flags around it.
    pub fn chord_targets(&self, pos: Pos) -> Vec<Pos> {
        let Some(GameCell::Revealed(Cell::BombNeighbor(count))) = self.get(pos) else {
            return Vec::new();
        };

        let flagged = self
            .grid
            .iter_neighbor_cells(pos)
            .filter(|(_, neighbor)| neighbor.is_flagged())
            .count();
        if flagged != usize::from(count) {
            return Vec::new();
        }

        self.grid
            .iter_neighbor_cells(pos)
            .filter(|(_, neighbor)| matches!(neighbor, GameCell::Unrevealed(_)))
            .map(|(neighbor_pos, _)| neighbor_pos)
            .collect()
    }

    fn hidden_neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + use<'_> {
        self.grid
            .iter_neighbor_cells(pos)
            .filter(|(_, neighbor)| !neighbor.is_revealed())
            .map(|(neighbor_pos, _)| neighbor_pos)
    }
}
