use serde::{Deserialize, Serialize};

/// Mine-layer truth for a single position, fixed once the minefield is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// `exploded` is only ever set on the bomb whose reveal ended the game.
    Bomb { exploded: bool },
    /// Number of bombs among the 8 neighbors, always in `1..=8`.
    BombNeighbor(u8),
    Empty,
}

impl Cell {
    pub const fn bomb() -> Self {
        Self::Bomb { exploded: false }
    }

    /// Cell for a safe position with `count` adjacent bombs.
    pub const fn from_count(count: u8) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::BombNeighbor(count)
        }
    }

    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb { .. })
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Adjacent bomb count for safe cells, `None` for bombs.
    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Bomb { .. } => None,
            Self::BombNeighbor(count) => Some(count),
            Self::Empty => Some(0),
        }
    }
}

/// Player-visible wrapper around a [`Cell`].
///
/// Only the wrapper changes during play: `Unrevealed <-> Flagged`, and either of
/// those to `Revealed`, which is final.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCell {
    Unrevealed(Cell),
    Flagged(Cell),
    Revealed(Cell),
}

impl GameCell {
    pub const fn cell(self) -> Cell {
        match self {
            Self::Unrevealed(cell) | Self::Flagged(cell) | Self::Revealed(cell) => cell,
        }
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged(_))
    }

    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Unrevealed(_) | Self::Flagged(_))
    }
}

impl From<Cell> for GameCell {
    fn from(cell: Cell) -> Self {
        Self::Unrevealed(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_zero_is_empty() {
        assert_eq!(Cell::from_count(0), Cell::Empty);
        assert_eq!(Cell::from_count(3), Cell::BombNeighbor(3));
        assert_eq!(Cell::Empty.count(), Some(0));
        assert_eq!(Cell::bomb().count(), None);
    }

    #[test]
    fn wrapper_keeps_cell_identity() {
        let cell = Cell::BombNeighbor(2);

        for game_cell in [
            GameCell::Unrevealed(cell),
            GameCell::Flagged(cell),
            GameCell::Revealed(cell),
        ] {
            assert_eq!(game_cell.cell(), cell);
        }
        assert!(GameCell::Flagged(cell).is_unrevealed());
        assert!(!GameCell::Revealed(cell).is_unrevealed());
    }
}
