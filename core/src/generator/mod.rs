use crate::*;
pub use shuffle::*;

mod shuffle;

/// Mine-layer truth for a whole board.
pub type Minefield = Grid<Cell>;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield>;
}

/// Derives the cell layer from a bomb mask, counting bombs among each safe cell's neighbors.
pub fn minefield_from_mask(mask: &Grid<bool>) -> Minefield {
    mask.indexed_map(|pos, &is_bomb| {
        if is_bomb {
            Cell::bomb()
        } else {
            let count = mask
                .iter_neighbor_cells(pos)
                .filter(|&(_, &neighbor)| neighbor)
                .count();
            // at most 8 neighbors
            Cell::from_count(count as u8)
        }
    })
}

/// Builds a minefield with bombs at exactly the given positions.
pub fn minefield_from_bombs(size: Size, bombs: &[Pos]) -> Result<Minefield> {
    let mut mask = Grid::from_elem(size, false);
    for &pos in bombs {
        let cell = mask.get_mut(pos).ok_or(GameError::InvalidCoords)?;
        *cell = true;
    }
    Ok(minefield_from_mask(&mask))
}
