use ndarray::Array2;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::*;

/// Fixed-size row-major container addressed by `(row, column)`.
///
/// Height and width are fixed once built and never exceed `Coord::MAX`. Every
/// accessor is bounds-checked: reading outside the grid yields `None` and
/// writing outside it is a no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Array2<T>,
}

/// Array index inside a grid, which always fits in a `Coord`.
fn coord(index: usize) -> Coord {
    Coord::try_from(index).unwrap_or(Coord::MAX)
}

impl<T> TryFrom<Array2<T>> for Grid<T> {
    type Error = GameError;

    fn try_from(cells: Array2<T>) -> Result<Self> {
        if Coord::try_from(cells.nrows()).is_err() || Coord::try_from(cells.ncols()).is_err() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }
}

impl<T: Serialize> Serialize for Grid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Grid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let cells = Array2::<T>::deserialize(deserializer)?;
        Self::try_from(cells).map_err(de::Error::custom)
    }
}

impl<T> Grid<T> {
    pub fn from_elem(size: Size, elem: T) -> Self
    where
        T: Clone,
    {
        Self {
            cells: Array2::from_elem(size.to_nd_index(), elem),
        }
    }

    pub fn from_fn(size: Size, mut f: impl FnMut(Pos) -> T) -> Self {
        Self {
            cells: Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
                f((coord(row), coord(col)))
            }),
        }
    }

    /// Reshapes a flat row-major sequence into a grid of `size`.
    pub fn from_shape_vec(size: Size, cells: Vec<T>) -> Result<Self> {
        let cells = Array2::from_shape_vec(size.to_nd_index(), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    pub fn size(&self) -> Size {
        (self.rows(), self.columns())
    }

    pub fn rows(&self) -> Coord {
        coord(self.cells.nrows())
    }

    pub fn columns(&self) -> Coord {
        coord(self.cells.ncols())
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.cells.get(pos.to_nd_index())
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        self.cells.get_mut(pos.to_nd_index())
    }

    /// Returns the grid with `value` stored at `pos`, or unchanged when `pos` is out of range.
    #[must_use]
    pub fn set(mut self, pos: Pos, value: T) -> Self {
        if let Some(cell) = self.get_mut(pos) {
            *cell = value;
        }
        self
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.map(|cell| f(cell)),
        }
    }

    pub fn indexed_map<U>(&self, mut f: impl FnMut(Pos, &T) -> U) -> Grid<U> {
        Grid {
            cells: Array2::from_shape_fn(self.cells.raw_dim(), |(row, col)| {
                f((coord(row), coord(col)), &self.cells[[row, col]])
            }),
        }
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    pub fn indexed_iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((coord(row), coord(col)), cell))
    }

    pub fn iter_neighbors(&self, pos: Pos) -> NeighborIter {
        NeighborIter::new(pos, self.size())
    }

    pub fn iter_neighbor_cells(&self, pos: Pos) -> impl Iterator<Item = (Pos, &T)> {
        self.iter_neighbors(pos)
            .filter_map(|neighbor| self.get(neighbor).map(|cell| (neighbor, cell)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_out_of_range_is_absent() {
        let grid = Grid::from_elem((2, 3), 0u8);

        assert_eq!(grid.get((1, 2)), Some(&0));
        assert_eq!(grid.get((2, 0)), None);
        assert_eq!(grid.get((0, 3)), None);
    }

    #[test]
    fn set_out_of_range_copies_through() {
        let grid = Grid::from_elem((2, 2), 'a');

        let same = grid.clone().set((5, 5), 'b');
        assert_eq!(same, grid);

        let changed = grid.set((1, 0), 'b');
        assert_eq!(changed.get((1, 0)), Some(&'b'));
        assert_eq!(changed.get((0, 0)), Some(&'a'));
    }

    #[test]
    fn from_shape_vec_is_row_major() {
        let grid = Grid::from_shape_vec((2, 3), vec![0, 1, 2, 3, 4, 5]).unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.get((0, 2)), Some(&2));
        assert_eq!(grid.get((1, 0)), Some(&3));
    }

    #[test]
    fn from_shape_vec_rejects_wrong_length() {
        let err = Grid::from_shape_vec((2, 2), vec![0; 5]).unwrap_err();
        assert_eq!(err, GameError::InvalidBoardShape);
    }

    #[test]
    fn indexed_map_sees_positions() {
        let grid = Grid::from_elem((2, 2), 10u16);

        let mapped = grid.indexed_map(|(row, col), v| v + u16::from(row) * 2 + u16::from(col));

        assert_eq!(mapped.iter().copied().collect::<Vec<_>>(), vec![10, 11, 12, 13]);
        assert_eq!(mapped.size(), grid.size());
    }

    #[test]
    fn neighbor_cells_stay_in_bounds() {
        let grid = Grid::from_fn((2, 2), |(row, col)| (row, col));

        let around: Vec<_> = grid.iter_neighbor_cells((0, 0)).map(|(_, &v)| v).collect();

        assert_eq!(around, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn deserialize_keeps_small_shapes() {
        let grid = Grid::from_fn((2, 3), |(row, col)| row * 3 + col);

        let json = serde_json::to_value(&grid).unwrap();
        let back: Grid<u8> = serde_json::from_value(json).unwrap();

        assert_eq!(back, grid);
    }

    #[test]
    fn deserialize_rejects_oversized_shapes() {
        let tall = serde_json::json!({ "v": 1, "dim": [256, 1], "data": vec![0u8; 256] });
        assert!(serde_json::from_value::<Grid<u8>>(tall).is_err());

        let wide = serde_json::json!({ "v": 1, "dim": [1, 256], "data": vec![0u8; 256] });
        assert!(serde_json::from_value::<Grid<u8>>(wide).is_err());

        let widest = serde_json::json!({ "v": 1, "dim": [1, 255], "data": vec![0u8; 255] });
        let grid = serde_json::from_value::<Grid<u8>>(widest).unwrap();
        assert_eq!(grid.size(), (1, 255));
    }
}
