//! Square row-major grid storage shared by terrain and climate fields.

use std::ops::{Index, IndexMut};

/// A fixed-size `size × size` grid stored as a flat row-major vector.
///
/// Cell `(i, j)` lives at index `i * size + j`. The length never changes after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }

    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Grid<T> {
    /// Wraps an existing row-major vector.
    ///
    /// # Panics
    /// Panics if `cells.len() != size * size`.
    pub fn from_vec(size: usize, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            size * size,
            "grid of size {size} needs {} cells",
            size * size
        );
        Self { size, cells }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of cell `(i, j)`.
    #[inline]
    pub fn index_of(&self, i: usize, j: usize) -> usize {
        i * self.size + j
    }

    /// Row/column of a flat index.
    #[inline]
    pub fn coords_of(&self, cell: usize) -> (usize, usize) {
        (cell / self.size, cell % self.size)
    }

    /// True for cells on the outermost ring.
    #[inline]
    pub fn is_border(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 >= self.size || j + 1 >= self.size
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, cell: usize) -> &T {
        &self.cells[cell]
    }
}

impl<T> IndexMut<usize> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, cell: usize) -> &mut T {
        &mut self.cells[cell]
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.cells[i * self.size + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.cells[i * self.size + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_indexing() {
        let mut grid = Grid::filled(4, 0u8);
        grid[(1, 2)] = 7;
        assert_eq!(grid[6], 7);
        assert_eq!(grid.index_of(1, 2), 6);
        assert_eq!(grid.coords_of(6), (1, 2));
    }

    #[test]
    fn border_ring() {
        let grid = Grid::filled(5, 0.0f32);
        assert!(grid.is_border(0, 3));
        assert!(grid.is_border(4, 1));
        assert!(grid.is_border(2, 0));
        assert!(grid.is_border(2, 4));
        assert!(!grid.is_border(2, 2));
        assert!(!grid.is_border(1, 3));
    }

    #[test]
    #[should_panic]
    fn from_vec_rejects_wrong_length() {
        let _ = Grid::from_vec(3, vec![0.0f32; 8]);
    }
}
