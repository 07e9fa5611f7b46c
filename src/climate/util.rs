//! Shared helpers for climate computations.

use glam::DVec2;
use rayon::prelude::*;

use crate::grid::Grid;

/// Source coordinate `c + offset`, truncated toward zero.
///
/// Falls back to `c` when the result leaves `[0, n-1]`; there is no
/// wraparound.
#[inline]
pub fn source_coord(c: usize, offset: f64, n: usize) -> usize {
    let t = (c as f64 + offset).trunc();
    if t >= 0.0 && t <= (n - 1) as f64 {
        t as usize
    } else {
        c
    }
}

/// Flat index of the cell `(i, j)` draws from when displaced by `offset`.
#[inline]
pub fn source_cell(i: usize, j: usize, offset: DVec2, n: usize) -> usize {
    source_coord(i, offset.x, n) * n + source_coord(j, offset.y, n)
}

/// Moves every interior cell's value in from its upwind source cell.
///
/// The upwind distance is `scale * wind[cell] * direction`. Reads only
/// `field`, so the result does not depend on iteration order. Border cells
/// keep their value.
pub fn advect<T>(field: &Grid<T>, wind: &Grid<f32>, direction: DVec2, scale: f64) -> Grid<T>
where
    T: Copy + Send + Sync,
{
    let n = field.size();
    let cells: Vec<T> = (0..field.len())
        .into_par_iter()
        .map(|cell| {
            let (i, j) = (cell / n, cell % n);
            if field.is_border(i, j) {
                return field[cell];
            }
            let offset = direction * (scale * wind[cell] as f64);
            field[source_cell(i, j, offset, n)]
        })
        .collect();
    Grid::from_vec(n, cells)
}

/// Clamps a fractional field value into [0, 1].
#[inline]
pub fn clamp_unit(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_coord_truncates_toward_zero() {
        assert_eq!(source_coord(5, 2.7, 10), 7);
        assert_eq!(source_coord(5, -2.7, 10), 2);
        // -0.5 truncates to 0, which is in range.
        assert_eq!(source_coord(0, -0.5, 10), 0);
    }

    #[test]
    fn source_coord_falls_back_out_of_range() {
        assert_eq!(source_coord(2, -3.0, 10), 2);
        assert_eq!(source_coord(8, 2.0, 10), 8);
        assert_eq!(source_coord(8, 1.0, 10), 9);
        assert_eq!(source_coord(4, f64::NAN, 10), 4);
    }

    #[test]
    fn advect_shifts_interior_only() {
        let n = 5;
        let field = Grid::from_vec(n, (0..25).map(|v| v as f32).collect());
        let wind = Grid::filled(n, 1.0f32);
        // One cell down, no sideways drift.
        let out = advect(&field, &wind, DVec2::new(1.0, 0.0), 1.0);

        assert_eq!(out[(1, 1)], field[(2, 1)]);
        assert_eq!(out[(3, 2)], field[(4, 2)]);
        for j in 0..n {
            assert_eq!(out[(0, j)], field[(0, j)]);
            assert_eq!(out[(4, j)], field[(4, j)]);
        }
    }

    #[test]
    fn advect_without_wind_is_identity() {
        let n = 6;
        let field = Grid::from_vec(n, (0..36).map(|v| v % 2 == 0).collect());
        let wind = Grid::filled(n, 0.0f32);
        let out = advect(&field, &wind, DVec2::new(0.8, -0.4), 2.0);
        assert_eq!(out, field);
    }
}
